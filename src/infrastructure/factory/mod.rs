//! Factory modules for building infrastructure components.
//!
//! Provides factory functions that construct fully-configured infrastructure
//! components from application configuration.
//!
//! # Submodules
//!
//! - [`llm`] - LLM client construction
//! - [`store`] - Context store construction

pub mod llm;
pub mod store;
