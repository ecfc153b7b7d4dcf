//! Storage- and transport-agnostic types for the question pipeline.
//!
//! - [`schema`] - Introspected tables and columns
//! - [`context`] - Stored examples and annotations
//! - [`prompt`] - Prompt assembly
//! - [`query`] - Generated SQL cleanup and query outcomes
//! - [`error`] - Validation errors

pub mod context;
pub mod error;
pub mod prompt;
pub mod query;
pub mod schema;
