//! Inbound (driving) ports consumed by inbound adapters.
//!
//! Inbound ports expose application capabilities to external drivers:
//!
//! - HTTP server
//! - Command-line interface (CLI)
//!
//! # Modules
//!
//! - [`query`]: Question answering against an uploaded database
//! - [`context`]: Example and annotation management

pub mod context;
pub mod query;

use context::ContextManager;
use query::TextToSql;

/// Unified capability surface consumed by inbound adapters.
pub trait QueryPort: TextToSql + ContextManager {}

impl<T> QueryPort for T where T: TextToSql + ContextManager {}
