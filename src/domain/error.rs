//! Domain validation errors.
//!
//! Returned by the `try_new` constructors of the context types and by the
//! query pipeline when a request is rejected before any I/O happens.
//!
//! # Examples
//!
//! ```
//! use askdb::domain::context::NewExample;
//! use askdb::domain::error::DomainError;
//!
//! let result = NewExample::try_new("   ", "SELECT 1");
//! assert!(matches!(result, Err(DomainError::EmptyQuestion)));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Questions must contain non-whitespace text.
    #[error("question cannot be empty")]
    EmptyQuestion,

    /// Example queries must contain non-whitespace text.
    #[error("example SQL cannot be empty")]
    EmptySql,

    /// Annotations must contain non-whitespace text.
    #[error("annotation cannot be empty")]
    EmptyAnnotation,

    /// No stored item has the requested ID.
    #[error("no {kind} with id {id}")]
    NotFound { kind: &'static str, id: i64 },
}
