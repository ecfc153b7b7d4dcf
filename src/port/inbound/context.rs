//! Management of stored prompt context.

use async_trait::async_trait;

use crate::domain::context::{Annotation, Example};
use crate::error::Result;

/// Add, list and remove the examples and annotations fed into prompts.
#[async_trait]
pub trait ContextManager: Send + Sync {
    /// Validate and store a question/SQL pair.
    async fn add_example(&self, question: &str, sql: &str) -> Result<Example>;

    async fn list_examples(&self) -> Result<Vec<Example>>;

    async fn remove_example(&self, id: i64) -> Result<bool>;

    async fn clear_examples(&self) -> Result<usize>;

    /// Validate and store a free-text annotation.
    async fn add_annotation(&self, text: &str) -> Result<Annotation>;

    async fn list_annotations(&self) -> Result<Vec<Annotation>>;

    async fn remove_annotation(&self, id: i64) -> Result<bool>;

    async fn clear_annotations(&self) -> Result<usize>;
}
