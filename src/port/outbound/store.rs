//! Persistence ports for prompt context.

use std::future::Future;

use crate::domain::context::{Annotation, Example, NewAnnotation, NewExample};
use crate::error::Result;

/// Storage operations for question/SQL examples.
pub trait ExampleStore: Send + Sync {
    /// Persist an example and return it with its assigned ID.
    fn add_example(&self, example: NewExample) -> impl Future<Output = Result<Example>> + Send;

    /// List all examples, oldest first.
    fn list_examples(&self) -> impl Future<Output = Result<Vec<Example>>> + Send;

    /// Delete an example by ID. Returns whether it existed.
    fn remove_example(&self, id: i64) -> impl Future<Output = Result<bool>> + Send;

    /// Delete every example. Returns count deleted.
    fn clear_examples(&self) -> impl Future<Output = Result<usize>> + Send;
}

/// Storage operations for free-text annotations.
pub trait AnnotationStore: Send + Sync {
    /// Persist an annotation and return it with its assigned ID.
    fn add_annotation(
        &self,
        annotation: NewAnnotation,
    ) -> impl Future<Output = Result<Annotation>> + Send;

    /// List all annotations, oldest first.
    fn list_annotations(&self) -> impl Future<Output = Result<Vec<Annotation>>> + Send;

    /// Delete an annotation by ID. Returns whether it existed.
    fn remove_annotation(&self, id: i64) -> impl Future<Output = Result<bool>> + Send;

    /// Delete every annotation. Returns count deleted.
    fn clear_annotations(&self) -> impl Future<Output = Result<usize>> + Send;
}
