//! Example and annotation management.
//!
//! Validates user input through the domain constructors before anything
//! reaches the store. Needs no model, so the CLI can manage context without
//! an API key.

use async_trait::async_trait;
use tracing::info;

use crate::domain::context::{Annotation, Example, NewAnnotation, NewExample};
use crate::error::Result;
use crate::port::inbound::context::ContextManager;
use crate::port::outbound::store::{AnnotationStore, ExampleStore};

/// Context management over a store.
pub struct ContextService<S> {
    store: S,
}

impl<S> ContextService<S>
where
    S: ExampleStore + AnnotationStore,
{
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Underlying store, for read paths that skip validation.
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[async_trait]
impl<S> ContextManager for ContextService<S>
where
    S: ExampleStore + AnnotationStore + 'static,
{
    async fn add_example(&self, question: &str, sql: &str) -> Result<Example> {
        let example = NewExample::try_new(question, sql)?;
        let stored = self.store.add_example(example).await?;
        info!(id = stored.id, "Example stored");
        Ok(stored)
    }

    async fn list_examples(&self) -> Result<Vec<Example>> {
        self.store.list_examples().await
    }

    async fn remove_example(&self, id: i64) -> Result<bool> {
        let removed = self.store.remove_example(id).await?;
        if removed {
            info!(id, "Example removed");
        }
        Ok(removed)
    }

    async fn clear_examples(&self) -> Result<usize> {
        let count = self.store.clear_examples().await?;
        info!(count, "Examples cleared");
        Ok(count)
    }

    async fn add_annotation(&self, text: &str) -> Result<Annotation> {
        let annotation = NewAnnotation::try_new(text)?;
        let stored = self.store.add_annotation(annotation).await?;
        info!(id = stored.id, "Annotation stored");
        Ok(stored)
    }

    async fn list_annotations(&self) -> Result<Vec<Annotation>> {
        self.store.list_annotations().await
    }

    async fn remove_annotation(&self, id: i64) -> Result<bool> {
        let removed = self.store.remove_annotation(id).await?;
        if removed {
            info!(id, "Annotation removed");
        }
        Ok(removed)
    }

    async fn clear_annotations(&self) -> Result<usize> {
        let count = self.store.clear_annotations().await?;
        info!(count, "Annotations cleared");
        Ok(count)
    }
}
