//! Context store factory.

use tracing::{info, warn};

use crate::adapter::outbound::memory::MemoryContextStore;
use crate::adapter::outbound::sqlite::database::connection::open_database;
use crate::adapter::outbound::sqlite::store::SqliteContextStore;
use crate::domain::context::{Annotation, Example, NewAnnotation, NewExample};
use crate::error::Result;
use crate::infrastructure::config::store::{StoreBackend, StoreConfig};
use crate::port::outbound::store::{AnnotationStore, ExampleStore};

/// The store selected by `store.backend`.
pub enum ContextStore {
    Sqlite(SqliteContextStore),
    Memory(MemoryContextStore),
}

/// Open the configured store, creating and migrating the SQLite file if needed.
///
/// # Errors
///
/// Returns an error if the SQLite database cannot be opened or migrated.
pub fn build_context_store(config: &StoreConfig) -> Result<ContextStore> {
    match config.backend {
        StoreBackend::Sqlite => {
            let pool = open_database(&config.path)?;
            info!(path = %config.path.display(), "Context store opened");
            Ok(ContextStore::Sqlite(SqliteContextStore::new(pool)))
        }
        StoreBackend::Memory => {
            warn!("Using in-memory context store; examples and annotations are not persisted");
            Ok(ContextStore::Memory(MemoryContextStore::new()))
        }
    }
}

impl ExampleStore for ContextStore {
    async fn add_example(&self, example: NewExample) -> Result<Example> {
        match self {
            Self::Sqlite(s) => s.add_example(example).await,
            Self::Memory(s) => s.add_example(example).await,
        }
    }

    async fn list_examples(&self) -> Result<Vec<Example>> {
        match self {
            Self::Sqlite(s) => s.list_examples().await,
            Self::Memory(s) => s.list_examples().await,
        }
    }

    async fn remove_example(&self, id: i64) -> Result<bool> {
        match self {
            Self::Sqlite(s) => s.remove_example(id).await,
            Self::Memory(s) => s.remove_example(id).await,
        }
    }

    async fn clear_examples(&self) -> Result<usize> {
        match self {
            Self::Sqlite(s) => s.clear_examples().await,
            Self::Memory(s) => s.clear_examples().await,
        }
    }
}

impl AnnotationStore for ContextStore {
    async fn add_annotation(&self, annotation: NewAnnotation) -> Result<Annotation> {
        match self {
            Self::Sqlite(s) => s.add_annotation(annotation).await,
            Self::Memory(s) => s.add_annotation(annotation).await,
        }
    }

    async fn list_annotations(&self) -> Result<Vec<Annotation>> {
        match self {
            Self::Sqlite(s) => s.list_annotations().await,
            Self::Memory(s) => s.list_annotations().await,
        }
    }

    async fn remove_annotation(&self, id: i64) -> Result<bool> {
        match self {
            Self::Sqlite(s) => s.remove_annotation(id).await,
            Self::Memory(s) => s.remove_annotation(id).await,
        }
    }

    async fn clear_annotations(&self) -> Result<usize> {
        match self {
            Self::Sqlite(s) => s.clear_annotations().await,
            Self::Memory(s) => s.clear_annotations().await,
        }
    }
}
