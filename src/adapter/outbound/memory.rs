//! In-memory context store.
//!
//! Used when `store.backend = "memory"` and in tests. Contents are lost when
//! the process exits.

use std::collections::BTreeMap;

use chrono::Utc;
use parking_lot::RwLock;

use crate::domain::context::{Annotation, Example, NewAnnotation, NewExample};
use crate::error::Result;
use crate::port::outbound::store::{AnnotationStore, ExampleStore};

/// Entries keyed by ID with a monotonically increasing counter.
#[derive(Debug)]
struct Table<T> {
    next_id: i64,
    rows: BTreeMap<i64, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

impl<T> Table<T> {
    fn allocate(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn clear(&mut self) -> usize {
        let count = self.rows.len();
        self.rows.clear();
        count
    }
}

/// Process-local store for examples and annotations.
#[derive(Debug, Default)]
pub struct MemoryContextStore {
    examples: RwLock<Table<Example>>,
    annotations: RwLock<Table<Annotation>>,
}

impl MemoryContextStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ExampleStore for MemoryContextStore {
    async fn add_example(&self, example: NewExample) -> Result<Example> {
        let mut table = self.examples.write();
        let id = table.allocate();
        let example = example.into_example(id, Utc::now());
        table.rows.insert(id, example.clone());
        Ok(example)
    }

    async fn list_examples(&self) -> Result<Vec<Example>> {
        Ok(self.examples.read().rows.values().cloned().collect())
    }

    async fn remove_example(&self, id: i64) -> Result<bool> {
        Ok(self.examples.write().rows.remove(&id).is_some())
    }

    async fn clear_examples(&self) -> Result<usize> {
        Ok(self.examples.write().clear())
    }
}

impl AnnotationStore for MemoryContextStore {
    async fn add_annotation(&self, annotation: NewAnnotation) -> Result<Annotation> {
        let mut table = self.annotations.write();
        let id = table.allocate();
        let annotation = annotation.into_annotation(id, Utc::now());
        table.rows.insert(id, annotation.clone());
        Ok(annotation)
    }

    async fn list_annotations(&self) -> Result<Vec<Annotation>> {
        Ok(self.annotations.read().rows.values().cloned().collect())
    }

    async fn remove_annotation(&self, id: i64) -> Result<bool> {
        Ok(self.annotations.write().rows.remove(&id).is_some())
    }

    async fn clear_annotations(&self) -> Result<usize> {
        Ok(self.annotations.write().clear())
    }
}
