//! Question answering use case.

use std::path::Path;

use async_trait::async_trait;

use crate::domain::query::QueryOutcome;
use crate::domain::schema::Schema;
use crate::error::Result;

/// Turn a natural-language question into SQL and run it.
#[async_trait]
pub trait TextToSql: Send + Sync {
    /// Answer `question` against the database file at `database`.
    ///
    /// A query the database rejects is not an error: the returned outcome
    /// carries the generated SQL and the engine's message.
    ///
    /// # Errors
    ///
    /// Returns an error when the question is blank, the file is not a
    /// readable database, or the model request fails.
    async fn ask(&self, database: &Path, question: &str) -> Result<QueryOutcome>;

    /// Introspect the database file without calling the model.
    ///
    /// # Errors
    ///
    /// Returns an error when the file is not a readable database.
    async fn schema(&self, database: &Path) -> Result<Schema>;
}
