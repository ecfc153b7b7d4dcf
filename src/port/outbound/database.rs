//! Port for the database a question is asked against.

use std::future::Future;
use std::path::Path;

use crate::domain::query::Row;
use crate::domain::schema::Schema;
use crate::error::Result;

/// Introspection and ad-hoc execution over a database file.
///
/// The file is always a scratch copy owned by the caller, so implementations
/// may open it read-write.
pub trait DatabaseEngine: Send + Sync {
    /// List user tables with their columns and declared types.
    ///
    /// Fails with [`Error::InvalidDatabase`](crate::error::Error::InvalidDatabase)
    /// when the file cannot be read as a database.
    fn extract_schema(&self, path: &Path) -> impl Future<Output = Result<Schema>> + Send;

    /// Run `sql` exactly as given and collect every row.
    ///
    /// Engine-side failures surface as [`Error::Query`](crate::error::Error::Query)
    /// carrying the engine's message.
    fn execute(&self, path: &Path, sql: &str) -> impl Future<Output = Result<Vec<Row>>> + Send;
}
