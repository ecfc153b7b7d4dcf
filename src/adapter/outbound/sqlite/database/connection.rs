//! Pooled Diesel connections to the context database.
//!
//! Examples and annotations live in their own SQLite file, separate from any
//! uploaded database. The schema is embedded from `migrations/` and applied
//! whenever the file is opened.

use std::path::Path;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::debug;

use crate::error::{Error, Result};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Milliseconds a writer waits on a locked context file before failing.
const BUSY_TIMEOUT_MS: u32 = 5_000;

/// Pool of connections to the context database.
pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// Apply the pragmas context writes rely on to a checked-out connection.
///
/// # Errors
///
/// Returns an error if SQLite rejects a pragma.
pub fn apply_pragmas(conn: &mut SqliteConnection) -> Result<()> {
    conn.batch_execute(&format!("PRAGMA busy_timeout = {BUSY_TIMEOUT_MS};"))
        .map_err(|e| Error::Database(e.to_string()))
}

fn build_pool(database_url: &str) -> Result<DbPool> {
    Pool::builder()
        .max_size(4)
        .build(ConnectionManager::<SqliteConnection>::new(database_url))
        .map_err(|e| Error::Connection(format!("{database_url}: {e}")))
}

fn migrate(pool: &DbPool) -> Result<usize> {
    let mut conn = pool.get().map_err(|e| Error::Connection(e.to_string()))?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| Error::Database(format!("migration failed: {e}")))?;
    Ok(applied.len())
}

/// Open the context database at `path`, creating the file and any missing
/// parent directories, and bring its schema up to date.
///
/// # Errors
///
/// Returns an error if the directory cannot be created, the file cannot be
/// opened, or a migration fails.
pub fn open_database(path: &Path) -> Result<DbPool> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let pool = build_pool(&path.to_string_lossy())?;
    let applied = migrate(&pool)?;
    debug!(path = %path.display(), applied, "Context database ready");
    Ok(pool)
}
