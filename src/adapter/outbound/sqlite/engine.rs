//! rusqlite-backed [`DatabaseEngine`].
//!
//! Generated SQL has no shape known at compile time, so rows are read
//! through rusqlite's dynamic [`ValueRef`] API rather than Diesel.

use std::path::{Path, PathBuf};

use rusqlite::types::ValueRef;
use rusqlite::{Batch, Connection, OpenFlags};
use serde_json::{Number, Value};

use crate::domain::query::Row;
use crate::domain::schema::{Column, Schema, Table};
use crate::error::{Error, Result};
use crate::port::outbound::database::DatabaseEngine;

const LIST_TABLES: &str = "SELECT name FROM sqlite_master WHERE type='table'";

/// Reported when a reply holds more than one statement.
pub const MULTIPLE_STATEMENTS: &str = "You can only execute one statement at a time.";

/// SQLite engine for uploaded database files.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteEngine;

impl SqliteEngine {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl DatabaseEngine for SqliteEngine {
    async fn extract_schema(&self, path: &Path) -> Result<Schema> {
        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || {
            let conn = open(&path).map_err(|e| Error::InvalidDatabase(e.to_string()))?;
            read_schema(&conn).map_err(|e| Error::InvalidDatabase(e.to_string()))
        })
        .await?
    }

    async fn execute(&self, path: &Path, sql: &str) -> Result<Vec<Row>> {
        let path: PathBuf = path.to_path_buf();
        let sql = sql.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = open(&path).map_err(|e| Error::Query(e.to_string()))?;
            run_query(&conn, &sql)
        })
        .await?
    }
}

/// Open an existing database file. Never creates one.
fn open(path: &Path) -> rusqlite::Result<Connection> {
    Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
}

/// Read every table listed in `sqlite_master` with its columns.
pub fn read_schema(conn: &Connection) -> rusqlite::Result<Schema> {
    let mut stmt = conn.prepare(LIST_TABLES)?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut tables = Vec::with_capacity(names.len());
    for name in names {
        let mut info = conn.prepare(&format!("PRAGMA table_info({})", quote_identifier(&name)))?;
        let columns = info
            .query_map([], |row| {
                Ok(Column::new(
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        tables.push(Table::new(name, columns));
    }

    Ok(Schema::new(tables))
}

/// Run exactly one statement and collect every row in column order.
///
/// Statements without result columns (DDL, DML) produce no rows. Text with a
/// second statement is rejected before anything runs.
pub fn run_query(conn: &Connection, sql: &str) -> Result<Vec<Row>> {
    let query_error = |e: rusqlite::Error| Error::Query(e.to_string());

    let mut batch = Batch::new(conn, sql);
    let Some(mut stmt) = batch.next().map_err(query_error)? else {
        return Ok(Vec::new());
    };
    if batch.next().map_err(query_error)?.is_some() {
        return Err(Error::Query(MULTIPLE_STATEMENTS.to_string()));
    }

    let columns: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(String::from)
        .collect();

    let mut rows = stmt.query([]).map_err(query_error)?;
    let mut out = Vec::new();
    while let Some(row) = rows.next().map_err(query_error)? {
        let mut record = Row::with_capacity(columns.len());
        for (index, name) in columns.iter().enumerate() {
            record.insert(name.clone(), json_value(row.get_ref(index).map_err(query_error)?));
        }
        out.push(record);
    }
    Ok(out)
}

/// Convert a SQLite value to JSON.
///
/// BLOBs become lowercase hex strings. Non-finite REALs become `null`.
fn json_value(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
        ValueRef::Text(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => Value::String(hex::encode(bytes)),
    }
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::adapter::outbound::sqlite::upload::UploadedDatabase;

    fn fixture() -> UploadedDatabase {
        let upload = UploadedDatabase::from_bytes(b"").unwrap();
        let conn = Connection::open(upload.path()).unwrap();
        conn.execute_batch(
            "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT NOT NULL, score REAL);
             CREATE TABLE \"odd \"\"name\"\"\" (payload BLOB, note);
             INSERT INTO users (name, score) VALUES ('ada', 9.5), ('grace', NULL);
             INSERT INTO \"odd \"\"name\"\"\" VALUES (x'cafe', 'n');",
        )
        .unwrap();
        upload
    }

    #[tokio::test]
    async fn schema_lists_tables_and_declared_types() {
        let db = fixture();
        let schema = SqliteEngine::new().extract_schema(db.path()).await.unwrap();

        assert_eq!(schema.tables.len(), 2);
        let users = schema.table("users").unwrap();
        assert_eq!(
            users.columns,
            vec![
                Column::new("id", "INTEGER"),
                Column::new("name", "TEXT"),
                Column::new("score", "REAL"),
            ]
        );
        let odd = schema.table("odd \"name\"").unwrap();
        assert_eq!(odd.columns[1], Column::new("note", ""));
        assert!(schema.render().starts_with("Table: users\n  id INTEGER\n"));
    }

    #[tokio::test]
    async fn empty_file_is_an_empty_database() {
        let db = UploadedDatabase::from_bytes(b"").unwrap();
        let schema = SqliteEngine::new().extract_schema(db.path()).await.unwrap();
        assert!(schema.is_empty());
    }

    #[tokio::test]
    async fn garbage_file_is_invalid_database() {
        let db = UploadedDatabase::from_bytes(&[0x42; 4096]).unwrap();
        let err = SqliteEngine::new().extract_schema(db.path()).await.unwrap_err();
        assert!(matches!(err, Error::InvalidDatabase(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn execute_maps_rows_in_column_order() {
        let db = fixture();
        let rows = SqliteEngine::new()
            .execute(db.path(), "SELECT score, name FROM users ORDER BY id")
            .await
            .unwrap();

        assert_eq!(
            serde_json::to_value(&rows).unwrap(),
            json!([{"score": 9.5, "name": "ada"}, {"score": null, "name": "grace"}])
        );
        assert_eq!(rows[0].keys().collect::<Vec<_>>(), ["score", "name"]);
    }

    #[tokio::test]
    async fn execute_encodes_blobs_as_hex() {
        let db = fixture();
        let rows = SqliteEngine::new()
            .execute(db.path(), "SELECT payload FROM \"odd \"\"name\"\"\"")
            .await
            .unwrap();
        assert_eq!(rows[0]["payload"], json!("cafe"));
    }

    #[tokio::test]
    async fn execute_reports_engine_message() {
        let db = fixture();
        let err = SqliteEngine::new()
            .execute(db.path(), "SELECT * FROM missing")
            .await
            .unwrap_err();
        match err {
            Error::Query(message) => assert!(message.contains("no such table: missing"), "{message}"),
            other => panic!("expected query error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn statement_without_columns_yields_no_rows() {
        let db = fixture();
        let engine = SqliteEngine::new();
        let rows = engine
            .execute(db.path(), "DELETE FROM users WHERE name = 'grace'")
            .await
            .unwrap();
        assert!(rows.is_empty());

        let remaining = engine
            .execute(db.path(), "SELECT COUNT(*) AS n FROM users")
            .await
            .unwrap();
        assert_eq!(remaining[0]["n"], json!(1));
    }

    #[tokio::test]
    async fn second_statement_is_rejected_before_anything_runs() {
        let db = fixture();
        let engine = SqliteEngine::new();

        let err = engine
            .execute(db.path(), "SELECT 1 AS a; SELECT 2 AS b")
            .await
            .unwrap_err();
        assert!(matches!(&err, Error::Query(m) if m == MULTIPLE_STATEMENTS), "got {err:?}");

        let err = engine
            .execute(db.path(), "DELETE FROM users; SELECT name FROM users")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Query(_)));

        let count = engine
            .execute(db.path(), "SELECT COUNT(*) AS n FROM users")
            .await
            .unwrap();
        assert_eq!(count[0]["n"], json!(2));
    }

    #[tokio::test]
    async fn trailing_semicolon_and_comment_are_one_statement() {
        let db = fixture();
        let rows = SqliteEngine::new()
            .execute(db.path(), "SELECT name FROM users WHERE id = 1; -- first user\n")
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn non_finite_real_becomes_null() {
        assert_eq!(json_value(ValueRef::Real(f64::NAN)), Value::Null);
        assert_eq!(json_value(ValueRef::Integer(-3)), json!(-3));
    }

    #[test]
    fn quote_identifier_escapes_quotes() {
        assert_eq!(quote_identifier("a\"b"), "\"a\"\"b\"");
    }
}
