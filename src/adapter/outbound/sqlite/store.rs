//! SQLite context store implementation.
//!
//! Provides persistent storage for examples and annotations using SQLite
//! and Diesel ORM.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::adapter::outbound::sqlite::database::connection::{apply_pragmas, DbPool};
use crate::adapter::outbound::sqlite::database::model::{
    AnnotationRow, ExampleRow, LastInsertRowId, NewAnnotationRow, NewExampleRow,
};
use crate::adapter::outbound::sqlite::database::schema::{annotations, examples};
use crate::domain::context::{Annotation, Example, NewAnnotation, NewExample};
use crate::error::{Error, Result};
use crate::port::outbound::store::{AnnotationStore, ExampleStore};

type PooledConnection =
    diesel::r2d2::PooledConnection<diesel::r2d2::ConnectionManager<SqliteConnection>>;

/// SQLite-backed store for examples and annotations.
pub struct SqliteContextStore {
    /// Database connection pool.
    pool: DbPool,
}

impl SqliteContextStore {
    /// Create a new SQLite context store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<PooledConnection> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;
        apply_pragmas(&mut conn)?;
        Ok(conn)
    }

    fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
        Ok(DateTime::parse_from_rfc3339(value)
            .map_err(|e| Error::Database(format!("invalid timestamp '{value}': {e}")))?
            .with_timezone(&Utc))
    }

    fn example_from_row(row: ExampleRow) -> Result<Example> {
        Ok(Example {
            id: row.id,
            question: row.question,
            sql: row.sql_text,
            created_at: Self::parse_timestamp(&row.created_at)?,
        })
    }

    fn annotation_from_row(row: AnnotationRow) -> Result<Annotation> {
        Ok(Annotation {
            id: row.id,
            text: row.body,
            created_at: Self::parse_timestamp(&row.created_at)?,
        })
    }
}

fn last_insert_rowid(conn: &mut SqliteConnection) -> QueryResult<i64> {
    diesel::sql_query("SELECT last_insert_rowid() AS id")
        .get_result::<LastInsertRowId>(conn)
        .map(|row| row.id)
}

impl ExampleStore for SqliteContextStore {
    async fn add_example(&self, example: NewExample) -> Result<Example> {
        let now = Utc::now();
        let row = NewExampleRow {
            question: example.question().to_string(),
            sql_text: example.sql().to_string(),
            created_at: now.to_rfc3339(),
        };
        let mut conn = self.conn()?;

        let id = conn
            .transaction(|conn| {
                diesel::insert_into(examples::table)
                    .values(&row)
                    .execute(conn)?;
                last_insert_rowid(conn)
            })
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(example.into_example(id, now))
    }

    async fn list_examples(&self) -> Result<Vec<Example>> {
        let mut conn = self.conn()?;

        let rows: Vec<ExampleRow> = examples::table
            .select(ExampleRow::as_select())
            .order(examples::id.asc())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.into_iter().map(Self::example_from_row).collect()
    }

    async fn remove_example(&self, id: i64) -> Result<bool> {
        let mut conn = self.conn()?;

        let deleted = diesel::delete(examples::table.find(id))
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(deleted > 0)
    }

    async fn clear_examples(&self) -> Result<usize> {
        let mut conn = self.conn()?;

        diesel::delete(examples::table)
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))
    }
}

impl AnnotationStore for SqliteContextStore {
    async fn add_annotation(&self, annotation: NewAnnotation) -> Result<Annotation> {
        let now = Utc::now();
        let row = NewAnnotationRow {
            body: annotation.text().to_string(),
            created_at: now.to_rfc3339(),
        };
        let mut conn = self.conn()?;

        let id = conn
            .transaction(|conn| {
                diesel::insert_into(annotations::table)
                    .values(&row)
                    .execute(conn)?;
                last_insert_rowid(conn)
            })
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(annotation.into_annotation(id, now))
    }

    async fn list_annotations(&self) -> Result<Vec<Annotation>> {
        let mut conn = self.conn()?;

        let rows: Vec<AnnotationRow> = annotations::table
            .select(AnnotationRow::as_select())
            .order(annotations::id.asc())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.into_iter().map(Self::annotation_from_row).collect()
    }

    async fn remove_annotation(&self, id: i64) -> Result<bool> {
        let mut conn = self.conn()?;

        let deleted = diesel::delete(annotations::table.find(id))
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(deleted > 0)
    }

    async fn clear_annotations(&self) -> Result<usize> {
        let mut conn = self.conn()?;

        diesel::delete(annotations::table)
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))
    }
}
