//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::{annotations, examples};

/// Database row for an example (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = examples)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ExampleRow {
    pub id: i64,
    pub question: String,
    pub sql_text: String,
    pub created_at: String,
}

/// Database row for an example (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = examples)]
pub struct NewExampleRow {
    pub question: String,
    pub sql_text: String,
    pub created_at: String,
}

/// Database row for an annotation (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = annotations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AnnotationRow {
    pub id: i64,
    pub body: String,
    pub created_at: String,
}

/// Database row for an annotation (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = annotations)]
pub struct NewAnnotationRow {
    pub body: String,
    pub created_at: String,
}

/// Result of `SELECT last_insert_rowid()`.
#[derive(QueryableByName, Debug)]
pub struct LastInsertRowId {
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub id: i64,
}
