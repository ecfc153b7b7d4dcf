//! Introspected database schema.
//!
//! A [`Schema`] is what the engine reads out of an uploaded database before
//! a question is sent to the model. Its plain-text rendering is the first
//! section of every prompt.

use std::fmt::Write;

use serde::Serialize;

/// A single column with its declared SQL type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: String,
    /// Declared type as written in the `CREATE TABLE` statement. SQLite
    /// allows this to be empty.
    pub declared_type: String,
}

impl Column {
    #[must_use]
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
        }
    }
}

/// A table and its columns in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
}

impl Table {
    #[must_use]
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }
}

/// All user tables of a database, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schema {
    pub tables: Vec<Table>,
}

impl Schema {
    #[must_use]
    pub fn new(tables: Vec<Table>) -> Self {
        Self { tables }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Look up a table by exact name.
    #[must_use]
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Render the schema as indented plain text.
    ///
    /// Each table becomes a `Table: <name>` line followed by one indented
    /// `<column> <type>` line per column and a trailing blank line.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for table in &self.tables {
            let _ = writeln!(out, "Table: {}", table.name);
            for column in &table.columns {
                let _ = writeln!(out, "  {} {}", column.name, column.declared_type);
            }
            out.push('\n');
        }
        out
    }
}
