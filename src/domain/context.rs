//! Prompt context supplied ahead of time by the user.
//!
//! Two kinds of context can be stored and are injected into every prompt:
//! worked examples (a question paired with the SQL that answers it) and
//! free-text annotations describing the meaning of the data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// A stored question/SQL pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub id: i64,
    pub question: String,
    pub sql: String,
    pub created_at: DateTime<Utc>,
}

/// A validated example that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExample {
    question: String,
    sql: String,
}

impl NewExample {
    /// Validate and trim a question/SQL pair.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyQuestion`] or [`DomainError::EmptySql`]
    /// when either side is blank.
    pub fn try_new(question: &str, sql: &str) -> Result<Self, DomainError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(DomainError::EmptyQuestion);
        }
        let sql = sql.trim();
        if sql.is_empty() {
            return Err(DomainError::EmptySql);
        }
        Ok(Self {
            question: question.to_string(),
            sql: sql.to_string(),
        })
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Attach storage identity.
    #[must_use]
    pub fn into_example(self, id: i64, created_at: DateTime<Utc>) -> Example {
        Example {
            id,
            question: self.question,
            sql: self.sql,
            created_at,
        }
    }
}

/// A stored free-text note about the data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// A validated annotation that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAnnotation {
    text: String,
}

impl NewAnnotation {
    /// Validate and trim annotation text.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyAnnotation`] when the text is blank.
    pub fn try_new(text: &str) -> Result<Self, DomainError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::EmptyAnnotation);
        }
        Ok(Self {
            text: text.to_string(),
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn into_annotation(self, id: i64, created_at: DateTime<Utc>) -> Annotation {
        Annotation {
            id,
            text: self.text,
            created_at,
        }
    }
}
