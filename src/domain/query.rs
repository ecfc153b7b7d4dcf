//! Generated queries and their outcomes.

use serde::Serialize;

/// One result row: column name to JSON value, in column order.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Message reported when the model produced no query text at all.
pub const EMPTY_QUERY_MESSAGE: &str = "model returned an empty query";

/// Strip a surrounding Markdown code fence from model output.
///
/// Models frequently wrap SQL in a fenced block such as
/// ```` ```sql ... ``` ````. The opening fence line (with any language tag)
/// and a closing fence are removed; everything between is kept verbatim
/// apart from trimming surrounding whitespace.
#[must_use]
pub fn clean_generated_sql(raw: &str) -> String {
    let trimmed = raw.trim();
    let Some(after_ticks) = trimmed.strip_prefix("```") else {
        return trimmed.to_string();
    };

    // Drop the language tag (if any) up to the end of the opening line.
    let body = match after_ticks.split_once('\n') {
        Some((tag, rest)) if is_language_tag(tag) => rest,
        // Query text starts on the fence line: ```sql SELECT 1```
        _ => strip_language_word(after_ticks),
    };

    let body = body.trim_end();
    body.strip_suffix("```").unwrap_or(body).trim().to_string()
}

fn is_language_tag(tag: &str) -> bool {
    tag.trim()
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn strip_language_word(text: &str) -> &str {
    for tag in ["sqlite", "sql"] {
        if let Some(rest) = text.strip_prefix(tag) {
            if rest.starts_with(char::is_whitespace) {
                return rest;
            }
        }
    }
    text
}

/// The pipeline's answer to one question.
///
/// Serialises as `{"sql": ..., "result": [...]}`, with an `"error"` key only
/// when execution failed. A failed execution always carries an empty result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryOutcome {
    pub sql: String,
    pub result: Vec<Row>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QueryOutcome {
    #[must_use]
    pub fn success(sql: impl Into<String>, result: Vec<Row>) -> Self {
        Self {
            sql: sql.into(),
            result,
            error: None,
        }
    }

    #[must_use]
    pub fn failure(sql: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            result: Vec::new(),
            error: Some(error.into()),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Column names of the first row, which every row shares.
    #[must_use]
    pub fn columns(&self) -> Vec<&str> {
        self.result
            .first()
            .map(|row| row.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}
