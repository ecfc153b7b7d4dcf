//! Error types for askdb.
//!
//! [`Error`] is returned by every fallible operation in the crate. Inbound
//! adapters decide how each variant is presented: the HTTP layer maps it to a
//! status code, the CLI to a miette diagnostic.

use thiserror::Error;

use crate::domain::error::DomainError;

/// Problems with the configuration file or environment.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required setting or environment variable is absent or blank.
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    /// Malformed TOML. The inner error carries the byte span.
    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The text generation endpoint failed or returned an unusable response.
    #[error("LLM request failed: {0}")]
    Llm(String),

    /// The database engine rejected the generated query. Carries the engine's
    /// own message unchanged.
    #[error("{0}")]
    Query(String),

    /// The uploaded file could not be opened or introspected.
    #[error("unreadable database: {0}")]
    InvalidDatabase(String),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The context store's connection pool could not hand out a connection.
    #[error("store connection error: {0}")]
    Connection(String),

    /// A context store query or migration failed.
    #[error("store error: {0}")]
    Database(String),

    /// Blocking work on the runtime's thread pool panicked or was cancelled.
    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
