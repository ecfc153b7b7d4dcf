//! Miette-based error diagnostics for CLI error presentation.
//!
//! Turns crate errors into diagnostics with codes and help text. TOML parse
//! errors are shown against the offending configuration file.

use std::fmt::Display;
use std::path::Path;

use miette::{Diagnostic, NamedSource, Report, SourceSpan};
use thiserror::Error;

use crate::error::{ConfigError as CrateConfigError, Error};

/// Configuration error with source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(askdb::config))]
pub struct ConfigError {
    /// Human-readable error message.
    pub message: String,

    /// The configuration file.
    #[source_code]
    pub src: NamedSource<String>,

    /// Byte offset and length of the problematic region.
    #[label("here")]
    pub span: SourceSpan,

    #[help]
    pub help: Option<String>,
}

impl ConfigError {
    /// Create a new configuration error with source location.
    #[must_use]
    pub fn new(
        message: impl Into<String>,
        name: impl AsRef<str>,
        src: impl Into<String>,
        offset: usize,
        len: usize,
    ) -> Self {
        Self {
            message: message.into(),
            src: NamedSource::new(name, src.into()),
            span: (offset, len).into(),
            help: None,
        }
    }

    /// Add a help suggestion to the error.
    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Any other failure, with a stable code and optional help.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CliError {
    pub message: String,
    pub code: &'static str,
    pub help: Option<String>,
}

impl Diagnostic for CliError {
    fn code<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        Some(Box::new(self.code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        self.help
            .as_ref()
            .map(|help| Box::new(help) as Box<dyn Display + 'a>)
    }
}

impl CliError {
    #[must_use]
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code,
            help: None,
        }
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Build the report shown for `err`.
///
/// `config_path` is re-read to underline TOML syntax errors.
pub fn report(err: Error, config_path: &Path) -> Report {
    if let Error::Config(CrateConfigError::Parse(parse)) = &err {
        if let (Some(span), Ok(src)) = (parse.span(), std::fs::read_to_string(config_path)) {
            return Report::new(
                ConfigError::new(
                    parse.message(),
                    config_path.display().to_string(),
                    src,
                    span.start,
                    span.end.saturating_sub(span.start),
                )
                .with_help("fix the TOML syntax, or regenerate with `askdb config init --force`"),
            );
        }
    }

    Report::new(diagnose(&err))
}

/// Map an error to a code and help text.
fn diagnose(err: &Error) -> CliError {
    let message = err.to_string();
    match err {
        Error::Config(CrateConfigError::MissingField { field }) if field.ends_with("_API_KEY") => {
            CliError::new("askdb::config", message)
                .with_help(format!("export {field}=... or add it to a .env file"))
        }
        Error::Config(CrateConfigError::ReadFile(_)) => CliError::new("askdb::config", message)
            .with_help("create one with `askdb config init`"),
        Error::Config(_) => CliError::new("askdb::config", message)
            .with_help("run `askdb config validate` for details"),
        Error::Domain(_) => CliError::new("askdb::input", message),
        Error::InvalidDatabase(_) => CliError::new("askdb::database", message)
            .with_help("check that the file is a SQLite database"),
        Error::Llm(_) | Error::Http(_) => CliError::new("askdb::llm", message)
            .with_help("check your API key, model name and network connection"),
        Error::Query(_) => CliError::new("askdb::query", message),
        Error::Connection(_) | Error::Database(_) => CliError::new("askdb::store", message)
            .with_help("check `store.path` in your configuration"),
        Error::Json(_) | Error::Io(_) | Error::Url(_) | Error::Task(_) | Error::Prompt(_) => {
            CliError::new("askdb::io", message)
        }
    }
}
