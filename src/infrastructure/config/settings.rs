//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; API keys are only ever read from
//! the environment.
//!
//! # Example
//!
//! ```no_run
//! use askdb::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use super::llm::LlmConfig;
use super::logging::LoggingConfig;
use super::prompt::PromptConfig;
use super::server::ServerConfig;
use super::store::{StoreBackend, StoreConfig};
use crate::error::{ConfigError, Result};

/// Main application configuration.
///
/// Every section is optional; an empty file yields [`Config::default`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// LLM provider configuration.
    #[serde(default)]
    pub llm: LlmConfig,

    /// Example and annotation storage.
    #[serde(default)]
    pub store: StoreConfig,

    /// Limits on context injected into prompts.
    #[serde(default)]
    pub prompt: PromptConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is invalid.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    ///
    /// Checks that values are within acceptable ranges.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if self.server.max_upload_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_upload_bytes",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        self.server.socket_addr()?;

        self.llm.validate()?;

        if self.store.backend == StoreBackend::Sqlite
            && self.store.path.as_os_str().is_empty()
        {
            return Err(ConfigError::MissingField { field: "store.path" }.into());
        }

        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::infrastructure::config::llm::LlmProvider;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse_toml("").unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:5000");
        assert_eq!(config.server.max_upload_bytes, 32 * 1024 * 1024);
        assert_eq!(config.llm.provider, LlmProvider::Gemini);
        assert_eq!(config.store.backend, StoreBackend::Sqlite);
        assert_eq!(config.logging.level, "info");
        assert!(config.prompt.max_examples.is_none());
    }

    #[test]
    fn rejects_unparsable_bind() {
        let result = Config::parse_toml("[server]\nbind = \"localhost\"");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue { field: "bind", .. }))
        ));
    }

    #[test]
    fn rejects_empty_store_path_for_sqlite() {
        let result = Config::parse_toml("[store]\npath = \"\"");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingField { field: "store.path" }))
        ));

        assert!(Config::parse_toml("[store]\nbackend = \"memory\"\npath = \"\"").is_ok());
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let result = Config::parse_toml("[server\nbind = 1");
        assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
    }

    #[test]
    fn load_or_default_without_file() {
        let config = Config::load_or_default("/definitely/not/here/config.toml").unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:5000");
    }
}
