//! LLM provider configuration.
//!
//! Provides configuration for the Large Language Model that turns questions
//! into SQL.

use serde::Deserialize;

use crate::adapter::outbound::llm::{anthropic, gemini, openai};
use crate::error::{ConfigError, Result};

/// LLM provider configuration.
///
/// Configures which LLM provider to use and provider-specific settings.
/// API keys are read from environment variables (`GEMINI_API_KEY`,
/// `OPENAI_API_KEY` or `ANTHROPIC_API_KEY`) at runtime.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LlmConfig {
    /// LLM provider used for generation.
    ///
    /// Defaults to Gemini.
    #[serde(default)]
    pub provider: LlmProvider,

    /// Gemini-specific settings.
    #[serde(default)]
    pub gemini: ProviderConfig<Gemini>,

    /// OpenAI-specific settings.
    #[serde(default)]
    pub openai: ProviderConfig<OpenAi>,

    /// Anthropic-specific settings.
    #[serde(default)]
    pub anthropic: ProviderConfig<Anthropic>,
}

/// LLM provider selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// Google Gemini models.
    #[default]
    Gemini,
    /// OpenAI GPT models.
    OpenAi,
    /// Anthropic Claude models.
    Anthropic,
}

impl LlmProvider {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
        }
    }

    /// Environment variable holding the provider's API key.
    #[must_use]
    pub const fn api_key_var(self) -> &'static str {
        match self {
            Self::Gemini => "GEMINI_API_KEY",
            Self::OpenAi => "OPENAI_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
        }
    }
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-provider defaults.
pub trait ProviderDefaults {
    const MODEL: &'static str;
    const BASE_URL: &'static str;
    /// Highest temperature the provider accepts.
    const MAX_TEMPERATURE: f64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Gemini;

#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAi;

#[derive(Debug, Clone, Copy, Default)]
pub struct Anthropic;

impl ProviderDefaults for Gemini {
    const MODEL: &'static str = "gemini-1.5-flash";
    const BASE_URL: &'static str = gemini::DEFAULT_BASE_URL;
    const MAX_TEMPERATURE: f64 = 2.0;
}

impl ProviderDefaults for OpenAi {
    const MODEL: &'static str = "gpt-4o";
    const BASE_URL: &'static str = openai::DEFAULT_BASE_URL;
    const MAX_TEMPERATURE: f64 = 2.0;
}

impl ProviderDefaults for Anthropic {
    const MODEL: &'static str = "claude-3-5-sonnet-20241022";
    const BASE_URL: &'static str = anthropic::DEFAULT_BASE_URL;
    const MAX_TEMPERATURE: f64 = 1.0;
}

/// Settings for one provider.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound = "")]
pub struct ProviderConfig<P: ProviderDefaults> {
    /// Model identifier.
    #[serde(default = "default_model::<P>")]
    pub model: String,

    /// Sampling temperature for generation.
    ///
    /// Lower values produce more deterministic output. Defaults to 0.0,
    /// since the same question should produce the same query.
    #[serde(default)]
    pub temperature: f64,

    /// Maximum tokens in the response. Defaults to 1024.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,

    /// API root. Point at a proxy or compatible server to override.
    #[serde(default = "default_base_url::<P>")]
    pub base_url: String,

    /// Per-request timeout in seconds. Defaults to 60.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(skip)]
    _provider: std::marker::PhantomData<P>,
}

impl<P: ProviderDefaults> Default for ProviderConfig<P> {
    fn default() -> Self {
        Self {
            model: default_model::<P>(),
            temperature: 0.0,
            max_tokens: default_max_tokens(),
            base_url: default_base_url::<P>(),
            timeout_secs: default_timeout_secs(),
            _provider: std::marker::PhantomData,
        }
    }
}

impl<P: ProviderDefaults> ProviderConfig<P> {
    #[must_use]
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }

    /// Check ranges for this provider.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "model",
                reason: "must not be empty".to_string(),
            }
            .into());
        }
        if !(0.0..=P::MAX_TEMPERATURE).contains(&self.temperature) {
            return Err(ConfigError::InvalidValue {
                field: "temperature",
                reason: format!("must be between 0 and {}", P::MAX_TEMPERATURE),
            }
            .into());
        }
        if self.max_tokens == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_tokens",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        url::Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidValue {
            field: "base_url",
            reason: e.to_string(),
        })?;
        Ok(())
    }
}

impl LlmConfig {
    /// Model name of the selected provider.
    #[must_use]
    pub fn model(&self) -> &str {
        match self.provider {
            LlmProvider::Gemini => &self.gemini.model,
            LlmProvider::OpenAi => &self.openai.model,
            LlmProvider::Anthropic => &self.anthropic.model,
        }
    }

    /// Validate the selected provider's settings.
    ///
    /// # Errors
    ///
    /// Returns the first invalid value found.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        match self.provider {
            LlmProvider::Gemini => self.gemini.validate(),
            LlmProvider::OpenAi => self.openai.validate(),
            LlmProvider::Anthropic => self.anthropic.validate(),
        }
    }
}

fn default_model<P: ProviderDefaults>() -> String {
    P::MODEL.into()
}

fn default_base_url<P: ProviderDefaults>() -> String {
    P::BASE_URL.into()
}

const fn default_max_tokens() -> usize {
    1024
}

const fn default_timeout_secs() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_gemini_flash() {
        let config = LlmConfig::default();
        assert_eq!(config.provider, LlmProvider::Gemini);
        assert_eq!(config.model(), "gemini-1.5-flash");
        assert_eq!(config.gemini.base_url, gemini::DEFAULT_BASE_URL);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn provider_names_parse_lowercase() {
        let config: LlmConfig = toml::from_str(
            r#"
            provider = "anthropic"
            [anthropic]
            model = "claude-3-5-haiku-latest"
            "#,
        )
        .unwrap();
        assert_eq!(config.provider, LlmProvider::Anthropic);
        assert_eq!(config.model(), "claude-3-5-haiku-latest");
        assert_eq!(config.anthropic.max_tokens, 1024);
    }

    #[test]
    fn anthropic_temperature_capped_at_one() {
        let mut config = ProviderConfig::<Anthropic>::default();
        config.temperature = 1.5;
        assert!(config.validate().is_err());

        let mut config = ProviderConfig::<OpenAi>::default();
        config.temperature = 1.5;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn base_url_must_parse() {
        let mut config = ProviderConfig::<Gemini>::default();
        config.base_url = "not a url".into();
        assert!(config.validate().is_err());
    }
}
