//! LLM client factory.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::llm::anthropic::Anthropic;
use crate::adapter::outbound::llm::gemini::Gemini;
use crate::adapter::outbound::llm::openai::OpenAi;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::llm::{LlmConfig, LlmProvider};
use crate::port::outbound::llm::Llm;

/// Build the configured LLM client, reading its API key from the environment.
///
/// # Errors
///
/// Returns [`ConfigError::MissingField`] naming the environment variable when
/// the key is not set.
pub fn build_llm_client(config: &LlmConfig) -> Result<Arc<dyn Llm>> {
    let var = config.provider.api_key_var();
    let api_key = std::env::var(var)
        .ok()
        .filter(|key| !key.trim().is_empty())
        .ok_or(ConfigError::MissingField { field: var })?;
    Ok(build_llm_client_with_key(config, api_key))
}

/// Build the configured LLM client with an explicit API key.
pub fn build_llm_client_with_key(config: &LlmConfig, api_key: String) -> Arc<dyn Llm> {
    let client: Arc<dyn Llm> = match config.provider {
        LlmProvider::Gemini => {
            let c = &config.gemini;
            Arc::new(
                Gemini::new(api_key, &c.model, c.max_tokens, c.temperature)
                    .with_base_url(&c.base_url)
                    .with_timeout(c.timeout()),
            )
        }
        LlmProvider::OpenAi => {
            let c = &config.openai;
            Arc::new(
                OpenAi::new(api_key, &c.model, c.max_tokens, c.temperature)
                    .with_base_url(&c.base_url)
                    .with_timeout(c.timeout()),
            )
        }
        LlmProvider::Anthropic => {
            let c = &config.anthropic;
            Arc::new(
                Anthropic::new(api_key, &c.model, c.max_tokens, c.temperature)
                    .with_base_url(&c.base_url)
                    .with_timeout(c.timeout()),
            )
        }
    };

    info!(provider = client.name(), model = config.model(), "LLM client initialized");
    client
}
