//! LLM completion port.
//!
//! Defines a generic interface for text generation requests. The query
//! pipeline sends one prompt per question and treats the reply as SQL.

use async_trait::async_trait;

use crate::error::Result;

/// Client for large language model text completion.
///
/// Implementations wrap specific LLM providers (Gemini, OpenAI, Anthropic)
/// and handle authentication and response parsing.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (`Send + Sync`) so one client can be
/// shared across concurrent HTTP requests.
///
/// # Errors
///
/// The [`complete`](Self::complete) method returns an error for API failures,
/// rate limits, or invalid responses.
#[async_trait]
pub trait Llm: Send + Sync {
    /// Return the provider name for logging.
    fn name(&self) -> &'static str;

    /// Send a completion request and return the generated text.
    ///
    /// # Arguments
    ///
    /// * `prompt` - The input prompt to complete.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails, the response is invalid,
    /// or rate limits are exceeded.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
