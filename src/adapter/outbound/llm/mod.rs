//! LLM adapter modules.
//!
//! Provides implementations of the [`Llm`](crate::port::outbound::llm::Llm) trait
//! for Google Gemini, OpenAI and Anthropic Claude.

pub mod anthropic;
pub mod client;
pub mod gemini;
pub mod openai;

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// Default per-request timeout for provider calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Longest slice of an error body carried into an error message.
const MAX_ERROR_BODY: usize = 512;

/// Decode a provider response, turning non-2xx statuses into [`Error::Llm`].
async fn decode<T: DeserializeOwned>(provider: &str, response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Llm(format!(
            "{provider} returned {status}: {}",
            truncate(body.trim(), MAX_ERROR_BODY)
        )));
    }
    Ok(response.json::<T>().await?)
}

fn truncate(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Join a base URL and a path without doubling slashes.
fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}
