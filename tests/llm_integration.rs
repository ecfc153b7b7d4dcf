//! Integration tests for LLM adapters.
//!
//! These tests require real API keys and network access to run.
//!
//! # Running Integration Tests
//!
//! Integration tests are gated behind the `integration-tests` feature flag
//! and are marked with `#[ignore]` to prevent accidental execution.
//!
//! ```bash
//! export GEMINI_API_KEY="..."
//! export OPENAI_API_KEY="..."
//! export ANTHROPIC_API_KEY="..."
//! cargo test --features integration-tests -- --ignored
//! ```
//!
//! A provider whose key is missing is skipped.

#![cfg(feature = "integration-tests")]

use std::time::Duration;

use askdb::adapter::outbound::llm::anthropic::Anthropic;
use askdb::adapter::outbound::llm::gemini::Gemini;
use askdb::adapter::outbound::llm::openai::OpenAi;
use askdb::domain::query::clean_generated_sql;
use askdb::port::outbound::llm::Llm;

const SQL_PROMPT: &str = "Schema:\nusers(id INTEGER, name TEXT)\n\n\
Write one SQLite query that counts the rows in users. Reply with SQL only.";

async fn assert_counts_users(client: &dyn Llm) {
    let reply = tokio::time::timeout(Duration::from_secs(60), client.complete(SQL_PROMPT))
        .await
        .expect("Request timed out")
        .expect("API call failed");

    let sql = clean_generated_sql(&reply).to_uppercase();
    assert!(sql.contains("COUNT"), "Expected a COUNT query: {reply}");
    assert!(sql.contains("USERS"), "Expected the users table: {reply}");
}

#[tokio::test]
#[ignore = "requires GEMINI_API_KEY and network access"]
async fn gemini_generates_sql() {
    match Gemini::from_env("gemini-1.5-flash") {
        Ok(client) => assert_counts_users(&client).await,
        Err(e) => eprintln!("Skipping Gemini test: {e}"),
    }
}

#[tokio::test]
#[ignore = "requires OPENAI_API_KEY and network access"]
async fn openai_generates_sql() {
    match OpenAi::from_env("gpt-4o-mini") {
        Ok(client) => assert_counts_users(&client).await,
        Err(e) => eprintln!("Skipping OpenAI test: {e}"),
    }
}

#[tokio::test]
#[ignore = "requires ANTHROPIC_API_KEY and network access"]
async fn anthropic_generates_sql() {
    match Anthropic::from_env("claude-3-haiku-20240307") {
        Ok(client) => assert_counts_users(&client).await,
        Err(e) => eprintln!("Skipping Anthropic test: {e}"),
    }
}
