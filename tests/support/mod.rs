//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use askdb::adapter::outbound::memory::MemoryContextStore;
use askdb::adapter::outbound::sqlite::engine::SqliteEngine;
use askdb::application::query::QueryService;
use askdb::error::{Error, Result};
use askdb::port::outbound::llm::Llm;

/// Replies with a fixed text and remembers every prompt it was sent.
pub struct ScriptedLlm {
    reply: std::result::Result<String, String>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedLlm {
    pub fn replying(reply: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(reply.into()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message.into()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

#[async_trait]
impl Llm for ScriptedLlm {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().push(prompt.to_string());
        self.reply.clone().map_err(Error::Llm)
    }
}

pub type TestService = QueryService<SqliteEngine, MemoryContextStore>;

pub fn service(llm: Arc<ScriptedLlm>) -> TestService {
    QueryService::new(SqliteEngine::new(), MemoryContextStore::new(), llm)
}

/// Create a small shop database in `dir`.
pub fn shop_db(dir: &Path) -> PathBuf {
    let path = dir.join("shop.sqlite");
    let conn = rusqlite::Connection::open(&path).expect("open fixture");
    conn.execute_batch(
        "CREATE TABLE customers (id INTEGER PRIMARY KEY, name TEXT NOT NULL, city TEXT);
         CREATE TABLE orders (
             id INTEGER PRIMARY KEY,
             customer_id INTEGER REFERENCES customers(id),
             amount_cents INTEGER,
             placed_at TEXT
         );
         INSERT INTO customers (name, city) VALUES ('Ada', 'London'), ('Grace', 'Arlington');
         INSERT INTO orders (customer_id, amount_cents, placed_at) VALUES
             (1, 1250, '2026-09-01'),
             (1, 800, '2026-09-14'),
             (2, 4200, '2026-09-20');",
    )
    .expect("seed fixture");
    path
}
