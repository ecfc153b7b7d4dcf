//! askdb - ask natural-language questions of a SQLite database.
//!
//! A user supplies a SQLite file and a question. askdb reads the schema,
//! builds a prompt from it together with stored examples and annotations,
//! asks an LLM for a single SQL query and runs that query on a scratch copy
//! of the file.
//!
//! # Architecture
//!
//! The crate follows a ports and adapters layout:
//!
//! - [`domain`] - Schema, prompt, query outcome and context types
//! - [`port`] - Inbound use-case traits and outbound dependency traits
//! - [`application`] - Services implementing the inbound ports
//! - [`adapter`] - HTTP server, CLI, LLM providers, SQLite and memory stores
//! - [`infrastructure`] - Configuration, factories and wiring
//! - [`error`] - Crate error type
//!
//! # Example
//!
//! ```no_run
//! use askdb::infrastructure::bootstrap;
//! use askdb::infrastructure::config::settings::Config;
//! use askdb::port::inbound::query::TextToSql;
//!
//! # async fn demo() -> askdb::error::Result<()> {
//! let service = bootstrap::build_query_service(&Config::default())?;
//! let outcome = service
//!     .ask(std::path::Path::new("shop.sqlite"), "How many orders were placed?")
//!     .await?;
//! println!("{}", outcome.sql);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;
