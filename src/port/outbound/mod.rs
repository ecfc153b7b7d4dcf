//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe infrastructure dependencies: the text
//! generation endpoint, the uploaded database, and context storage.

pub mod database;
pub mod llm;
pub mod store;
