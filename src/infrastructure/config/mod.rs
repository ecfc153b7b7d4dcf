//! Infrastructure configuration modules.

pub mod llm;
pub mod logging;
pub mod prompt;
pub mod server;
pub mod settings;
pub mod store;
