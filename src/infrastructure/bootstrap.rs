//! Composition root.
//!
//! Wires configured adapters into the application services behind the
//! inbound ports.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::sqlite::engine::SqliteEngine;
use crate::application::context::ContextService;
use crate::application::query::QueryService;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::factory::llm::build_llm_client;
use crate::infrastructure::factory::store::{build_context_store, ContextStore};
use crate::port::inbound::context::ContextManager;
use crate::port::inbound::QueryPort;
use crate::port::outbound::llm::Llm;

/// Concrete service used by the HTTP server and `askdb ask`.
pub type AppService = QueryService<SqliteEngine, ContextStore>;

/// Build the full question-answering service from configuration.
///
/// # Errors
///
/// Returns an error if the provider's API key is missing or the context
/// store cannot be opened.
pub fn build_query_service(config: &Config) -> Result<AppService> {
    let llm = build_llm_client(&config.llm)?;
    build_query_service_with_llm(config, llm)
}

/// Build the service around an already constructed model client.
///
/// # Errors
///
/// Returns an error if the context store cannot be opened.
pub fn build_query_service_with_llm(config: &Config, llm: Arc<dyn Llm>) -> Result<AppService> {
    let store = build_context_store(&config.store)?;
    let service = QueryService::new(SqliteEngine::new(), store, llm)
        .with_options(config.prompt.options());
    info!(
        provider = service.provider(),
        store = %config.store.backend,
        "Query service ready"
    );
    Ok(service)
}

/// Build the service as a type-erased [`QueryPort`].
///
/// # Errors
///
/// See [`build_query_service`].
pub fn build_query_port(config: &Config) -> Result<Arc<dyn QueryPort>> {
    Ok(Arc::new(build_query_service(config)?))
}

/// Build context management only. Needs no API key.
///
/// # Errors
///
/// Returns an error if the context store cannot be opened.
pub fn build_context_manager(config: &Config) -> Result<Arc<dyn ContextManager>> {
    let store = build_context_store(&config.store)?;
    Ok(Arc::new(ContextService::new(store)))
}
