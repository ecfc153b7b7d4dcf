//! Handler for the `serve` command.

use crate::adapter::inbound::cli::command::ServeArgs;
use crate::adapter::inbound::cli::output;
use crate::adapter::inbound::http;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::server::ServerConfig;
use crate::infrastructure::config::settings::Config;

/// Execute the serve command. Runs until Ctrl-C.
pub async fn execute(args: &ServeArgs, config: &Config) -> Result<()> {
    let server = ServerConfig {
        bind: args.bind.clone().unwrap_or_else(|| config.server.bind.clone()),
        ..config.server.clone()
    };
    let addr = server.socket_addr()?;
    let port = bootstrap::build_query_port(config)?;

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Listening", format!("http://{addr}"));
    output::field("Provider", config.llm.provider);
    output::field("Model", config.llm.model());
    output::field("Store", config.store.backend);
    output::hint("press Ctrl-C to stop");

    http::serve(port, addr, server.max_upload_bytes).await
}
