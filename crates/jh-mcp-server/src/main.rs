//! jobhistory-mcp — Hadoop JobHistory queries as agent tools.
//!
//! Wires the upstream client, tool registry, and a transport (stdio by
//! default, HTTP with `--http` or `MCP_TRANSPORT=http`) into one binary.

use std::sync::Arc;

use jh_history_tools::HttpHistoryClient;

use jh_mcp_server::config::{ServerConfig, TransportMode};
use jh_mcp_server::registry::ToolRegistry;
use jh_mcp_server::{http, logging, stdio};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let force_http = std::env::args().any(|arg| arg == "--http");
    let config = ServerConfig::from_env(force_http);
    let _guard = logging::init(&config.log);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "jobhistory-mcp starting"
    );
    tracing::info!(
        base_url = %config.history.base_url,
        logs_base_url = %config.history.logs_base_url(),
        nodemanager_port = config.history.nodemanager_port,
        timeout_secs = config.history.timeout_secs,
        "upstream configured"
    );

    let client = HttpHistoryClient::new(&config.history)?;
    let registry = ToolRegistry::with_defaults();
    tracing::info!(tool_count = registry.len(), "tool registry initialized");

    match config.transport {
        TransportMode::Stdio => {
            tracing::info!("stdio transport starting");
            stdio::run(&registry, &client).await
        }
        TransportMode::Http { host, port } => {
            let state = http::AppState {
                registry: Arc::new(registry),
                client: Arc::new(client),
            };
            http::run(state, &host, port).await
        }
    }
}
