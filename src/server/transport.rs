use anyhow::{Context, Result};
use reqwest::Client;
use rmcp::transport::sse_server::{SseServer, SseServerConfig};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::config::{Config, ServerConfig, TransportKind};

use super::rpc::LlmsTxtServer;
use super::setup::build_state;

const SSE_KEEP_ALIVE: Duration = Duration::from_secs(15);

pub fn build_server(client: &Client, config: &Config) -> LlmsTxtServer {
    LlmsTxtServer::new(build_state(client, config))
}

pub async fn run(server: LlmsTxtServer, config: &ServerConfig) -> Result<()> {
    match config.transport {
        TransportKind::Sse => run_sse(server, config).await,
        TransportKind::Stdio => run_stdio(server).await,
    }
}

/// Serve over stdin/stdout. Logs must stay on stderr.
pub async fn run_stdio(server: LlmsTxtServer) -> Result<()> {
    tracing::info!("serving MCP over stdio");
    super::io::run_with_io(server, tokio::io::stdin(), tokio::io::stdout()).await
}

/// Serve over HTTP/SSE until ctrl-c.
pub async fn run_sse(server: LlmsTxtServer, config: &ServerConfig) -> Result<()> {
    let sse_config = SseServerConfig {
        bind: config.bind,
        sse_path: config.sse_path.clone(),
        post_path: config.post_path.clone(),
        ct: CancellationToken::new(),
        sse_keep_alive: Some(SSE_KEEP_ALIVE),
    };
    let sse = SseServer::serve_with_config(sse_config)
        .await
        .with_context(|| format!("failed to bind SSE transport on {}", config.bind))?;
    tracing::info!(
        bind = %config.bind,
        sse_path = %config.sse_path,
        post_path = %config.post_path,
        "serving MCP over SSE"
    );

    let ct = sse.with_service(move || server.clone());
    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for ctrl-c")?;
    tracing::info!("shutting down");
    ct.cancel();
    Ok(())
}
