use anyhow::Result;
use rmcp::ServiceExt;
use tokio::io::{AsyncRead, AsyncWrite};

use super::rpc::LlmsTxtServer;

/// Serve one MCP session over a byte stream pair until the peer hangs up.
pub async fn run_with_io<R, W>(server: LlmsTxtServer, reader: R, writer: W) -> Result<()>
where
    R: AsyncRead + Send + Unpin + 'static,
    W: AsyncWrite + Send + Unpin + 'static,
{
    let service = server.serve((reader, writer)).await?;
    let reason = service.waiting().await?;
    tracing::info!(?reason, "session closed");
    Ok(())
}
