use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use llms_txt_mcp::config::{Config, TransportKind};
use llms_txt_mcp::environment;
use llms_txt_mcp::server;
use llms_txt_mcp::tools::utils::build_client;

#[derive(Debug, Parser)]
#[command(name = "llms-txt-mcp", version, about = "MCP server for llms.txt documentation sources")]
struct Cli {
    /// Transport to serve on. Overrides `[server] transport`.
    #[arg(long, value_enum, env = "LLMS_MCP_TRANSPORT")]
    transport: Option<TransportKind>,

    /// Listen address for the SSE transport. Overrides `[server] bind`.
    #[arg(long, env = "LLMS_MCP_BIND")]
    bind: Option<SocketAddr>,

    /// Path to config.toml. Defaults to the one next to the executable.
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "llms_txt_mcp=info",
        1 => "llms_txt_mcp=debug",
        _ => "llms_txt_mcp=trace,rmcp=debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // stdout carries the protocol when serving over stdio
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    environment::load_env();

    let mut config = match &cli.config {
        Some(path) => Config::load_from_path(path),
        None => Config::load_default(),
    };
    if let Some(transport) = cli.transport {
        config.server.transport = transport;
    }
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }

    let client = build_client(&config.fetch).context("failed to build HTTP client")?;
    let mcp = server::build_server(&client, &config);
    tracing::info!(
        tools = ?mcp.state().tools_meta.names().collect::<Vec<_>>(),
        transport = ?config.server.transport,
        "starting llms.txt MCP server"
    );

    server::run(mcp, &config.server).await
}
