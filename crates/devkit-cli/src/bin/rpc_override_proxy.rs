//! `rpc-override-proxy`: serve canned JSON-RPC responses in front of a node.
//!
//! Point a wallet or test harness at the listen address instead of the node.
//! Requests matching the override table are answered locally; everything
//! else is forwarded to `--upstream` (or `DEVKIT_UPSTREAM_URL`).

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use color_eyre::eyre::{eyre, Context, Result};
use devkit_cli::init_tracing;
use devkit_cli::proxy::{router, ProxyState};
use devkit_rpc::{Interceptor, OverrideTable};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "rpc-override-proxy")]
#[command(about = "JSON-RPC proxy that overrides selected node responses")]
#[command(version)]
struct Cli {
    #[arg(long, short = 'v', action = ArgAction::Count)]
    verbose: u8,

    #[arg(long, short = 'q')]
    quiet: bool,

    /// Node URL to forward non-overridden requests to.
    #[arg(long)]
    upstream: Option<String>,

    #[arg(long, default_value = "127.0.0.1:8546")]
    listen: SocketAddr,

    /// JSON override table; the built-in table is used when omitted.
    #[arg(long)]
    overrides: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet)?;

    let upstream = cli
        .upstream
        .or_else(|| std::env::var("DEVKIT_UPSTREAM_URL").ok())
        .ok_or_else(|| eyre!("--upstream or DEVKIT_UPSTREAM_URL is required"))?;

    let table = match &cli.overrides {
        Some(path) => OverrideTable::from_path(path)
            .wrap_err_with(|| format!("failed to load overrides from {}", path.display()))?,
        None => OverrideTable::builtin(),
    };
    let entries = table.len();

    let state = ProxyState::new(Interceptor::new(table), &upstream)?;
    let listener = tokio::net::TcpListener::bind(cli.listen)
        .await
        .wrap_err_with(|| format!("failed to bind {}", cli.listen))?;

    info!(
        listen = %cli.listen,
        upstream = %state.upstream(),
        overrides = entries,
        "rpc override proxy listening"
    );

    axum::serve(listener, router(state))
        .await
        .wrap_err("proxy server failed")?;
    Ok(())
}
