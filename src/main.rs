//! Gaming platform gateway.
//!
//! ```text
//!   internal callers                                       gaming platform
//!  ───────────────▶ ┌────────┐   ┌──────────┐   ┌──────────┐ ─────────────▶
//!                   │  http  │──▶│ handlers │──▶│ platform │   JSON-RPC
//!  ◀─────────────── │ server │◀──│          │◀──│  client  │ ◀─────────────
//!                   └────────┘   └────┬─────┘   └──────────┘   (mutual TLS)
//!                                     │
//!                                     ▼
//!                               ┌───────────┐
//!                               │  balance  │  PostgreSQL
//!                               │   store   │
//!                               └───────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use gaming_gateway::config::load_config;
use gaming_gateway::lifecycle::{build_state, signals, Shutdown};
use gaming_gateway::observability::{logging, metrics};
use gaming_gateway::HttpServer;

#[derive(Parser, Debug)]
#[command(name = "gaming-gateway")]
#[command(about = "Bridge between a gaming platform and the player balance store", version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Force debug logging
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    logging::init(&config.observability, cli.debug);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "gaming-gateway starting");
    tracing::info!(
        config = %cli.config.display(),
        bind_address = %config.listener.bind_address,
        platform = %config.platform.url,
        backend = ?config.database.backend,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let state = build_state(&config).await?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Arc::new(Shutdown::new());
    signals::spawn_signal_listener(shutdown.clone());

    let server = HttpServer::new(&config, state);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
