//! switchboard-server binary.
//!
//! Reads `switchboard.toml` (or the path given with `--config`), layers
//! `SWITCHBOARD_*` environment variables on top, and serves the dashboard
//! over HTTP until interrupted.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use switchboard_api::{ApiState, EventBus};
use switchboard_server::{ServerConfig, scheduler};
use switchboard_store_memory::MemoryStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Switchboard dashboard server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "switchboard.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;

  let store = MemoryStore::with_ai_config(server_cfg.ai.clone());
  let state = ApiState::new(Arc::new(store), EventBus::new(server_cfg.event_buffer));

  let jobs = scheduler::spawn(state.clone(), server_cfg.scheduler_interval());

  let app = switchboard_server::router(state);
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  jobs.shutdown().await;
  tracing::info!("shut down");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(error = %e, "failed to listen for ctrl-c");
    std::future::pending::<()>().await;
  }
  tracing::info!("shutdown signal received");
}
