//! roster server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) plus the
//! environment, connects to MongoDB, and serves the person API over HTTP.
//!
//! For local development without a database:
//!
//! ```sh
//! cargo run -p roster-api --bin server -- --in-memory
//! ```

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use roster_api::{AppState, ServerConfig};
use roster_core::PersonStore;
use roster_store_memory::MemoryStore;
use roster_store_mongo::MongoStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Roster person API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Keep persons in process memory instead of MongoDB.
  #[arg(long)]
  in_memory: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;

  if cli.in_memory {
    tracing::warn!("using the in-memory store; all data is lost on exit");
    return serve(MemoryStore::new(), &server_cfg).await;
  }

  let missing = server_cfg.missing_store_settings();
  anyhow::ensure!(
    missing.is_empty(),
    "missing MongoDB settings: {} (set them in the config file, as ROSTER_* \
     variables, or pass --in-memory)",
    missing.join(", ")
  );

  let store = MongoStore::connect(
    &server_cfg.mongo_uri,
    &server_cfg.database,
    &server_cfg.persons_collection,
  )
  .await
  .context("failed to configure MongoDB client")?;
  store.ping().await.context("MongoDB is not reachable")?;
  tracing::info!(
    database = %server_cfg.database,
    collection = %store.collection_name(),
    "connected to MongoDB"
  );

  serve(store, &server_cfg).await
}

async fn serve<S>(store: S, server_cfg: &ServerConfig) -> anyhow::Result<()>
where
  S: PersonStore + Clone + Send + Sync + 'static,
{
  let state = AppState::new(store, server_cfg.store_timeout());
  let app = roster_api::router(state);
  let address = server_cfg.address();

  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;
  tracing::info!("Listening on http://{address}");

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  tracing::info!("server stopped");
  Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = tokio::signal::ctrl_c().await {
      tracing::error!(error = %e, "failed to listen for Ctrl-C");
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let sigterm = async {
    use tokio::signal::unix::{SignalKind, signal};
    match signal(SignalKind::terminate()) {
      Ok(mut stream) => {
        stream.recv().await;
      }
      Err(e) => {
        tracing::error!(error = %e, "failed to listen for SIGTERM");
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let sigterm = std::future::pending::<()>();

  tokio::select! {
    () = ctrl_c => {}
    () = sigterm => {}
  }
  tracing::info!("shutdown signal received");
}
