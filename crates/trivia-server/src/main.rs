//! trivia-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the SQLite
//! store, and serves the trivia JSON API over HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use trivia_server::{ServerConfig, expand_tilde};
use trivia_store_sqlite::SqliteStore;

#[derive(Parser)]
#[command(author, version, about = "Trivia API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Fill an empty database with sample questions before serving.
  #[arg(long)]
  seed_sample_questions: bool,
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

  let mut server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;
  server_cfg.seed_sample_questions |= cli.seed_sample_questions;

  let store_path = expand_tilde(&server_cfg.database_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  if server_cfg.seed_sample_questions {
    store
      .seed_sample_questions()
      .await
      .context("failed to seed sample questions")?;
  }

  let app = trivia_server::app(Arc::new(store), &server_cfg)?;
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
