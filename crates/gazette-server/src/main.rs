//! gazette server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite store, optionally reseeds it, and serves the JSON API over HTTP.
//!
//! # Local development
//!
//! ```sh
//! cargo run -p gazette-server -- --dev-data
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use gazette_core::seed::SeedData;
use gazette_server::{load_config, open_store, router};
use gazette_store_sqlite::DEV_DATA;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Gazette news API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Replace the store's contents with this JSON dataset before serving.
  #[arg(long, conflicts_with = "dev_data")]
  seed: Option<PathBuf>,

  /// Replace the store's contents with the bundled development dataset.
  #[arg(long)]
  dev_data: bool,
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

  let server_cfg = load_config(&cli.config).context("failed to load configuration")?;

  let store = open_store(&server_cfg.database_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", server_cfg.database_path))?;

  let seed = if cli.dev_data {
    Some(DEV_DATA.to_owned())
  } else if let Some(path) = cli.seed.or(server_cfg.seed_path.clone()) {
    let text = std::fs::read_to_string(&path)
      .with_context(|| format!("failed to read seed file {path:?}"))?;
    Some(text)
  } else {
    None
  };

  if let Some(text) = seed {
    let data = SeedData::from_json(&text).context("failed to parse seed data")?;
    store.seed(data).await.context("failed to seed store")?;
  }

  let app = router(Arc::new(store));
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
