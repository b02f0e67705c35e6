//! Process wiring for the Gazette server: configuration, store opening and
//! the outermost router layers.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use gazette_core::store::NewsStore;
use gazette_store_sqlite::SqliteStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `GAZETTE_*` environment variables.
#[derive(Deserialize, Clone, Debug)]
pub struct ServerConfig {
  pub host:          String,
  pub port:          u16,
  /// SQLite file; `:memory:` opens a private in-memory database.
  pub database_path: PathBuf,
  /// JSON dataset applied at startup, replacing the store's contents.
  pub seed_path:     Option<PathBuf>,
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Layer defaults, the optional TOML file at `path`, and the environment.
pub fn load_config(path: &Path) -> Result<ServerConfig, config::ConfigError> {
  config::Config::builder()
    .set_default("host", "127.0.0.1")?
    .set_default("port", 9090)?
    .set_default("database_path", "gazette.db")?
    .add_source(config::File::from(path).required(false))
    .add_source(config::Environment::with_prefix("GAZETTE"))
    .build()?
    .try_deserialize()
}

// ─── Store & router ───────────────────────────────────────────────────────────

pub async fn open_store(path: &Path) -> gazette_store_sqlite::Result<SqliteStore> {
  if path.as_os_str() == ":memory:" {
    SqliteStore::open_in_memory().await
  } else {
    SqliteStore::open(expand_tilde(path)).await
  }
}

/// The application router wrapped in request tracing.
pub fn router<S>(store: Arc<S>) -> Router
where
  S: NewsStore + 'static,
{
  gazette_api::app(store).layer(TraceLayer::new_for_http())
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use tower::ServiceExt as _;

  use super::*;

  #[test]
  fn missing_config_file_falls_back_to_defaults() {
    let cfg = load_config(Path::new("/nonexistent/gazette.toml")).unwrap();
    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.port, 9090);
    assert_eq!(cfg.database_path, PathBuf::from("gazette.db"));
    assert!(cfg.seed_path.is_none());
  }

  #[test]
  fn config_file_overrides_defaults() {
    let path = std::env::temp_dir().join(format!("gazette-{}.toml", std::process::id()));
    std::fs::write(&path, "port = 8088\ndatabase_path = \":memory:\"\n").unwrap();

    let cfg = load_config(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(cfg.port, 8088);
    assert_eq!(cfg.address(), "127.0.0.1:8088");
    assert_eq!(cfg.database_path, PathBuf::from(":memory:"));
  }

  #[test]
  fn expands_home_prefix_only() {
    assert_eq!(expand_tilde(Path::new("/srv/gazette.db")), PathBuf::from("/srv/gazette.db"));
    if let Ok(home) = std::env::var("HOME") {
      assert_eq!(
        expand_tilde(Path::new("~/gazette.db")),
        PathBuf::from(home).join("gazette.db")
      );
    }
  }

  #[tokio::test]
  async fn traced_router_serves_the_api() {
    let store = open_store(Path::new(":memory:")).await.unwrap();
    let app = router(Arc::new(store));

    let req = Request::builder().uri("/api/topics").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
  }
}
