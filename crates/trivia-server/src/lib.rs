//! HTTP server assembly for the trivia API: configuration, CORS and request
//! tracing around [`trivia_api::api_router`].

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::{
  Router,
  http::{HeaderValue, Method, header},
};
use serde::Deserialize;
use thiserror::Error;
use tower_http::{
  cors::{AllowOrigin, CorsLayer},
  trace::TraceLayer,
};
use trivia_core::store::TriviaStore;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `TRIVIA_*` environment variables.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
  pub host:                  String,
  pub port:                  u16,
  pub database_path:         PathBuf,
  /// Origins allowed by CORS; `"*"` allows any origin.
  pub allowed_origins:       Vec<String>,
  /// Fill an empty database with sample questions on startup.
  pub seed_sample_questions: bool,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:                  "127.0.0.1".to_string(),
      port:                  5000,
      database_path:         PathBuf::from("trivia.db"),
      allowed_origins:       vec!["*".to_string()],
      seed_sample_questions: false,
    }
  }
}

impl ServerConfig {
  /// Read `path` (if it exists) and overlay `TRIVIA_*` environment variables.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("TRIVIA")
          .try_parsing(true)
          .list_separator(",")
          .with_list_parse_key("allowed_origins"),
      )
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid CORS origin {0:?}")]
  InvalidOrigin(String),
}

// ─── App ─────────────────────────────────────────────────────────────────────

/// CORS policy for the browser client.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer, Error> {
  let allow_origin = if origins.iter().any(|o| o == "*") {
    AllowOrigin::any()
  } else {
    let values = origins
      .iter()
      .map(|o| HeaderValue::from_str(o).map_err(|_| Error::InvalidOrigin(o.clone())))
      .collect::<Result<Vec<_>, _>>()?;
    AllowOrigin::list(values)
  };

  Ok(
    CorsLayer::new()
      .allow_origin(allow_origin)
      .allow_methods([
        Method::GET,
        Method::POST,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
      ])
      .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
  )
}

/// The API router wrapped in CORS and request tracing.
pub fn app<S>(store: Arc<S>, config: &ServerConfig) -> Result<Router, Error>
where
  S: TriviaStore + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Ok(
    trivia_api::api_router(store)
      .layer(cors_layer(&config.allowed_origins)?)
      .layer(TraceLayer::new_for_http()),
  )
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
