use thiserror::Error;
use verso_config::ConfigError;

/// Errors opening or administering a store. Read failures go through the
/// core `StoreError` instead.
#[derive(Debug, Error)]
pub enum StorageError {
  #[error("config error: {0}")]
  Config(#[from] ConfigError),

  #[error("missing setting: {0}")]
  MissingSetting(&'static str),

  #[error("http client error: {0}")]
  Client(#[from] reqwest::Error),

  #[error("invalid store url: {0}")]
  InvalidUrl(String),

  #[error("google credentials: {0}")]
  Auth(#[from] gcp_auth::Error),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("database connection error: {0}")]
  Connection(String),

  #[error("invalid document: {0}")]
  InvalidDocument(String),

  #[error("migration error: {0}")]
  Migration(String),

  #[error("query error: {0}")]
  Query(#[from] diesel::result::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),
}
