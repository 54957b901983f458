//! Error type for `trivia-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] trivia_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// A column held a value that does not fit the domain type.
  #[error("corrupt row: {0}")]
  Corrupt(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
