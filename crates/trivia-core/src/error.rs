//! Error types for `trivia-core`.

use thiserror::Error;

use crate::{category::CategoryId, question::QuestionId};

#[derive(Debug, Error)]
pub enum Error {
  #[error("question not found: {0}")]
  QuestionNotFound(QuestionId),

  #[error("unknown category: {0}")]
  UnknownCategory(CategoryId),

  #[error("invalid {field}: {reason}")]
  InvalidField {
    field:  &'static str,
    reason: String,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
