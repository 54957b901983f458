//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every error renders as `{"success": false, "error": <status>, "message": ...}`.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("unprocessable entity: {0}")]
  Unprocessable(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("method not allowed")]
  MethodNotAllowed,

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Wrap a store failure. Domain errors anywhere in the source chain (a
  /// question deleted or a category missing by the time the store writes)
  /// keep their 404/422 status instead of becoming a 500.
  pub fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    match find_core(&e) {
      Some(core) => ApiError::from_core(core),
      None => ApiError::Store(Box::new(e)),
    }
  }

  fn from_core(e: &trivia_core::Error) -> Self {
    match e {
      trivia_core::Error::QuestionNotFound(_) => ApiError::NotFound(e.to_string()),
      trivia_core::Error::UnknownCategory(_) | trivia_core::Error::InvalidField { .. } => {
        ApiError::Unprocessable(e.to_string())
      }
    }
  }

  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
      ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

fn find_core<'a>(
  e: &'a (dyn std::error::Error + 'static),
) -> Option<&'a trivia_core::Error> {
  let mut current = Some(e);
  while let Some(err) = current {
    if let Some(core) = err.downcast_ref::<trivia_core::Error>() {
      return Some(core);
    }
    current = err.source();
  }
  None
}

impl From<trivia_core::Error> for ApiError {
  fn from(e: trivia_core::Error) -> Self { ApiError::from_core(&e) }
}

impl From<JsonRejection> for ApiError {
  fn from(r: JsonRejection) -> Self {
    match r {
      JsonRejection::JsonSyntaxError(_) => ApiError::BadRequest(r.body_text()),
      _ => ApiError::Unprocessable(r.body_text()),
    }
  }
}

impl From<PathRejection> for ApiError {
  fn from(r: PathRejection) -> Self { ApiError::NotFound(r.body_text()) }
}

impl From<QueryRejection> for ApiError {
  fn from(r: QueryRejection) -> Self { ApiError::BadRequest(r.body_text()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let message = match &self {
      ApiError::NotFound(m) => format!("Not found: {m}"),
      ApiError::Unprocessable(m) => format!("Unprocessable Entity: {m}"),
      ApiError::BadRequest(m) => format!("Bad request: {m}"),
      ApiError::MethodNotAllowed => "Method not allowed".to_string(),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        "Internal server error".to_string()
      }
    };
    let body = json!({
      "success": false,
      "error":   status.as_u16(),
      "message": message,
    });
    (status, Json(body)).into_response()
  }
}
