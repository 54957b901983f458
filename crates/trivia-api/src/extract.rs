//! Extractors whose rejections render as [`ApiError`] JSON bodies, and
//! serde helpers for request schemas.

use axum::{
  Json,
  extract::{FromRequest, FromRequestParts, Path, Query},
};
use serde::{Deserialize, Deserializer, de};

use crate::error::ApiError;

/// `Json<T>` with malformed or incomplete bodies mapped to 422 (400 for
/// invalid JSON syntax).
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

/// `Path<T>` with unparsable segments mapped to 404.
#[derive(Debug, FromRequestParts)]
#[from_request(via(Path), rejection(ApiError))]
pub struct AppPath<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(Query), rejection(ApiError))]
pub struct AppQuery<T>(pub T);

/// Deserialize an integer that may arrive as a JSON number or as a numeric
/// string (HTML form values are posted as strings).
pub fn int_or_string<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
  D: Deserializer<'de>,
{
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum IntOrString {
    Int(i64),
    Str(String),
  }

  match IntOrString::deserialize(deserializer)? {
    IntOrString::Int(i) => Ok(i),
    IntOrString::Str(s) => s
      .trim()
      .parse()
      .map_err(|_| de::Error::custom(format!("expected an integer, got {s:?}"))),
  }
}
