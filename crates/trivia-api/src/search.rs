//! Handler for `POST /questions/search`.
//!
//! Body: `{"searchTerm": "..."}`. An empty or missing term is a 404 rather
//! than "match everything".

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use trivia_core::{category::CategoryId, question::Question, store::TriviaStore};

use crate::{error::ApiError, extract::AppJson};

#[derive(Debug, Default, Deserialize)]
pub struct SearchBody {
  #[serde(rename = "searchTerm", default)]
  pub search_term: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
  pub success:          bool,
  pub questions:        Vec<Question>,
  pub total_questions:  usize,
  /// Always `null`: search spans every category.
  pub current_category: Option<CategoryId>,
}

/// `POST /questions/search`
pub async fn handler<S>(
  State(store): State<Arc<S>>,
  AppJson(body): AppJson<SearchBody>,
) -> Result<Json<SearchResponse>, ApiError>
where
  S: TriviaStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let term = body
    .search_term
    .filter(|t| !t.is_empty())
    .ok_or_else(|| ApiError::NotFound("no search term given".to_string()))?;

  let questions = store
    .search_questions(&term)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(SearchResponse {
    success:          true,
    total_questions:  questions.len(),
    questions,
    current_category: None,
  }))
}
