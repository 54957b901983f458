//! Handlers for `/questions` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/questions` | `?page=N` (default 1); 404 past the last page |
//! | `POST`   | `/questions` | Body: [`CreateBody`]; 422 on invalid input |
//! | `DELETE` | `/questions/:id` | 404 if not found |

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use trivia_core::{
  category::{CategoryId, CategoryMap, category_map},
  pagination::PageRequest,
  question::{NewQuestion, Question, QuestionId},
  store::TriviaStore,
};

use crate::{
  error::ApiError,
  extract::{AppJson, AppPath, AppQuery, int_or_string},
};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
  /// Kept as text: a value that is not an integer means page 1.
  pub page: Option<String>,
}

impl ListParams {
  fn page_number(&self) -> i64 {
    self
      .page
      .as_deref()
      .and_then(|p| p.trim().parse().ok())
      .unwrap_or(1)
  }
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
  pub success:         bool,
  pub questions:       Vec<Question>,
  pub categories:      CategoryMap,
  pub total_questions: usize,
}

/// `GET /questions[?page=N]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  AppQuery(params): AppQuery<ListParams>,
) -> Result<Json<ListResponse>, ApiError>
where
  S: TriviaStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let number = params.page_number();
  let request = PageRequest::new(number)
    .ok_or_else(|| ApiError::NotFound(format!("page {number} does not exist")))?;

  let page = store.questions_page(request).await.map_err(ApiError::store)?;
  if page.is_empty() {
    return Err(ApiError::NotFound(format!("page {number} is empty")));
  }

  let categories = category_map(store.list_categories().await.map_err(ApiError::store)?);
  Ok(Json(ListResponse {
    success:         true,
    questions:       page.items,
    categories,
    total_questions: page.total,
  }))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /questions`.
#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub question:   String,
  pub answer:     String,
  #[serde(deserialize_with = "int_or_string")]
  pub category:   CategoryId,
  #[serde(deserialize_with = "int_or_string")]
  pub difficulty: i64,
}

impl From<CreateBody> for NewQuestion {
  fn from(b: CreateBody) -> Self {
    NewQuestion {
      question:   b.question,
      answer:     b.answer,
      category:   b.category,
      difficulty: b.difficulty,
    }
  }
}

#[derive(Debug, Serialize)]
pub struct CreateResponse {
  pub success:         bool,
  pub created:         QuestionId,
  /// First page of the updated question list.
  pub questions:       Vec<Question>,
  pub total_questions: usize,
}

/// `POST /questions`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  AppJson(body): AppJson<CreateBody>,
) -> Result<Json<CreateResponse>, ApiError>
where
  S: TriviaStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let input = NewQuestion::from(body);
  input.validate()?;

  // The store rejects an unknown category in the same call as the insert.
  let created = store.add_question(input).await.map_err(ApiError::store)?;
  tracing::info!(id = created.id, category = created.category, "question created");

  let page = store
    .questions_page(PageRequest::first())
    .await
    .map_err(ApiError::store)?;
  Ok(Json(CreateResponse {
    success:         true,
    created:         created.id,
    questions:       page.items,
    total_questions: page.total,
  }))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
  pub success: bool,
  pub deleted: QuestionId,
}

/// `DELETE /questions/:id`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  AppPath(id): AppPath<QuestionId>,
) -> Result<Json<DeleteResponse>, ApiError>
where
  S: TriviaStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  store
    .get_question(id)
    .await
    .map_err(ApiError::store)?
    .ok_or(trivia_core::Error::QuestionNotFound(id))?;

  store.delete_question(id).await.map_err(ApiError::store)?;
  tracing::info!(id, "question deleted");

  Ok(Json(DeleteResponse { success: true, deleted: id }))
}
