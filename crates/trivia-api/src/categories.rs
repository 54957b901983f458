//! Handlers for `/categories` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/categories` | id → label mapping |
//! | `GET`  | `/categories/:id/questions` | unknown ids yield an empty list |

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Serialize;
use trivia_core::{
  category::{CategoryId, CategoryMap, category_map},
  question::Question,
  store::TriviaStore,
};

use crate::{error::ApiError, extract::AppPath};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
  pub success:          bool,
  pub categories:       CategoryMap,
  pub total_categories: usize,
}

/// `GET /categories`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<CategoriesResponse>, ApiError>
where
  S: TriviaStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let categories = category_map(store.list_categories().await.map_err(ApiError::store)?);
  Ok(Json(CategoriesResponse {
    success: true,
    total_categories: categories.len(),
    categories,
  }))
}

// ─── Questions in a category ──────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CategoryQuestionsResponse {
  pub success:          bool,
  pub questions:        Vec<Question>,
  pub current_category: CategoryId,
  pub total_questions:  usize,
}

/// `GET /categories/:id/questions`
pub async fn questions<S>(
  State(store): State<Arc<S>>,
  AppPath(id): AppPath<CategoryId>,
) -> Result<Json<CategoryQuestionsResponse>, ApiError>
where
  S: TriviaStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let questions = store
    .list_questions(Some(id))
    .await
    .map_err(ApiError::store)?;
  Ok(Json(CategoryQuestionsResponse {
    success:          true,
    total_questions:  questions.len(),
    current_category: id,
    questions,
  }))
}
