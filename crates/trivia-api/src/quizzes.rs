//! Handler for `POST /quizzes`.
//!
//! Body: `{"quiz_category": {"id": 0}, "previous_questions": [1, 4]}`, where
//! category id `0` means any category. Responds with a random question not in
//! `previous_questions`, or `"question": null` once the pool is exhausted.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use trivia_core::{
  category::CategoryId,
  question::{Question, QuestionId},
  quiz::{self, QuizCategory},
  store::TriviaStore,
};

use crate::{
  error::ApiError,
  extract::{AppJson, int_or_string},
};

/// The `quiz_category` object sent by the client. Other keys (e.g. `type`)
/// are ignored.
#[derive(Debug, Deserialize)]
pub struct QuizCategoryBody {
  #[serde(deserialize_with = "int_or_string")]
  pub id: CategoryId,
}

/// Both fields are required; a body missing either is rejected with 422.
#[derive(Debug, Deserialize)]
pub struct QuizBody {
  pub quiz_category:      QuizCategoryBody,
  pub previous_questions: Vec<QuestionId>,
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
  pub success:  bool,
  pub question: Option<Question>,
}

/// `POST /quizzes`
pub async fn handler<S>(
  State(store): State<Arc<S>>,
  AppJson(body): AppJson<QuizBody>,
) -> Result<Json<QuizResponse>, ApiError>
where
  S: TriviaStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let category = QuizCategory::from(body.quiz_category.id);
  let pool = store
    .list_questions(category.filter())
    .await
    .map_err(ApiError::store)?;

  let question = quiz::pick_next(pool, &body.previous_questions, &mut rand::thread_rng());
  if question.is_none() {
    tracing::debug!(?category, asked = body.previous_questions.len(), "quiz exhausted");
  }

  Ok(Json(QuizResponse { success: true, question }))
}
