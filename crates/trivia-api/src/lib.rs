//! JSON REST API for the trivia game.
//!
//! Exposes an axum [`Router`] backed by any [`trivia_core::store::TriviaStore`].
//! CORS, tracing and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = trivia_api::api_router(Arc::new(store));
//! ```

pub mod categories;
pub mod error;
pub mod extract;
pub mod questions;
pub mod quizzes;
pub mod search;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, post},
};
use trivia_core::store::TriviaStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// Unknown paths answer with the JSON 404 body, known paths hit with the wrong
/// method with the JSON 405 body.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: TriviaStore + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Categories
    .route("/categories", get(categories::list::<S>))
    .route("/categories/{id}/questions", get(categories::questions::<S>))
    // Questions
    .route("/questions", get(questions::list::<S>).post(questions::create::<S>))
    .route("/questions/{id}", delete(questions::delete_one::<S>))
    .route("/questions/search", post(search::handler::<S>))
    // Quizzes
    .route("/quizzes", post(quizzes::handler::<S>))
    .fallback(not_found)
    .method_not_allowed_fallback(method_not_allowed)
    .with_state(store)
}

async fn not_found() -> ApiError {
  ApiError::NotFound("no such resource".to_string())
}

async fn method_not_allowed() -> ApiError { ApiError::MethodNotAllowed }

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use serde_json::{Value, json};
  use tower::ServiceExt as _;
  use trivia_core::question::NewQuestion;
  use trivia_store_sqlite::SqliteStore;

  async fn make_store() -> Arc<SqliteStore> {
    Arc::new(SqliteStore::open_in_memory().await.unwrap())
  }

  async fn seed(store: &SqliteStore, n: usize, category: i64) -> Vec<i64> {
    let mut ids = Vec::with_capacity(n);
    for i in 0..n {
      let q = store
        .add_question(NewQuestion {
          question:   format!("Question number {i} in category {category}"),
          answer:     format!("Answer {i}"),
          category,
          difficulty: 1 + (i as i64 % 5),
        })
        .await
        .unwrap();
      ids.push(q.id);
    }
    ids
  }

  async fn send(
    store:  Arc<SqliteStore>,
    method: &str,
    uri:    &str,
    body:   Option<Value>,
  ) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
      Some(json) => builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };
    let resp = api_router(store).oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
  }

  fn assert_error(status: StatusCode, body: &Value, expected: StatusCode) {
    assert_eq!(status, expected, "body: {body}");
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], expected.as_u16());
    assert!(body["message"].is_string());
  }

  // ── Categories ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn get_categories() {
    let (status, body) = send(make_store().await, "GET", "/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["total_categories"], 6);
    let categories = body["categories"].as_object().unwrap();
    assert_eq!(categories.len(), 6);
    assert_eq!(categories["1"], "Science");
  }

  #[tokio::test]
  async fn get_questions_in_category() {
    let store = make_store().await;
    seed(&store, 3, 2).await;
    seed(&store, 2, 4).await;

    let (status, body) = send(store, "GET", "/categories/2/questions", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current_category"], 2);
    assert_eq!(body["total_questions"], 3);
    let questions = body["questions"].as_array().unwrap();
    assert!(questions.iter().all(|q| q["category"] == 2));
  }

  #[tokio::test]
  async fn unknown_category_yields_empty_success() {
    let store = make_store().await;
    seed(&store, 2, 1).await;
    let (status, body) = send(store, "GET", "/categories/99/questions", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["total_questions"], 0);
    assert_eq!(body["questions"], json!([]));
    assert_eq!(body["current_category"], 99);
  }

  #[tokio::test]
  async fn non_integer_category_is_404() {
    let (status, body) =
      send(make_store().await, "GET", "/categories/art/questions", None).await;
    assert_error(status, &body, StatusCode::NOT_FOUND);
  }

  // ── Question listing ────────────────────────────────────────────────────────

  #[tokio::test]
  async fn get_questions_paginates() {
    let store = make_store().await;
    seed(&store, 23, 1).await;

    let (status, body) = send(store.clone(), "GET", "/questions", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["questions"].as_array().unwrap().len(), 10);
    assert_eq!(body["total_questions"], 23);
    assert_eq!(body["categories"].as_object().unwrap().len(), 6);

    let (status, body) = send(store, "GET", "/questions?page=3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["questions"].as_array().unwrap().len(), 3);
    assert_eq!(body["total_questions"], 23);
  }

  #[tokio::test]
  async fn page_beyond_data_is_404() {
    let store = make_store().await;
    seed(&store, 5, 1).await;
    let (status, body) = send(store.clone(), "GET", "/questions?page=2", None).await;
    assert_error(status, &body, StatusCode::NOT_FOUND);

    let (status, body) = send(store, "GET", "/questions?page=0", None).await;
    assert_error(status, &body, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn empty_store_first_page_is_404() {
    let (status, body) = send(make_store().await, "GET", "/questions", None).await;
    assert_error(status, &body, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn malformed_page_falls_back_to_first() {
    let store = make_store().await;
    seed(&store, 12, 1).await;
    let (status, body) = send(store, "GET", "/questions?page=two", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["questions"].as_array().unwrap().len(), 10);
  }

  // ── Delete ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn delete_question() {
    let store = make_store().await;
    let ids = seed(&store, 3, 1).await;

    let (status, body) =
      send(store.clone(), "DELETE", &format!("/questions/{}", ids[1]), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["deleted"], ids[1]);

    let (_, body) = send(store, "GET", "/questions", None).await;
    assert_eq!(body["total_questions"], 2);
    let listed: Vec<i64> = body["questions"]
      .as_array()
      .unwrap()
      .iter()
      .map(|q| q["id"].as_i64().unwrap())
      .collect();
    assert!(!listed.contains(&ids[1]));
  }

  #[tokio::test]
  async fn delete_missing_question_is_404() {
    let store = make_store().await;
    seed(&store, 2, 1).await;
    let (status, body) = send(store.clone(), "DELETE", "/questions/1000", None).await;
    assert_error(status, &body, StatusCode::NOT_FOUND);

    let (_, body) = send(store, "GET", "/questions", None).await;
    assert_eq!(body["total_questions"], 2);
  }

  #[tokio::test]
  async fn delete_without_id_is_405() {
    let (status, body) = send(make_store().await, "DELETE", "/questions", None).await;
    assert_error(status, &body, StatusCode::METHOD_NOT_ALLOWED);
  }

  // ── Create ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_question() {
    let store = make_store().await;
    seed(&store, 4, 1).await;

    let (status, body) = send(
      store.clone(),
      "POST",
      "/questions",
      Some(json!({
        "question":   "Which planet is known as the red planet?",
        "answer":     "Mars",
        "category":   1,
        "difficulty": 2,
      })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["total_questions"], 5);
    assert_eq!(body["questions"].as_array().unwrap().len(), 5);

    let id = body["created"].as_i64().unwrap();
    let stored = store.get_question(id).await.unwrap().unwrap();
    assert_eq!(stored.question, "Which planet is known as the red planet?");
    assert_eq!(stored.answer, "Mars");
    assert_eq!(stored.category, 1);
    assert_eq!(stored.difficulty, 2);
  }

  #[tokio::test]
  async fn create_accepts_numeric_strings() {
    let (status, body) = send(
      make_store().await,
      "POST",
      "/questions",
      Some(json!({
        "question":   "fake question",
        "answer":     "fake answer",
        "category":   "1",
        "difficulty": "1",
      })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_questions"], 1);
  }

  #[tokio::test]
  async fn create_with_missing_field_is_422() {
    let store = make_store().await;
    let (status, body) = send(
      store.clone(),
      "POST",
      "/questions",
      Some(json!({ "question": "no answer", "category": 1, "difficulty": 1 })),
    )
    .await;
    assert_error(status, &body, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(store.list_questions(None).await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn create_with_invalid_values_is_422() {
    let store = make_store().await;
    let cases = [
      json!({ "question": "q", "answer": "a", "category": 42, "difficulty": 1 }),
      json!({ "question": "q", "answer": "a", "category": 1, "difficulty": 9 }),
      json!({ "question": "", "answer": "a", "category": 1, "difficulty": 1 }),
      json!({ "question": "q", "answer": "a", "category": "one", "difficulty": 1 }),
    ];
    for case in cases {
      let (status, body) = send(store.clone(), "POST", "/questions", Some(case)).await;
      assert_error(status, &body, StatusCode::UNPROCESSABLE_ENTITY);
    }
    assert!(store.list_questions(None).await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn create_with_broken_json_is_400() {
    let req = Request::builder()
      .method("POST")
      .uri("/questions")
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from("{\"question\": "))
      .unwrap();
    let resp = api_router(make_store().await).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  // ── Search ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn search_finds_single_match() {
    let store = make_store().await;
    seed(&store, 3, 1).await;
    store
      .add_question(NewQuestion {
        question:   "What is the title of Tolkien's first novel?".into(),
        answer:     "The Hobbit".into(),
        category:   2,
        difficulty: 2,
      })
      .await
      .unwrap();

    let (status, body) = send(
      store,
      "POST",
      "/questions/search",
      Some(json!({ "searchTerm": "TITLE" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_questions"], 1);
    assert_eq!(body["questions"][0]["answer"], "The Hobbit");
    assert_eq!(body["current_category"], Value::Null);
  }

  #[tokio::test]
  async fn search_ignores_case_beyond_ascii() {
    let store = make_store().await;
    store
      .add_question(NewQuestion {
        question:   "Quelle ÉCOLE a formé Monet ?".into(),
        answer:     "L'École des Beaux-Arts".into(),
        category:   2,
        difficulty: 3,
      })
      .await
      .unwrap();

    let (status, body) = send(
      store,
      "POST",
      "/questions/search",
      Some(json!({ "searchTerm": "école" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_questions"], 1);
    assert_eq!(body["questions"][0]["question"], "Quelle ÉCOLE a formé Monet ?");
  }

  #[tokio::test]
  async fn search_without_matches_is_empty_success() {
    let store = make_store().await;
    seed(&store, 3, 1).await;
    let (status, body) = send(
      store,
      "POST",
      "/questions/search",
      Some(json!({ "searchTerm": "zebra" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["total_questions"], 0);
    assert_eq!(body["questions"], json!([]));
  }

  #[tokio::test]
  async fn search_without_term_is_404() {
    let store = make_store().await;
    for payload in [json!({ "searchTerm": "" }), json!({})] {
      let (status, body) =
        send(store.clone(), "POST", "/questions/search", Some(payload)).await;
      assert_error(status, &body, StatusCode::NOT_FOUND);
    }
  }

  // ── Quizzes ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn quiz_walks_a_category_until_exhausted() {
    let store = make_store().await;
    let science = seed(&store, 4, 1).await;
    seed(&store, 4, 3).await;

    let mut previous: Vec<i64> = Vec::new();
    loop {
      let (status, body) = send(
        store.clone(),
        "POST",
        "/quizzes",
        Some(json!({
          "quiz_category":      { "type": "Science", "id": 1 },
          "previous_questions": previous,
        })),
      )
      .await;
      assert_eq!(status, StatusCode::OK);
      assert_eq!(body["success"], true);

      if body["question"].is_null() {
        break;
      }
      let question = &body["question"];
      assert_eq!(question["category"], 1);
      let id = question["id"].as_i64().unwrap();
      assert!(!previous.contains(&id));
      previous.push(id);
      assert!(previous.len() <= science.len());
    }

    previous.sort_unstable();
    assert_eq!(previous, science);
  }

  #[tokio::test]
  async fn quiz_any_category_draws_from_all() {
    let store = make_store().await;
    let mut all = seed(&store, 2, 1).await;
    all.extend(seed(&store, 2, 5).await);

    let mut previous: Vec<i64> = Vec::new();
    for _ in 0..all.len() {
      let (_, body) = send(
        store.clone(),
        "POST",
        "/quizzes",
        Some(json!({ "quiz_category": { "id": "0" }, "previous_questions": previous })),
      )
      .await;
      previous.push(body["question"]["id"].as_i64().unwrap());
    }
    previous.sort_unstable();
    assert_eq!(previous, all);
  }

  #[tokio::test]
  async fn quiz_with_empty_category_returns_null() {
    let (status, body) = send(
      make_store().await,
      "POST",
      "/quizzes",
      Some(json!({ "quiz_category": { "id": 6 }, "previous_questions": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["question"], Value::Null);
  }

  #[tokio::test]
  async fn quiz_missing_parameters_is_422() {
    let store = make_store().await;
    for payload in [
      json!({ "quiz_category": { "id": 1 } }),
      json!({ "previous_questions": [] }),
      json!({}),
    ] {
      let (status, body) = send(store.clone(), "POST", "/quizzes", Some(payload)).await;
      assert_error(status, &body, StatusCode::UNPROCESSABLE_ENTITY);
    }
  }

  // ── Fallbacks ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn unknown_path_is_json_404() {
    let (status, body) = send(make_store().await, "GET", "/nope", None).await;
    assert_error(status, &body, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn wrong_method_is_json_405() {
    let (status, body) = send(make_store().await, "PATCH", "/categories", None).await;
    assert_error(status, &body, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["message"], "Method not allowed");
  }
}
