//! The `TriviaStore` trait.
//!
//! Implemented by storage backends (e.g. `trivia-store-sqlite`). The HTTP
//! layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  category::{Category, CategoryId},
  pagination::{Page, PageRequest},
  question::{NewQuestion, Question, QuestionId},
};

/// Abstraction over a trivia store backend.
///
/// Questions are always returned in persistence (ascending id) order.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait TriviaStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Categories ────────────────────────────────────────────────────────

  /// All categories, ordered by id.
  fn list_categories(
    &self,
  ) -> impl Future<Output = Result<Vec<Category>, Self::Error>> + Send + '_;

  /// Retrieve a category by id. Returns `None` if not found.
  fn get_category(
    &self,
    id: CategoryId,
  ) -> impl Future<Output = Result<Option<Category>, Self::Error>> + Send + '_;

  // ── Questions ─────────────────────────────────────────────────────────

  /// One page of the full question list, with the total question count.
  fn questions_page(
    &self,
    page: PageRequest,
  ) -> impl Future<Output = Result<Page<Question>, Self::Error>> + Send + '_;

  /// All questions, optionally restricted to one category.
  fn list_questions(
    &self,
    category: Option<CategoryId>,
  ) -> impl Future<Output = Result<Vec<Question>, Self::Error>> + Send + '_;

  /// Retrieve a question by id. Returns `None` if not found.
  fn get_question(
    &self,
    id: QuestionId,
  ) -> impl Future<Output = Result<Option<Question>, Self::Error>> + Send + '_;

  /// Persist a new question and return it with its assigned id.
  ///
  /// Fails with an error wrapping [`crate::Error::UnknownCategory`] when
  /// `input.category` does not exist; the check and the insert are atomic.
  fn add_question(
    &self,
    input: NewQuestion,
  ) -> impl Future<Output = Result<Question, Self::Error>> + Send + '_;

  /// Permanently remove a question. Fails with an error wrapping
  /// [`crate::Error::QuestionNotFound`] if no such question exists.
  fn delete_question(
    &self,
    id: QuestionId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Questions whose text contains `term`, ignoring case.
  fn search_questions<'a>(
    &'a self,
    term: &'a str,
  ) -> impl Future<Output = Result<Vec<Question>, Self::Error>> + Send + 'a;
}
