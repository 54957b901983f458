//! Question records and the input type used to create them.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::{Error, Result, category::CategoryId};

pub type QuestionId = i64;

/// Difficulty scores accepted on creation.
pub const DIFFICULTY_RANGE: RangeInclusive<i64> = 1..=5;

/// A persisted trivia question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
  pub id:         QuestionId,
  pub question:   String,
  pub answer:     String,
  pub category:   CategoryId,
  pub difficulty: i64,
}

/// A question that has not been stored yet. The id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
  pub question:   String,
  pub answer:     String,
  pub category:   CategoryId,
  pub difficulty: i64,
}

impl NewQuestion {
  /// Check the field-level constraints that do not need the store.
  ///
  /// Whether `category` refers to an existing category is checked by the
  /// caller against the store.
  pub fn validate(&self) -> Result<()> {
    if self.question.trim().is_empty() {
      return Err(invalid("question", "must not be blank"));
    }
    if self.answer.trim().is_empty() {
      return Err(invalid("answer", "must not be blank"));
    }
    if !DIFFICULTY_RANGE.contains(&self.difficulty) {
      return Err(invalid(
        "difficulty",
        format!(
          "{} is outside {}..={}",
          self.difficulty,
          DIFFICULTY_RANGE.start(),
          DIFFICULTY_RANGE.end()
        ),
      ));
    }
    Ok(())
  }

  /// Attach a store-assigned id.
  pub fn into_question(self, id: QuestionId) -> Question {
    Question {
      id,
      question: self.question,
      answer: self.answer,
      category: self.category,
      difficulty: self.difficulty,
    }
  }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> Error {
  Error::InvalidField { field, reason: reason.into() }
}
