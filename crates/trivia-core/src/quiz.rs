//! Quiz picker: draw one question the player has not seen yet.

use std::collections::HashSet;

use rand::{Rng, seq::IteratorRandom};

use crate::{
  category::CategoryId,
  question::{Question, QuestionId},
};

/// Category id the quiz endpoint uses to mean "any category".
pub const ANY_CATEGORY: CategoryId = 0;

/// Which questions a quiz draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizCategory {
  Any,
  Only(CategoryId),
}

impl QuizCategory {
  /// The category filter to hand to the store, if any.
  pub fn filter(self) -> Option<CategoryId> {
    match self {
      QuizCategory::Any => None,
      QuizCategory::Only(id) => Some(id),
    }
  }
}

impl From<CategoryId> for QuizCategory {
  fn from(id: CategoryId) -> Self {
    if id == ANY_CATEGORY {
      QuizCategory::Any
    } else {
      QuizCategory::Only(id)
    }
  }
}

/// Choose uniformly among the questions in `pool` whose id is not in
/// `previous`. Returns `None` once every question has been asked.
pub fn pick_next<R>(
  pool: Vec<Question>,
  previous: &[QuestionId],
  rng: &mut R,
) -> Option<Question>
where
  R: Rng + ?Sized,
{
  let seen: HashSet<QuestionId> = previous.iter().copied().collect();
  pool.into_iter().filter(|q| !seen.contains(&q.id)).choose(rng)
}
