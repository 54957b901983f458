//! [`SqliteStore`] — the SQLite implementation of [`TriviaStore`].

use std::path::Path;

use rusqlite::{OptionalExtension as _, functions::FunctionFlags};
use trivia_core::{
  category::{Category, CategoryId},
  pagination::{Page, PageRequest},
  question::{NewQuestion, Question, QuestionId},
  store::TriviaStore,
};

use crate::{Error, Result, schema::SCHEMA};

const QUESTION_COLUMNS: &str = "id, question, answer, category, difficulty";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A trivia store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref().to_path_buf();
    let conn = tokio_rusqlite::Connection::open(&path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    tracing::info!(path = %path.display(), "opened trivia store");
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        register_functions(conn)?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// Name of the SQL function that lowercases text with full Unicode rules.
/// SQLite's own `lower()` and `LIKE` fold ASCII only.
const LOWER_UNICODE: &str = "lower_unicode";

fn register_functions(conn: &rusqlite::Connection) -> rusqlite::Result<()> {
  conn.create_scalar_function(
    LOWER_UNICODE,
    1,
    FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
    |ctx| {
      let text: String = ctx.get(0)?;
      Ok(text.to_lowercase())
    },
  )
}

// ─── Row mapping ─────────────────────────────────────────────────────────────

fn question_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Question> {
  Ok(Question {
    id:         row.get(0)?,
    question:   row.get(1)?,
    answer:     row.get(2)?,
    category:   row.get(3)?,
    difficulty: row.get(4)?,
  })
}

fn category_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Category> {
  Ok(Category { id: row.get(0)?, label: row.get(1)? })
}

/// Build a `LIKE` pattern matching `term` anywhere, with the wildcard
/// characters in `term` escaped so they match literally.
pub(crate) fn contains_pattern(term: &str) -> String {
  let mut pattern = String::with_capacity(term.len() + 2);
  pattern.push('%');
  for c in term.chars() {
    if matches!(c, '%' | '_' | '\\') {
      pattern.push('\\');
    }
    pattern.push(c);
  }
  pattern.push('%');
  pattern
}

// ─── TriviaStore impl ────────────────────────────────────────────────────────

impl TriviaStore for SqliteStore {
  type Error = Error;

  // ── Categories ────────────────────────────────────────────────────────────

  async fn list_categories(&self) -> Result<Vec<Category>> {
    let categories = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT id, type FROM categories ORDER BY id")?;
        let rows = stmt
          .query_map([], category_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(categories)
  }

  async fn get_category(&self, id: CategoryId) -> Result<Option<Category>> {
    let category = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, type FROM categories WHERE id = ?1",
              rusqlite::params![id],
              category_from_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(category)
  }

  // ── Questions ─────────────────────────────────────────────────────────────

  async fn questions_page(&self, page: PageRequest) -> Result<Page<Question>> {
    let limit  = i64::try_from(page.limit()).unwrap_or(i64::MAX);
    let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);

    let (items, total): (Vec<Question>, i64) = self
      .conn
      .call(move |conn| {
        let total: i64 =
          conn.query_row("SELECT COUNT(*) FROM questions", [], |r| r.get(0))?;
        let mut stmt = conn.prepare(&format!(
          "SELECT {QUESTION_COLUMNS} FROM questions ORDER BY id LIMIT ?1 OFFSET ?2"
        ))?;
        let items = stmt
          .query_map(rusqlite::params![limit, offset], question_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok((items, total))
      })
      .await?;

    let total = usize::try_from(total)
      .map_err(|_| Error::Corrupt(format!("negative question count {total}")))?;
    Ok(Page { items, total })
  }

  async fn list_questions(&self, category: Option<CategoryId>) -> Result<Vec<Question>> {
    let questions = self
      .conn
      .call(move |conn| {
        let rows = if let Some(c) = category {
          let mut stmt = conn.prepare(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions WHERE category = ?1 ORDER BY id"
          ))?;
          stmt
            .query_map(rusqlite::params![c], question_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt = conn
            .prepare(&format!("SELECT {QUESTION_COLUMNS} FROM questions ORDER BY id"))?;
          stmt
            .query_map([], question_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;
    Ok(questions)
  }

  async fn get_question(&self, id: QuestionId) -> Result<Option<Question>> {
    let question = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {QUESTION_COLUMNS} FROM questions WHERE id = ?1"),
              rusqlite::params![id],
              question_from_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(question)
  }

  async fn add_question(&self, input: NewQuestion) -> Result<Question> {
    input.validate()?;

    let category   = input.category;
    let text       = input.question.clone();
    let answer     = input.answer.clone();
    let difficulty = input.difficulty;

    // `None` when the category does not exist.
    let id: Option<QuestionId> = self
      .conn
      .call(move |conn| {
        let known = conn
          .query_row(
            "SELECT 1 FROM categories WHERE id = ?1",
            rusqlite::params![category],
            |_| Ok(()),
          )
          .optional()?
          .is_some();
        if !known {
          return Ok(None);
        }

        conn.execute(
          "INSERT INTO questions (question, answer, category, difficulty)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![text, answer, category, difficulty],
        )?;
        Ok(Some(conn.last_insert_rowid()))
      })
      .await?;

    let id = id.ok_or(trivia_core::Error::UnknownCategory(category))?;
    tracing::debug!(id, category, "inserted question");
    Ok(input.into_question(id))
  }

  async fn delete_question(&self, id: QuestionId) -> Result<()> {
    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM questions WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;

    if affected == 0 {
      return Err(trivia_core::Error::QuestionNotFound(id).into());
    }
    tracing::debug!(id, "deleted question");
    Ok(())
  }

  async fn search_questions(&self, term: &str) -> Result<Vec<Question>> {
    let pattern = contains_pattern(&term.to_lowercase());

    let questions = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {QUESTION_COLUMNS} FROM questions
           WHERE {LOWER_UNICODE}(question) LIKE ?1 ESCAPE '\\'
           ORDER BY id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![pattern], question_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(questions)
  }
}
