//! Sample questions for a fresh database.

use trivia_core::category::CategoryId;

use crate::{Result, SqliteStore};

/// `(question, answer, category, difficulty)`; category ids refer to the
/// categories seeded by the schema.
const SAMPLE_QUESTIONS: &[(&str, &str, CategoryId, i64)] = &[
  ("What is the heaviest organ in the human body?", "The Liver", 1, 4),
  ("Who discovered penicillin?", "Alexander Fleming", 1, 3),
  ("Hematology is a branch of medicine involving the study of what?", "Blood", 1, 4),
  ("Which Dutch graphic artist, initials M C, was a creator of optical illusions?", "Escher", 2, 1),
  ("La Giaconda is better known as what?", "Mona Lisa", 2, 3),
  ("Which is the only team to play in every soccer World Cup tournament?", "Brazil", 6, 3),
  ("Which country won the first ever soccer World Cup in 1930?", "Uruguay", 6, 4),
  ("What is the largest lake in Africa?", "Lake Victoria", 3, 2),
  ("In which royal palace would you find the Hall of Mirrors?", "The Palace of Versailles", 3, 3),
  ("The Taj Mahal is located in which Indian city?", "Agra", 3, 2),
  ("Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?", "Maya Angelou", 4, 2),
  ("Who invented Peanut Butter?", "George Washington Carver", 4, 2),
  ("Which dung beetle was worshipped by the ancient Egyptians?", "Scarab", 4, 4),
  ("What movie earned Tom Hanks his third straight Oscar nomination, in 1996?", "Apollo 13", 5, 4),
  ("What actor did author Anne Rice first denounce, then praise in the role of her beloved Lestat?", "Tom Cruise", 5, 4),
  ("What was the title of the 1990 fantasy directed by Tim Burton about a young man with multi-bladed appendages?", "Edward Scissorhands", 5, 3),
];

impl SqliteStore {
  /// Insert the sample questions if the question table is empty.
  ///
  /// Returns the number of questions inserted; `0` when the table already
  /// held data.
  pub async fn seed_sample_questions(&self) -> Result<usize> {
    let inserted = self
      .conn
      .call(|conn| {
        let tx = conn.transaction()?;
        let existing: i64 =
          tx.query_row("SELECT COUNT(*) FROM questions", [], |r| r.get(0))?;
        if existing > 0 {
          return Ok(0);
        }
        {
          let mut stmt = tx.prepare(
            "INSERT INTO questions (question, answer, category, difficulty)
             VALUES (?1, ?2, ?3, ?4)",
          )?;
          for (question, answer, category, difficulty) in SAMPLE_QUESTIONS {
            stmt.execute(rusqlite::params![question, answer, category, difficulty])?;
          }
        }
        tx.commit()?;
        Ok(SAMPLE_QUESTIONS.len())
      })
      .await?;

    if inserted > 0 {
      tracing::info!(inserted, "seeded sample questions");
    }
    Ok(inserted)
  }
}
