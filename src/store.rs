//! SQLite storage for saved vocabulary lists and quiz attempts.

use crate::error::StoreError;
use crate::quiz::{QuestionKind, QuizQuestion};
use crate::vocab::VocabItem;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Saved list summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedList {
    pub name: String,
    pub word_count: usize,
    pub saved_at: DateTime<Utc>,
}

/// One answered question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attempt {
    pub word: String,
    pub kind: QuestionKind,
    pub is_correct: bool,
    pub user_answer: String,
    pub expected_answer: String,
}

impl Attempt {
    /// Describe an answer to `question`, which was generated from `vocabulary`.
    pub fn new(
        vocabulary: &[VocabItem],
        question: &QuizQuestion,
        user_answer: &str,
        is_correct: bool,
    ) -> Self {
        let word = match vocabulary.get(question.source()) {
            Some(item) => item.word.clone(),
            None => {
                log::debug!(
                    "question source {} outside vocabulary of {}, recording empty word",
                    question.source(),
                    vocabulary.len()
                );
                String::new()
            }
        };

        Self {
            word,
            kind: question.kind(),
            is_correct,
            user_answer: user_answer.to_string(),
            expected_answer: question.correct_answer().to_string(),
        }
    }
}

/// Aggregate attempt statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttemptStats {
    pub total_attempts: i64,
    pub correct_count: i64,
    pub incorrect_count: i64,
    pub accuracy_percent: f64,
}

/// A word answered incorrectly at least once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissedWord {
    pub word: String,
    pub miss_count: i64,
}

pub struct VocabStore {
    conn: Connection,
}

impl VocabStore {
    /// Open (or create) a database file and make sure the schema exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS vocabulary (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                list_name TEXT NOT NULL,
                position INTEGER NOT NULL,
                word TEXT NOT NULL,
                meaning TEXT NOT NULL,
                saved_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_vocabulary_list ON vocabulary(list_name);
            CREATE TABLE IF NOT EXISTS attempts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                word TEXT NOT NULL,
                question_type TEXT NOT NULL,
                is_correct INTEGER NOT NULL,
                user_answer TEXT,
                expected_answer TEXT,
                attempted_at TEXT NOT NULL
            );",
        )?;
        Ok(Self { conn })
    }

    /// Save `items` under `name`, replacing a list with the same name.
    ///
    /// Empty lists are rejected and leave any existing list untouched.
    pub fn save_list(&mut self, name: &str, items: &[VocabItem]) -> Result<usize, StoreError> {
        if items.is_empty() {
            return Err(StoreError::EmptyList(name.to_string()));
        }

        let saved_at = Utc::now().to_rfc3339();
        let tx = self.conn.transaction()?;

        tx.execute("DELETE FROM vocabulary WHERE list_name = ?1", params![name])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO vocabulary (list_name, position, word, meaning, saved_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for (position, item) in items.iter().enumerate() {
                stmt.execute(params![name, position as i64, item.word, item.meaning, saved_at])?;
            }
        }
        tx.commit()?;

        log::info!("saved {} words to list '{}'", items.len(), name);
        Ok(items.len())
    }

    /// Load a saved list in its original order.
    pub fn load_list(&self, name: &str) -> Result<Vec<VocabItem>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT word, meaning FROM vocabulary WHERE list_name = ?1 ORDER BY position",
        )?;
        let items = stmt
            .query_map(params![name], |row| {
                Ok(VocabItem {
                    word: row.get(0)?,
                    meaning: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        if items.is_empty() {
            return Err(StoreError::ListNotFound(name.to_string()));
        }
        Ok(items)
    }

    /// All saved lists with word counts, by name.
    pub fn lists(&self) -> Result<Vec<SavedList>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT list_name, COUNT(*), MAX(saved_at) FROM vocabulary
             GROUP BY list_name ORDER BY list_name",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(name, count, saved_at)| {
                Ok(SavedList {
                    name,
                    word_count: count as usize,
                    saved_at: parse_timestamp(&saved_at)?,
                })
            })
            .collect()
    }

    /// Delete a list. Returns the number of words removed.
    pub fn delete_list(&self, name: &str) -> Result<usize, StoreError> {
        let deleted = self
            .conn
            .execute("DELETE FROM vocabulary WHERE list_name = ?1", params![name])?;
        Ok(deleted)
    }

    pub fn record_attempt(&self, attempt: &Attempt) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO attempts (word, question_type, is_correct, user_answer, expected_answer, attempted_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                attempt.word,
                attempt.kind.as_str(),
                attempt.is_correct as i32,
                attempt.user_answer,
                attempt.expected_answer,
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn stats(&self) -> Result<AttemptStats, StoreError> {
        let stats = self.conn.query_row(
            "SELECT COUNT(*), SUM(is_correct) FROM attempts",
            [],
            |row| {
                let total: i64 = row.get(0)?;
                let correct: i64 = row.get::<_, Option<i64>>(1)?.unwrap_or(0);
                let accuracy = if total > 0 {
                    correct as f64 / total as f64 * 100.0
                } else {
                    0.0
                };

                Ok(AttemptStats {
                    total_attempts: total,
                    correct_count: correct,
                    incorrect_count: total - correct,
                    accuracy_percent: accuracy,
                })
            },
        )?;
        Ok(stats)
    }

    /// Words answered incorrectly, most-missed first.
    pub fn missed_words(&self, limit: Option<usize>) -> Result<Vec<MissedWord>, StoreError> {
        // A negative LIMIT means no limit in SQLite
        let limit = limit.map_or(-1, |l| l as i64);

        let mut stmt = self.conn.prepare(
            "SELECT word, COUNT(*) AS miss_count FROM attempts
             WHERE is_correct = 0
             GROUP BY word
             ORDER BY miss_count DESC, word ASC
             LIMIT ?1",
        )?;
        let missed = stmt
            .query_map(params![limit], |row| {
                Ok(MissedWord {
                    word: row.get(0)?,
                    miss_count: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(missed)
    }
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| StoreError::Timestamp(s.to_string()))
}
