//! Lingo Core - vocabulary parsing and quiz generation for the language learning app
//!
//! Turns text returned by a text-generation service into vocabulary, builds quizzes
//! from it, scores answers, and keeps optional SQLite history. The Python module is
//! built with the `python` feature.

pub mod answer;
pub mod config;
pub mod error;
pub mod import;
pub mod prompt;
pub mod quiz;
pub mod session;
pub mod store;
pub mod vocab;

#[cfg(feature = "python")]
mod python;

pub use answer::{answers_match, check_answer, score_quiz, AnswerCheck, QuizScore};
pub use config::{GenerationSettings, QuizSettings, Settings};
pub use error::{ConfigError, Error, ImportError, QuizError, Result, StoreError};
pub use import::{export_file, import_file, read_csv, write_csv};
pub use prompt::{Language, LearnerProfile, SkillLevel};
pub use quiz::{generate_quiz, try_generate_quiz, QuestionKind, QuizGenerator, QuizQuestion};
pub use session::{ChatTurn, Session, Speaker};
pub use store::{Attempt, AttemptStats, MissedWord, SavedList, VocabStore};
pub use vocab::{parse_vocabulary, parse_vocabulary_with, ParseOptions, VocabItem};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Lingo Core Python Module
#[cfg(feature = "python")]
#[pymodule]
fn lingo_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Parsing and quizzes
    m.add_function(wrap_pyfunction!(python::py_parse_vocabulary, m)?)?;
    m.add_function(wrap_pyfunction!(python::py_generate_quiz, m)?)?;
    m.add_function(wrap_pyfunction!(python::py_check_answer, m)?)?;
    m.add_function(wrap_pyfunction!(python::py_answers_match, m)?)?;

    // Prompts
    m.add_function(wrap_pyfunction!(python::py_vocabulary_prompt, m)?)?;
    m.add_function(wrap_pyfunction!(python::py_sentences_prompt, m)?)?;
    m.add_function(wrap_pyfunction!(python::py_pronunciation_prompt, m)?)?;
    m.add_function(wrap_pyfunction!(python::py_conversation_prompt, m)?)?;
    m.add_function(wrap_pyfunction!(python::py_writing_feedback_prompt, m)?)?;

    // File import/export
    m.add_function(wrap_pyfunction!(python::py_import_file, m)?)?;
    m.add_function(wrap_pyfunction!(python::py_export_file, m)?)?;

    // Saved lists and progress
    m.add_function(wrap_pyfunction!(python::py_save_list, m)?)?;
    m.add_function(wrap_pyfunction!(python::py_load_list, m)?)?;
    m.add_function(wrap_pyfunction!(python::py_list_names, m)?)?;
    m.add_function(wrap_pyfunction!(python::py_delete_list, m)?)?;
    m.add_function(wrap_pyfunction!(python::py_record_attempt, m)?)?;
    m.add_function(wrap_pyfunction!(python::py_get_stats, m)?)?;
    m.add_function(wrap_pyfunction!(python::py_get_missed_words, m)?)?;

    // Register classes
    m.add_class::<python::PyVocabItem>()?;
    m.add_class::<python::PyQuizQuestion>()?;
    m.add_class::<python::PyAnswerCheck>()?;
    m.add_class::<python::PyAttemptStats>()?;

    Ok(())
}
