//! Python bindings, built with the `python` feature.

use crate::answer::{self, AnswerCheck};
use crate::config::QuizSettings;
use crate::import;
use crate::prompt::{Language, LearnerProfile, SkillLevel};
use crate::quiz::{QuestionKind, QuizGenerator, QuizQuestion};
use crate::store::{Attempt, AttemptStats, VocabStore};
use crate::vocab::{self, ParseOptions, VocabItem};
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt::Display;

fn runtime_err(e: impl Display) -> PyErr {
    PyRuntimeError::new_err(e.to_string())
}

#[pyclass(name = "VocabItem", get_all)]
#[derive(Debug, Clone)]
pub struct PyVocabItem {
    pub word: String,
    pub meaning: String,
}

#[pymethods]
impl PyVocabItem {
    #[new]
    fn new(word: String, meaning: String) -> Self {
        Self { word, meaning }
    }

    fn __repr__(&self) -> String {
        format!("VocabItem(word='{}', meaning='{}')", self.word, self.meaning)
    }
}

impl From<VocabItem> for PyVocabItem {
    fn from(item: VocabItem) -> Self {
        Self {
            word: item.word,
            meaning: item.meaning,
        }
    }
}

impl From<PyVocabItem> for VocabItem {
    fn from(item: PyVocabItem) -> Self {
        VocabItem::new(item.word, item.meaning)
    }
}

/// Flattened question: `options` is empty for fill-in-the-blank.
#[pyclass(name = "QuizQuestion", get_all)]
#[derive(Debug, Clone)]
pub struct PyQuizQuestion {
    pub question_type: String,
    pub source: usize,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

#[pymethods]
impl PyQuizQuestion {
    fn __repr__(&self) -> String {
        format!(
            "QuizQuestion(type='{}', prompt='{}...')",
            self.question_type,
            self.prompt.chars().take(40).collect::<String>()
        )
    }
}

impl From<QuizQuestion> for PyQuizQuestion {
    fn from(question: QuizQuestion) -> Self {
        let question_type = question.kind().as_str().to_string();
        match question {
            QuizQuestion::MultipleChoice {
                source,
                prompt,
                options,
                correct_answer,
            } => Self {
                question_type,
                source,
                prompt,
                options,
                correct_answer,
            },
            QuizQuestion::FillBlank {
                source,
                prompt,
                correct_answer,
            } => Self {
                question_type,
                source,
                prompt,
                options: Vec::new(),
                correct_answer,
            },
        }
    }
}

impl TryFrom<PyQuizQuestion> for QuizQuestion {
    type Error = PyErr;

    fn try_from(question: PyQuizQuestion) -> PyResult<Self> {
        let kind = QuestionKind::from_name(&question.question_type).ok_or_else(|| {
            PyValueError::new_err(format!("Unknown question type: {}", question.question_type))
        })?;

        Ok(match kind {
            QuestionKind::MultipleChoice => QuizQuestion::MultipleChoice {
                source: question.source,
                prompt: question.prompt,
                options: question.options,
                correct_answer: question.correct_answer,
            },
            QuestionKind::FillBlank => QuizQuestion::FillBlank {
                source: question.source,
                prompt: question.prompt,
                correct_answer: question.correct_answer,
            },
        })
    }
}

#[pyclass(name = "AnswerCheck", get_all)]
#[derive(Debug, Clone)]
pub struct PyAnswerCheck {
    pub is_correct: bool,
    pub similarity: f64,
    pub feedback: String,
}

#[pymethods]
impl PyAnswerCheck {
    fn __repr__(&self) -> String {
        format!(
            "AnswerCheck(is_correct={}, similarity={:.2}, feedback='{}')",
            self.is_correct, self.similarity, self.feedback
        )
    }
}

impl From<AnswerCheck> for PyAnswerCheck {
    fn from(check: AnswerCheck) -> Self {
        Self {
            is_correct: check.is_correct,
            similarity: check.similarity,
            feedback: check.feedback,
        }
    }
}

#[pyclass(name = "AttemptStats", get_all)]
#[derive(Debug, Clone)]
pub struct PyAttemptStats {
    pub total_attempts: i64,
    pub correct_count: i64,
    pub incorrect_count: i64,
    pub accuracy_percent: f64,
}

#[pymethods]
impl PyAttemptStats {
    fn __repr__(&self) -> String {
        format!(
            "AttemptStats(total={}, correct={}, accuracy={:.1}%)",
            self.total_attempts, self.correct_count, self.accuracy_percent
        )
    }
}

impl From<AttemptStats> for PyAttemptStats {
    fn from(stats: AttemptStats) -> Self {
        Self {
            total_attempts: stats.total_attempts,
            correct_count: stats.correct_count,
            incorrect_count: stats.incorrect_count,
            accuracy_percent: stats.accuracy_percent,
        }
    }
}

fn to_items(vocabulary: Vec<PyVocabItem>) -> Vec<VocabItem> {
    vocabulary.into_iter().map(VocabItem::from).collect()
}

fn from_items(items: Vec<VocabItem>) -> Vec<PyVocabItem> {
    items.into_iter().map(PyVocabItem::from).collect()
}

fn profile(language: &str, level: &str, topic: Option<String>) -> PyResult<LearnerProfile> {
    let language = Language::from_name(language)
        .ok_or_else(|| PyValueError::new_err(format!("Unknown language: {language}")))?;
    let level = SkillLevel::from_name(level)
        .ok_or_else(|| PyValueError::new_err(format!("Unknown skill level: {level}")))?;
    let profile = LearnerProfile::new(language, level);
    Ok(match topic {
        Some(topic) => profile.with_topic(topic),
        None => profile,
    })
}

// ============= Parsing and quizzes =============

#[pyfunction]
#[pyo3(name = "parse_vocabulary", signature = (raw_text, strip_markdown = false))]
pub fn py_parse_vocabulary(raw_text: &str, strip_markdown: bool) -> Vec<PyVocabItem> {
    from_items(vocab::parse_vocabulary_with(
        raw_text,
        &ParseOptions { strip_markdown },
    ))
}

#[pyfunction]
#[pyo3(name = "generate_quiz", signature = (vocabulary, num_questions = 5, seed = None, language = None))]
pub fn py_generate_quiz(
    vocabulary: Vec<PyVocabItem>,
    num_questions: usize,
    seed: Option<u64>,
    language: Option<&str>,
) -> PyResult<Vec<PyQuizQuestion>> {
    let mut generator = QuizGenerator::new(&QuizSettings::default());
    if let Some(name) = language {
        let language = Language::from_name(name)
            .ok_or_else(|| PyValueError::new_err(format!("Unknown language: {name}")))?;
        generator = generator.with_language(language);
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let questions = generator.generate(&to_items(vocabulary), num_questions, &mut rng);
    Ok(questions.into_iter().map(PyQuizQuestion::from).collect())
}

#[pyfunction]
#[pyo3(name = "check_answer", signature = (question, given, fuzzy_threshold = 0.8))]
pub fn py_check_answer(question: PyQuizQuestion, given: &str, fuzzy_threshold: f64) -> PyResult<PyAnswerCheck> {
    let question = QuizQuestion::try_from(question)?;
    Ok(answer::check_answer(&question, given, fuzzy_threshold).into())
}

#[pyfunction]
#[pyo3(name = "answers_match")]
pub fn py_answers_match(given: &str, expected: &str) -> bool {
    answer::answers_match(given, expected)
}

// ============= Prompts =============

#[pyfunction]
#[pyo3(name = "vocabulary_prompt", signature = (language, level, count = 10, topic = None))]
pub fn py_vocabulary_prompt(language: &str, level: &str, count: usize, topic: Option<String>) -> PyResult<String> {
    Ok(profile(language, level, topic)?.vocabulary_prompt(count))
}

#[pyfunction]
#[pyo3(name = "sentences_prompt", signature = (language, level, count = 5, topic = None))]
pub fn py_sentences_prompt(language: &str, level: &str, count: usize, topic: Option<String>) -> PyResult<String> {
    Ok(profile(language, level, topic)?.sentences_prompt(count))
}

#[pyfunction]
#[pyo3(name = "pronunciation_prompt", signature = (language, level, topic = None))]
pub fn py_pronunciation_prompt(language: &str, level: &str, topic: Option<String>) -> PyResult<String> {
    Ok(profile(language, level, topic)?.pronunciation_prompt())
}

#[pyfunction]
#[pyo3(name = "conversation_prompt")]
pub fn py_conversation_prompt(language: &str, level: &str, user_input: &str) -> PyResult<String> {
    Ok(profile(language, level, None)?.conversation_prompt(user_input))
}

#[pyfunction]
#[pyo3(name = "writing_feedback_prompt")]
pub fn py_writing_feedback_prompt(language: &str, level: &str, text: &str) -> PyResult<String> {
    Ok(profile(language, level, None)?.writing_feedback_prompt(text))
}

// ============= Import / export =============

#[pyfunction]
#[pyo3(name = "import_file")]
pub fn py_import_file(path: &str) -> PyResult<Vec<PyVocabItem>> {
    import::import_file(path).map(from_items).map_err(runtime_err)
}

#[pyfunction]
#[pyo3(name = "export_file")]
pub fn py_export_file(path: &str, vocabulary: Vec<PyVocabItem>) -> PyResult<()> {
    import::export_file(path, &to_items(vocabulary)).map_err(runtime_err)
}

// ============= Store =============

#[pyfunction]
#[pyo3(name = "save_list")]
pub fn py_save_list(db_path: &str, name: &str, vocabulary: Vec<PyVocabItem>) -> PyResult<usize> {
    let mut store = VocabStore::open(db_path).map_err(runtime_err)?;
    store.save_list(name, &to_items(vocabulary)).map_err(runtime_err)
}

#[pyfunction]
#[pyo3(name = "load_list")]
pub fn py_load_list(db_path: &str, name: &str) -> PyResult<Vec<PyVocabItem>> {
    let store = VocabStore::open(db_path).map_err(runtime_err)?;
    store.load_list(name).map(from_items).map_err(runtime_err)
}

#[pyfunction]
#[pyo3(name = "list_names")]
pub fn py_list_names(db_path: &str) -> PyResult<Vec<(String, usize)>> {
    let store = VocabStore::open(db_path).map_err(runtime_err)?;
    let lists = store.lists().map_err(runtime_err)?;
    Ok(lists.into_iter().map(|l| (l.name, l.word_count)).collect())
}

#[pyfunction]
#[pyo3(name = "delete_list")]
pub fn py_delete_list(db_path: &str, name: &str) -> PyResult<usize> {
    let store = VocabStore::open(db_path).map_err(runtime_err)?;
    store.delete_list(name).map_err(runtime_err)
}

#[pyfunction]
#[pyo3(name = "record_attempt")]
pub fn py_record_attempt(
    db_path: &str,
    vocabulary: Vec<PyVocabItem>,
    question: PyQuizQuestion,
    user_answer: &str,
    is_correct: bool,
) -> PyResult<()> {
    let question = QuizQuestion::try_from(question)?;
    let store = VocabStore::open(db_path).map_err(runtime_err)?;
    let attempt = Attempt::new(&to_items(vocabulary), &question, user_answer, is_correct);
    store.record_attempt(&attempt).map_err(runtime_err)
}

#[pyfunction]
#[pyo3(name = "get_stats")]
pub fn py_get_stats(db_path: &str) -> PyResult<PyAttemptStats> {
    let store = VocabStore::open(db_path).map_err(runtime_err)?;
    store.stats().map(PyAttemptStats::from).map_err(runtime_err)
}

#[pyfunction]
#[pyo3(name = "get_missed_words", signature = (db_path, limit = None))]
pub fn py_get_missed_words(db_path: &str, limit: Option<usize>) -> PyResult<Vec<(String, i64)>> {
    let store = VocabStore::open(db_path).map_err(runtime_err)?;
    let missed = store.missed_words(limit).map_err(runtime_err)?;
    Ok(missed.into_iter().map(|m| (m.word, m.miss_count)).collect())
}
