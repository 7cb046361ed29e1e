//! Error types for lingo_core.

use thiserror::Error;

/// Result type alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from quiz assembly.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("not enough vocabulary for a quiz: have {available}, need at least {required}")]
    InsufficientVocabulary { available: usize, required: usize },
}

/// Errors from vocabulary file import and export.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("unsupported file format: .{0}")]
    UnsupportedFormat(String),

    #[error("missing required '{0}' column in file header")]
    MissingColumn(&'static str),

    #[error("empty file - no header row")]
    EmptyFile,

    #[error("no sheets found in workbook")]
    NoSheets,

    #[error("failed to read workbook: {0}")]
    Workbook(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors from the SQLite store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("saved list not found: {0}")]
    ListNotFound(String),

    #[error("refusing to save empty list: {0}")]
    EmptyList(String),

    #[error("invalid timestamp in store: {0}")]
    Timestamp(String),

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

/// Errors from loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Any error produced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Quiz(#[from] QuizError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
