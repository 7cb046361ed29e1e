//! Settings loaded from a JSON file. Every key is optional.

use crate::error::ConfigError;
use crate::prompt::LearnerProfile;
use crate::vocab::ParseOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Quiz assembly and scoring settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizSettings {
    pub num_questions: usize,
    /// Appended to a meaning to synthesize a distractor when real ones run out.
    pub distractor_suffix: String,
    /// Similarity at or above which a wrong answer gets "almost" feedback.
    pub fuzzy_threshold: f64,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            num_questions: 5,
            distractor_suffix: " (modified)".to_string(),
            fuzzy_threshold: 0.8,
        }
    }
}

/// How much text to request from the generation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    pub vocabulary_count: usize,
    pub sentence_count: usize,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            vocabulary_count: 10,
            sentence_count: 5,
        }
    }
}

/// Top-level settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub profile: LearnerProfile,
    pub quiz: QuizSettings,
    pub generation: GenerationSettings,
    pub parse: ParseOptions,
}

impl Settings {
    /// Read settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let settings = Self::from_json_str(&content)?;
        log::info!("loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            log::debug!("no config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }
}
