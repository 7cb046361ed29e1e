//! Quiz generation from a vocabulary list.

use crate::config::QuizSettings;
use crate::error::QuizError;
use crate::prompt::Language;
use crate::vocab::VocabItem;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Fewer items than this can't produce a meaningful quiz.
pub const MIN_VOCABULARY: usize = 3;

/// Options offered by every multiple-choice question.
pub const OPTION_COUNT: usize = 4;

/// Question variant without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice,
    FillBlank,
}

impl QuestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MultipleChoice => "multiple_choice",
            Self::FillBlank => "fill_blank",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "multiple_choice" => Some(Self::MultipleChoice),
            "fill_blank" => Some(Self::FillBlank),
            _ => None,
        }
    }
}

/// A quiz question built from one vocabulary item.
///
/// `source` is the index of that item in the vocabulary the quiz was generated from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuizQuestion {
    MultipleChoice {
        source: usize,
        prompt: String,
        options: Vec<String>,
        correct_answer: String,
    },
    FillBlank {
        source: usize,
        prompt: String,
        correct_answer: String,
    },
}

impl QuizQuestion {
    pub fn kind(&self) -> QuestionKind {
        match self {
            Self::MultipleChoice { .. } => QuestionKind::MultipleChoice,
            Self::FillBlank { .. } => QuestionKind::FillBlank,
        }
    }

    pub fn source(&self) -> usize {
        match self {
            Self::MultipleChoice { source, .. } | Self::FillBlank { source, .. } => *source,
        }
    }

    pub fn prompt(&self) -> &str {
        match self {
            Self::MultipleChoice { prompt, .. } | Self::FillBlank { prompt, .. } => prompt,
        }
    }

    pub fn correct_answer(&self) -> &str {
        match self {
            Self::MultipleChoice { correct_answer, .. } | Self::FillBlank { correct_answer, .. } => {
                correct_answer
            }
        }
    }

    /// Options for multiple choice, `None` for fill-in-the-blank.
    pub fn options(&self) -> Option<&[String]> {
        match self {
            Self::MultipleChoice { options, .. } => Some(options),
            Self::FillBlank { .. } => None,
        }
    }

    pub fn is_multiple_choice(&self) -> bool {
        matches!(self, Self::MultipleChoice { .. })
    }
}

/// Builds quizzes with a fixed configuration. Randomness is supplied per call.
#[derive(Debug, Clone)]
pub struct QuizGenerator {
    distractor_suffix: String,
    language: Option<Language>,
}

impl QuizGenerator {
    pub fn new(settings: &QuizSettings) -> Self {
        // Collision handling below only terminates with a non-empty suffix
        let distractor_suffix = if settings.distractor_suffix.is_empty() {
            QuizSettings::default().distractor_suffix
        } else {
            settings.distractor_suffix.clone()
        };

        Self {
            distractor_suffix,
            language: None,
        }
    }

    /// Name the target language in fill-in-the-blank prompts.
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    /// Build exactly `num_questions` questions, reusing items when the vocabulary is short.
    ///
    /// Items are drawn without replacement until every item has been used once, then the
    /// pool refills. Each question is multiple choice or fill-in-the-blank with equal odds.
    pub fn try_generate<R: Rng + ?Sized>(
        &self,
        vocabulary: &[VocabItem],
        num_questions: usize,
        rng: &mut R,
    ) -> Result<Vec<QuizQuestion>, QuizError> {
        if vocabulary.len() < MIN_VOCABULARY {
            return Err(QuizError::InsufficientVocabulary {
                available: vocabulary.len(),
                required: MIN_VOCABULARY,
            });
        }

        let mut questions = Vec::with_capacity(num_questions);
        let mut unused: Vec<usize> = Vec::with_capacity(vocabulary.len());

        while questions.len() < num_questions {
            if unused.is_empty() {
                unused.extend(0..vocabulary.len());
            }
            let index = unused.swap_remove(rng.gen_range(0..unused.len()));

            let question = if rng.gen_bool(0.5) {
                self.multiple_choice(vocabulary, index, rng)
            } else {
                self.fill_blank(vocabulary, index)
            };
            questions.push(question);
        }

        log::debug!(
            "generated {} questions from {} vocabulary items",
            questions.len(),
            vocabulary.len()
        );
        Ok(questions)
    }

    /// Like [`try_generate`](Self::try_generate) but returns an empty quiz on short vocabulary.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        vocabulary: &[VocabItem],
        num_questions: usize,
        rng: &mut R,
    ) -> Vec<QuizQuestion> {
        match self.try_generate(vocabulary, num_questions, rng) {
            Ok(questions) => questions,
            Err(e) => {
                log::warn!("{e}");
                Vec::new()
            }
        }
    }

    fn multiple_choice<R: Rng + ?Sized>(
        &self,
        vocabulary: &[VocabItem],
        index: usize,
        rng: &mut R,
    ) -> QuizQuestion {
        let target = &vocabulary[index];
        let correct_answer = target.meaning.clone();

        // Distractors come from other items by position, not by value
        let mut pool: Vec<&str> = vocabulary
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, item)| item.meaning.as_str())
            .filter(|meaning| *meaning != correct_answer)
            .collect();
        pool.shuffle(rng);

        let mut options = vec![correct_answer.clone()];
        for meaning in pool {
            if options.len() == OPTION_COUNT {
                break;
            }
            if !options.iter().any(|o| o == meaning) {
                options.push(meaning.to_string());
            }
        }

        while options.len() < OPTION_COUNT {
            let base = &vocabulary[rng.gen_range(0..vocabulary.len())].meaning;
            let mut candidate = format!("{base}{}", self.distractor_suffix);
            while options.contains(&candidate) {
                candidate.push_str(&self.distractor_suffix);
            }
            options.push(candidate);
        }

        options.shuffle(rng);

        QuizQuestion::MultipleChoice {
            source: index,
            prompt: format!("What is the meaning of '{}'?", target.word),
            options,
            correct_answer,
        }
    }

    fn fill_blank(&self, vocabulary: &[VocabItem], index: usize) -> QuizQuestion {
        let target = &vocabulary[index];
        let prompt = match self.language {
            Some(language) => format!("Which {} word means '{}'?", language, target.meaning),
            None => format!("Which word means '{}'?", target.meaning),
        };

        QuizQuestion::FillBlank {
            source: index,
            prompt,
            correct_answer: target.word.clone(),
        }
    }
}

impl Default for QuizGenerator {
    fn default() -> Self {
        Self::new(&QuizSettings::default())
    }
}

/// Generate a quiz with default settings. Empty when fewer than [`MIN_VOCABULARY`] items.
pub fn generate_quiz<R: Rng + ?Sized>(
    vocabulary: &[VocabItem],
    num_questions: usize,
    rng: &mut R,
) -> Vec<QuizQuestion> {
    QuizGenerator::default().generate(vocabulary, num_questions, rng)
}

/// Generate a quiz with default settings, reporting short vocabulary as an error.
pub fn try_generate_quiz<R: Rng + ?Sized>(
    vocabulary: &[VocabItem],
    num_questions: usize,
    rng: &mut R,
) -> Result<Vec<QuizQuestion>, QuizError> {
    QuizGenerator::default().try_generate(vocabulary, num_questions, rng)
}
