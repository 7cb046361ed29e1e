//! Prompt templates for the text-generation service.
//!
//! The crate never calls the service itself; callers send these strings and feed
//! the reply back into [`crate::vocab::parse_vocabulary`] or a [`crate::session::Session`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Languages offered to the learner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    Spanish,
    French,
    German,
    Japanese,
    Mandarin,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Self::Spanish,
        Self::French,
        Self::German,
        Self::Japanese,
        Self::Mandarin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spanish => "Spanish",
            Self::French => "French",
            Self::German => "German",
            Self::Japanese => "Japanese",
            Self::Mandarin => "Mandarin",
        }
    }

    /// Case-insensitive lookup by display name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Learner skill level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    pub const ALL: [SkillLevel; 3] = [Self::Beginner, Self::Intermediate, Self::Advanced];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(name.trim()))
    }

    /// Lowercase form used inside prompts.
    fn prompt_form(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The learner's dropdown choices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearnerProfile {
    pub language: Language,
    pub level: SkillLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}

impl LearnerProfile {
    pub fn new(language: Language, level: SkillLevel) -> Self {
        Self {
            language,
            level,
            topic: None,
        }
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        let topic = topic.into();
        self.topic = if topic.trim().is_empty() {
            None
        } else {
            Some(topic.trim().to_string())
        };
        self
    }

    /// Vocabulary list request. Asks for one `word - meaning` pair per line.
    pub fn vocabulary_prompt(&self, count: usize) -> String {
        format!(
            "Create a {} vocabulary list ({} words) for someone learning {}{}. \
             Include English meanings. Put each entry on its own line in the form \
             'word - meaning' with no other text.",
            self.level.prompt_form(),
            count,
            self.language,
            self.topic_clause(),
        )
    }

    pub fn sentences_prompt(&self, count: usize) -> String {
        format!(
            "Give {} {} level example sentences in {}{} with English translations.",
            count,
            self.level.prompt_form(),
            self.language,
            self.topic_clause(),
        )
    }

    pub fn pronunciation_prompt(&self) -> String {
        format!(
            "Provide pronunciation tips for a {} learner in {}{}.",
            self.level.prompt_form(),
            self.language,
            self.topic_clause(),
        )
    }

    pub fn conversation_prompt(&self, user_input: &str) -> String {
        format!(
            "Let's have a conversation in {}. I am a {} learner. Respond to this input: {}",
            self.language,
            self.level.prompt_form(),
            user_input.trim(),
        )
    }

    pub fn writing_feedback_prompt(&self, text: &str) -> String {
        format!(
            "I am a {} learner of {}. Correct the following text, list each mistake \
             with a short explanation, and give an improved version: {}",
            self.level.prompt_form(),
            self.language,
            text.trim(),
        )
    }

    fn topic_clause(&self) -> String {
        match &self.topic {
            Some(topic) => format!(", focusing on the topic of {topic}"),
            None => String::new(),
        }
    }
}
