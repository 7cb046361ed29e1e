//! Caller-owned session state.
//!
//! A [`Session`] is created by the host per learner and handed to each interaction
//! handler. Nothing here is global; serialize the value to carry it between requests.

use crate::answer::{check_answer, AnswerCheck, QuizScore};
use crate::config::{QuizSettings, Settings};
use crate::prompt::LearnerProfile;
use crate::quiz::{QuizGenerator, QuizQuestion};
use crate::vocab::{parse_vocabulary_with, ParseOptions, VocabItem};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    Learner,
    Assistant,
}

/// One message in the practice conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub speaker: Speaker,
    pub message: String,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    pub profile: LearnerProfile,
    pub quiz_settings: QuizSettings,
    pub parse_options: ParseOptions,
    vocabulary: Vec<VocabItem>,
    quiz: Vec<QuizQuestion>,
    quiz_position: usize,
    score: QuizScore,
    chat: Vec<ChatTurn>,
    saved_lists: BTreeMap<String, Vec<VocabItem>>,
}

impl Session {
    pub fn new(settings: &Settings) -> Self {
        Self {
            profile: settings.profile.clone(),
            quiz_settings: settings.quiz.clone(),
            parse_options: settings.parse,
            ..Self::default()
        }
    }

    /// Replace the current vocabulary with items parsed from generated text.
    ///
    /// Any running quiz is discarded. Returns the number of items parsed.
    pub fn load_vocabulary(&mut self, raw_text: &str) -> usize {
        self.vocabulary = parse_vocabulary_with(raw_text, &self.parse_options);
        self.clear_quiz();
        self.vocabulary.len()
    }

    pub fn vocabulary(&self) -> &[VocabItem] {
        &self.vocabulary
    }

    /// Build a fresh quiz from the current vocabulary. Returns the number of questions,
    /// zero when the vocabulary is too short.
    pub fn start_quiz<R: Rng + ?Sized>(&mut self, num_questions: usize, rng: &mut R) -> usize {
        let generator = QuizGenerator::new(&self.quiz_settings).with_language(self.profile.language);
        self.quiz = generator.generate(&self.vocabulary, num_questions, rng);
        self.quiz_position = 0;
        self.quiz.len()
    }

    pub fn quiz(&self) -> &[QuizQuestion] {
        &self.quiz
    }

    /// The next unanswered question, if any.
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.quiz.get(self.quiz_position)
    }

    pub fn is_quiz_finished(&self) -> bool {
        self.quiz_position >= self.quiz.len()
    }

    /// Check `given` against the current question, update the score and move on.
    pub fn answer_current(&mut self, given: &str) -> Option<AnswerCheck> {
        let question = self.quiz.get(self.quiz_position)?;
        let check = check_answer(question, given, self.quiz_settings.fuzzy_threshold);

        self.quiz_position += 1;
        self.score.total += 1;
        if check.is_correct {
            self.score.correct += 1;
        }
        Some(check)
    }

    /// Answers and correct answers across every quiz in this session.
    pub fn score(&self) -> QuizScore {
        self.score
    }

    pub fn reset_scores(&mut self) {
        self.score = QuizScore::default();
    }

    /// Append a learner message and the assistant's reply.
    pub fn record_exchange(&mut self, user_input: &str, reply: &str) {
        let at = Utc::now();
        self.chat.push(ChatTurn {
            speaker: Speaker::Learner,
            message: user_input.to_string(),
            at,
        });
        self.chat.push(ChatTurn {
            speaker: Speaker::Assistant,
            message: reply.to_string(),
            at,
        });
    }

    pub fn chat_history(&self) -> &[ChatTurn] {
        &self.chat
    }

    pub fn clear_chat(&mut self) {
        self.chat.clear();
    }

    /// Keep a copy of the current vocabulary under `name`, replacing any list of that name.
    ///
    /// An empty vocabulary saves nothing and leaves an existing list untouched.
    pub fn save_current_list(&mut self, name: &str) -> usize {
        let count = self.vocabulary.len();
        if count == 0 {
            return 0;
        }
        self.saved_lists
            .insert(name.trim().to_string(), self.vocabulary.clone());
        count
    }

    pub fn saved_list(&self, name: &str) -> Option<&[VocabItem]> {
        self.saved_lists.get(name.trim()).map(Vec::as_slice)
    }

    pub fn saved_list_names(&self) -> impl Iterator<Item = &str> {
        self.saved_lists.keys().map(String::as_str)
    }

    /// Make a saved list the current vocabulary. Returns false if no such list exists.
    pub fn restore_list(&mut self, name: &str) -> bool {
        match self.saved_lists.get(name.trim()) {
            Some(items) => {
                self.vocabulary = items.clone();
                self.clear_quiz();
                true
            }
            None => false,
        }
    }

    fn clear_quiz(&mut self) {
        self.quiz.clear();
        self.quiz_position = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::{Language, SkillLevel};
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const LIST: &str = "1. hola - hello\n2. adios - goodbye\n3. gracias - thank you\n4. perro - dog";

    #[test]
    fn new_takes_settings() {
        let mut settings = Settings::default();
        settings.profile = LearnerProfile::new(Language::French, SkillLevel::Advanced);
        settings.quiz.num_questions = 20;
        let session = Session::new(&settings);
        assert_eq!(session.profile.language, Language::French);
        assert_eq!(session.quiz_settings.num_questions, 20);
        assert!(session.vocabulary().is_empty());
    }

    #[test]
    fn quiz_round() {
        let mut session = Session::default();
        assert_eq!(session.load_vocabulary(LIST), 4);

        let mut rng = StdRng::seed_from_u64(11);
        assert_eq!(session.start_quiz(6, &mut rng), 6);

        let expected: Vec<String> = session
            .quiz()
            .iter()
            .map(|q| q.correct_answer().to_uppercase())
            .collect();
        for answer in &expected {
            let check = session.answer_current(answer).unwrap();
            assert!(check.is_correct);
        }

        assert!(session.is_quiz_finished());
        assert_eq!(session.answer_current("anything"), None);
        assert_eq!(session.score(), QuizScore { correct: 6, total: 6 });

        session.reset_scores();
        assert_eq!(session.score(), QuizScore::default());
    }

    #[test]
    fn wrong_answers_count() {
        let mut session = Session::default();
        session.load_vocabulary(LIST);
        let mut rng = StdRng::seed_from_u64(12);
        session.start_quiz(2, &mut rng);

        assert!(!session.answer_current("definitely wrong").unwrap().is_correct);
        assert_eq!(session.score(), QuizScore { correct: 0, total: 1 });
        assert!(!session.is_quiz_finished());
    }

    #[test]
    fn short_vocabulary_gives_no_quiz() {
        let mut session = Session::default();
        session.load_vocabulary("hola - hello\nadios - goodbye");
        let mut rng = StdRng::seed_from_u64(13);
        assert_eq!(session.start_quiz(5, &mut rng), 0);
        assert!(session.current_question().is_none());
    }

    #[test]
    fn reloading_vocabulary_discards_quiz() {
        let mut session = Session::default();
        session.load_vocabulary(LIST);
        let mut rng = StdRng::seed_from_u64(14);
        session.start_quiz(3, &mut rng);
        session.load_vocabulary("casa: house");
        assert!(session.quiz().is_empty());
        assert_eq!(session.vocabulary(), &[VocabItem::new("casa", "house")]);
    }

    #[test]
    fn chat_history_in_order() {
        let mut session = Session::default();
        session.record_exchange("Hola", "¡Hola! ¿Cómo estás?");
        session.record_exchange("Bien", "Me alegro.");

        let turns: Vec<(Speaker, &str)> = session
            .chat_history()
            .iter()
            .map(|t| (t.speaker, t.message.as_str()))
            .collect();
        assert_eq!(
            turns,
            vec![
                (Speaker::Learner, "Hola"),
                (Speaker::Assistant, "¡Hola! ¿Cómo estás?"),
                (Speaker::Learner, "Bien"),
                (Speaker::Assistant, "Me alegro."),
            ]
        );

        session.clear_chat();
        assert!(session.chat_history().is_empty());
    }

    #[test]
    fn saved_lists() {
        let mut session = Session::default();
        session.load_vocabulary(LIST);
        assert_eq!(session.save_current_list(" greetings "), 4);

        session.load_vocabulary("casa: house");
        assert_eq!(session.saved_list("greetings").map(<[_]>::len), Some(4));
        assert_eq!(session.saved_list_names().collect::<Vec<_>>(), vec!["greetings"]);

        assert!(session.restore_list("greetings"));
        assert_eq!(session.vocabulary().len(), 4);
        assert!(!session.restore_list("missing"));
    }

    #[test]
    fn empty_vocabulary_keeps_saved_list() {
        let mut session = Session::default();
        session.load_vocabulary(LIST);
        session.save_current_list("greetings");

        session.load_vocabulary("no delimiter here");
        assert_eq!(session.save_current_list("greetings"), 0);
        assert_eq!(session.saved_list("greetings").map(<[_]>::len), Some(4));
        assert_eq!(session.save_current_list("empty"), 0);
        assert_eq!(session.saved_list("empty"), None);
    }

    #[test]
    fn survives_json_round_trip() {
        let mut session = Session::default();
        session.load_vocabulary(LIST);
        let mut rng = StdRng::seed_from_u64(15);
        session.start_quiz(4, &mut rng);
        session.answer_current("x");
        session.record_exchange("hi", "hola");

        let json = serde_json::to_string(&session).unwrap();
        let restored: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.vocabulary(), session.vocabulary());
        assert_eq!(restored.quiz(), session.quiz());
        assert_eq!(restored.current_question(), session.current_question());
        assert_eq!(restored.score(), session.score());
        assert_eq!(restored.chat_history(), session.chat_history());
    }
}
