//! Answer checking for quiz questions.

use crate::quiz::QuizQuestion;
use serde::{Deserialize, Serialize};
use strsim::{jaro_winkler, levenshtein, normalized_levenshtein};

/// Outcome of checking one answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerCheck {
    pub is_correct: bool,
    /// Similarity between 0.0 and 1.0, informational only.
    pub similarity: f64,
    pub feedback: String,
}

/// Tally for a whole quiz.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizScore {
    pub correct: usize,
    pub total: usize,
}

impl QuizScore {
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64 * 100.0
        }
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Case-insensitive, whitespace-trimmed equality.
pub fn answers_match(given: &str, expected: &str) -> bool {
    normalize(given) == normalize(expected)
}

/// Check an answer against a question.
///
/// Correctness is always [`answers_match`]. The similarity score only softens the
/// feedback for near misses at or above `fuzzy_threshold`.
pub fn check_answer(question: &QuizQuestion, given: &str, fuzzy_threshold: f64) -> AnswerCheck {
    let expected = question.correct_answer();
    let given_normalized = normalize(given);
    let expected_normalized = normalize(expected);

    if given_normalized == expected_normalized {
        return AnswerCheck {
            is_correct: true,
            similarity: 1.0,
            feedback: "Correct! ✓".to_string(),
        };
    }

    // Jaro-Winkler weighs typos near the start less harshly
    let similarity = normalized_levenshtein(&given_normalized, &expected_normalized) * 0.4
        + jaro_winkler(&given_normalized, &expected_normalized) * 0.6;

    let feedback = if similarity >= fuzzy_threshold {
        let distance = levenshtein(&given_normalized, &expected_normalized);
        format!("Almost! {distance} characters off. Expected: '{expected}'")
    } else {
        format!("Incorrect. Expected: '{expected}'")
    };

    AnswerCheck {
        is_correct: false,
        similarity,
        feedback,
    }
}

/// Score answers against questions by position. Missing answers count as wrong.
pub fn score_quiz<S: AsRef<str>>(questions: &[QuizQuestion], answers: &[S]) -> QuizScore {
    let correct = questions
        .iter()
        .zip(answers)
        .filter(|&(question, answer)| answers_match(answer.as_ref(), question.correct_answer()))
        .count();

    QuizScore {
        correct,
        total: questions.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(answer: &str) -> QuizQuestion {
        QuizQuestion::FillBlank {
            source: 0,
            prompt: "Which word means 'hello'?".to_string(),
            correct_answer: answer.to_string(),
        }
    }

    #[test]
    fn normalized_equality() {
        assert!(answers_match("  Hola ", "hola"));
        assert!(answers_match("GRACIAS", "gracias"));
        assert!(!answers_match("hola", "adios"));
        assert!(!answers_match("ho la", "hola"));
    }

    #[test]
    fn exact_answer() {
        let check = check_answer(&fill("Hola"), " hola", 0.8);
        assert!(check.is_correct);
        assert_eq!(check.similarity, 1.0);
    }

    #[test]
    fn near_miss_is_still_wrong() {
        let check = check_answer(&fill("gracias"), "gracia", 0.8);
        assert!(!check.is_correct);
        assert!(check.similarity >= 0.8);
        assert_eq!(check.feedback, "Almost! 1 characters off. Expected: 'gracias'");
    }

    #[test]
    fn unrelated_answer() {
        let check = check_answer(&fill("perro"), "xyz", 0.8);
        assert!(!check.is_correct);
        assert_eq!(check.feedback, "Incorrect. Expected: 'perro'");
    }

    #[test]
    fn multiple_choice_compares_meaning() {
        let question = QuizQuestion::MultipleChoice {
            source: 2,
            prompt: "What is the meaning of 'gracias'?".to_string(),
            options: vec![
                "hello".to_string(),
                "thank you".to_string(),
                "goodbye".to_string(),
                "dog".to_string(),
            ],
            correct_answer: "thank you".to_string(),
        };
        assert!(check_answer(&question, "Thank You", 0.8).is_correct);
        assert!(!check_answer(&question, "hello", 0.8).is_correct);
    }

    #[test]
    fn score_by_position() {
        let questions = vec![fill("hola"), fill("adios"), fill("gracias")];
        let score = score_quiz(&questions, &["HOLA", "wrong"]);
        assert_eq!(score, QuizScore { correct: 1, total: 3 });
        assert!((score.percent() - 33.333).abs() < 0.01);
        assert_eq!(QuizScore::default().percent(), 0.0);
    }
}
