use lingo_core::{
    check_answer, generate_quiz, parse_vocabulary, LearnerProfile, QuizQuestion, Session, Settings,
    VocabItem, VocabStore,
};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

const GENERATED: &str = "1. hola - hello\n2. adios - goodbye\n3. gracias - thank you";

#[test]
fn parse_then_quiz() {
    let vocab = parse_vocabulary(GENERATED);
    assert_eq!(
        vocab,
        vec![
            VocabItem::new("hola", "hello"),
            VocabItem::new("adios", "goodbye"),
            VocabItem::new("gracias", "thank you"),
        ]
    );

    let words: HashSet<&str> = vocab.iter().map(|i| i.word.as_str()).collect();
    let meanings: HashSet<&str> = vocab.iter().map(|i| i.meaning.as_str()).collect();

    let mut rng = StdRng::seed_from_u64(2024);
    let quiz = generate_quiz(&vocab, 3, &mut rng);
    assert_eq!(quiz.len(), 3);

    for question in &quiz {
        let source = &vocab[question.source()];
        match question {
            QuizQuestion::MultipleChoice { prompt, options, correct_answer, .. } => {
                assert!(prompt.contains(&source.word));
                assert_eq!(correct_answer, &source.meaning);
                assert_eq!(options.len(), 4);
                // Two real distractors plus one synthesized option
                let real = options.iter().filter(|o| meanings.contains(o.as_str())).count();
                assert_eq!(real, 3);
            }
            QuizQuestion::FillBlank { prompt, correct_answer, .. } => {
                assert!(prompt.contains(&source.meaning));
                assert!(words.contains(correct_answer.as_str()));
            }
        }
        assert!(check_answer(question, &question.correct_answer().to_uppercase(), 0.8).is_correct);
    }
}

#[test]
fn seeded_runs_use_same_items() {
    let vocab = parse_vocabulary(GENERATED);
    let first = generate_quiz(&vocab, 7, &mut StdRng::seed_from_u64(7));
    let second = generate_quiz(&vocab, 7, &mut StdRng::seed_from_u64(7));

    let sources = |quiz: &[QuizQuestion]| quiz.iter().map(QuizQuestion::source).collect::<Vec<_>>();
    assert_eq!(first.len(), second.len());
    assert_eq!(sources(&first), sources(&second));
}

#[test]
fn session_with_saved_history() {
    let settings = Settings::from_json_str(r#"{ "quiz": { "num_questions": 4 } }"#).unwrap();
    let mut session = Session::new(&settings);

    let prompt = LearnerProfile::default().vocabulary_prompt(settings.generation.vocabulary_count);
    assert!(prompt.contains("10 words"));

    session.load_vocabulary(GENERATED);
    let mut rng = StdRng::seed_from_u64(99);
    let count = session.start_quiz(settings.quiz.num_questions, &mut rng);
    assert_eq!(count, 4);

    let mut store = VocabStore::open_in_memory().unwrap();
    store.save_list("greetings", session.vocabulary()).unwrap();

    while let Some(question) = session.current_question().cloned() {
        let given = question.correct_answer().to_string();
        let check = session.answer_current(&given).unwrap();
        let attempt = lingo_core::Attempt::new(session.vocabulary(), &question, &given, check.is_correct);
        store.record_attempt(&attempt).unwrap();
    }

    assert_eq!(session.score().correct, 4);
    assert_eq!(store.stats().unwrap().total_attempts, 4);
    assert!(store.missed_words(None).unwrap().is_empty());
    assert_eq!(store.load_list("greetings").unwrap(), session.vocabulary());
}
