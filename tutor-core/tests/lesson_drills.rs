use std::collections::HashSet;
use std::sync::Arc;

use language_utils::pinyin::to_diacritic;
use language_utils::text_cleanup::strip_tones;
use language_utils::{Lesson, LessonCatalog};
use tutor_core::grading::matches;
use tutor_core::{
    Answer, PracticeDeck, QuizMode, QuizSession, RecognitionHypothesis, SessionError,
    SessionScore, TutorConfig, TutorSession, VerdictStatus,
};

const SAMPLE_CATALOG: &str = include_str!("../../data/lessons.json");

fn catalog() -> LessonCatalog {
    LessonCatalog::from_json_str(SAMPLE_CATALOG).unwrap()
}

fn lesson(id: u32) -> Arc<Lesson> {
    catalog().get(id).unwrap()
}

#[test]
fn sample_catalog_loads() {
    let catalog = catalog();
    assert_eq!(catalog.len(), 3);
    for lesson in catalog.iter() {
        assert!(!lesson.is_empty(), "lesson {} is empty", lesson.id);
        for word in &lesson.words {
            assert!(!word.script.is_empty());
            assert!(!word.transcription.is_empty());
            assert!(!word.gloss_locale.is_empty());
        }
    }
}

#[test]
fn numbered_tone_answers_pass_a_whole_gloss_quiz() {
    let numbered = [
        ("叫", "jiao4"),
        ("名字", "ming2 zi"),
        ("什么", "shen2 me5"),
        ("是", "shi4"),
        ("中国人", "zhong1 guo2 ren2"),
        ("女儿", "nv3 er2"),
    ];
    let mut quiz = QuizSession::with_seed(lesson(2), QuizMode::GlossPrompt, 2024);

    while !quiz.is_complete() {
        let item = quiz.current_item().unwrap().clone();
        let (_, transcription) = numbered
            .iter()
            .find(|(script, _)| *script == item.script)
            .unwrap();
        let feedback = quiz
            .submit(&Answer {
                script: item.script.clone(),
                transcription: transcription.to_string(),
                gloss: String::new(),
            })
            .unwrap();
        assert!(feedback.correct, "{transcription} for {}", item.transcription);
        quiz.advance().unwrap();
    }

    assert_eq!(quiz.score(), SessionScore { correct: 6, attempted: 6 });
}

#[test]
fn skipping_everything_scores_zero() {
    let mut quiz = QuizSession::with_seed(lesson(1), QuizMode::TranscriptionPrompt, 1);
    let mut seen = HashSet::new();
    for _ in 0..lesson(1).len() {
        seen.insert(quiz.skip().unwrap().script);
    }
    assert_eq!(seen.len(), 6);
    assert_eq!(quiz.score(), SessionScore { correct: 0, attempted: 6 });
    assert_eq!(quiz.skip(), Err(SessionError::Complete));
}

#[test]
fn every_item_is_asked_exactly_once() {
    for seed in 0..20 {
        let mut quiz = QuizSession::with_seed(lesson(3), QuizMode::GlossPrompt, seed);
        let mut asked = Vec::new();
        while let Ok(item) = quiz.current_item() {
            asked.push(item.script.clone());
            quiz.skip().unwrap();
        }
        asked.sort();
        let mut expected: Vec<_> = lesson(3).words.iter().map(|w| w.script.clone()).collect();
        expected.sort();
        assert_eq!(asked, expected, "seed {seed}");
    }
}

#[test]
fn gloss_answers_accept_any_listed_sense() {
    let mut quiz = QuizSession::with_seed(lesson(1), QuizMode::TranscriptionPrompt, 0);
    while !quiz.is_complete() {
        let item = quiz.current_item().unwrap().clone();
        let last_sense = item.gloss_locale.rsplit(',').next().unwrap().trim().to_string();
        let feedback = quiz
            .submit(&Answer {
                script: item.script.clone(),
                transcription: String::new(),
                gloss: last_sense,
            })
            .unwrap();
        assert!(feedback.correct, "{}", item.gloss_locale);
        quiz.advance().unwrap();
    }
}

#[test]
fn catalog_transcriptions_accept_toneless_typing() {
    for lesson in catalog().iter() {
        for word in &lesson.words {
            let toneless = strip_tones(&word.transcription).replace('\'', " ");
            assert!(
                matches(&toneless, &word.transcription),
                "{toneless} vs {}",
                word.transcription
            );
        }
    }
}

#[test]
fn numbered_syllables_strip_back_to_their_base() {
    for base in ["ma", "hao", "gou", "lüe", "xue", "jiu", "gui", "er", "zhuang"] {
        for tone in '1'..='4' {
            let marked = to_diacritic(&format!("{base}{tone}"));
            assert_ne!(marked, base, "{base}{tone} got no mark");
            assert_eq!(strip_tones(&marked), strip_tones(base), "{base}{tone} -> {marked}");
        }
    }
}

#[test]
fn speaking_each_word_clearly_passes() {
    let session = TutorSession::with_seed(TutorConfig::default(), lesson(2), 5);
    for word in &session.lesson().words {
        let verdict = session
            .scorer()
            .evaluate(word, &[RecognitionHypothesis::new(format!("{}。", word.script), 0.92)]);
        assert_eq!(verdict.status, VerdictStatus::Pass, "{}", word.script);
    }
}

#[test]
fn mishearing_gives_a_tip_with_the_tones() {
    let session = TutorSession::with_seed(TutorConfig::default(), lesson(2), 5);
    let word = session
        .lesson()
        .words
        .iter()
        .find(|w| w.script == "中国人")
        .unwrap();
    let verdict = session
        .scorer()
        .evaluate(word, &[RecognitionHypothesis::new("钟", 0.8)]);
    assert_eq!(verdict.status, VerdictStatus::Fail);
    let tip = verdict.tip.unwrap();
    assert!(tip.contains("tone 1"));
    assert!(tip.contains("tone 2"));
    assert!(tip.contains("zh/ch/sh"));
}

#[test]
fn flashcard_deck_walks_the_whole_lesson() {
    let mut deck = PracticeDeck::with_seed(lesson(3), 9);
    deck.shuffle();
    let mut seen = HashSet::new();
    loop {
        seen.insert(deck.current().unwrap().script.clone());
        if !deck.next() {
            break;
        }
    }
    assert_eq!(seen.len(), 6);
    assert_eq!(deck.position(), 6);
    deck.advance_wrapping();
    assert_eq!(deck.position(), 1);
}

#[test]
fn switching_lessons_starts_fresh() {
    let catalog = catalog();
    let mut session =
        TutorSession::from_catalog(TutorConfig::default(), &catalog, Some(1), Some(3)).unwrap();
    session.gloss_quiz.skip().unwrap();
    session.select_lesson(catalog.get(3).unwrap());
    assert_eq!(session.gloss_quiz.score(), SessionScore::default());
    assert_eq!(session.flashcards.current().unwrap().script, "一");
}
