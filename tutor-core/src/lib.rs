//! Drill logic for a vocabulary tutor: grading typed answers, scoring spoken
//! ones, and walking through lessons in quizzes and flashcard decks.

pub mod collaborators;
pub mod config;
pub mod deck;
pub mod grading;
pub mod pronunciation;
pub mod quiz;
pub mod session;
pub mod traversal;

pub use collaborators::{CaptureError, Playback, SpeechCapture};
pub use config::{ConfigError, TutorConfig};
pub use deck::PracticeDeck;
pub use grading::MatchRule;
pub use pronunciation::{PronunciationScorer, RecognitionHypothesis, Verdict, VerdictStatus};
pub use quiz::{Answer, AnswerField, Feedback, QuizMode, QuizSession, QuizState, SessionError, SessionScore};
pub use session::TutorSession;
pub use traversal::TraversalOrder;
