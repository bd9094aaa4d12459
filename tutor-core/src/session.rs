use std::sync::Arc;

use language_utils::{Lesson, LessonCatalog, LessonDataError, VocabItem};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::collaborators::{Playback, SpeechCapture};
use crate::config::TutorConfig;
use crate::deck::PracticeDeck;
use crate::pronunciation::{PronunciationScorer, Verdict};
use crate::quiz::{QuizMode, QuizSession};

/// Everything a learner is doing with the selected lesson.
///
/// Selecting a lesson replaces every deck and quiz with fresh ones; nothing
/// carries over between lessons.
#[derive(Debug)]
pub struct TutorSession {
    config: TutorConfig,
    lesson: Arc<Lesson>,
    pub flashcards: PracticeDeck,
    pub pronunciation: PracticeDeck,
    pub transcription_quiz: QuizSession,
    pub gloss_quiz: QuizSession,
    scorer: PronunciationScorer,
    rng: ChaCha8Rng,
}

impl TutorSession {
    pub fn new(config: TutorConfig, lesson: Arc<Lesson>) -> Self {
        Self::with_seed(config, lesson, rand::random())
    }

    /// Derives the seed of every deck and quiz from `seed`.
    pub fn with_seed(config: TutorConfig, lesson: Arc<Lesson>, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let scorer = PronunciationScorer::new(config.scoring.clone());
        Self {
            flashcards: PracticeDeck::with_seed(lesson.clone(), rng.random()),
            pronunciation: PracticeDeck::with_seed(lesson.clone(), rng.random()),
            transcription_quiz: QuizSession::with_seed(
                lesson.clone(),
                QuizMode::TranscriptionPrompt,
                rng.random(),
            ),
            gloss_quiz: QuizSession::with_seed(lesson.clone(), QuizMode::GlossPrompt, rng.random()),
            config,
            lesson,
            scorer,
            rng,
        }
    }

    /// Starts on the first lesson of `catalog`, or on `lesson_id` if given.
    pub fn from_catalog(
        config: TutorConfig,
        catalog: &LessonCatalog,
        lesson_id: Option<u32>,
        seed: Option<u64>,
    ) -> Result<Self, LessonDataError> {
        let lesson = match lesson_id {
            Some(id) => catalog.get(id)?,
            None => catalog.first().unwrap_or_default(),
        };
        Ok(match seed {
            Some(seed) => Self::with_seed(config, lesson, seed),
            None => Self::new(config, lesson),
        })
    }

    pub fn select_lesson(&mut self, lesson: Arc<Lesson>) {
        log::info!("Selected lesson {} ({})", lesson.id, lesson.title);
        let config = self.config.clone();
        let seed = self.rng.random();
        *self = Self::with_seed(config, lesson, seed);
    }

    pub fn lesson(&self) -> &Arc<Lesson> {
        &self.lesson
    }

    pub fn config(&self) -> &TutorConfig {
        &self.config
    }

    pub fn scorer(&self) -> &PronunciationScorer {
        &self.scorer
    }

    pub fn quiz(&self, mode: QuizMode) -> &QuizSession {
        match mode {
            QuizMode::TranscriptionPrompt => &self.transcription_quiz,
            QuizMode::GlossPrompt => &self.gloss_quiz,
        }
    }

    pub fn quiz_mut(&mut self, mode: QuizMode) -> &mut QuizSession {
        match mode {
            QuizMode::TranscriptionPrompt => &mut self.transcription_quiz,
            QuizMode::GlossPrompt => &mut self.gloss_quiz,
        }
    }

    /// Reads `item` aloud with the configured language.
    pub fn speak(&self, playback: &mut dyn Playback, item: &VocabItem) {
        playback.speak(&item.script, &self.config.playback.language);
    }

    /// Plays the current pronunciation card, then scores one spoken attempt
    /// at it. `None` for an empty lesson.
    pub fn practice_current(
        &self,
        playback: &mut dyn Playback,
        capture: &mut dyn SpeechCapture,
    ) -> Option<Verdict> {
        let item = self.pronunciation.current()?;
        self.speak(playback, item);
        Some(self.scorer.evaluate_capture(item, capture))
    }
}
