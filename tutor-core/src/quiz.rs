use std::sync::Arc;

use language_utils::{Lesson, VocabItem};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::grading::{MatchRule, gloss_matches, script_matches, transcription_match};
use crate::traversal::TraversalOrder;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("the lesson has no items")]
    EmptyLesson,

    #[error("the quiz is complete; reset it to start over")]
    Complete,

    #[error("the current item was already answered; advance before answering again")]
    AlreadyAnswered,

    #[error("the current item hasn't been answered yet")]
    NotAnswered,
}

/// What the learner is shown, and therefore what they have to type.
#[derive(
    Clone,
    Copy,
    Debug,
    Hash,
    Eq,
    PartialEq,
    serde::Serialize,
    serde::Deserialize,
    parse_display::Display,
    parse_display::FromStr,
)]
#[display(style = "snake_case")]
pub enum QuizMode {
    /// Shown the transcription; answer with the script and the gloss.
    TranscriptionPrompt,
    /// Shown the gloss; answer with the script and the transcription.
    GlossPrompt,
}

impl QuizMode {
    pub fn required_fields(self) -> &'static [AnswerField] {
        match self {
            QuizMode::TranscriptionPrompt => &[AnswerField::Script, AnswerField::Gloss],
            QuizMode::GlossPrompt => &[AnswerField::Script, AnswerField::Transcription],
        }
    }

    pub fn prompt(self, item: &VocabItem) -> &str {
        match self {
            QuizMode::TranscriptionPrompt => &item.transcription,
            QuizMode::GlossPrompt => &item.gloss_locale,
        }
    }
}

#[derive(
    Clone, Copy, Debug, Hash, Eq, PartialEq, serde::Serialize, parse_display::Display,
)]
#[display(style = "snake_case")]
pub enum AnswerField {
    Script,
    Transcription,
    Gloss,
}

/// The learner's typed answer. Fields the current mode doesn't ask for are
/// ignored; fields it does ask for but left empty are graded wrong.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize)]
pub struct Answer {
    #[serde(default)]
    pub script: String,
    #[serde(default)]
    pub transcription: String,
    #[serde(default)]
    pub gloss: String,
}

impl Answer {
    pub fn get(&self, field: AnswerField) -> &str {
        match field {
            AnswerField::Script => &self.script,
            AnswerField::Transcription => &self.transcription,
            AnswerField::Gloss => &self.gloss,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize)]
pub struct FieldGrade {
    pub field: AnswerField,
    pub correct: bool,
    /// For transcriptions, the rule that accepted the answer.
    pub rule: Option<MatchRule>,
}

/// Result of grading one answer, with the item for feedback display.
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize)]
pub struct Feedback {
    pub correct: bool,
    pub fields: Vec<FieldGrade>,
    pub item: VocabItem,
}

impl Feedback {
    pub fn field(&self, field: AnswerField) -> Option<&FieldGrade> {
        self.fields.iter().find(|grade| grade.field == field)
    }

    /// The transcription was only accepted once tones were ignored.
    pub fn missing_tones(&self) -> bool {
        self.field(AnswerField::Transcription)
            .is_some_and(|grade| grade.rule == Some(MatchRule::Toneless))
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, serde::Serialize)]
pub struct SessionScore {
    pub correct: u32,
    pub attempted: u32,
}

impl std::fmt::Display for SessionScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {}", self.correct, self.attempted)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum QuizState {
    Active,
    Complete,
}

/// One graded pass over a lesson in a random order.
///
/// Each item is either submitted (then explicitly advanced past, so feedback
/// can be shown in between) or skipped. Nothing leaves `Complete` except
/// [`QuizSession::reset`] or [`QuizSession::restart`].
#[derive(Debug)]
pub struct QuizSession {
    mode: QuizMode,
    lesson: Arc<Lesson>,
    order: TraversalOrder,
    score: SessionScore,
    answered: bool,
    rng: ChaCha8Rng,
}

impl QuizSession {
    pub fn new(lesson: Arc<Lesson>, mode: QuizMode) -> Self {
        Self::with_seed(lesson, mode, rand::random())
    }

    /// Same seed, same lesson: same question order.
    pub fn with_seed(lesson: Arc<Lesson>, mode: QuizMode, seed: u64) -> Self {
        let mut session = Self {
            mode,
            lesson,
            order: TraversalOrder::identity(0),
            score: SessionScore::default(),
            answered: false,
            rng: ChaCha8Rng::seed_from_u64(seed),
        };
        session.restart();
        session
    }

    /// Switches to `lesson` and starts over.
    pub fn reset(&mut self, lesson: Arc<Lesson>) {
        self.lesson = lesson;
        self.restart();
    }

    /// Reshuffles the current lesson and clears the score.
    pub fn restart(&mut self) {
        self.order = TraversalOrder::shuffled(self.lesson.len(), &mut self.rng);
        self.score = SessionScore::default();
        self.answered = false;
        log::info!(
            "Started {} quiz over lesson {} ({} items)",
            self.mode,
            self.lesson.id,
            self.lesson.len()
        );
    }

    pub fn mode(&self) -> QuizMode {
        self.mode
    }

    pub fn lesson(&self) -> &Arc<Lesson> {
        &self.lesson
    }

    pub fn order(&self) -> &TraversalOrder {
        &self.order
    }

    pub fn state(&self) -> QuizState {
        if self.order.is_exhausted() {
            QuizState::Complete
        } else {
            QuizState::Active
        }
    }

    pub fn is_complete(&self) -> bool {
        self.state() == QuizState::Complete
    }

    /// Items not yet submitted or skipped, counting the current one.
    pub fn remaining(&self) -> usize {
        self.order.len() - self.order.cursor()
    }

    pub fn score(&self) -> SessionScore {
        self.score
    }

    pub fn current_item(&self) -> Result<&VocabItem, SessionError> {
        if self.lesson.is_empty() {
            return Err(SessionError::EmptyLesson);
        }
        self.order
            .current()
            .and_then(|index| self.lesson.get(index))
            .ok_or(SessionError::Complete)
    }

    /// Text to show the learner for the current item.
    pub fn prompt(&self) -> Result<&str, SessionError> {
        Ok(self.mode.prompt(self.current_item()?))
    }

    /// Grades `answer` against the current item and records the attempt.
    ///
    /// The cursor stays put until [`QuizSession::advance`] is called.
    pub fn submit(&mut self, answer: &Answer) -> Result<Feedback, SessionError> {
        let item = self.current_item()?;
        if self.answered {
            return Err(SessionError::AlreadyAnswered);
        }

        let feedback = grade(self.mode, item, answer);
        self.score.attempted += 1;
        if feedback.correct {
            self.score.correct += 1;
        }
        self.answered = true;

        log::debug!(
            "Graded {:?}: correct={} score={}",
            feedback.item.script,
            feedback.correct,
            self.score
        );
        Ok(feedback)
    }

    /// Moves past a submitted item.
    pub fn advance(&mut self) -> Result<QuizState, SessionError> {
        if !self.answered {
            self.current_item()?;
            return Err(SessionError::NotAnswered);
        }
        self.answered = false;
        self.order.advance();
        Ok(self.state())
    }

    /// Gives up on the current item: counts as attempted, never as correct,
    /// and moves on immediately. Returns the item so the answer can be shown.
    pub fn skip(&mut self) -> Result<VocabItem, SessionError> {
        let item = self.current_item()?.clone();
        if self.answered {
            return Err(SessionError::AlreadyAnswered);
        }
        self.score.attempted += 1;
        self.order.advance();
        log::debug!("Skipped {:?}: score={}", item.script, self.score);
        Ok(item)
    }
}

fn grade(mode: QuizMode, item: &VocabItem, answer: &Answer) -> Feedback {
    let fields: Vec<FieldGrade> = mode
        .required_fields()
        .iter()
        .map(|&field| {
            let input = answer.get(field);
            let (correct, rule) = match field {
                AnswerField::Script => (script_matches(input, &item.script), None),
                AnswerField::Transcription => {
                    let rule = transcription_match(input, &item.transcription);
                    (rule.is_some(), rule)
                }
                AnswerField::Gloss => (gloss_matches(input, &item.gloss_locale), None),
            };
            FieldGrade {
                field,
                correct,
                rule,
            }
        })
        .collect();

    Feedback {
        correct: fields.iter().all(|grade| grade.correct),
        fields,
        item: item.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use language_utils::PartOfSpeech;

    fn item(script: &str, transcription: &str, gloss: &str) -> VocabItem {
        VocabItem {
            script: script.to_string(),
            transcription: transcription.to_string(),
            gloss_locale: gloss.to_string(),
            gloss_english: String::new(),
            part_of_speech: PartOfSpeech::Noun,
        }
    }

    fn lesson(words: Vec<VocabItem>) -> Arc<Lesson> {
        Arc::new(Lesson {
            id: 1,
            title: "test".to_string(),
            title_locale: String::new(),
            words,
        })
    }

    fn greetings() -> Arc<Lesson> {
        lesson(vec![
            item("你好", "nǐ hǎo", "안녕하세요, 안녕"),
            item("谢谢", "xiè xie", "감사합니다, 고맙습니다"),
            item("再见", "zài jiàn", "안녕히 가세요"),
        ])
    }

    fn correct_answer(item: &VocabItem) -> Answer {
        Answer {
            script: item.script.clone(),
            transcription: item.transcription.clone(),
            gloss: item.gloss_locale.clone(),
        }
    }

    #[test]
    fn test_submit_all_correct_then_complete() {
        let mut quiz = QuizSession::with_seed(greetings(), QuizMode::GlossPrompt, 3);
        for _ in 0..3 {
            let answer = correct_answer(quiz.current_item().unwrap());
            let feedback = quiz.submit(&answer).unwrap();
            assert!(feedback.correct);
            quiz.advance().unwrap();
        }
        assert!(quiz.is_complete());
        assert_eq!(quiz.score(), SessionScore { correct: 3, attempted: 3 });
    }

    #[test]
    fn test_complete_session_refuses_everything_but_reset() {
        let mut quiz = QuizSession::with_seed(greetings(), QuizMode::GlossPrompt, 3);
        for _ in 0..3 {
            quiz.skip().unwrap();
        }
        assert_eq!(quiz.state(), QuizState::Complete);
        assert_eq!(quiz.current_item(), Err(SessionError::Complete));
        assert_eq!(quiz.skip(), Err(SessionError::Complete));
        assert_eq!(quiz.submit(&Answer::default()), Err(SessionError::Complete));
        assert_eq!(quiz.advance(), Err(SessionError::Complete));

        quiz.restart();
        assert_eq!(quiz.state(), QuizState::Active);
        assert_eq!(quiz.score(), SessionScore::default());
    }

    #[test]
    fn test_empty_lesson_is_complete_and_errors() {
        let mut quiz = QuizSession::with_seed(lesson(vec![]), QuizMode::TranscriptionPrompt, 0);
        assert!(quiz.is_complete());
        assert!(quiz.order().is_empty());
        assert_eq!(quiz.current_item(), Err(SessionError::EmptyLesson));
        assert_eq!(quiz.skip(), Err(SessionError::EmptyLesson));
        assert_eq!(quiz.prompt(), Err(SessionError::EmptyLesson));
    }

    #[test]
    fn test_skip_counts_attempt_only() {
        let mut quiz = QuizSession::with_seed(greetings(), QuizMode::GlossPrompt, 9);
        let first = quiz.current_item().unwrap().clone();
        let shown = quiz.skip().unwrap();
        assert_eq!(first, shown);
        assert_eq!(quiz.score(), SessionScore { correct: 0, attempted: 1 });
        assert_eq!(quiz.remaining(), 2);
    }

    #[test]
    fn test_submit_and_skip_are_exclusive_per_item() {
        let mut quiz = QuizSession::with_seed(greetings(), QuizMode::GlossPrompt, 9);
        quiz.submit(&Answer::default()).unwrap();
        assert_eq!(quiz.skip(), Err(SessionError::AlreadyAnswered));
        assert_eq!(
            quiz.submit(&Answer::default()),
            Err(SessionError::AlreadyAnswered)
        );
        assert_eq!(quiz.score().attempted, 1);
        assert_eq!(quiz.advance(), Ok(QuizState::Active));
        assert_eq!(quiz.advance(), Err(SessionError::NotAnswered));
    }

    #[test]
    fn test_feedback_is_per_field() {
        let mut quiz = QuizSession::with_seed(greetings(), QuizMode::GlossPrompt, 5);
        let item = quiz.current_item().unwrap().clone();
        let feedback = quiz
            .submit(&Answer {
                script: "错".to_string(),
                transcription: item.transcription.clone(),
                gloss: String::new(),
            })
            .unwrap();
        assert!(!feedback.correct);
        assert_eq!(feedback.fields.len(), 2);
        assert!(!feedback.field(AnswerField::Script).unwrap().correct);
        assert!(feedback.field(AnswerField::Transcription).unwrap().correct);
        assert!(feedback.field(AnswerField::Gloss).is_none());
        assert_eq!(feedback.item, item);
        assert_eq!(quiz.score(), SessionScore { correct: 0, attempted: 1 });
    }

    #[test]
    fn test_transcription_prompt_grades_gloss_substring() {
        let mut quiz = QuizSession::with_seed(
            lesson(vec![item("你好", "nǐ hǎo", "안녕하세요, 안녕")]),
            QuizMode::TranscriptionPrompt,
            0,
        );
        assert_eq!(quiz.prompt().unwrap(), "nǐ hǎo");
        let feedback = quiz
            .submit(&Answer {
                script: "你好".to_string(),
                transcription: String::new(),
                gloss: "안녕".to_string(),
            })
            .unwrap();
        assert!(feedback.correct);
    }

    #[test]
    fn test_toneless_answer_is_correct_but_flagged() {
        let mut quiz = QuizSession::with_seed(
            lesson(vec![item("你好", "nǐ hǎo", "안녕")]),
            QuizMode::GlossPrompt,
            0,
        );
        let feedback = quiz
            .submit(&Answer {
                script: "你好".to_string(),
                transcription: "ni hao".to_string(),
                gloss: String::new(),
            })
            .unwrap();
        assert!(feedback.correct);
        assert!(feedback.missing_tones());
    }

    #[test]
    fn test_score_monotonic_and_bounded() {
        let mut quiz = QuizSession::with_seed(greetings(), QuizMode::TranscriptionPrompt, 11);
        let mut previous = quiz.score();
        let mut step = 0;
        while !quiz.is_complete() {
            if step % 2 == 0 {
                let answer = correct_answer(quiz.current_item().unwrap());
                quiz.submit(&answer).unwrap();
                let score = quiz.score();
                assert_eq!(score.attempted, previous.attempted + 1);
                assert_eq!(score.correct, previous.correct + 1);
                quiz.advance().unwrap();
            } else {
                quiz.skip().unwrap();
                let score = quiz.score();
                assert_eq!(score.attempted, previous.attempted + 1);
                assert_eq!(score.correct, previous.correct);
            }
            assert!(quiz.score().correct <= quiz.score().attempted);
            previous = quiz.score();
            step += 1;
        }
        assert_eq!(step, 3);
    }

    #[test]
    fn test_reset_switches_lesson() {
        let mut quiz = QuizSession::with_seed(greetings(), QuizMode::GlossPrompt, 1);
        quiz.skip().unwrap();
        quiz.reset(lesson(vec![item("一", "yī", "하나")]));
        assert_eq!(quiz.score(), SessionScore::default());
        assert_eq!(quiz.order().len(), 1);
        assert_eq!(quiz.current_item().unwrap().script, "一");
    }

    #[test]
    fn test_same_seed_same_order() {
        let a = QuizSession::with_seed(greetings(), QuizMode::GlossPrompt, 77);
        let b = QuizSession::with_seed(greetings(), QuizMode::GlossPrompt, 77);
        assert_eq!(a.order(), b.order());
    }

    #[test]
    fn test_quiz_mode_parses_from_snake_case() {
        assert_eq!(
            "gloss_prompt".parse::<QuizMode>().unwrap(),
            QuizMode::GlossPrompt
        );
        assert_eq!(QuizMode::TranscriptionPrompt.to_string(), "transcription_prompt");
    }
}
