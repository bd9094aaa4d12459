//! Seams to the outside world: audio out, and speech recognition in.

use crate::pronunciation::RecognitionHypothesis;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CaptureError {
    #[error("speech recognition isn't available here")]
    Unsupported,

    #[error("no speech was detected")]
    NoSpeech,

    #[error("speech recognition failed: {0}")]
    Recognition(String),
}

/// Reads text aloud. Fire-and-forget.
pub trait Playback {
    fn speak(&mut self, text: &str, language: &str);
}

/// Listens for one utterance and returns up to `max_alternatives`
/// hypotheses, most likely first.
pub trait SpeechCapture {
    fn capture(
        &mut self,
        max_alternatives: usize,
    ) -> Result<Vec<RecognitionHypothesis>, CaptureError>;
}
