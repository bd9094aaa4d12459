//! Scoring of spoken attempts against a vocabulary item.
//!
//! The recognizer hands back a few transcripts, each with a confidence. An
//! attempt passes when the best transcript is the item's script and the
//! recognizer was both confident and consistent about it.

use language_utils::pinyin::tone_of;
use language_utils::text_cleanup::normalize_recognized;
use language_utils::{Tone, VocabItem};

use crate::collaborators::{CaptureError, SpeechCapture};
use crate::config::ScoringConfig;

/// Shown in place of an empty transcript.
pub const NOT_RECOGNIZED: &str = "not recognized";

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RecognitionHypothesis {
    pub text: String,
    /// In `0.0..=1.0`; out-of-range values are clamped when scoring.
    pub confidence: f32,
}

impl RecognitionHypothesis {
    pub fn new(text: impl Into<String>, confidence: f32) -> Self {
        Self {
            text: text.into(),
            confidence,
        }
    }
}

#[derive(
    Clone, Copy, Debug, Hash, Eq, PartialEq, serde::Serialize, parse_display::Display,
)]
#[display(style = "snake_case")]
pub enum VerdictStatus {
    Pass,
    Borderline,
    Fail,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Verdict {
    pub status: VerdictStatus,
    /// Best transcript as the recognizer returned it; empty if none.
    pub recognized: String,
    pub confidence_percent: u8,
    pub score_percent: u8,
    /// Advice for anything short of a pass.
    pub tip: Option<String>,
    pub hypotheses: Vec<RecognitionHypothesis>,
}

impl Verdict {
    pub fn recognized_or_placeholder(&self) -> &str {
        if self.recognized.is_empty() {
            NOT_RECOGNIZED
        } else {
            &self.recognized
        }
    }

    /// `你好(90%) / 你号(40%)`, or `None` unless there were alternatives.
    pub fn alternatives_summary(&self) -> Option<String> {
        if self.hypotheses.len() < 2 {
            return None;
        }
        let parts: Vec<String> = self
            .hypotheses
            .iter()
            .map(|h| format!("{}({}%)", h.text, percent(h.confidence)))
            .collect();
        Some(parts.join(" / "))
    }
}

#[derive(Clone, Debug, Default)]
pub struct PronunciationScorer {
    config: ScoringConfig,
}

impl PronunciationScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn evaluate(&self, target: &VocabItem, hypotheses: &[RecognitionHypothesis]) -> Verdict {
        let Some(best) = hypotheses.first() else {
            log::debug!("No hypotheses for {:?}", target.script);
            return Verdict {
                status: VerdictStatus::Fail,
                recognized: String::new(),
                confidence_percent: 0,
                score_percent: 0,
                tip: Some(tip(&target.transcription)),
                hypotheses: Vec::new(),
            };
        };

        let expected = normalize_recognized(&target.script);
        let got = normalize_recognized(&best.text);
        let exact = got == expected;
        let partial =
            !exact && !got.is_empty() && (got.contains(&expected) || expected.contains(&got));

        let agreement = if hypotheses.len() > 1 {
            let agreeing = hypotheses
                .iter()
                .filter(|h| normalize_recognized(&h.text) == expected)
                .count();
            agreeing as f32 / hypotheses.len() as f32
        } else {
            1.0
        };
        let confidence = best.confidence.clamp(0.0, 1.0);
        let score = self.config.confidence_weight * confidence
            + self.config.agreement_weight * agreement;

        let status = if exact && score >= self.config.pass_threshold {
            VerdictStatus::Pass
        } else if (exact && score >= self.config.borderline_threshold) || partial {
            VerdictStatus::Borderline
        } else {
            VerdictStatus::Fail
        };

        log::debug!(
            "{:?} heard as {:?}: exact={exact} partial={partial} confidence={confidence:.2} agreement={agreement:.2} score={score:.2} -> {status}",
            target.script,
            best.text
        );

        Verdict {
            status,
            recognized: best.text.clone(),
            confidence_percent: percent(confidence),
            score_percent: percent(score),
            tip: (status != VerdictStatus::Pass).then(|| tip(&target.transcription)),
            hypotheses: hypotheses.to_vec(),
        }
    }

    /// Captures one utterance and scores it. A failed capture is a failed
    /// attempt, not an error.
    pub fn evaluate_capture(&self, target: &VocabItem, capture: &mut dyn SpeechCapture) -> Verdict {
        match capture.capture(self.config.max_alternatives) {
            Ok(hypotheses) => self.evaluate(target, &hypotheses),
            Err(err) => {
                log::warn!("Speech capture failed: {err}");
                self.evaluate(target, &[])
            }
        }
    }
}

fn percent(fraction: f32) -> u8 {
    (fraction.clamp(0.0, 1.0) * 100.0).round() as u8
}

/// Sounds learners commonly get wrong, each with a pointer on how to make it.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, parse_display::Display)]
#[display(style = "snake_case")]
pub enum DifficultSound {
    Retroflex,
    Z,
    C,
    S,
    R,
    RoundedFront,
}

impl DifficultSound {
    pub const ALL: [DifficultSound; 6] = [
        DifficultSound::Retroflex,
        DifficultSound::Z,
        DifficultSound::C,
        DifficultSound::S,
        DifficultSound::R,
        DifficultSound::RoundedFront,
    ];

    /// Whether a lowercase transcription contains this sound.
    fn occurs_in(self, transcription: &str) -> bool {
        let has = |needle: &str| transcription.contains(needle);
        match self {
            DifficultSound::Retroflex => has("zh") || has("ch") || has("sh"),
            DifficultSound::Z => has("z") && !has("zh"),
            DifficultSound::C => has("c") && !has("ch"),
            DifficultSound::S => has("s") && !has("sh"),
            DifficultSound::R => has("r"),
            DifficultSound::RoundedFront => transcription
                .chars()
                .any(|c| c == 'ü' || tone_of(c).is_some_and(|(base, _)| base == 'ü')),
        }
    }

    pub fn advice(self) -> &'static str {
        match self {
            DifficultSound::Retroflex => {
                "zh/ch/sh: curl the tip of the tongue back toward the roof of the mouth (like 즈/츠/스 with the tongue rolled)"
            }
            DifficultSound::Z => "z: tongue behind the teeth, unaspirated, like 쯔",
            DifficultSound::C => "c: tongue behind the teeth with a strong puff of air, like 츠",
            DifficultSound::S => "s: a sharp hiss with the tongue behind the teeth, like 쓰",
            DifficultSound::R => "r: curl the tongue back without touching, between ㄹ and 르",
            DifficultSound::RoundedFront => {
                "ü: say 이 while rounding the lips as for 우 (close to 위 without gliding)"
            }
        }
    }
}

/// Advice for pronouncing `transcription`, one point per line.
pub fn tip(transcription: &str) -> String {
    remediation_lines(transcription).join("\n")
}

pub fn remediation_lines(transcription: &str) -> Vec<String> {
    let lower = transcription.to_lowercase();
    let mut lines: Vec<String> = lower
        .chars()
        .filter_map(|c| tone_of(c).map(|(_, tone)| tone_line(c, tone)))
        .collect();
    lines.extend(
        DifficultSound::ALL
            .into_iter()
            .filter(|sound| sound.occurs_in(&lower))
            .map(|sound| sound.advice().to_string()),
    );
    if lines.is_empty() {
        lines.push(format!(
            "Practice slowly: listen to \"{transcription}\" and repeat it syllable by syllable"
        ));
    }
    lines
}

fn tone_line(vowel: char, tone: Tone) -> String {
    format!("\"{vowel}\" → {tone} ({})", tone.contour())
}
