use std::path::Path;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed config file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Tunables for the tutor. Every key is optional in the JSON file.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TutorConfig {
    pub scoring: ScoringConfig,
    pub playback: PlaybackConfig,
    pub timing: TimingConfig,
}

impl TutorConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = Self::from_json_str(&std::fs::read_to_string(path)?)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

/// Weights and cut-offs for pronunciation verdicts.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub confidence_weight: f32,
    pub agreement_weight: f32,
    pub pass_threshold: f32,
    pub borderline_threshold: f32,
    /// How many alternatives to ask the recognizer for.
    pub max_alternatives: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            confidence_weight: 0.6,
            agreement_weight: 0.4,
            pass_threshold: 0.85,
            borderline_threshold: 0.65,
            max_alternatives: 3,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// BCP 47 tag handed to the playback collaborator.
    pub language: String,
    pub rate: f32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            language: "zh-CN".to_string(),
            rate: 0.8,
        }
    }
}

/// How long the front end lingers on feedback before moving on.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub correct_feedback_ms: u64,
    pub wrong_feedback_ms: u64,
    pub skip_feedback_ms: u64,
    pub autoplay_interval_ms: u64,
}

impl TimingConfig {
    pub fn feedback_delay(&self, correct: bool) -> Duration {
        Duration::from_millis(if correct {
            self.correct_feedback_ms
        } else {
            self.wrong_feedback_ms
        })
    }

    pub fn skip_delay(&self) -> Duration {
        Duration::from_millis(self.skip_feedback_ms)
    }

    pub fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(self.autoplay_interval_ms)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            correct_feedback_ms: 1200,
            wrong_feedback_ms: 2500,
            skip_feedback_ms: 2000,
            autoplay_interval_ms: 3000,
        }
    }
}
