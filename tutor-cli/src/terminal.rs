use std::io::Write;

use anyhow::Result;
use language_utils::VocabItem;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tutor_core::collaborators::{CaptureError, Playback, SpeechCapture};
use tutor_core::{PracticeDeck, RecognitionHypothesis};

/// Line-oriented stdin.
pub struct Input {
    lines: Lines<BufReader<Stdin>>,
}

impl Input {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Prints `label` and reads one line. `None` at end of input.
    pub async fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        print!("{label}");
        std::io::stdout().flush()?;
        Ok(self.lines.next_line().await?)
    }
}

/// Stands in for text-to-speech by printing what would be said.
#[derive(Clone, Debug)]
pub struct TerminalPlayback {
    pub rate: f32,
}

impl Playback for TerminalPlayback {
    fn speak(&mut self, text: &str, language: &str) {
        println!("  🔊 {text}  [{language} x{}]", self.rate);
    }
}

/// Recognition results typed by hand: `你好:0.9 | 你号:0.4`.
///
/// A missing confidence counts as 1.0. A blank line means nothing was heard.
pub struct TypedHypotheses<'a>(pub &'a str);

impl SpeechCapture for TypedHypotheses<'_> {
    fn capture(
        &mut self,
        max_alternatives: usize,
    ) -> Result<Vec<RecognitionHypothesis>, CaptureError> {
        let hypotheses = parse_hypotheses(self.0)?;
        if hypotheses.is_empty() {
            return Err(CaptureError::NoSpeech);
        }
        Ok(hypotheses.into_iter().take(max_alternatives.max(1)).collect())
    }
}

fn parse_hypotheses(line: &str) -> Result<Vec<RecognitionHypothesis>, CaptureError> {
    line.split('|')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| match part.rsplit_once(':') {
            Some((text, confidence)) => confidence
                .trim()
                .parse::<f32>()
                .map(|confidence| RecognitionHypothesis::new(text.trim(), confidence))
                .map_err(|_| CaptureError::Recognition(format!("bad confidence in {part:?}"))),
            None => Ok(RecognitionHypothesis::new(part, 1.0)),
        })
        .collect()
}

pub fn render_item(item: &VocabItem) -> String {
    format!(
        "{}  {}\n  {}  ({})\n  [{}]",
        item.script,
        item.transcription,
        item.gloss_locale,
        item.gloss_english,
        item.part_of_speech.label()
    )
}

pub fn render_card(deck: &PracticeDeck) -> String {
    match deck.current() {
        Some(item) => format!(
            "── {} / {} ──\n{}",
            deck.position(),
            deck.len(),
            render_item(item)
        ),
        None => "(this lesson has no words)".to_string(),
    }
}
