//! Answer checking for typed quiz answers.

use language_utils::pinyin::to_diacritic;
use language_utils::text_cleanup::{contains_tone_digit, fold, strip_tones, synonyms};

/// Which equivalence rule accepted a transcription answer.
///
/// Callers can use this to tell a learner that the sounds were right but the
/// tones were missing or wrong ([`MatchRule::Toneless`]).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, parse_display::Display,
)]
#[display(style = "snake_case")]
pub enum MatchRule {
    /// Same text up to case, spacing and apostrophes.
    Exact,
    /// Numbered tones (`ni3 hao3`) that convert to the canonical marks.
    NumberedTones,
    /// Same syllables once all tones are ignored.
    Toneless,
}

/// Checks a transcription answer, returning the first rule that accepts it.
///
/// Blank input never matches.
pub fn transcription_match(input: &str, canonical: &str) -> Option<MatchRule> {
    if input.trim().is_empty() {
        return None;
    }

    let canonical_folded = fold(canonical);
    if fold(input) == canonical_folded {
        return Some(MatchRule::Exact);
    }

    if contains_tone_digit(input) && fold(&to_diacritic(input)) == canonical_folded {
        return Some(MatchRule::NumberedTones);
    }

    if fold(&toneless(input)) == fold(&strip_tones(canonical)) {
        return Some(MatchRule::Toneless);
    }

    None
}

/// Whether a transcription answer is accepted by any rule.
pub fn matches(input: &str, canonical: &str) -> bool {
    let rule = transcription_match(input, canonical);
    log::debug!("transcription {input:?} vs {canonical:?}: {rule:?}");
    rule.is_some()
}

/// Drops tone marks and tone digits alike, so `ma1`, `mǎ` and `ma` agree.
fn toneless(text: &str) -> String {
    strip_tones(text)
        .chars()
        .filter(|c| !matches!(c, '1'..='5'))
        .collect()
}

/// Checks a gloss answer against a comma-separated list of accepted senses.
///
/// Accepted if the input is the whole gloss, or contains any one sense as a
/// substring. Case-sensitive; blank input never matches.
pub fn gloss_matches(input: &str, canonical_gloss: &str) -> bool {
    let input = input.trim();
    if input.is_empty() {
        return false;
    }
    input == canonical_gloss || synonyms(canonical_gloss).any(|sense| input.contains(sense))
}

/// Script answers must be typed exactly (surrounding whitespace aside).
pub fn script_matches(input: &str, canonical: &str) -> bool {
    let input = input.trim();
    !input.is_empty() && input == canonical
}
