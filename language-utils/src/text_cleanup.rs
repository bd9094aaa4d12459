//! Normalization helpers used when grading learner input.
//!
//! These never fail: malformed input simply comes out less normalized.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Full-width punctuation that speech recognizers append to Chinese results.
const RECOGNIZER_PUNCTUATION: &[char] = &['，', '。', '！', '？', '、'];

/// Lowercases and drops whitespace and apostrophes, so `Ni'hao`, `ni hao`
/// and `nihao` all fold to the same string. Marks are composed (NFC) so a
/// decomposed `ǎ` equals a precomposed one.
pub fn fold(text: &str) -> String {
    text.nfc()
        .filter(|c| !c.is_whitespace() && !is_apostrophe(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn is_apostrophe(c: char) -> bool {
    // ' (U+0027), ' (U+2018), ' (U+2019)
    matches!(c, '\'' | '\u{2018}' | '\u{2019}')
}

/// Removes tone marks (and any other diacritics), e.g. `nǚ hǎo` → `nu hao`.
pub fn strip_tones(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Normalizes a script string for comparing recognized speech against it:
/// whitespace and recognizer punctuation are removed, then it is lowercased.
pub fn normalize_recognized(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace() && !RECOGNIZER_PUNCTUATION.contains(c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Whether the text contains a tone digit 1-4 anywhere.
pub fn contains_tone_digit(text: &str) -> bool {
    text.chars().any(|c| matches!(c, '1'..='4'))
}

/// Splits a gloss like `안녕, 안녕하세요` into its trimmed, non-empty synonyms.
pub fn synonyms(gloss: &str) -> impl Iterator<Item = &str> {
    gloss.split(',').map(str::trim).filter(|s| !s.is_empty())
}
