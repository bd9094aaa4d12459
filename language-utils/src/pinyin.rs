//! Tone handling for pinyin transcriptions.
//!
//! Learners often type numbered tones (`ni3 hao3`) instead of tone marks
//! (`nǐ hǎo`). [`to_diacritic`] converts the former into the latter so both
//! can be compared against a lesson's canonical transcription.

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum Tone {
    First,
    Second,
    Third,
    Fourth,
    Neutral,
}

impl Tone {
    /// Parses a trailing tone digit. `5` is the neutral tone.
    pub fn from_digit(digit: char) -> Option<Self> {
        match digit {
            '1' => Some(Tone::First),
            '2' => Some(Tone::Second),
            '3' => Some(Tone::Third),
            '4' => Some(Tone::Fourth),
            '5' => Some(Tone::Neutral),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Tone::First => 1,
            Tone::Second => 2,
            Tone::Third => 3,
            Tone::Fourth => 4,
            Tone::Neutral => 5,
        }
    }

    /// Short description of the pitch contour.
    pub fn contour(self) -> &'static str {
        match self {
            Tone::First => "high and level",
            Tone::Second => "rising",
            Tone::Third => "dipping down, then up",
            Tone::Fourth => "sharply falling",
            Tone::Neutral => "light and short",
        }
    }

    fn mark_index(self) -> Option<usize> {
        match self {
            Tone::First => Some(0),
            Tone::Second => Some(1),
            Tone::Third => Some(2),
            Tone::Fourth => Some(3),
            Tone::Neutral => None,
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tone {}", self.number())
    }
}

/// Macron, acute, caron and grave variants of each vowel, in tone order.
const TONE_MARKS: [(char, [char; 4]); 6] = [
    ('a', ['ā', 'á', 'ǎ', 'à']),
    ('e', ['ē', 'é', 'ě', 'è']),
    ('i', ['ī', 'í', 'ǐ', 'ì']),
    ('o', ['ō', 'ó', 'ǒ', 'ò']),
    ('u', ['ū', 'ú', 'ǔ', 'ù']),
    ('ü', ['ǖ', 'ǘ', 'ǚ', 'ǜ']),
];

/// The marked form of `vowel` for `tone`. `v` stands in for `ü`.
///
/// Returns `None` for the neutral tone and for characters that aren't vowels.
pub fn mark(vowel: char, tone: Tone) -> Option<char> {
    let vowel = if vowel == 'v' { 'ü' } else { vowel };
    let index = tone.mark_index()?;
    TONE_MARKS
        .iter()
        .find(|(base, _)| *base == vowel)
        .map(|(_, marks)| marks[index])
}

/// Reverse lookup: which vowel and tone a marked character encodes.
pub fn tone_of(c: char) -> Option<(char, Tone)> {
    const TONES: [Tone; 4] = [Tone::First, Tone::Second, Tone::Third, Tone::Fourth];
    TONE_MARKS.iter().find_map(|(base, marks)| {
        marks
            .iter()
            .position(|m| *m == c)
            .map(|index| (*base, TONES[index]))
    })
}

/// Converts numbered-tone syllables into tone-marked ones.
///
/// Syllables are separated by whitespace and re-joined with single spaces.
/// Each syllable must be letters optionally followed by a tone digit 1-5;
/// anything else is passed through untouched. Toned syllables are lowercased
/// and `v` becomes `ü`.
///
/// The mark goes on `a` if present, else `e`, else the `o` of `ou`, else the
/// right-most of `i`, `o`, `u`, `ü`. This doesn't special-case `iu`/`ui`.
pub fn to_diacritic(input: &str) -> String {
    input
        .split_whitespace()
        .map(convert_syllable)
        .collect::<Vec<_>>()
        .join(" ")
}

fn convert_syllable(syllable: &str) -> String {
    let Some((letters, tone)) = split_syllable(syllable) else {
        return syllable.to_string();
    };
    match tone {
        None => syllable.to_string(),
        Some(Tone::Neutral) => letters.to_string(),
        Some(tone) => {
            let letters = letters
                .chars()
                .flat_map(char::to_lowercase)
                .map(|c| if c == 'v' { 'ü' } else { c })
                .collect::<String>();
            place_mark(&letters, tone)
        }
    }
}

/// Splits `hao3` into (`hao`, Some(Third)). `None` if the syllable doesn't
/// have the letters-then-optional-digit shape.
fn split_syllable(syllable: &str) -> Option<(&str, Option<Tone>)> {
    let (letters, tone) = match syllable.char_indices().last()? {
        (index, c) if c.is_ascii_digit() => (&syllable[..index], Some(Tone::from_digit(c)?)),
        _ => (syllable, None),
    };
    if letters.is_empty() || !letters.chars().all(is_syllable_letter) {
        return None;
    }
    Some((letters, tone))
}

fn is_syllable_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || c == 'ü' || c == 'Ü'
}

fn place_mark(letters: &str, tone: Tone) -> String {
    let target = letters
        .find('a')
        .or_else(|| letters.find('e'))
        .or_else(|| {
            if letters.contains("ou") {
                letters.find('o')
            } else {
                None
            }
        })
        .or_else(|| {
            letters
                .char_indices()
                .rev()
                .find(|(_, c)| matches!(c, 'i' | 'o' | 'u' | 'ü'))
                .map(|(index, _)| index)
        });

    let Some(index) = target else {
        return letters.to_string();
    };
    let Some(vowel) = letters[index..].chars().next() else {
        return letters.to_string();
    };
    let Some(marked) = mark(vowel, tone) else {
        return letters.to_string();
    };

    let mut result = String::with_capacity(letters.len() + 1);
    result.push_str(&letters[..index]);
    result.push(marked);
    result.push_str(&letters[index + vowel.len_utf8()..]);
    result
}
