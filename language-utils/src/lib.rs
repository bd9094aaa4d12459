pub mod lesson_pack;
pub mod pinyin;
pub mod text_cleanup;

pub use lesson_pack::{LessonCatalog, LessonDataError};
pub use pinyin::Tone;

/// Grammatical category of a vocabulary item, keyed by the short tags used in
/// lesson files (`명`, `동`, ...). Tags we don't know are kept verbatim.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, Hash, Eq, PartialEq)]
#[serde(from = "String", into = "String")]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Pronoun,
    Particle,
    MeasureWord,
    Preposition,
    Conjunction,
    Numeral,
    ModalVerb,
    AuxiliaryVerb,
    ProperNoun,
    Other(String),
}

impl PartOfSpeech {
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim() {
            "명" => PartOfSpeech::Noun,
            "동" => PartOfSpeech::Verb,
            "형" => PartOfSpeech::Adjective,
            "부" => PartOfSpeech::Adverb,
            "대" => PartOfSpeech::Pronoun,
            "조" => PartOfSpeech::Particle,
            "양" => PartOfSpeech::MeasureWord,
            "개" => PartOfSpeech::Preposition,
            "접" => PartOfSpeech::Conjunction,
            "수" => PartOfSpeech::Numeral,
            "능원" => PartOfSpeech::ModalVerb,
            "조동" => PartOfSpeech::AuxiliaryVerb,
            "고유" => PartOfSpeech::ProperNoun,
            other => PartOfSpeech::Other(other.to_string()),
        }
    }

    /// The short tag as it appears in lesson files.
    pub fn tag(&self) -> &str {
        match self {
            PartOfSpeech::Noun => "명",
            PartOfSpeech::Verb => "동",
            PartOfSpeech::Adjective => "형",
            PartOfSpeech::Adverb => "부",
            PartOfSpeech::Pronoun => "대",
            PartOfSpeech::Particle => "조",
            PartOfSpeech::MeasureWord => "양",
            PartOfSpeech::Preposition => "개",
            PartOfSpeech::Conjunction => "접",
            PartOfSpeech::Numeral => "수",
            PartOfSpeech::ModalVerb => "능원",
            PartOfSpeech::AuxiliaryVerb => "조동",
            PartOfSpeech::ProperNoun => "고유",
            PartOfSpeech::Other(tag) => tag,
        }
    }

    /// Full label in the learner's locale, shown on the card badge.
    pub fn label(&self) -> &str {
        match self {
            PartOfSpeech::Noun => "명사",
            PartOfSpeech::Verb => "동사",
            PartOfSpeech::Adjective => "형용사",
            PartOfSpeech::Adverb => "부사",
            PartOfSpeech::Pronoun => "대명사",
            PartOfSpeech::Particle => "조사",
            PartOfSpeech::MeasureWord => "양사",
            PartOfSpeech::Preposition => "개사",
            PartOfSpeech::Conjunction => "접속사",
            PartOfSpeech::Numeral => "수사",
            PartOfSpeech::ModalVerb => "능원동사",
            PartOfSpeech::AuxiliaryVerb => "조동사",
            PartOfSpeech::ProperNoun => "고유명사",
            PartOfSpeech::Other(tag) => tag,
        }
    }
}

impl std::fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let word = match self {
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Adjective => "adjective",
            PartOfSpeech::Adverb => "adverb",
            PartOfSpeech::Pronoun => "pronoun",
            PartOfSpeech::Particle => "particle",
            PartOfSpeech::MeasureWord => "measure word",
            PartOfSpeech::Preposition => "preposition",
            PartOfSpeech::Conjunction => "conjunction",
            PartOfSpeech::Numeral => "numeral",
            PartOfSpeech::ModalVerb => "modal verb",
            PartOfSpeech::AuxiliaryVerb => "auxiliary verb",
            PartOfSpeech::ProperNoun => "proper noun",
            PartOfSpeech::Other(tag) => tag,
        };
        write!(f, "{word}")
    }
}

impl From<String> for PartOfSpeech {
    fn from(tag: String) -> Self {
        PartOfSpeech::from_tag(&tag)
    }
}

impl From<PartOfSpeech> for String {
    fn from(pos: PartOfSpeech) -> Self {
        pos.tag().to_string()
    }
}

/// One vocabulary entry of a lesson.
///
/// Older lesson files use `chinese`/`pinyin`/`korean`/
/// `english`/`pos`; both spellings are accepted.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VocabItem {
    /// Written form in the target language.
    #[serde(alias = "chinese")]
    pub script: String,
    /// Canonical transcription with tone marks, e.g. `nǐ hǎo`.
    #[serde(alias = "pinyin")]
    pub transcription: String,
    /// Gloss in the learner's language; may list synonyms separated by commas.
    #[serde(alias = "korean")]
    pub gloss_locale: String,
    #[serde(alias = "english")]
    pub gloss_english: String,
    #[serde(alias = "pos")]
    pub part_of_speech: PartOfSpeech,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: u32,
    pub title: String,
    #[serde(alias = "titleKr", default)]
    pub title_locale: String,
    pub words: Vec<VocabItem>,
}

impl Lesson {
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&VocabItem> {
        self.words.get(index)
    }

    /// Distinct CJK ideographs used by the lesson, in first-seen order.
    pub fn han_characters(&self) -> Vec<char> {
        let mut seen = std::collections::HashSet::new();
        self.words
            .iter()
            .flat_map(|word| word.script.chars())
            .filter(|c| is_han(*c))
            .filter(|c| seen.insert(*c))
            .collect()
    }
}

fn is_han(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
}
