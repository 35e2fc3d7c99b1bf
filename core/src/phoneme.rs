//! Phoneme tables: the closed sets of initials (shengmu 声母), medials
//! (jieyin 介音), finals (yunmu 韵母), nucleus vowels and tones.
//!
//! Every token is an enum variant so the co-occurrence tables in
//! `combination` can be written as exhaustive `match` expressions. Text
//! forms use "ü" throughout; "v" is accepted as an input spelling only.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::GrammarError;

/// Syllable-initial consonant, in the order children learn them.
///
/// `Y` and `W` are listed because the learner picks them from the same
/// panel, but they are spelling markers for zero-initial syllables rather
/// than phonemes (see [`Initial::is_zero_marker`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Initial {
    B,
    P,
    M,
    F,
    D,
    T,
    N,
    L,
    G,
    K,
    H,
    J,
    Q,
    X,
    Zh,
    Ch,
    Sh,
    R,
    Z,
    C,
    S,
    Y,
    W,
}

impl Initial {
    /// All 23 initials in teaching order.
    pub const ALL: [Initial; 23] = [
        Initial::B,
        Initial::P,
        Initial::M,
        Initial::F,
        Initial::D,
        Initial::T,
        Initial::N,
        Initial::L,
        Initial::G,
        Initial::K,
        Initial::H,
        Initial::J,
        Initial::Q,
        Initial::X,
        Initial::Zh,
        Initial::Ch,
        Initial::Sh,
        Initial::R,
        Initial::Z,
        Initial::C,
        Initial::S,
        Initial::Y,
        Initial::W,
    ];

    /// Phonemic initials in parse order: digraphs before any single letter
    /// they start with, so "zh" wins over "z". Excludes the y/w markers.
    pub const PARSE_ORDER: [Initial; 21] = [
        Initial::Zh,
        Initial::Ch,
        Initial::Sh,
        Initial::B,
        Initial::P,
        Initial::M,
        Initial::F,
        Initial::D,
        Initial::T,
        Initial::N,
        Initial::L,
        Initial::G,
        Initial::K,
        Initial::H,
        Initial::J,
        Initial::Q,
        Initial::X,
        Initial::R,
        Initial::Z,
        Initial::C,
        Initial::S,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Initial::B => "b",
            Initial::P => "p",
            Initial::M => "m",
            Initial::F => "f",
            Initial::D => "d",
            Initial::T => "t",
            Initial::N => "n",
            Initial::L => "l",
            Initial::G => "g",
            Initial::K => "k",
            Initial::H => "h",
            Initial::J => "j",
            Initial::Q => "q",
            Initial::X => "x",
            Initial::Zh => "zh",
            Initial::Ch => "ch",
            Initial::Sh => "sh",
            Initial::R => "r",
            Initial::Z => "z",
            Initial::C => "c",
            Initial::S => "s",
            Initial::Y => "y",
            Initial::W => "w",
        }
    }

    /// y and w carry no sound of their own; they only spell zero-initial
    /// syllables that would otherwise start with i, u or ü.
    pub fn is_zero_marker(self) -> bool {
        matches!(self, Initial::Y | Initial::W)
    }

    /// Initials after which a written "u" always stands for ü.
    pub fn simplifies_umlaut(self) -> bool {
        matches!(self, Initial::J | Initial::Q | Initial::X | Initial::Y)
    }

    /// Whether any medial rule lists this initial. Pickers use this to skip
    /// the medial slot for initials like f.
    pub fn can_take_medial(self) -> bool {
        crate::combination::MEDIAL_RULES
            .iter()
            .any(|rule| rule.initials.contains(&self))
    }
}

impl fmt::Display for Initial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Initial {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_lowercase();
        Initial::ALL
            .iter()
            .copied()
            .find(|i| i.as_str() == token)
            .ok_or_else(|| GrammarError::UnknownToken(s.to_string()))
    }
}

/// Glide between initial and final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Medial {
    #[serde(rename = "i")]
    I,
    #[serde(rename = "u")]
    U,
    #[serde(rename = "ü")]
    Yu,
}

impl Medial {
    pub const ALL: [Medial; 3] = [Medial::I, Medial::U, Medial::Yu];

    pub fn as_str(self) -> &'static str {
        match self {
            Medial::I => "i",
            Medial::U => "u",
            Medial::Yu => "ü",
        }
    }
}

impl fmt::Display for Medial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Medial {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "i" => Ok(Medial::I),
            "u" => Ok(Medial::U),
            "ü" | "v" => Ok(Medial::Yu),
            _ => Err(GrammarError::UnknownToken(s.to_string())),
        }
    }
}

/// Whether a final is one of the six single vowels or a compound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinalKind {
    Simple,
    Compound,
}

/// The vowel/nasal core of a syllable. Variant names spell ü as `V`,
/// matching the keyboard convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Final {
    #[serde(rename = "a")]
    A,
    #[serde(rename = "o")]
    O,
    #[serde(rename = "e")]
    E,
    #[serde(rename = "i")]
    I,
    #[serde(rename = "u")]
    U,
    #[serde(rename = "ü")]
    V,
    #[serde(rename = "ai")]
    Ai,
    #[serde(rename = "ei")]
    Ei,
    #[serde(rename = "ui")]
    Ui,
    #[serde(rename = "ao")]
    Ao,
    #[serde(rename = "ou")]
    Ou,
    #[serde(rename = "iu")]
    Iu,
    #[serde(rename = "ie")]
    Ie,
    #[serde(rename = "üe")]
    Ve,
    #[serde(rename = "er")]
    Er,
    #[serde(rename = "an")]
    An,
    #[serde(rename = "en")]
    En,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "un")]
    Un,
    #[serde(rename = "ün")]
    Vn,
    #[serde(rename = "ang")]
    Ang,
    #[serde(rename = "eng")]
    Eng,
    #[serde(rename = "ing")]
    Ing,
    #[serde(rename = "ong")]
    Ong,
}

impl Final {
    /// All 24 finals: the six simple vowels first, then the compounds.
    pub const ALL: [Final; 24] = [
        Final::A,
        Final::O,
        Final::E,
        Final::I,
        Final::U,
        Final::V,
        Final::Ai,
        Final::Ei,
        Final::Ui,
        Final::Ao,
        Final::Ou,
        Final::Iu,
        Final::Ie,
        Final::Ve,
        Final::Er,
        Final::An,
        Final::En,
        Final::In,
        Final::Un,
        Final::Vn,
        Final::Ang,
        Final::Eng,
        Final::Ing,
        Final::Ong,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Final::A => "a",
            Final::O => "o",
            Final::E => "e",
            Final::I => "i",
            Final::U => "u",
            Final::V => "ü",
            Final::Ai => "ai",
            Final::Ei => "ei",
            Final::Ui => "ui",
            Final::Ao => "ao",
            Final::Ou => "ou",
            Final::Iu => "iu",
            Final::Ie => "ie",
            Final::Ve => "üe",
            Final::Er => "er",
            Final::An => "an",
            Final::En => "en",
            Final::In => "in",
            Final::Un => "un",
            Final::Vn => "ün",
            Final::Ang => "ang",
            Final::Eng => "eng",
            Final::Ing => "ing",
            Final::Ong => "ong",
        }
    }

    pub fn kind(self) -> FinalKind {
        match self {
            Final::A | Final::O | Final::E | Final::I | Final::U | Final::V => FinalKind::Simple,
            _ => FinalKind::Compound,
        }
    }

    pub fn is_simple(self) -> bool {
        self.kind() == FinalKind::Simple
    }

    /// Whether the final's written form starts with ü.
    pub fn starts_with_umlaut(self) -> bool {
        matches!(self, Final::V | Final::Ve | Final::Vn)
    }

    /// Exact lookup of a tone-free final token ("ü" spelling only).
    pub fn from_text(text: &str) -> Option<Final> {
        crate::combination::FINAL_BY_TEXT.get(text).copied()
    }
}

impl fmt::Display for Final {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Final {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_lowercase().replace('v', "ü");
        Final::from_text(&token).ok_or_else(|| GrammarError::UnknownToken(s.to_string()))
    }
}

/// A vowel that can carry the tone mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Vowel {
    #[serde(rename = "a")]
    A,
    #[serde(rename = "o")]
    O,
    #[serde(rename = "e")]
    E,
    #[serde(rename = "i")]
    I,
    #[serde(rename = "u")]
    U,
    #[serde(rename = "ü")]
    V,
}

impl Vowel {
    pub const ALL: [Vowel; 6] = [Vowel::A, Vowel::O, Vowel::E, Vowel::I, Vowel::U, Vowel::V];

    pub fn as_char(self) -> char {
        match self {
            Vowel::A => 'a',
            Vowel::O => 'o',
            Vowel::E => 'e',
            Vowel::I => 'i',
            Vowel::U => 'u',
            Vowel::V => 'ü',
        }
    }

    /// The four marked forms of this vowel, indexed by tone 1-4.
    pub fn marks(self) -> &'static [char; 4] {
        &TONE_MARKS[self as usize]
    }

    /// The marked form for `tone`, or the plain vowel for the neutral tone.
    pub fn marked(self, tone: Tone) -> char {
        match tone.mark_index() {
            Some(idx) => self.marks()[idx],
            None => self.as_char(),
        }
    }
}

impl fmt::Display for Vowel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Diacritic variants per nucleus vowel, rows in `Vowel` order.
pub static TONE_MARKS: [[char; 4]; 6] = [
    ['ā', 'á', 'ǎ', 'à'],
    ['ō', 'ó', 'ǒ', 'ò'],
    ['ē', 'é', 'ě', 'è'],
    ['ī', 'í', 'ǐ', 'ì'],
    ['ū', 'ú', 'ǔ', 'ù'],
    ['ǖ', 'ǘ', 'ǚ', 'ǜ'],
];

/// One of the four pitch contours, or the unmarked neutral tone.
///
/// Serialized as its number; 5 stands for neutral, the same convention
/// character→pinyin converters use for "ma5".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Tone {
    First,
    Second,
    Third,
    Fourth,
    Neutral,
}

impl Tone {
    pub const MARKED: [Tone; 4] = [Tone::First, Tone::Second, Tone::Third, Tone::Fourth];

    pub fn from_number(n: u8) -> Result<Tone, GrammarError> {
        match n {
            1 => Ok(Tone::First),
            2 => Ok(Tone::Second),
            3 => Ok(Tone::Third),
            4 => Ok(Tone::Fourth),
            0 | 5 => Ok(Tone::Neutral),
            other => Err(GrammarError::InvalidTone(other)),
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

    /// Column in [`TONE_MARKS`]; `None` for the neutral tone.
    pub fn mark_index(self) -> Option<usize> {
        match self {
            Tone::Neutral => None,
            t => Some(t.number() as usize - 1),
        }
    }
}

impl From<Tone> for u8 {
    fn from(t: Tone) -> u8 {
        t.number()
    }
}

impl TryFrom<u8> for Tone {
    type Error = GrammarError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Tone::from_number(n)
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_sizes() {
        assert_eq!(Initial::ALL.len(), 23);
        assert_eq!(Final::ALL.len(), 24);
        assert_eq!(Medial::ALL.len(), 3);
        assert_eq!(Final::ALL.iter().filter(|f| f.is_simple()).count(), 6);
    }

    #[test]
    fn parse_order_puts_digraphs_first() {
        let pos = |i: Initial| Initial::PARSE_ORDER.iter().position(|&x| x == i).unwrap();
        assert!(pos(Initial::Zh) < pos(Initial::Z));
        assert!(pos(Initial::Ch) < pos(Initial::C));
        assert!(pos(Initial::Sh) < pos(Initial::S));
        assert!(!Initial::PARSE_ORDER.contains(&Initial::Y));
        assert!(!Initial::PARSE_ORDER.contains(&Initial::W));
    }

    #[test]
    fn tokens_parse_from_text() {
        assert_eq!("zh".parse::<Initial>().unwrap(), Initial::Zh);
        assert_eq!("ve".parse::<Final>().unwrap(), Final::Ve);
        assert_eq!("ün".parse::<Final>().unwrap(), Final::Vn);
        assert_eq!("v".parse::<Medial>().unwrap(), Medial::Yu);
        assert!("iong".parse::<Final>().is_err());
        assert!("gh".parse::<Initial>().is_err());
    }

    #[test]
    fn tone_numbers() {
        assert_eq!(Tone::from_number(3).unwrap(), Tone::Third);
        assert_eq!(Tone::from_number(5).unwrap(), Tone::Neutral);
        assert!(Tone::from_number(7).is_err());
        assert_eq!(Vowel::V.marked(Tone::Second), 'ǘ');
        assert_eq!(Vowel::A.marked(Tone::Neutral), 'a');
    }

    #[test]
    fn medial_capable_initials() {
        assert!(Initial::J.can_take_medial());
        assert!(Initial::G.can_take_medial());
        assert!(Initial::R.can_take_medial());
        assert!(!Initial::F.can_take_medial());
        assert!(!Initial::W.can_take_medial());
    }
}
