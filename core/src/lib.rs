//! pinyinlab-core
//!
//! The pinyin syllable grammar shared by the quiz crate and the command line
//! tools: the closed phoneme tables, the co-occurrence rules, syllable
//! decomposition and tone-mark placement.
//!
//! The engine is a set of pure functions over read-only tables. It performs
//! no I/O and holds no mutable state.
//!
//! Public API:
//! - `Initial`, `Medial`, `Final`, `Vowel`, `Tone` - phoneme tables
//! - `Grammar` - validation, decomposition and tone placement
//! - `Syllable` - a validated syllable and its canonical/marked forms
//! - `Decomposition` - components recovered from observed text
//! - `RuleTables` - the indexed co-occurrence rules
//! - `Config` - input handling options
use serde::{Deserialize, Serialize};

pub mod phoneme;
pub use phoneme::{Final, FinalKind, Initial, Medial, Tone, Vowel, TONE_MARKS};

pub mod combination;
pub use combination::{
    allowed_finals, allowed_initials, spell, MedialRule, RuleTables, Syllable, MEDIAL_RULES,
};

pub mod decompose;
pub use decompose::Decomposition;

pub mod tone;

pub mod grammar;
pub use grammar::Grammar;

/// Result type for grammar operations.
pub type Result<T> = std::result::Result<T, GrammarError>;

/// Errors produced by the grammar.
///
/// `InvalidCombination` and `Undecomposable` are ordinary negative outcomes:
/// a learner picked a triple Mandarin does not have, or a converter handed
/// back text that is not a syllable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    #[error("no such syllable: {}", spell_attempt(.initial, .medial, .final_))]
    InvalidCombination {
        initial: Option<Initial>,
        medial: Option<Medial>,
        final_: Final,
    },

    #[error("cannot decompose {0:?} into initial, medial and final")]
    Undecomposable(String),

    #[error("no tone-bearing vowel in {0:?}")]
    MissingNucleus(String),

    #[error("invalid tone number: {0} (must be 1-5)")]
    InvalidTone(u8),

    #[error("unknown pinyin token: {0:?}")]
    UnknownToken(String),
}

fn spell_attempt(initial: &Option<Initial>, medial: &Option<Medial>, final_: &Final) -> String {
    format!(
        "{}+{}+{}",
        initial.map_or("∅", Initial::as_str),
        medial.map_or("∅", Medial::as_str),
        final_.as_str()
    )
}

/// Input handling options.
///
/// Loaded from TOML the same way across crates; quiz-specific options live
/// in `pinyinlab_quiz::QuizConfig`, which flattens this struct.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Read "v" as ü ("lv" → "lü"), the keyboard convention.
    pub accept_v_as_umlaut: bool,
    /// Read a trailing digit as the tone ("hao3"); 5 or 0 is neutral.
    pub accept_numbered_tones: bool,
    /// Reject decompositions whose triple is not in the rule tables.
    /// Off by default: converters are trusted as ground truth.
    pub strict_decompose: bool,
    /// NFC-normalize and trim input before parsing.
    pub trim_input: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            accept_v_as_umlaut: true,
            accept_numbered_tones: true,
            strict_decompose: false,
            trim_input: true,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> std::result::Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Syllables taught as a unit rather than blended (整体认读音节).
pub const WHOLE_SYLLABLES: [&str; 16] = [
    "zhi", "chi", "shi", "ri", "zi", "ci", "si", "yi", "wu", "yu", "ye", "yue", "yuan", "yin",
    "yun", "ying",
];

/// Whether `base` (tone-free) is one of the whole syllables.
pub fn is_whole_syllable(base: &str) -> bool {
    WHOLE_SYLLABLES.contains(&base)
}

/// Validate against the standard tables.
pub fn validate(initial: Option<Initial>, final_: Final, medial: Option<Medial>) -> Result<Syllable> {
    combination::validate_with(RuleTables::standard(), initial, final_, medial)
}

/// Decompose with the standard tables and default configuration.
pub fn decompose(text: &str) -> Result<Decomposition> {
    decompose::decompose_with(RuleTables::standard(), &Config::default(), text)
}

pub use tone::{four_tones, nucleus_vowel, render_tone, strip_tone};

/// Utility helpers.
pub mod utils {
    /// Normalize input strings (NFC) and trim whitespace.
    pub fn normalize(s: &str) -> String {
        use unicode_normalization::UnicodeNormalization;
        s.nfc().collect::<String>().trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_toml_round_trip() {
        let mut cfg = Config::default();
        cfg.strict_decompose = true;
        let text = cfg.to_toml_string().unwrap();
        assert_eq!(Config::from_toml_str(&text).unwrap(), cfg);
    }

    #[test]
    fn config_missing_fields_take_defaults() {
        let cfg = Config::from_toml_str("accept_v_as_umlaut = false\n").unwrap();
        assert!(!cfg.accept_v_as_umlaut);
        assert!(cfg.accept_numbered_tones);
    }

    #[test]
    fn error_messages() {
        let err = validate(Some(Initial::F), Final::I, None).unwrap_err();
        assert_eq!(err.to_string(), "no such syllable: f+∅+i");
    }

    #[test]
    fn whole_syllables_all_decompose() {
        for text in WHOLE_SYLLABLES {
            assert!(is_whole_syllable(text));
            let d = decompose(text).unwrap();
            assert!(d.syllable(RuleTables::standard()).is_ok(), "{text}");
        }
    }

    #[test]
    fn decomposition_serializes_with_wire_names() {
        let json = serde_json::to_value(decompose("lǘ").unwrap()).unwrap();
        assert_eq!(json["initial"], "l");
        assert!(json["medial"].is_null());
        assert_eq!(json["final"], "ü");
        assert_eq!(json["tone"], 2);
    }

    #[test]
    fn normalize_composes_combining_marks() {
        assert_eq!(utils::normalize(" lu\u{308}e "), "lüe");
        assert_eq!(decompose("n\u{75}\u{308}\u{30c}").unwrap().tone, Tone::Third);
    }
}
