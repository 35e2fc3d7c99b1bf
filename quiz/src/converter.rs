//! The character → pinyin boundary.
//!
//! The grammar never guesses a character's reading; an external converter is
//! the authority and the quiz generator only decomposes what it returns.
//! `TableConverter` is the in-process implementation used by the command
//! line tool and tests; callers with a full dictionary implement
//! `PinyinConverter` themselves.

use std::path::Path;

use ahash::AHashMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use pinyinlab_core::{GrammarError, Tone};

/// Numbered reading: letters (ü may be spelled "v" or "u:"), then an
/// optional tone digit.
static NUMBERED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([a-zü:]+?)([0-5])?$").expect("valid numbered reading regex"));

/// A character's reading as reported by a converter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reading {
    /// Tone-free syllable text ("hao", "lü").
    pub base: String,
    pub tone: Tone,
}

impl Reading {
    pub fn new(base: impl Into<String>, tone: Tone) -> Self {
        Self {
            base: base.into(),
            tone,
        }
    }

    /// Parse "hao3" style text. A missing digit is the neutral tone.
    pub fn parse_numbered(text: &str) -> Result<Self, GrammarError> {
        let lowered = text.trim().to_lowercase();
        let caps = NUMBERED_RE
            .captures(&lowered)
            .ok_or_else(|| GrammarError::Undecomposable(text.to_string()))?;
        let base = caps[1].replace("u:", "ü").replace('v', "ü");
        if base.contains(':') {
            return Err(GrammarError::Undecomposable(text.to_string()));
        }
        let tone = match caps.get(2).and_then(|m| m.as_str().chars().next()) {
            Some(digit) => Tone::from_number(digit as u8 - b'0')?,
            None => Tone::Neutral,
        };
        Ok(Self { base, tone })
    }

    /// The reading with its tone digit, "lü4".
    pub fn to_numbered(&self) -> String {
        format!("{}{}", self.base, self.tone.number())
    }
}

/// Anything that can report the reading of a single Han character.
///
/// Polyphonic characters return their default reading.
pub trait PinyinConverter {
    fn convert(&self, ch: char) -> Option<Reading>;
}

impl<F> PinyinConverter for F
where
    F: Fn(char) -> Option<Reading>,
{
    fn convert(&self, ch: char) -> Option<Reading> {
        self(ch)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("failed to read reading table: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: expected \"<char>\\t<reading>\", got {text:?}")]
    Malformed { line: usize, text: String },

    #[error("line {line}: {source}")]
    Reading {
        line: usize,
        #[source]
        source: GrammarError,
    },
}

/// In-memory character → reading table.
#[derive(Debug, Clone, Default)]
pub struct TableConverter {
    readings: AHashMap<char, Reading>,
}

/// Characters used by the demo pool: the first lessons of a primer plus
/// syllables that exercise ü and the y/w spellings.
const DEMO_TABLE: &str = "\
你\tni3
好\thao3
我\two3
他\tta1
大\tda4
小\txiao3
人\tren2
口\tkou3
手\tshou3
山\tshan1
水\tshui3
火\thuo3
木\tmu4
日\tri4
月\tyue4
鱼\tyu2
雨\tyu3
绿\tlv4
女\tnv3
学\txue2
去\tqu4
远\tyuan3
云\tyun2
羊\tyang2
鸭\tya1
鹅\te2
耳\ter3
外\twai4
王\twang2
中\tzhong1
国\tguo2
家\tjia1
天\ttian1
花\thua1
光\tguang1
熊\txiong2
的\tde5
";

impl TableConverter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in demo table.
    pub fn demo() -> Self {
        Self::from_tsv(DEMO_TABLE).expect("valid demo table")
    }

    /// Parse "字<TAB>hao3" lines. Blank lines and `#` comments are skipped;
    /// a later line for the same character replaces the earlier one.
    pub fn from_tsv(content: &str) -> Result<Self, TableError> {
        let mut table = Self::new();
        for (idx, raw) in content.lines().enumerate() {
            let line = idx + 1;
            let raw = raw.trim();
            if raw.is_empty() || raw.starts_with('#') {
                continue;
            }
            let mut fields = raw.split('\t');
            let (Some(key), Some(value)) = (fields.next(), fields.next()) else {
                return Err(TableError::Malformed {
                    line,
                    text: raw.to_string(),
                });
            };
            let mut chars = key.trim().chars();
            let (Some(ch), None) = (chars.next(), chars.next()) else {
                return Err(TableError::Malformed {
                    line,
                    text: raw.to_string(),
                });
            };
            let reading = Reading::parse_numbered(value)
                .map_err(|source| TableError::Reading { line, source })?;
            table.insert(ch, reading);
        }
        Ok(table)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_tsv(&content)
    }

    pub fn insert(&mut self, ch: char, reading: Reading) {
        self.readings.insert(ch, reading);
    }

    /// Add every entry of `other`, replacing existing ones.
    pub fn extend(&mut self, other: TableConverter) {
        self.readings.extend(other.readings);
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

impl PinyinConverter for TableConverter {
    fn convert(&self, ch: char) -> Option<Reading> {
        self.readings.get(&ch).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_readings() {
        assert_eq!(
            Reading::parse_numbered("hao3").unwrap(),
            Reading::new("hao", Tone::Third)
        );
        assert_eq!(
            Reading::parse_numbered("de").unwrap(),
            Reading::new("de", Tone::Neutral)
        );
        assert_eq!(Reading::parse_numbered("lv4").unwrap().base, "lü");
        assert_eq!(Reading::parse_numbered("nu:3").unwrap().base, "nü");
        assert_eq!(Reading::parse_numbered("ma5").unwrap().tone, Tone::Neutral);
        assert!(Reading::parse_numbered("ha o3").is_err());
        assert!(Reading::parse_numbered("hao7").is_err());
        assert!(Reading::parse_numbered("").is_err());
        assert_eq!(Reading::parse_numbered("ma0").unwrap().tone, Tone::Neutral);
        assert_eq!(Reading::parse_numbered("zhong1").unwrap().tone, Tone::First);
    }

    #[test]
    fn numbered_round_trip() {
        let r = Reading::parse_numbered("lv4").unwrap();
        assert_eq!(r.to_numbered(), "lü4");
    }

    #[test]
    fn demo_table_parses_completely() {
        let table = TableConverter::from_tsv(DEMO_TABLE).unwrap();
        assert_eq!(table.len(), DEMO_TABLE.lines().count());
        assert_eq!(table.convert('绿'), Some(Reading::new("lü", Tone::Fourth)));
        assert_eq!(table.convert('猫'), None);
    }

    #[test]
    fn demo_constructor_matches_demo_table() {
        let demo = TableConverter::demo();
        assert!(!demo.is_empty());
        assert_eq!(demo.len(), DEMO_TABLE.lines().count());
    }

    #[test]
    fn tsv_errors_carry_line_numbers() {
        let err = TableConverter::from_tsv("你\tni3\n好 hao3\n").unwrap_err();
        assert!(matches!(err, TableError::Malformed { line: 2, .. }));
        let err = TableConverter::from_tsv("# header\n好\thao9\n").unwrap_err();
        assert!(matches!(err, TableError::Reading { line: 2, .. }));
    }

    #[test]
    fn closures_are_converters() {
        let conv = |ch: char| (ch == '马').then(|| Reading::new("ma", Tone::Third));
        assert_eq!(conv.convert('马').map(|r| r.base), Some("ma".to_string()));
        assert!(conv.convert('牛').is_none());
    }
}
