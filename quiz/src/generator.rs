//! Raw Chinese text → quiz items.
//!
//! Each Han character is converted by the external `PinyinConverter`, then
//! decomposed into the components a learner has to pick. Characters that
//! cannot be converted or decomposed are dropped from the pool, but every
//! drop is logged and recorded in `QuizPool::skipped`.

use ahash::AHashSet;
use serde::Serialize;

use pinyinlab_core::{Final, Grammar, Initial, Medial, Tone};

use crate::config::QuizConfig;
use crate::converter::{PinyinConverter, Reading};

/// CJK Unified Ideographs, basic block.
pub const HAN_RANGE: std::ops::RangeInclusive<char> = '\u{4E00}'..='\u{9FA5}';

pub fn is_han(ch: char) -> bool {
    HAN_RANGE.contains(&ch)
}

/// One character and the answer a learner must assemble for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizItem {
    pub character: char,
    pub reading: Reading,
    /// Tone-marked syllable shown after answering ("lǜ").
    pub marked: String,
    /// Picker initial; y/w for marked zero-initial syllables.
    pub initial: Option<Initial>,
    pub medial: Option<Medial>,
    #[serde(rename = "final")]
    pub final_: Final,
}

impl QuizItem {
    pub fn tone(&self) -> Tone {
        self.reading.tone
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// The converter had no reading for the character.
    Unconvertible,
    /// The converter's reading did not decompose.
    Undecomposable { reading: String, error: String },
    /// The reading's text carried a tone mark or digit that disagrees with
    /// the tone the converter reported.
    ToneConflict { reading: String, written: Tone },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedChar {
    pub character: char,
    #[serde(flatten)]
    pub reason: SkipReason,
}

/// Result of one generation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuizPool {
    pub items: Vec<QuizItem>,
    pub skipped: Vec<SkippedChar>,
}

impl QuizPool {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Share of considered characters that made it into the pool.
    pub fn coverage(&self) -> f32 {
        let total = self.items.len() + self.skipped.len();
        if total == 0 {
            return 1.0;
        }
        self.items.len() as f32 / total as f32
    }
}

/// Builds quiz pools from text using a converter and the syllable grammar.
pub struct QuizGenerator<C> {
    converter: C,
    grammar: Grammar<'static>,
    config: QuizConfig,
}

impl<C: PinyinConverter> QuizGenerator<C> {
    pub fn new(converter: C) -> Self {
        Self::with_config(converter, QuizConfig::default())
    }

    pub fn with_config(converter: C, config: QuizConfig) -> Self {
        let grammar = Grammar::with_config(config.base.clone());
        Self {
            converter,
            grammar,
            config,
        }
    }

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    pub fn grammar(&self) -> &Grammar<'static> {
        &self.grammar
    }

    /// Build the quiz pool for `text`. Non-Han characters are ignored
    /// without being reported.
    pub fn generate(&self, text: &str) -> QuizPool {
        let mut pool = QuizPool::default();
        let mut seen = AHashSet::new();

        for ch in text.chars().filter(|&c| is_han(c)) {
            if self.config.dedupe_characters && !seen.insert(ch) {
                continue;
            }
            if self.config.max_items > 0 && pool.items.len() >= self.config.max_items {
                break;
            }
            match self.item_for(ch) {
                Ok(item) => pool.items.push(item),
                Err(reason) => {
                    tracing::warn!(character = %ch, ?reason, "dropping character from quiz pool");
                    pool.skipped.push(SkippedChar {
                        character: ch,
                        reason,
                    });
                }
            }
        }

        tracing::debug!(
            items = pool.items.len(),
            skipped = pool.skipped.len(),
            "quiz pool generated"
        );
        pool
    }

    /// Convert and decompose a single character.
    pub fn item_for(&self, ch: char) -> Result<QuizItem, SkipReason> {
        let reading = self
            .converter
            .convert(ch)
            .ok_or(SkipReason::Unconvertible)?;
        let undecomposable = |err: pinyinlab_core::GrammarError| SkipReason::Undecomposable {
            reading: reading.to_numbered(),
            error: err.to_string(),
        };

        let parts = self.grammar.decompose(&reading.base).map_err(undecomposable)?;
        // Converters may leave the tone on the text ("hǎo", "ma3").
        let tone = match (reading.tone, parts.tone) {
            (Tone::Neutral, written) => written,
            (reported, Tone::Neutral) => reported,
            (reported, written) if reported == written => reported,
            (_, written) => {
                return Err(SkipReason::ToneConflict {
                    reading: reading.to_numbered(),
                    written,
                })
            }
        };
        let marked = self
            .grammar
            .render_tone(&parts.base, tone)
            .map_err(undecomposable)?;

        Ok(QuizItem {
            character: ch,
            initial: parts.spelled_initial(),
            medial: parts.medial,
            final_: parts.final_,
            marked,
            reading: Reading::new(parts.base, tone),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::TableConverter;

    #[test]
    fn han_filter_bounds() {
        assert!(is_han('一'));
        assert!(is_han('龥'));
        assert!(!is_han('a'));
        assert!(!is_han('。'));
    }

    #[test]
    fn items_follow_text_order() {
        let gen = QuizGenerator::new(TableConverter::demo());
        let pool = gen.generate("你好, 世界!");
        let chars: Vec<char> = pool.items.iter().map(|i| i.character).collect();
        assert_eq!(chars, vec!['你', '好']);
        assert_eq!(pool.skipped.len(), 2);
        assert_eq!(pool.skipped[0].character, '世');
        assert_eq!(pool.skipped[0].reason, SkipReason::Unconvertible);
    }

    #[test]
    fn decomposition_fills_answer() {
        let gen = QuizGenerator::new(TableConverter::demo());
        let item = gen.item_for('光').unwrap();
        assert_eq!(item.initial, Some(Initial::G));
        assert_eq!(item.medial, Some(Medial::U));
        assert_eq!(item.final_, Final::Ang);
        assert_eq!(item.marked, "guāng");
        assert_eq!(item.tone(), Tone::First);
    }
}
