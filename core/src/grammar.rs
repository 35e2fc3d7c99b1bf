// core/src/grammar.rs
//
// The single entry point collaborators call: validation, decomposition and
// tone placement over one set of read-only rule tables.

use crate::combination::{validate_with, RuleTables, Syllable};
use crate::decompose::{decompose_with, Decomposition};
use crate::phoneme::{Final, Initial, Medial, Tone, Vowel};
use crate::{tone, Config, Result};

/// Pinyin syllable grammar bound to a rule table and a configuration.
///
/// Holds no mutable state; share it freely across threads.
///
/// # Example
/// ```
/// use pinyinlab_core::{Final, Grammar, Initial, Medial};
///
/// let grammar = Grammar::new();
/// let s = grammar.validate(Some(Initial::X), Final::An, Some(Medial::Yu)).unwrap();
/// assert_eq!(s.canonical(), "xuan");
///
/// let d = grammar.decompose("xuǎn").unwrap();
/// assert_eq!(d.spelled_initial(), Some(Initial::X));
/// assert_eq!(d.medial, Some(Medial::Yu));
/// ```
#[derive(Debug, Clone)]
pub struct Grammar<'t> {
    tables: &'t RuleTables,
    config: Config,
}

impl Grammar<'static> {
    /// Standard tables, default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self::with_tables(RuleTables::standard(), config)
    }
}

impl Default for Grammar<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'t> Grammar<'t> {
    pub fn with_tables(tables: &'t RuleTables, config: Config) -> Self {
        Self { tables, config }
    }

    pub fn tables(&self) -> &'t RuleTables {
        self.tables
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_valid(&self, initial: Option<Initial>, final_: Final, medial: Option<Medial>) -> bool {
        self.tables.is_valid(initial, final_, medial)
    }

    /// Assemble picker components into a syllable, or
    /// `GrammarError::InvalidCombination` when Mandarin has no such syllable.
    pub fn validate(
        &self,
        initial: Option<Initial>,
        final_: Final,
        medial: Option<Medial>,
    ) -> Result<Syllable> {
        validate_with(self.tables, initial, final_, medial)
    }

    /// Canonical written form, or `None` for an illegal triple.
    pub fn canonical_form(
        &self,
        initial: Option<Initial>,
        final_: Final,
        medial: Option<Medial>,
    ) -> Option<String> {
        self.validate(initial, final_, medial)
            .ok()
            .map(|s| s.canonical())
    }

    pub fn decompose(&self, text: &str) -> Result<Decomposition> {
        decompose_with(self.tables, &self.config, text)
    }

    pub fn nucleus_vowel(&self, base: &str) -> Option<Vowel> {
        tone::nucleus_vowel(base)
    }

    pub fn render_tone(&self, base: &str, tone: Tone) -> Result<String> {
        tone::render_tone(base, tone)
    }

    pub fn four_tones(&self, base: &str) -> Result<[String; 4]> {
        tone::four_tones(base)
    }

    /// Every legal syllable, tone-neutral, in table order.
    pub fn legal_syllables(&self) -> Vec<Syllable> {
        self.tables
            .legal_triples()
            .into_iter()
            .filter_map(|(i, m, f)| self.validate(i, f, m).ok())
            .collect()
    }
}
