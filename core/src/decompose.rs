//! Syllable decomposition: observed text → (initial, medial, final, tone).
//!
//! Order matters:
//! 1. read the tone off the text (diacritic, or a trailing digit),
//! 2. take the longest consonant initial ("zh" before "z"), else a y/w
//!    zero-initial marker, else nothing,
//! 3. try each medial, accepting the split only when the rest is a final
//!    and the rule tables admit the triple ("tie" is t + "ie", not
//!    t + "i" + "e"),
//! 4. otherwise the whole rest is the final.

use serde::Serialize;

use crate::combination::{validate_with, RuleTables, Syllable};
use crate::phoneme::{Final, Initial, Medial, Tone};
use crate::{tone, utils, Config, GrammarError, Result};

/// Components recovered from a syllable string.
///
/// `initial` is the phonemic initial and is `None` for zero-initial
/// syllables; `marker` records the y/w letter when the syllable was spelled
/// with one, so "ya" and "a" stay distinguishable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decomposition {
    pub initial: Option<Initial>,
    pub marker: Option<Initial>,
    pub medial: Option<Medial>,
    #[serde(rename = "final")]
    pub final_: Final,
    pub tone: Tone,
    /// Tone-free, normalized input text.
    pub base: String,
}

impl Decomposition {
    /// The initial a learner picks: the consonant, or the y/w marker.
    pub fn spelled_initial(&self) -> Option<Initial> {
        self.initial.or(self.marker)
    }

    /// Re-validate the components as a well-formed syllable carrying the
    /// decomposed tone.
    pub fn syllable(&self, tables: &RuleTables) -> Result<Syllable> {
        validate_with(tables, self.spelled_initial(), self.final_, self.medial)
            .map(|s| s.with_tone(self.tone))
    }
}

#[derive(Debug, Clone, Copy)]
struct Parts {
    initial: Option<Initial>,
    marker: Option<Initial>,
    medial: Option<Medial>,
    final_: Final,
}

/// Normalize raw input into tone-free base text plus the tone it carried.
pub fn prepare(text: &str, config: &Config) -> Result<(String, Tone)> {
    let normalized = if config.trim_input {
        utils::normalize(text)
    } else {
        text.to_string()
    };
    let (mut base, mut tone) = tone::strip_tone(&normalized.to_lowercase());

    if config.accept_numbered_tones && tone == Tone::Neutral {
        if let Some(digit) = base.chars().last().and_then(|c| c.to_digit(10)) {
            tone = Tone::from_number(digit as u8)?;
            base.pop();
        }
    }
    if config.accept_v_as_umlaut {
        base = base.replace('v', "ü");
    }
    if base.is_empty() {
        return Err(GrammarError::Undecomposable(text.to_string()));
    }
    Ok((base, tone))
}

/// Decompose `text` against `tables`.
pub fn decompose_with(tables: &RuleTables, config: &Config, text: &str) -> Result<Decomposition> {
    let (base, tone) = prepare(text, config)?;
    let Some(parts) = split(tables, &base) else {
        tracing::debug!(input = text, base = %base, "undecomposable syllable");
        return Err(GrammarError::Undecomposable(text.to_string()));
    };

    let spelled = parts.initial.or(parts.marker);
    if config.strict_decompose && !tables.is_valid(spelled, parts.final_, parts.medial) {
        tracing::warn!(input = text, "decomposed into an unregistered triple");
        return Err(GrammarError::InvalidCombination {
            initial: spelled,
            medial: parts.medial,
            final_: parts.final_,
        });
    }

    Ok(Decomposition {
        initial: parts.initial,
        marker: parts.marker,
        medial: parts.medial,
        final_: parts.final_,
        tone,
        base,
    })
}

fn split(tables: &RuleTables, text: &str) -> Option<Parts> {
    if let Some(initial) = Initial::PARSE_ORDER
        .iter()
        .copied()
        .find(|i| text.starts_with(i.as_str()))
    {
        let rest = &text[initial.as_str().len()..];
        return split_rest(tables, Some(initial), rest).map(|(medial, final_)| Parts {
            initial: Some(initial),
            marker: None,
            medial,
            final_,
        });
    }

    for marker in [Initial::Y, Initial::W] {
        if let Some(rest) = text.strip_prefix(marker.as_str()) {
            if let Some((medial, final_)) = split_rest(tables, Some(marker), rest) {
                return Some(Parts {
                    initial: None,
                    marker: Some(marker),
                    medial,
                    final_,
                });
            }
        }
    }

    // Bare zero-initial, and the unstripped text when y/w led nowhere.
    split_rest(tables, None, text).map(|(medial, final_)| Parts {
        initial: None,
        marker: None,
        medial,
        final_,
    })
}

/// Split the text after the initial into (medial, final).
fn split_rest(
    tables: &RuleTables,
    initial: Option<Initial>,
    rest: &str,
) -> Option<(Option<Medial>, Final)> {
    if rest.is_empty() {
        return None;
    }
    // After j/q/x/y a written u is always ü.
    if initial.is_some_and(Initial::simplifies_umlaut) {
        if let Some(tail) = rest.strip_prefix('u') {
            return split_medial_final(tables, initial, &format!("ü{tail}"));
        }
    }
    split_medial_final(tables, initial, rest).or_else(|| {
        // "lue"/"nue": dots dropped where only ü can fit.
        let tail = rest.strip_prefix('u')?;
        split_medial_final(tables, initial, &format!("ü{tail}"))
            .filter(|&(medial, final_)| tables.is_valid(initial, final_, medial))
    })
}

fn split_medial_final(
    tables: &RuleTables,
    initial: Option<Initial>,
    rest: &str,
) -> Option<(Option<Medial>, Final)> {
    for medial in Medial::ALL {
        let Some(suffix) = rest.strip_prefix(medial.as_str()) else {
            continue;
        };
        if let Some(final_) = Final::from_text(suffix) {
            if tables.is_valid(initial, final_, Some(medial)) {
                return Some((Some(medial), final_));
            }
        }
    }
    Final::from_text(rest).map(|final_| (None, final_))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(text: &str) -> Decomposition {
        decompose_with(RuleTables::standard(), &Config::default(), text)
            .unwrap_or_else(|e| panic!("{text}: {e}"))
    }

    #[test]
    fn digraph_before_single_letter() {
        let d = dec("zhang");
        assert_eq!(d.initial, Some(Initial::Zh));
        assert_eq!(d.final_, Final::Ang);
        let d = dec("zang");
        assert_eq!(d.initial, Some(Initial::Z));
    }

    #[test]
    fn whole_final_beats_unregistered_medial_split() {
        let d = dec("tie");
        assert_eq!(d.initial, Some(Initial::T));
        assert_eq!(d.medial, None);
        assert_eq!(d.final_, Final::Ie);

        let d = dec("dui");
        assert_eq!(d.medial, None);
        assert_eq!(d.final_, Final::Ui);
    }

    #[test]
    fn registered_medial_split() {
        let d = dec("guang");
        assert_eq!(d.medial, Some(Medial::U));
        assert_eq!(d.final_, Final::Ang);
        let d = dec("xiong");
        assert_eq!(d.medial, Some(Medial::I));
        assert_eq!(d.final_, Final::Ong);
    }

    #[test]
    fn umlaut_spellings() {
        for text in ["lüe", "lue", "lve"] {
            let d = dec(text);
            assert_eq!(d.initial, Some(Initial::L), "{text}");
            assert_eq!(d.final_, Final::Ve, "{text}");
        }
        assert_eq!(dec("lu").final_, Final::U);
        assert_eq!(dec("ju").final_, Final::V);
        assert_eq!(dec("quan").medial, Some(Medial::Yu));
    }

    #[test]
    fn zero_initial_markers() {
        let d = dec("ying");
        assert_eq!(d.initial, None);
        assert_eq!(d.marker, Some(Initial::Y));
        assert_eq!(d.final_, Final::Ing);

        let d = dec("wu");
        assert_eq!(d.initial, None);
        assert_eq!(d.final_, Final::U);

        let d = dec("yuan");
        assert_eq!(d.marker, Some(Initial::Y));
        assert_eq!(d.medial, Some(Medial::Yu));
        assert_eq!(d.final_, Final::An);

        let d = dec("er");
        assert_eq!(d.spelled_initial(), None);
        assert_eq!(d.final_, Final::Er);
    }

    #[test]
    fn tone_is_read_first() {
        let d = dec("zhōng");
        assert_eq!(d.tone, Tone::First);
        assert_eq!(d.base, "zhong");
        let d = dec("nv3");
        assert_eq!(d.tone, Tone::Third);
        assert_eq!(d.final_, Final::V);
    }

    #[test]
    fn failures() {
        let cfg = Config::default();
        for text in ["", "xyz", "zh", "ng", "y", "3"] {
            assert!(
                decompose_with(RuleTables::standard(), &cfg, text).is_err(),
                "{text:?} should not decompose"
            );
        }
    }

    #[test]
    fn strict_mode_rejects_unregistered_triples() {
        let lenient = Config::default();
        let strict = Config {
            strict_decompose: true,
            ..Config::default()
        };
        assert!(decompose_with(RuleTables::standard(), &lenient, "fi").is_ok());
        assert!(matches!(
            decompose_with(RuleTables::standard(), &strict, "fi"),
            Err(GrammarError::InvalidCombination { .. })
        ));
    }
}
