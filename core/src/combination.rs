//! Co-occurrence rules and canonical spelling.
//!
//! Two independent tables decide legality:
//! - `allowed_finals`: initial (or none) → finals that attach directly.
//! - `MEDIAL_RULES`: (medial, final) → initials that attach through the glide.
//!
//! Neither is derivable from the other; f takes "an" directly but never
//! "i"+"an", while j takes "i"+"an" but never "an" alone.

use ahash::{AHashMap, AHashSet};
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::phoneme::Initial::{B, C, Ch, D, G, H, J, K, L, M, N, P, Q, R, S, Sh, T, X, Y, Z, Zh};
use crate::phoneme::{Final, Initial, Medial, Tone};
use crate::{tone, GrammarError, Result};

/// Finals that attach to `initial` without a medial. `None` is the bare
/// zero-initial syllable ("a", "er", "ang").
pub fn allowed_finals(initial: Option<Initial>) -> &'static [Final] {
    use Final::*;

    let Some(initial) = initial else {
        return &[A, O, E, Ai, Ei, Ao, Ou, Er, An, En, Ang];
    };
    match initial {
        Initial::B => &[A, O, I, U, Ai, Ei, Ie, Ao, An, En, In, Ang, Eng, Ing],
        Initial::P => &[A, O, I, U, Ai, Ei, Ie, Ao, Ou, An, En, In, Ang, Eng, Ing],
        Initial::M => &[A, O, E, I, U, Ai, Ei, Ie, Ao, Ou, Iu, An, En, In, Ang, Eng, Ing],
        Initial::F => &[A, O, U, Ei, Ou, An, En, Ang, Eng],
        Initial::D => &[A, E, I, U, Ai, Ei, Ui, Ao, Ou, Iu, Ie, An, En, Un, Ang, Eng, Ing, Ong],
        Initial::T => &[A, E, I, U, Ai, Ei, Ui, Ao, Ou, Ie, An, Un, Ang, Eng, Ing, Ong],
        Initial::N => &[
            A, E, I, U, V, Ai, Ei, Ao, Ou, Iu, Ie, Ve, An, En, In, Un, Ang, Eng, Ing, Ong,
        ],
        Initial::L => &[
            A, E, I, U, V, Ai, Ei, Ao, Ou, Iu, Ie, Ve, An, In, Un, Ang, Eng, Ing, Ong,
        ],
        Initial::G | Initial::H => &[A, E, U, Ai, Ei, Ui, Ao, Ou, An, En, Un, Ang, Eng, Ong],
        Initial::K => &[A, E, U, Ai, Ui, Ao, Ou, An, En, Un, Ang, Eng, Ong],
        Initial::J | Initial::Q | Initial::X => &[I, V, Iu, Ie, Ve, In, Vn, Ing],
        Initial::Zh | Initial::Ch | Initial::Z | Initial::C | Initial::S => {
            &[A, E, I, U, Ai, Ei, Ui, Ao, Ou, An, En, Un, Ang, Eng, Ong]
        }
        Initial::Sh => &[A, E, I, U, Ai, Ei, Ui, Ao, Ou, An, En, Un, Ang, Eng],
        Initial::R => &[E, I, U, Ui, Ao, Ou, An, En, Un, Ang, Eng, Ong],
        Initial::Y => &[A, O, E, I, V, Ao, Ou, Ve, An, In, Vn, Ang, Ing, Ong],
        Initial::W => &[A, O, U, Ai, Ei, An, En, Ang, Eng],
    }
}

/// Initials that may join `final_` through `medial`.
#[derive(Debug, Clone, Copy)]
pub struct MedialRule {
    pub medial: Medial,
    pub final_: Final,
    pub initials: &'static [Initial],
}

const fn rule(medial: Medial, final_: Final, initials: &'static [Initial]) -> MedialRule {
    MedialRule {
        medial,
        final_,
        initials,
    }
}

pub const MEDIAL_RULES: &[MedialRule] = &[
    // i + a / ao / an / ang / ong (jia, biao, mian, liang, xiong)
    rule(Medial::I, Final::A, &[D, L, J, Q, X]),
    rule(Medial::I, Final::Ao, &[B, P, M, D, T, N, L, J, Q, X]),
    rule(Medial::I, Final::An, &[B, P, M, D, T, N, L, J, Q, X]),
    rule(Medial::I, Final::Ang, &[N, L, J, Q, X]),
    rule(Medial::I, Final::Ong, &[J, Q, X]),
    // u + a / o / ai / an / ang (gua, duo, kuai, suan, zhuang)
    rule(Medial::U, Final::A, &[G, K, H, Zh, Ch, Sh]),
    rule(Medial::U, Final::O, &[D, T, N, L, G, K, H, Zh, Ch, Sh, R, Z, C, S]),
    rule(Medial::U, Final::Ai, &[G, K, H, Zh, Ch, Sh]),
    rule(Medial::U, Final::An, &[D, T, N, L, G, K, H, Zh, Ch, Sh, R, Z, C, S]),
    rule(Medial::U, Final::Ang, &[G, K, H, Zh, Ch, Sh]),
    // ü + an (juan, yuan)
    rule(Medial::Yu, Final::An, &[J, Q, X, Y]),
];

pub(crate) static FINAL_BY_TEXT: Lazy<AHashMap<&'static str, Final>> =
    Lazy::new(|| Final::ALL.iter().map(|f| (f.as_str(), *f)).collect());

/// Indexed, read-only form of the co-occurrence rules.
///
/// Built once from `allowed_finals` and `MEDIAL_RULES`; the grammar holds a
/// reference to it rather than consulting globals.
#[derive(Debug)]
pub struct RuleTables {
    direct: AHashMap<Option<Initial>, AHashSet<Final>>,
    through_medial: AHashMap<(Medial, Final), AHashSet<Initial>>,
}

static STANDARD: Lazy<RuleTables> = Lazy::new(RuleTables::build);

impl RuleTables {
    /// The process-wide standard Mandarin tables.
    pub fn standard() -> &'static RuleTables {
        &STANDARD
    }

    pub fn build() -> Self {
        let direct = std::iter::once(None)
            .chain(Initial::ALL.iter().copied().map(Some))
            .map(|i| (i, allowed_finals(i).iter().copied().collect()))
            .collect();
        let through_medial = MEDIAL_RULES
            .iter()
            .map(|r| ((r.medial, r.final_), r.initials.iter().copied().collect()))
            .collect();
        Self {
            direct,
            through_medial,
        }
    }

    pub fn is_valid(&self, initial: Option<Initial>, final_: Final, medial: Option<Medial>) -> bool {
        match (medial, initial) {
            (None, i) => self.direct.get(&i).is_some_and(|set| set.contains(&final_)),
            // Zero-initial glides are always spelled with y/w.
            (Some(_), None) => false,
            (Some(m), Some(i)) => self
                .through_medial
                .get(&(m, final_))
                .is_some_and(|set| set.contains(&i)),
        }
    }

    /// Initials that reach `final_` through `medial` (or directly when
    /// `medial` is `None`), in teaching order.
    pub fn initials_for(&self, medial: Option<Medial>, final_: Final) -> Vec<Initial> {
        Initial::ALL
            .iter()
            .copied()
            .filter(|&i| self.is_valid(Some(i), final_, medial))
            .collect()
    }

    /// Every legal (initial, medial, final) triple.
    pub fn legal_triples(&self) -> Vec<(Option<Initial>, Option<Medial>, Final)> {
        let mut out = Vec::new();
        for initial in std::iter::once(None).chain(Initial::ALL.iter().copied().map(Some)) {
            for medial in std::iter::once(None).chain(Medial::ALL.iter().copied().map(Some)) {
                for final_ in Final::ALL {
                    if self.is_valid(initial, final_, medial) {
                        out.push((initial, medial, final_));
                    }
                }
            }
        }
        out
    }
}

/// Initials the standard tables allow before `medial` + `final_`.
pub fn allowed_initials(medial: Option<Medial>, final_: Final) -> Vec<Initial> {
    RuleTables::standard().initials_for(medial, final_)
}

/// Canonical written form of a triple. ü loses its dots after j, q, x and y
/// whether it comes from the medial or the final.
pub fn spell(initial: Option<Initial>, medial: Option<Medial>, final_: Final) -> String {
    let mut tail = String::with_capacity(6);
    if let Some(m) = medial {
        tail.push_str(m.as_str());
    }
    tail.push_str(final_.as_str());
    if initial.is_some_and(Initial::simplifies_umlaut) {
        tail = tail.replace('ü', "u");
    }
    match initial {
        Some(i) => format!("{}{}", i.as_str(), tail),
        None => tail,
    }
}

/// A well-formed syllable. Only obtainable through validation, so an
/// ill-formed triple can never be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Syllable {
    initial: Option<Initial>,
    medial: Option<Medial>,
    #[serde(rename = "final")]
    final_: Final,
    tone: Tone,
}

impl Syllable {
    /// Picker initial, y/w included.
    pub fn initial(&self) -> Option<Initial> {
        self.initial
    }

    pub fn medial(&self) -> Option<Medial> {
        self.medial
    }

    pub fn final_(&self) -> Final {
        self.final_
    }

    pub fn tone(&self) -> Tone {
        self.tone
    }

    pub fn with_tone(self, tone: Tone) -> Self {
        Self { tone, ..self }
    }

    pub fn canonical(&self) -> String {
        spell(self.initial, self.medial, self.final_)
    }

    /// Canonical form with the tone mark on the nucleus vowel.
    pub fn render(&self) -> String {
        let base = self.canonical();
        let rendered = tone::render_tone(&base, self.tone);
        debug_assert!(rendered.is_ok(), "final table entry without a nucleus: {base}");
        rendered.unwrap_or(base)
    }

    /// All four marked forms, tone 1 first.
    pub fn four_tones(&self) -> [String; 4] {
        Tone::MARKED.map(|t| self.with_tone(t).render())
    }
}

/// Build a syllable from picker components, or report that no such syllable
/// exists.
pub fn validate_with(
    tables: &RuleTables,
    initial: Option<Initial>,
    final_: Final,
    medial: Option<Medial>,
) -> Result<Syllable> {
    if !tables.is_valid(initial, final_, medial) {
        tracing::debug!(?initial, ?medial, ?final_, "no such syllable");
        return Err(GrammarError::InvalidCombination {
            initial,
            medial,
            final_,
        });
    }
    Ok(Syllable {
        initial,
        medial,
        final_,
        tone: Tone::Neutral,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> &'static RuleTables {
        RuleTables::standard()
    }

    #[test]
    fn f_takes_no_i_class_finals() {
        for f in [Final::I, Final::Ie, Final::In, Final::Ing, Final::Iu] {
            assert!(!tables().is_valid(Some(Initial::F), f, None), "f + {}", f);
        }
        assert!(tables().is_valid(Some(Initial::F), Final::Eng, None));
    }

    #[test]
    fn jqx_take_only_i_and_umlaut_finals() {
        for i in [Initial::J, Initial::Q, Initial::X] {
            for f in allowed_finals(Some(i)) {
                let text = f.as_str();
                assert!(text.starts_with('i') || text.starts_with('ü'), "{} + {}", i, f);
            }
        }
    }

    #[test]
    fn umlaut_simplified_after_jqxy_only() {
        assert_eq!(spell(Some(Initial::J), None, Final::V), "ju");
        assert_eq!(spell(Some(Initial::Q), None, Final::Ve), "que");
        assert_eq!(spell(Some(Initial::X), Some(Medial::Yu), Final::An), "xuan");
        assert_eq!(spell(Some(Initial::Y), None, Final::Vn), "yun");
        assert_eq!(spell(Some(Initial::L), None, Final::V), "lü");
        assert_eq!(spell(Some(Initial::N), None, Final::Ve), "nüe");
    }

    #[test]
    fn medial_table_is_independent() {
        // j reaches "an" only through a glide; f never does.
        assert!(!tables().is_valid(Some(Initial::J), Final::An, None));
        assert!(tables().is_valid(Some(Initial::J), Final::An, Some(Medial::I)));
        assert!(tables().is_valid(Some(Initial::F), Final::An, None));
        assert!(!tables().is_valid(Some(Initial::F), Final::An, Some(Medial::I)));
    }

    #[test]
    fn zero_initial_never_takes_a_medial() {
        for m in Medial::ALL {
            for f in Final::ALL {
                assert!(!tables().is_valid(None, f, Some(m)));
            }
        }
    }

    #[test]
    fn invalid_combination_is_an_error_value() {
        let err = validate_with(tables(), Some(Initial::F), Final::I, None).unwrap_err();
        assert!(matches!(err, GrammarError::InvalidCombination { .. }));
    }

    #[test]
    fn syllable_renders_all_tones() {
        let s = validate_with(tables(), Some(Initial::M), Final::A, None).unwrap();
        assert_eq!(s.four_tones(), ["mā", "má", "mǎ", "mà"]);
        assert_eq!(s.render(), "ma");
    }

    #[test]
    fn initials_for_lists_in_teaching_order() {
        let got = tables().initials_for(Some(Medial::Yu), Final::An);
        assert_eq!(got, vec![Initial::J, Initial::Q, Initial::X, Initial::Y]);
        let got = allowed_initials(None, Final::Ve);
        assert_eq!(got, vec![Initial::N, Initial::L, Initial::J, Initial::Q, Initial::X, Initial::Y]);
    }
}
