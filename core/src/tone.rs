//! Tone placement: which vowel carries the mark, how to draw it, and how to
//! read it back off marked input.

use phf::phf_map;

use crate::phoneme::{Tone, Vowel};
use crate::{GrammarError, Result};

/// Marked vowel → (plain vowel, tone). Precomposed forms only; callers
/// normalize to NFC first.
static MARKED_VOWELS: phf::Map<char, (Vowel, Tone)> = phf_map! {
    'ā' => (Vowel::A, Tone::First), 'á' => (Vowel::A, Tone::Second),
    'ǎ' => (Vowel::A, Tone::Third), 'à' => (Vowel::A, Tone::Fourth),
    'ō' => (Vowel::O, Tone::First), 'ó' => (Vowel::O, Tone::Second),
    'ǒ' => (Vowel::O, Tone::Third), 'ò' => (Vowel::O, Tone::Fourth),
    'ē' => (Vowel::E, Tone::First), 'é' => (Vowel::E, Tone::Second),
    'ě' => (Vowel::E, Tone::Third), 'è' => (Vowel::E, Tone::Fourth),
    'ī' => (Vowel::I, Tone::First), 'í' => (Vowel::I, Tone::Second),
    'ǐ' => (Vowel::I, Tone::Third), 'ì' => (Vowel::I, Tone::Fourth),
    'ū' => (Vowel::U, Tone::First), 'ú' => (Vowel::U, Tone::Second),
    'ǔ' => (Vowel::U, Tone::Third), 'ù' => (Vowel::U, Tone::Fourth),
    'ǖ' => (Vowel::V, Tone::First), 'ǘ' => (Vowel::V, Tone::Second),
    'ǚ' => (Vowel::V, Tone::Third), 'ǜ' => (Vowel::V, Tone::Fourth),
};

/// The tone-bearing vowel of a tone-free syllable.
///
/// a beats o beats e; with both i and u present (iu, ui) the later one wins;
/// then i, u, ü in that order. `None` means the text has no vowel at all.
pub fn nucleus_vowel(base: &str) -> Option<Vowel> {
    for (ch, v) in [('a', Vowel::A), ('o', Vowel::O), ('e', Vowel::E)] {
        if base.contains(ch) {
            return Some(v);
        }
    }
    match (base.rfind('i'), base.rfind('u')) {
        (Some(i), Some(u)) => Some(if i > u { Vowel::I } else { Vowel::U }),
        (Some(_), None) => Some(Vowel::I),
        (None, Some(_)) => Some(Vowel::U),
        (None, None) if base.contains('ü') => Some(Vowel::V),
        (None, None) => None,
    }
}

/// Put the mark for `tone` on the first occurrence of the nucleus vowel.
/// The neutral tone leaves the text unchanged.
pub fn render_tone(base: &str, tone: Tone) -> Result<String> {
    let vowel = nucleus_vowel(base).ok_or_else(|| GrammarError::MissingNucleus(base.to_string()))?;
    if tone == Tone::Neutral {
        return Ok(base.to_string());
    }
    let mut buf = [0u8; 4];
    let marked = vowel.marked(tone).encode_utf8(&mut buf);
    Ok(base.replacen(vowel.as_char(), marked, 1))
}

/// The four marked forms of `base`, tone 1 first.
pub fn four_tones(base: &str) -> Result<[String; 4]> {
    Ok([
        render_tone(base, Tone::First)?,
        render_tone(base, Tone::Second)?,
        render_tone(base, Tone::Third)?,
        render_tone(base, Tone::Fourth)?,
    ])
}

/// Remove the first tone mark from `marked`, returning the plain text and
/// the tone it carried. Text without a mark is neutral.
pub fn strip_tone(marked: &str) -> (String, Tone) {
    let mut tone = Tone::Neutral;
    let plain: String = marked
        .chars()
        .map(|ch| match MARKED_VOWELS.get(&ch) {
            Some(&(vowel, t)) if tone == Tone::Neutral => {
                tone = t;
                vowel.as_char()
            }
            _ => ch,
        })
        .collect();
    (plain, tone)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nucleus_priority() {
        assert_eq!(nucleus_vowel("ui"), Some(Vowel::I));
        assert_eq!(nucleus_vowel("iu"), Some(Vowel::U));
        assert_eq!(nucleus_vowel("ang"), Some(Vowel::A));
        assert_eq!(nucleus_vowel("ü"), Some(Vowel::V));
        assert_eq!(nucleus_vowel("lüe"), Some(Vowel::E));
        assert_eq!(nucleus_vowel("guo"), Some(Vowel::O));
        assert_eq!(nucleus_vowel("xiong"), Some(Vowel::O));
        assert_eq!(nucleus_vowel("zhi"), Some(Vowel::I));
        assert_eq!(nucleus_vowel("ng"), None);
    }

    #[test]
    fn render_marks_nucleus() {
        assert_eq!(render_tone("ma", Tone::Third).unwrap(), "mǎ");
        assert_eq!(render_tone("ü", Tone::Second).unwrap(), "ǘ");
        assert_eq!(render_tone("liu", Tone::Second).unwrap(), "liú");
        assert_eq!(render_tone("gui", Tone::Fourth).unwrap(), "guì");
        assert_eq!(render_tone("nüe", Tone::Fourth).unwrap(), "nüè");
        assert_eq!(render_tone("hao", Tone::Neutral).unwrap(), "hao");
    }

    #[test]
    fn render_without_vowel_is_an_error() {
        assert!(matches!(
            render_tone("hm", Tone::First),
            Err(GrammarError::MissingNucleus(_))
        ));
    }

    #[test]
    fn strip_reads_first_mark() {
        assert_eq!(strip_tone("mǎ"), ("ma".to_string(), Tone::Third));
        assert_eq!(strip_tone("lǘ"), ("lü".to_string(), Tone::Second));
        assert_eq!(strip_tone("zhōng"), ("zhong".to_string(), Tone::First));
        assert_eq!(strip_tone("de"), ("de".to_string(), Tone::Neutral));
    }

    #[test]
    fn four_tones_of_base() {
        assert_eq!(four_tones("xue").unwrap(), ["xuē", "xué", "xuě", "xuè"]);
    }
}
