use anyhow::{bail, Result};
use serde::Serialize;

use pinyinlab_core::{strip_tone, Config, Decomposition, Final, Grammar, Initial, Medial};

pub fn validate(initial: &str, final_: &str, medial: Option<&str>) -> Result<()> {
    let initial: Option<Initial> = match initial {
        "-" | "none" => None,
        text => Some(text.parse()?),
    };
    let final_: Final = final_.parse()?;
    let medial: Option<Medial> = medial.map(str::parse::<Medial>).transpose()?;

    let grammar = Grammar::new();
    let syllable = grammar.validate(initial, final_, medial)?;
    println!("{}", syllable.canonical());
    println!("{}", syllable.four_tones().join(" "));
    Ok(())
}

#[derive(Serialize)]
struct DecomposeReport<'a> {
    input: &'a str,
    #[serde(flatten)]
    parts: Option<Decomposition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    canonical: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub fn decompose(config: Config, syllables: &[String]) -> Result<()> {
    let grammar = Grammar::with_config(config);
    let mut failures = 0;

    for input in syllables {
        let report = match grammar.decompose(input) {
            Ok(parts) => DecomposeReport {
                input,
                canonical: parts.syllable(grammar.tables()).ok().map(|s| s.canonical()),
                parts: Some(parts),
                error: None,
            },
            Err(e) => {
                failures += 1;
                DecomposeReport {
                    input,
                    parts: None,
                    canonical: None,
                    error: Some(e.to_string()),
                }
            }
        };
        println!("{}", serde_json::to_string(&report)?);
    }

    if failures > 0 {
        bail!("{failures} of {} syllables did not decompose", syllables.len());
    }
    Ok(())
}

pub fn tones(text: &str) -> Result<()> {
    let (base, _) = strip_tone(&text.trim().to_lowercase());
    let grammar = Grammar::new();
    let Some(vowel) = grammar.nucleus_vowel(&base) else {
        bail!("{base:?} has no tone-bearing vowel");
    };
    println!("nucleus: {vowel}");
    println!("{}", grammar.four_tones(&base)?.join(" "));
    Ok(())
}
