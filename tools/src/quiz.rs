use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

use pinyinlab_quiz::{QuizConfig, QuizGenerator, TableConverter};

pub fn run(config: QuizConfig, file: Option<&Path>, table: Option<&Path>) -> Result<()> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let mut converter = TableConverter::demo();
    if let Some(path) = table {
        let extra = TableConverter::load(path)
            .with_context(|| format!("loading reading table {}", path.display()))?;
        eprintln!("Loaded {} readings from {}", extra.len(), path.display());
        converter.extend(extra);
    }

    let pool = QuizGenerator::with_config(converter, config).generate(&text);
    println!("{}", serde_json::to_string_pretty(&pool)?);
    if !pool.skipped.is_empty() {
        eprintln!(
            "Skipped {} characters ({:.0}% coverage)",
            pool.skipped.len(),
            pool.coverage() * 100.0
        );
    }
    Ok(())
}
