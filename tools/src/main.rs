mod quiz;
mod syllable;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use pinyinlab_quiz::QuizConfig;

#[derive(Parser)]
#[command(name = "pinyinlab")]
#[command(about = "Pinyin syllable grammar: validate, decompose, mark tones, build quizzes")]
#[command(version)]
struct Cli {
    /// TOML configuration (core options plus quiz options)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check an initial + final (+ medial) triple and print its spellings
    Validate {
        /// Initial token, or "-" for none
        initial: String,
        /// Final token ("v" accepted for ü)
        #[arg(value_name = "FINAL")]
        final_: String,
        /// Medial glide: i, u or ü
        #[arg(short, long)]
        medial: Option<String>,
    },
    /// Split syllables into their components, printed as JSON
    Decompose {
        #[arg(required = true)]
        syllables: Vec<String>,
    },
    /// Show the tone-bearing vowel and the four marked forms
    Tones { base: String },
    /// Build a quiz pool from Chinese text (stdin unless --file)
    Quiz {
        /// Text file to read
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Extra "字<TAB>hao3" reading table merged over the demo table
        #[arg(short, long)]
        table: Option<PathBuf>,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<QuizConfig> {
    match path {
        Some(path) => QuizConfig::load_toml(path)
            .map_err(|e| anyhow!("{e}"))
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(QuizConfig::default()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Validate {
            initial,
            final_,
            medial,
        } => syllable::validate(&initial, &final_, medial.as_deref()),
        Commands::Decompose { syllables } => syllable::decompose(config.base, &syllables),
        Commands::Tones { base } => syllable::tones(&base),
        Commands::Quiz { file, table } => quiz::run(config, file.as_deref(), table.as_deref()),
    }
}
