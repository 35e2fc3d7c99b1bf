//! pinyinlab-quiz crate root
//!
//! Turns raw Chinese text into quiz items for the syllable picker and checks
//! a learner's picks. Readings come from an external character → pinyin
//! converter; this crate only decomposes them with `pinyinlab-core`.
//!
//! Public API exported here:
//! - `PinyinConverter`, `Reading` and `TableConverter` from `converter`
//! - `QuizGenerator`, `QuizItem` and `QuizPool` from `generator`
//! - `check_answer` and `Picks` from `answer`
//! - `QuizConfig` from `config`

pub mod answer;
pub mod config;
pub mod converter;
pub mod generator;

pub use answer::{check_answer, check_answer_with, AnswerCheck, Picks};
pub use config::QuizConfig;
pub use converter::{PinyinConverter, Reading, TableConverter, TableError};
pub use generator::{is_han, QuizGenerator, QuizItem, QuizPool, SkipReason, SkippedChar};

/// Build a pool from `text` with the built-in demo table.
pub fn demo_pool(text: &str) -> QuizPool {
    QuizGenerator::new(TableConverter::demo()).generate(text)
}
