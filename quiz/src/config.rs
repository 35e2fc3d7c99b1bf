use serde::{Deserialize, Serialize};

/// Quiz configuration that extends the base `Config` from core.
///
/// - All input handling options from `pinyinlab_core::Config` (flattened via serde)
/// - Quiz pool shaping (dedupe, size cap)
/// - Answer checking tolerance
///
/// # Example
///
/// ```rust
/// use pinyinlab_quiz::QuizConfig;
///
/// let config = QuizConfig::from_toml_str("max_items = 10\nstrict_decompose = true\n").unwrap();
/// assert_eq!(config.max_items, 10);
/// assert!(config.base.strict_decompose);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct QuizConfig {
    #[serde(flatten)]
    pub base: pinyinlab_core::Config,

    /// Keep only the first occurrence of each character.
    pub dedupe_characters: bool,

    /// Stop after this many items; 0 means no limit.
    pub max_items: usize,

    /// Accept a plain u pick where the answer is ü after j, q, x, y
    /// ("ju" is written without dots, so children pick u).
    pub accept_u_for_umlaut: bool,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            base: pinyinlab_core::Config::default(),
            dedupe_characters: true,
            max_items: 0,
            accept_u_for_umlaut: true,
        }
    }
}

impl QuizConfig {
    pub fn base(&self) -> &pinyinlab_core::Config {
        &self.base
    }

    pub fn into_base(self) -> pinyinlab_core::Config {
        self.base
    }

    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
