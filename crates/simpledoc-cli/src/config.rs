use serde::Deserialize;
use std::fs;
use std::path::Path;

use simpledoc_core::Level;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_PATH: &str = "simpledoc.toml";

/// Settings read from a TOML file. Command-line flags take precedence.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Complexity level; out-of-range values are clamped into `1..=3`.
    pub level: Option<i64>,
    /// Title used in the generated `<title>` element.
    pub title: Option<String>,
}

impl Config {
    /// Load config from a TOML file, or return defaults if not found.
    ///
    /// A file that exists but does not parse is reported on stderr and ignored.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content).unwrap_or_else(|e| {
                eprintln!("warning: ignoring {}: {}", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn level(&self) -> Option<Level> {
        self.level.map(Level::clamped)
    }
}
