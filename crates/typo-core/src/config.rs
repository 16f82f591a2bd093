//! Checker settings and grammar file loading.
//!
//! Settings are a small JSON object:
//!
//! ```json
//! { "grammar": "/home/me/grammar.json", "delay_ms": 150 }
//! ```

use crate::error::ConfigError;
use crate::grammar::{GrammarRule, parse_grammar};
use crate::scheduler::DEFAULT_CHECK_DELAY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// User settings for the checker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckerSettings {
    /// Path of the grammar file.
    #[serde(default)]
    pub grammar: Option<PathBuf>,

    /// Debounce delay before a scheduled check runs, in milliseconds.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

fn default_delay_ms() -> u64 {
    DEFAULT_CHECK_DELAY.as_millis() as u64
}

impl Default for CheckerSettings {
    fn default() -> Self {
        Self {
            grammar: None,
            delay_ms: default_delay_ms(),
        }
    }
}

impl CheckerSettings {
    /// Settings pointing at a grammar file, with the default delay.
    pub fn with_grammar(path: impl Into<PathBuf>) -> Self {
        Self {
            grammar: Some(path.into()),
            ..Self::default()
        }
    }

    /// The debounce delay.
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Load settings from a JSON file.
pub fn load_settings(path: &Path) -> Result<CheckerSettings, ConfigError> {
    let content = read(path)?;
    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the grammar file named by `settings`.
pub fn load_grammar(settings: &CheckerSettings) -> Result<Vec<GrammarRule>, ConfigError> {
    let path = settings
        .grammar
        .as_deref()
        .filter(|path| !path.to_string_lossy().trim().is_empty())
        .ok_or(ConfigError::GrammarPathUnset)?;
    load_grammar_file(path)
}

/// Load grammar rules from a JSON file.
pub fn load_grammar_file(path: &Path) -> Result<Vec<GrammarRule>, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::GrammarNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = read(path)?;
    let rules = parse_grammar(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("loaded {} grammar rule(s) from {}", rules.len(), path.display());
    Ok(rules)
}

fn read(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}
