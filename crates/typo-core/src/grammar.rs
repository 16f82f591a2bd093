//! Grammar rules: the user-authored checks applied to every document.
//!
//! A grammar file is a JSON array of records:
//!
//! ```json
//! [
//!   { "mode": 0, "severity": 2, "pattern": "teh", "arg": "", "message": "Typo", "suggestion": "the" }
//! ]
//! ```
//!
//! `mode` and `severity` are integer codes (see [`CheckMode`] and [`RuleSeverity`]).

use serde::{Deserialize, Serialize};

/// How a rule's pattern is matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum CheckMode {
    /// Flag every occurrence of `pattern` (code `0`).
    CompleteMatch,
    /// Flag occurrences of `pattern` not preceded by `arg` (code `1`).
    LeftIncomplete,
    /// Flag occurrences of `pattern` not followed by `arg` (code `2`).
    RightIncomplete,
}

impl TryFrom<u8> for CheckMode {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, String> {
        match code {
            0 => Ok(CheckMode::CompleteMatch),
            1 => Ok(CheckMode::LeftIncomplete),
            2 => Ok(CheckMode::RightIncomplete),
            other => Err(format!("unknown check mode {other} (expected 0, 1 or 2)")),
        }
    }
}

impl From<CheckMode> for u8 {
    fn from(mode: CheckMode) -> Self {
        match mode {
            CheckMode::CompleteMatch => 0,
            CheckMode::LeftIncomplete => 1,
            CheckMode::RightIncomplete => 2,
        }
    }
}

/// Severity configured on a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum RuleSeverity {
    /// Code `0`.
    Hint,
    /// Code `1`.
    Info,
    /// Code `2`.
    Warn,
    /// Code `3`.
    Error,
}

impl TryFrom<u8> for RuleSeverity {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, String> {
        match code {
            0 => Ok(RuleSeverity::Hint),
            1 => Ok(RuleSeverity::Info),
            2 => Ok(RuleSeverity::Warn),
            3 => Ok(RuleSeverity::Error),
            other => Err(format!("unknown severity {other} (expected 0 to 3)")),
        }
    }
}

impl From<RuleSeverity> for u8 {
    fn from(severity: RuleSeverity) -> Self {
        match severity {
            RuleSeverity::Hint => 0,
            RuleSeverity::Info => 1,
            RuleSeverity::Warn => 2,
            RuleSeverity::Error => 3,
        }
    }
}

/// A single configured check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarRule {
    /// Matching mode.
    pub mode: CheckMode,
    /// Reported severity.
    pub severity: RuleSeverity,
    /// Regex source of the text to detect.
    pub pattern: String,
    /// Regex source of the companion text expected next to `pattern`.
    ///
    /// Unused for [`CheckMode::CompleteMatch`].
    #[serde(default)]
    pub arg: String,
    /// Human-readable description of the issue.
    pub message: String,
    /// Replacement text offered as a fix (may be empty).
    #[serde(default)]
    pub suggestion: String,
}

impl GrammarRule {
    /// A [`CheckMode::CompleteMatch`] rule.
    pub fn complete(
        pattern: impl Into<String>,
        severity: RuleSeverity,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            mode: CheckMode::CompleteMatch,
            severity,
            pattern: pattern.into(),
            arg: String::new(),
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    /// An incomplete-match rule (`mode` should be one of the incomplete modes).
    pub fn incomplete(
        mode: CheckMode,
        pattern: impl Into<String>,
        arg: impl Into<String>,
        severity: RuleSeverity,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            mode,
            severity,
            pattern: pattern.into(),
            arg: arg.into(),
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }
}

/// Parse grammar rules from JSON text.
///
/// The top level must be an array; rule order is preserved.
pub fn parse_grammar(json: &str) -> Result<Vec<GrammarRule>, serde_json::Error> {
    serde_json::from_str(json)
}
