//! Rule engine: applies grammar rules to a text and produces diagnostics.

use crate::diagnostics::{Diagnostic, DiagnosticRange, DiagnosticSeverity};
use crate::error::PatternError;
use crate::grammar::{CheckMode, GrammarRule};
use crate::search::{MatchSpan, Side, find_all, find_incomplete};
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static HTML_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!--(.*?)-->").expect("valid comment regex"));

/// Remove `<!-- ... -->` regions (single-line, non-greedy) from `text`.
///
/// Offsets of later text shift left by the removed length.
pub fn strip_comments(text: &str) -> Cow<'_, str> {
    HTML_COMMENT.replace_all(text, "")
}

/// Remove `\r\n` and `\n` line breaks.
fn remove_line_breaks(text: &str) -> String {
    text.replace("\r\n", "").replace('\n', "")
}

fn is_empty_or_spaces(text: &str) -> bool {
    text.chars().all(|c| c == ' ')
}

/// Build the message shown for a rule: the rule message, then the suggestion as a second line
/// when it is not blank.
pub fn diagnostic_message(message: &str, suggestion: &str) -> String {
    let message = remove_line_breaks(message);
    let suggestion = remove_line_breaks(suggestion);
    if is_empty_or_spaces(&suggestion) {
        message
    } else {
        format!("{message}\n{suggestion}")
    }
}

/// Match positions of a single rule against (already comment-stripped) text.
pub fn rule_spans(text: &str, rule: &GrammarRule) -> Result<Vec<MatchSpan>, PatternError> {
    match rule.mode {
        CheckMode::CompleteMatch => find_all(text, &rule.pattern),
        CheckMode::LeftIncomplete => find_incomplete(text, &rule.pattern, &rule.arg, Side::Left),
        CheckMode::RightIncomplete => find_incomplete(text, &rule.pattern, &rule.arg, Side::Right),
    }
}

/// Check `text` against `rules`.
///
/// Diagnostics are ordered by rule, then by position within each rule. Overlapping diagnostics
/// from different rules are all kept. An invalid pattern in any rule aborts the whole check.
pub fn check(text: &str, rules: &[GrammarRule]) -> Result<Vec<Diagnostic>, PatternError> {
    let text = strip_comments(text);
    let mut diagnostics = Vec::new();

    for rule in rules {
        let spans = rule_spans(&text, rule)?;
        if spans.is_empty() {
            continue;
        }

        let message = diagnostic_message(&rule.message, &rule.suggestion);
        let severity = DiagnosticSeverity::from(rule.severity);
        diagnostics.extend(spans.into_iter().map(|span| Diagnostic {
            range: DiagnosticRange::from(span),
            severity,
            message: message.clone(),
        }));
    }

    Ok(diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_comments_is_single_line_and_non_greedy() {
        assert_eq!(strip_comments("a<!-- x -->b<!--y-->c"), "abc");
        assert_eq!(strip_comments("a<!--\n-->b"), "a<!--\n-->b");
    }

    #[test]
    fn test_diagnostic_message() {
        assert_eq!(diagnostic_message("Typo\r\n", "the"), "Typo\nthe");
        assert_eq!(diagnostic_message("Ty\npo", "t\nhe"), "Typo\nthe");
        assert_eq!(diagnostic_message("Typo", ""), "Typo");
        assert_eq!(diagnostic_message("Typo", "   "), "Typo");
        assert_eq!(diagnostic_message("Typo", "\n"), "Typo");
    }
}
