//! Diagnostics data model and the per-document diagnostic record.
//!
//! Diagnostics are derived state: every completed check replaces a document's list as a whole.
//! The only other mutations are removing a single diagnostic after its fix was applied, and
//! dropping the list when the document closes.

use crate::grammar::RuleSeverity;
use crate::host::DocumentId;
use crate::search::MatchSpan;
use std::collections::HashMap;

/// A half-open character-offset range (`start..end`) in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DiagnosticRange {
    /// Range start offset (inclusive), in Unicode scalar values (`char`).
    pub start: usize,
    /// Range end offset (exclusive), in Unicode scalar values (`char`).
    pub end: usize,
}

impl DiagnosticRange {
    /// Create a new diagnostic range.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

impl From<MatchSpan> for DiagnosticRange {
    fn from(span: MatchSpan) -> Self {
        Self::new(span.start, span.end)
    }
}

/// Diagnostic severity levels, as shown by a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticSeverity {
    /// Error diagnostics.
    Error,
    /// Warning diagnostics.
    Warning,
    /// Informational diagnostics.
    Information,
    /// Hint diagnostics.
    Hint,
}

impl From<RuleSeverity> for DiagnosticSeverity {
    fn from(severity: RuleSeverity) -> Self {
        match severity {
            RuleSeverity::Hint => DiagnosticSeverity::Hint,
            RuleSeverity::Info => DiagnosticSeverity::Information,
            RuleSeverity::Warn => DiagnosticSeverity::Warning,
            RuleSeverity::Error => DiagnosticSeverity::Error,
        }
    }
}

impl std::fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticSeverity::Error => write!(f, "error"),
            DiagnosticSeverity::Warning => write!(f, "warning"),
            DiagnosticSeverity::Information => write!(f, "info"),
            DiagnosticSeverity::Hint => write!(f, "hint"),
        }
    }
}

/// A single diagnostic produced by a grammar rule.
///
/// The suggestion is not stored separately: it travels as the second line of `message`, which
/// is how hosts display it, and [`Diagnostic::suggestion`] reads it back from there. Rule
/// messages and suggestions have their line breaks removed before assembly, so the split is
/// unambiguous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Diagnostic range in character offsets.
    pub range: DiagnosticRange,
    /// Diagnostic severity.
    pub severity: DiagnosticSeverity,
    /// Rule message; the suggestion, if any, is its second line.
    pub message: String,
}

impl Diagnostic {
    /// The suggested replacement text (the second message line), if any.
    pub fn suggestion(&self) -> Option<&str> {
        let mut lines = self.message.split('\n');
        lines.next()?;
        let suggestion = lines.next()?;
        Some(suggestion.strip_suffix('\r').unwrap_or(suggestion))
    }
}

/// A one-click fix built from a diagnostic's suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixSuggestion {
    /// The range being replaced.
    pub range: DiagnosticRange,
    /// Current document text in `range`.
    pub original_text: String,
    /// Replacement text.
    pub suggestion_text: String,
}

impl FixSuggestion {
    /// Title for the fix command, e.g. `Replace with 'the'`.
    pub fn title(&self) -> String {
        format!("Replace with '{}'", self.suggestion_text)
    }
}

/// Diagnostics currently recorded for each document.
#[derive(Debug, Default)]
pub struct DiagnosticStore {
    documents: HashMap<DocumentId, Vec<Diagnostic>>,
}

impl DiagnosticStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole diagnostic list of `document`.
    pub fn replace(&mut self, document: DocumentId, diagnostics: Vec<Diagnostic>) {
        self.documents.insert(document, diagnostics);
    }

    /// Diagnostics recorded for `document` (empty if none).
    pub fn get(&self, document: &DocumentId) -> &[Diagnostic] {
        self.documents
            .get(document)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns `true` if `document` has a record (possibly empty).
    pub fn contains(&self, document: &DocumentId) -> bool {
        self.documents.contains_key(document)
    }

    /// Remove the first diagnostic equal to `diagnostic`.
    ///
    /// Returns `false` if it is not present.
    pub fn remove_diagnostic(&mut self, document: &DocumentId, diagnostic: &Diagnostic) -> bool {
        let Some(list) = self.documents.get_mut(document) else {
            return false;
        };
        let Some(index) = list.iter().position(|d| d == diagnostic) else {
            return false;
        };
        list.remove(index);
        true
    }

    /// Drop the record of `document`, returning its diagnostics.
    pub fn remove(&mut self, document: &DocumentId) -> Option<Vec<Diagnostic>> {
        self.documents.remove(document)
    }

    /// Ids of all documents with a record.
    pub fn documents(&self) -> impl Iterator<Item = &DocumentId> {
        self.documents.keys()
    }

    /// Remove every record.
    pub fn clear(&mut self) {
        self.documents.clear();
    }

    /// Number of documents with a record.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns `true` if no document has a record.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diag(start: usize, message: &str) -> Diagnostic {
        Diagnostic {
            range: DiagnosticRange::new(start, start + 3),
            severity: DiagnosticSeverity::Warning,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_suggestion_is_second_line() {
        assert_eq!(diag(0, "Typo\nthe").suggestion(), Some("the"));
        assert_eq!(diag(0, "Typo\r\nthe").suggestion(), Some("the"));
        assert_eq!(diag(0, "Typo").suggestion(), None);
    }

    #[test]
    fn test_store_replace_and_remove_single() {
        let doc = DocumentId::new("file:///a.md");
        let mut store = DiagnosticStore::new();
        assert!(store.get(&doc).is_empty());

        store.replace(doc.clone(), vec![diag(0, "a"), diag(4, "b")]);
        assert_eq!(store.get(&doc).len(), 2);

        assert!(store.remove_diagnostic(&doc, &diag(4, "b")));
        assert!(!store.remove_diagnostic(&doc, &diag(4, "b")));
        assert_eq!(store.get(&doc), &[diag(0, "a")]);

        store.replace(doc.clone(), Vec::new());
        assert!(store.contains(&doc));
        assert_eq!(store.remove(&doc), Some(Vec::new()));
        assert!(store.is_empty());
    }
}
