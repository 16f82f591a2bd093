//! Interfaces to the host editor.
//!
//! The checker never talks to an editor directly. A host implements these traits and forwards
//! its lifecycle events (active editor changed, document saved/closed) as plain method calls on
//! [`DocumentChecker`](crate::DocumentChecker).

use crate::diagnostics::{Diagnostic, DiagnosticRange};
use std::fmt;

/// Stable identity of an open document (typically its URI or path).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId(String);

impl DocumentId {
    /// Create a document id from a URI/path.
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    /// The underlying URI/path.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(uri: &str) -> Self {
        Self::new(uri)
    }
}

impl From<String> for DocumentId {
    fn from(uri: String) -> Self {
        Self(uri)
    }
}

/// Zero-based line / character column in a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextPosition {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column, in characters within the line.
    pub column: usize,
}

impl TextPosition {
    /// Create a new position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Read access to document text.
pub trait DocumentProvider {
    /// Full text of the document, or `None` if it is not open.
    fn text(&self, document: &DocumentId) -> Option<String>;

    /// Text covered by `range` (character offsets), or `None` if the document is not open.
    fn text_in_range(&self, document: &DocumentId, range: DiagnosticRange) -> Option<String> {
        let text = self.text(document)?;
        Some(
            text.chars()
                .skip(range.start)
                .take(range.end.saturating_sub(range.start))
                .collect(),
        )
    }

    /// Convert a character offset into a line/column position.
    fn position_at(&self, document: &DocumentId, offset: usize) -> Option<TextPosition>;
}

/// Receives the diagnostics produced for each document.
pub trait DiagnosticSink {
    /// Replace all diagnostics shown for `document`.
    fn publish(&mut self, document: &DocumentId, diagnostics: &[Diagnostic]);

    /// Remove all diagnostics shown for `document`.
    fn clear(&mut self, document: &DocumentId);
}

/// Applies text edits to documents.
pub trait EditApplier {
    /// Replace the text in `range` (character offsets) with `text`.
    ///
    /// Returns a host-provided reason on failure.
    fn replace_range(
        &mut self,
        document: &DocumentId,
        range: DiagnosticRange,
        text: &str,
    ) -> Result<(), String>;
}

/// Everything the checker needs from a host.
pub trait Host: DocumentProvider + DiagnosticSink + EditApplier {}

impl<T: DocumentProvider + DiagnosticSink + EditApplier> Host for T {}
