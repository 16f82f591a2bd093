//! An in-memory [`Host`](crate::Host) implementation.
//!
//! Useful for batch tools and tests: documents live in [`LineIndex`] buffers and published
//! diagnostics are kept per document.

use crate::diagnostics::{Diagnostic, DiagnosticRange};
use crate::host::{DiagnosticSink, DocumentId, DocumentProvider, EditApplier, TextPosition};
use crate::line_index::LineIndex;
use std::collections::HashMap;

/// Open documents plus the diagnostics published for them.
#[derive(Debug, Default)]
pub struct MemoryHost {
    documents: HashMap<DocumentId, LineIndex>,
    published: HashMap<DocumentId, Vec<Diagnostic>>,
    read_only: bool,
}

impl MemoryHost {
    /// Create a host with no open documents.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open (or replace) a document.
    pub fn open(&mut self, document: impl Into<DocumentId>, text: &str) {
        self.documents
            .insert(document.into(), LineIndex::from_text(text));
    }

    /// Close a document. Published diagnostics are left for the checker to clear.
    pub fn close(&mut self, document: &DocumentId) -> bool {
        self.documents.remove(document).is_some()
    }

    /// Replace a document's whole text, as an editor would on input.
    pub fn set_text(&mut self, document: &DocumentId, text: &str) -> bool {
        let Some(buffer) = self.documents.get_mut(document) else {
            return false;
        };
        *buffer = LineIndex::from_text(text);
        true
    }

    /// Reject every edit (e.g. to model a read-only buffer).
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Diagnostics last published for `document`, if any.
    pub fn published(&self, document: &DocumentId) -> Option<&[Diagnostic]> {
        self.published.get(document).map(Vec::as_slice)
    }

    /// Ids of all open documents, sorted.
    pub fn documents(&self) -> Vec<DocumentId> {
        let mut ids: Vec<DocumentId> = self.documents.keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl DocumentProvider for MemoryHost {
    fn text(&self, document: &DocumentId) -> Option<String> {
        self.documents.get(document).map(LineIndex::text)
    }

    fn text_in_range(&self, document: &DocumentId, range: DiagnosticRange) -> Option<String> {
        self.documents.get(document)?.slice(range.start, range.end)
    }

    fn position_at(&self, document: &DocumentId, offset: usize) -> Option<TextPosition> {
        self.documents
            .get(document)
            .map(|buffer| buffer.char_offset_to_position(offset))
    }
}

impl DiagnosticSink for MemoryHost {
    fn publish(&mut self, document: &DocumentId, diagnostics: &[Diagnostic]) {
        self.published.insert(document.clone(), diagnostics.to_vec());
    }

    fn clear(&mut self, document: &DocumentId) {
        self.published.remove(document);
    }
}

impl EditApplier for MemoryHost {
    fn replace_range(
        &mut self,
        document: &DocumentId,
        range: DiagnosticRange,
        text: &str,
    ) -> Result<(), String> {
        if self.read_only {
            return Err("document is read-only".to_string());
        }
        let Some(buffer) = self.documents.get_mut(document) else {
            return Err("document is not open".to_string());
        };
        if buffer.replace(range.start, range.end, text) {
            Ok(())
        } else {
            Err(format!(
                "range {}..{} is outside the document",
                range.start, range.end
            ))
        }
    }
}
