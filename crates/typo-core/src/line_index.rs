//! Rope-backed document text with line/column conversion.

use crate::host::TextPosition;
use ropey::Rope;

/// Document text indexed by line.
///
/// Rope gives O(log N) offset/line conversion and edits, so large documents stay cheap to
/// query while fixes are applied.
#[derive(Debug, Clone, Default)]
pub struct LineIndex {
    rope: Rope,
}

impl LineIndex {
    /// Create an index over `text`.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Get line number and column from a character offset (clamped to the text length).
    pub fn char_offset_to_position(&self, char_offset: usize) -> TextPosition {
        let char_offset = char_offset.min(self.rope.len_chars());

        let line_idx = self.rope.char_to_line(char_offset);
        let line_start_char = self.rope.line_to_char(line_idx);

        TextPosition::new(line_idx, char_offset - line_start_char)
    }

    /// Text of `start..end` (character offsets), or `None` if out of bounds.
    pub fn slice(&self, start: usize, end: usize) -> Option<String> {
        if start > end || end > self.rope.len_chars() {
            return None;
        }
        Some(self.rope.slice(start..end).to_string())
    }

    /// Replace `start..end` (character offsets) with `text`.
    ///
    /// Returns `false` without editing if the range is out of bounds.
    pub fn replace(&mut self, start: usize, end: usize, text: &str) -> bool {
        if start > end || end > self.rope.len_chars() {
            return false;
        }
        self.rope.remove(start..end);
        self.rope.insert(start, text);
        true
    }

    /// Complete text.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }
}
