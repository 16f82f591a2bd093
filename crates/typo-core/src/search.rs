//! Match-position search over document text.
//!
//! All public inputs and outputs use **character offsets** (Unicode scalar values), not byte
//! offsets, so spans can be handed to a host editor unchanged. Two search modes are provided:
//!
//! - [`find_all`]: every non-overlapping match of a regular expression, left to right
//! - [`find_incomplete`]: matches of a pattern that are *not* accompanied by a companion
//!   pattern on one side (e.g. `"ve"` not preceded by `"ei"`)

use crate::error::PatternError;
use regex::Regex;

/// A half-open character range (`[start, end)`) into the searched text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MatchSpan {
    /// Inclusive start character offset.
    pub start: usize,
    /// Exclusive end character offset.
    pub end: usize,
}

impl MatchSpan {
    /// Create a new span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the length of the span in characters.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` if the span is empty.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// The side on which a companion pattern is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The companion must appear immediately before the pattern (`arg + pattern`).
    Left,
    /// The companion must appear immediately after the pattern (`pattern + arg`).
    Right,
}

impl Side {
    /// Regex source for the "complete" form of `pattern` with its companion `arg`.
    ///
    /// Sources are concatenated verbatim, so alternations are not grouped.
    pub fn complete_pattern(self, pattern: &str, arg: &str) -> String {
        match self {
            Side::Left => format!("{arg}{pattern}"),
            Side::Right => format!("{pattern}{arg}"),
        }
    }

    /// The offset shared by a pattern match and the complete match that covers it.
    fn boundary(self, span: MatchSpan) -> usize {
        match self {
            Side::Left => span.end,
            Side::Right => span.start,
        }
    }
}

#[derive(Debug)]
struct CharIndex {
    char_to_byte: Vec<usize>,
    text_len: usize,
}

impl CharIndex {
    fn new(text: &str) -> Self {
        let mut char_to_byte: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        char_to_byte.push(text.len());
        Self {
            char_to_byte,
            text_len: text.len(),
        }
    }

    fn byte_to_char(&self, byte_offset: usize) -> usize {
        let clamped = byte_offset.min(self.text_len);
        match self.char_to_byte.binary_search(&clamped) {
            Ok(idx) => idx,
            Err(idx) => idx,
        }
    }
}

/// Compile a rule pattern.
///
/// Patterns are case-sensitive and single-line: `^` and `$` anchor to the whole text.
pub fn compile_pattern(pattern: &str) -> Result<Regex, PatternError> {
    Regex::new(pattern).map_err(|source| PatternError {
        pattern: pattern.to_string(),
        source,
    })
}

/// Find every non-overlapping match of `pattern` in `text`.
///
/// - Matches are returned in left-to-right order; the search resumes at the end of each match.
/// - Match ranges are character offsets and are half-open (`[start, end)`).
/// - Returns an empty list if nothing matches.
pub fn find_all(text: &str, pattern: &str) -> Result<Vec<MatchSpan>, PatternError> {
    let re = compile_pattern(pattern)?;
    Ok(find_all_regex(text, &re))
}

/// Like [`find_all`], with an already compiled regex.
pub fn find_all_regex(text: &str, re: &Regex) -> Vec<MatchSpan> {
    let mut matches = re.find_iter(text).peekable();
    if matches.peek().is_none() {
        return Vec::new();
    }

    let index = CharIndex::new(text);
    matches
        .map(|m| MatchSpan::new(index.byte_to_char(m.start()), index.byte_to_char(m.end())))
        .collect()
}

/// Find matches of `pattern` that lack the companion `arg` on `side`.
///
/// A match of `pattern` is considered complete when a match of the combined pattern
/// ([`Side::complete_pattern`]) shares its boundary: the end offset for [`Side::Left`], the
/// start offset for [`Side::Right`]. Every other match is returned.
///
/// Both match lists are sorted, so they are walked together in a single pass. Once the last
/// complete match is reached it stays current: any later match with the same boundary is
/// treated as covered again and every other match is reported.
pub fn find_incomplete(
    text: &str,
    pattern: &str,
    arg: &str,
    side: Side,
) -> Result<Vec<MatchSpan>, PatternError> {
    let sub_spans = find_all(text, pattern)?;
    if sub_spans.is_empty() {
        return Ok(Vec::new());
    }

    let full_spans = find_all(text, &side.complete_pattern(pattern, arg))?;
    if full_spans.is_empty() {
        return Ok(sub_spans);
    }

    Ok(unmatched_spans(sub_spans, &full_spans, side))
}

fn unmatched_spans(
    sub_spans: Vec<MatchSpan>,
    full_spans: &[MatchSpan],
    side: Side,
) -> Vec<MatchSpan> {
    let mut errors = Vec::new();
    let mut j = 0;

    for span in sub_spans {
        if side.boundary(span) == side.boundary(full_spans[j]) {
            if j + 1 < full_spans.len() {
                j += 1;
            }
        } else {
            errors.push(span);
        }
    }

    errors
}
