//! Source positions reported against the caller's original text.
//!
//! Tree-sitter positions are zero-based byte columns over the text it was
//! handed. Diagnostics use one-based lines, zero-based character columns and
//! absolute byte offsets into the text the caller supplied.

use std::fmt;
use std::ops::Range;

/// A line and column position within a source string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LineCol {
    /// One-based line number.
    pub line: u32,
    /// Zero-based column, counted in characters from the start of the line.
    pub column: u32,
}

impl LineCol {
    /// Creates a new line/column position.
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Computes the position of a byte offset within `text`.
    ///
    /// Offsets past the end of the text, or inside a multi-byte character,
    /// are moved back to the nearest character boundary. This scans `text`
    /// once; use a [`LineIndex`] for repeated lookups.
    #[must_use]
    pub fn at_offset(text: &str, offset: usize) -> Self {
        LineIndex::new(text).line_col(text, offset)
    }
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open byte range together with its line/column equivalents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start_byte: usize,
    /// End byte offset (exclusive).
    pub end_byte: usize,
    /// Start position.
    pub start: LineCol,
    /// End position.
    pub end: LineCol,
}

impl Span {
    /// Builds a span for `range` within `text`.
    ///
    /// The range is clamped into `0..=text.len()` so that a span can always
    /// be used to slice `text`.
    #[must_use]
    pub fn from_range(text: &str, range: Range<usize>) -> Self {
        LineIndex::new(text).span(text, range)
    }

    /// Returns the byte range covered by this span.
    #[must_use]
    pub const fn byte_range(&self) -> Range<usize> {
        self.start_byte..self.end_byte
    }

    /// Returns `true` when the span covers no bytes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start_byte == self.end_byte
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

const CHECKPOINT_STRIDE: usize = 64;

/// Line starts and character counts of one text, computed once.
///
/// A lookup costs a binary search over the line starts plus a scan of at
/// most 64 bytes, whatever the length of the text. Every lookup
/// must be given the text the index was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<usize>,
    char_checkpoints: Vec<usize>,
}

impl LineIndex {
    /// Indexes `text`.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut line_starts = vec![0];
        line_starts.extend(
            bytes
                .iter()
                .enumerate()
                .filter(|(_, byte)| **byte == b'\n')
                .map(|(index, _)| index.saturating_add(1)),
        );

        let mut char_checkpoints = Vec::with_capacity(bytes.len() / CHECKPOINT_STRIDE + 1);
        let mut chars = 0_usize;
        for chunk in bytes.chunks(CHECKPOINT_STRIDE) {
            char_checkpoints.push(chars);
            chars = chars.saturating_add(count_chars(chunk));
        }
        char_checkpoints.push(chars);

        Self {
            line_starts,
            char_checkpoints,
        }
    }

    /// Returns the number of lines in the indexed text.
    #[must_use]
    pub const fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Computes the position of a byte offset, clamped like
    /// [`LineCol::at_offset`].
    #[must_use]
    pub fn line_col(&self, text: &str, offset: usize) -> LineCol {
        let offset = floor_char_boundary(text, offset);
        let line = self
            .line_starts
            .partition_point(|start| *start <= offset)
            .saturating_sub(1);
        let line_start = self.line_starts.get(line).copied().unwrap_or(0);
        let column = self
            .char_index(text, offset)
            .saturating_sub(self.char_index(text, line_start));
        LineCol::new(saturating_u32(line.saturating_add(1)), saturating_u32(column))
    }

    /// Builds a span for `range`, clamped like [`Span::from_range`].
    #[must_use]
    pub fn span(&self, text: &str, range: Range<usize>) -> Span {
        let end_byte = floor_char_boundary(text, range.end);
        let start_byte = floor_char_boundary(text, range.start).min(end_byte);
        Span {
            start_byte,
            end_byte,
            start: self.line_col(text, start_byte),
            end: self.line_col(text, end_byte),
        }
    }

    fn char_index(&self, text: &str, offset: usize) -> usize {
        let block = offset / CHECKPOINT_STRIDE;
        let block_start = block.saturating_mul(CHECKPOINT_STRIDE);
        let base = self.char_checkpoints.get(block).copied().unwrap_or(0);
        let tail = text.as_bytes().get(block_start..offset).unwrap_or_default();
        base.saturating_add(count_chars(tail))
    }
}

// UTF-8 continuation bytes are 0b10xx_xxxx; every other byte starts a char.
fn count_chars(bytes: &[u8]) -> usize {
    bytes.iter().filter(|byte| (**byte & 0xC0) != 0x80).count()
}

fn floor_char_boundary(text: &str, offset: usize) -> usize {
    let mut boundary = offset.min(text.len());
    while boundary > 0 && !text.is_char_boundary(boundary) {
        boundary = boundary.saturating_sub(1);
    }
    boundary
}

// Line/column numbers will realistically never exceed u32::MAX.
fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
