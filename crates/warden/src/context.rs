//! Source locations attached to sanitizer errors.

use std::fmt;
use std::sync::Arc;

use warden_syntax::{Span, SyntaxNode};

/// The source span of a violation together with the full checked text.
///
/// Lines are one-based, columns zero-based (in characters) and offsets are
/// byte positions into [`ErrorContext::source_code`]. Contexts taken from
/// the same parse share one copy of the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    source_code: Arc<str>,
    span: Span,
}

impl ErrorContext {
    /// Creates a context for `span` within `source_code`.
    ///
    /// The span is re-clamped against the text so that
    /// [`ErrorContext::source_excerpt`] can always be produced.
    #[must_use]
    pub fn new(source_code: impl Into<Arc<str>>, span: Span) -> Self {
        let text: Arc<str> = source_code.into();
        let clamped = Span::from_range(&text, span.byte_range());
        Self {
            source_code: text,
            span: clamped,
        }
    }

    /// Creates a context covering `node`.
    #[must_use]
    pub fn from_node(node: SyntaxNode<'_>) -> Self {
        Self {
            source_code: node.source().shared_source(),
            span: node.span(),
        }
    }

    /// Returns the exact text denoted by this context.
    #[must_use]
    pub fn source_excerpt(&self) -> &str {
        self.source_code
            .get(self.span.byte_range())
            .unwrap_or_default()
    }

    /// Returns the full text that was checked.
    #[must_use]
    pub fn source_code(&self) -> &str {
        &self.source_code
    }

    /// Returns the underlying span.
    #[must_use]
    pub const fn span(&self) -> Span {
        self.span
    }

    /// One-based start line.
    #[must_use]
    pub const fn start_line(&self) -> u32 {
        self.span.start.line
    }

    /// One-based end line.
    #[must_use]
    pub const fn end_line(&self) -> u32 {
        self.span.end.line
    }

    /// Zero-based start column.
    #[must_use]
    pub const fn start_column(&self) -> u32 {
        self.span.start.column
    }

    /// Zero-based end column.
    #[must_use]
    pub const fn end_column(&self) -> u32 {
        self.span.end.column
    }

    /// Start byte offset.
    #[must_use]
    pub const fn start_offset(&self) -> usize {
        self.span.start_byte
    }

    /// End byte offset (exclusive).
    #[must_use]
    pub const fn end_offset(&self) -> usize {
        self.span.end_byte
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Source Code: {}", self.source_excerpt())?;
        writeln!(f, "Line Number: {}, {}", self.start_line(), self.end_line())?;
        writeln!(f, "Column: {}, {}", self.start_column(), self.end_column())?;
        write!(f, "Position: {}, {}", self.start_offset(), self.end_offset())
    }
}
