//! Error types for the JavaScript front end.
//!
//! This module provides structured error types for parser construction,
//! parsing and shape validation in the `warden-syntax` crate.

use thiserror::Error;

use crate::entry_point::EntryPoint;
use crate::span::Span;

/// Placeholder token reported when the input ends unexpectedly.
pub const END_OF_INPUT: &str = "<EOF>";

/// Errors from parsing JavaScript source text.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SyntaxError {
    /// Failed to initialise the Tree-sitter parser with the JavaScript grammar.
    #[error("failed to initialise JavaScript parser: {message}")]
    ParserInitError {
        /// Description of the failure.
        message: String,
    },

    /// Tree-sitter did not produce a tree at all.
    #[error("failed to parse {entry_point}: {message}")]
    ParseError {
        /// The entry point that was being parsed.
        entry_point: EntryPoint,
        /// Description of the failure.
        message: String,
    },

    /// The first offending token and the tokens that would have been accepted.
    #[error("unexpected token {token} at {span}")]
    TokenMismatch {
        /// Text of the offending token, or [`END_OF_INPUT`].
        token: String,
        /// Sorted, de-duplicated names of acceptable tokens.
        expected: Vec<String>,
        /// Location of the offending token in the caller's text.
        span: Span,
    },
}

impl SyntaxError {
    /// Creates a parser initialisation error.
    #[must_use]
    pub fn parser_init(message: impl Into<String>) -> Self {
        Self::ParserInitError {
            message: message.into(),
        }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(entry_point: EntryPoint, message: impl Into<String>) -> Self {
        Self::ParseError {
            entry_point,
            message: message.into(),
        }
    }

    /// Creates a token mismatch error, sorting and de-duplicating `expected`.
    #[must_use]
    pub fn token_mismatch(token: impl Into<String>, mut expected: Vec<String>, span: Span) -> Self {
        expected.sort();
        expected.dedup();
        Self::TokenMismatch {
            token: token.into(),
            expected,
            span,
        }
    }
}
