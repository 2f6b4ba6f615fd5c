//! Grammar entry points understood by the JavaScript front end.
//!
//! Tree-sitter's JavaScript grammar only exposes a `program` root, so the
//! expression-shaped entry points are parsed inside a parenthesised wrapper
//! and then checked for the expected shape.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// The grammar production a piece of source text is parsed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EntryPoint {
    /// A full script or module: zero or more statements.
    #[default]
    StatementList,
    /// Exactly one expression with no top-level comma.
    SingleExpression,
    /// One or more comma-separated expressions.
    ExpressionSequence,
    /// A single function expression, generator expression or arrow function.
    AnonymousFunction,
}

impl EntryPoint {
    /// Returns the snake-case identifier for this entry point.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StatementList => "statement_list",
            Self::SingleExpression => "single_expression",
            Self::ExpressionSequence => "expression_sequence",
            Self::AnonymousFunction => "anonymous_function",
        }
    }

    /// Returns `true` when the text is parsed inside a `( … )` wrapper.
    #[must_use]
    pub const fn is_wrapped(self) -> bool {
        !matches!(self, Self::StatementList)
    }

    /// Returns all entry points.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::StatementList,
            Self::SingleExpression,
            Self::ExpressionSequence,
            Self::AnonymousFunction,
        ]
    }
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when parsing an entry point identifier fails.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown entry point: '{0}'")]
pub struct EntryPointParseError(String);

impl EntryPointParseError {
    /// Returns the input that failed to parse.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.0
    }
}

impl FromStr for EntryPoint {
    type Err = EntryPointParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalised = input.trim().to_ascii_lowercase().replace('-', "_");
        match normalised.as_str() {
            "statement_list" | "statements" | "module" => Ok(Self::StatementList),
            "single_expression" | "expression" => Ok(Self::SingleExpression),
            "expression_sequence" | "sequence" => Ok(Self::ExpressionSequence),
            "anonymous_function" | "function" => Ok(Self::AnonymousFunction),
            other => Err(EntryPointParseError(other.to_owned())),
        }
    }
}
