//! Errors raised when a check rejects its input.
//!
//! Every rejection is a [`SanitizerError`]: an [`ErrorKind`] with a stable
//! numeric code and message, an optional [`ErrorContext`] pointing at the
//! offending source, and an optional underlying cause. Message wording is
//! part of the public contract.

use std::error::Error as StdError;

use thiserror::Error;
use warden_syntax::SyntaxError;

use crate::context::ErrorContext;

type BoxedCause = Box<dyn StdError + Send + Sync + 'static>;

/// Why a check failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A lower-level failure that has no more specific kind.
    #[error("Unknown error: {message}")]
    UnknownError {
        /// Description of the failure.
        message: String,
    },

    /// The input was empty, blank or absent.
    #[error("The JavaScript code is empty.")]
    EmptyInput,

    /// The configured listener could not be created.
    #[error("Failed to create listener {name}.")]
    ListenerConstructionFailure {
        /// Listener name as configured.
        name: String,
    },

    /// An identifier is denied by policy.
    #[error("Identifier {name} is not allowed.")]
    IdentifierNotAllowed {
        /// The identifier text.
        name: String,
    },

    /// A keyword is disabled by policy.
    #[error("Keyword {keyword} is not allowed.")]
    KeywordNotAllowed {
        /// The keyword as written.
        keyword: String,
    },

    /// The parser met a token it could not accept.
    #[error("Token {actual} is invalid. Expecting {expected}.")]
    SyntaxTokenMismatch {
        /// The offending token or node kind.
        actual: String,
        /// Rendered set of acceptable tokens.
        expected: String,
    },

    /// A production had fewer children than required.
    #[error("Syntax count {actual} is too small. Expecting at least {min}.")]
    SyntaxChildCountTooSmall {
        /// Number of children found.
        actual: usize,
        /// Minimum accepted.
        min: usize,
    },

    /// A production had more children than allowed.
    #[error("Syntax count {actual} is too large. Expecting at most {max}.")]
    SyntaxChildCountTooLarge {
        /// Number of children found.
        actual: usize,
        /// Maximum accepted.
        max: usize,
    },

    /// A production had a different number of children than required.
    #[error("Syntax count {actual} does not match. Expecting {expected}.")]
    SyntaxChildCountNotEqual {
        /// Number of children found.
        actual: usize,
        /// Exact count required.
        expected: usize,
    },

    /// A function the policy requires was not declared.
    #[error("Function {name} is not found.")]
    RequiredFunctionMissing {
        /// The missing function's name.
        name: String,
    },

    /// A function declares a different number of parameters than required.
    #[error("Argument count {actual} does not match. Expecting {expected}.")]
    ArgumentCountMismatch {
        /// Number of declared parameters.
        actual: usize,
        /// Number required.
        expected: usize,
    },
}

impl ErrorKind {
    /// Returns the stable numeric code of this kind.
    #[must_use]
    pub const fn code(&self) -> u16 {
        match self {
            Self::UnknownError { .. } => 1,
            Self::EmptyInput => 2,
            Self::ListenerConstructionFailure { .. } => 3,
            Self::IdentifierNotAllowed { .. } => 100,
            Self::KeywordNotAllowed { .. } => 101,
            Self::SyntaxTokenMismatch { .. } => 200,
            Self::SyntaxChildCountTooSmall { .. } => 201,
            Self::SyntaxChildCountTooLarge { .. } => 202,
            Self::SyntaxChildCountNotEqual { .. } => 203,
            Self::RequiredFunctionMissing { .. } => 300,
            Self::ArgumentCountMismatch { .. } => 301,
        }
    }
}

/// A rejected check.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct SanitizerError {
    kind: ErrorKind,
    context: Option<Box<ErrorContext>>,
    #[source]
    cause: Option<BoxedCause>,
}

impl SanitizerError {
    /// Creates an error of the given kind with no context or cause.
    #[must_use]
    pub const fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
            cause: None,
        }
    }

    /// Attaches the location of the violation.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(Box::new(context));
        self
    }

    /// Attaches the underlying cause.
    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<BoxedCause>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Returns the kind of failure.
    #[must_use]
    pub const fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns the numeric code of the failure.
    #[must_use]
    pub const fn code(&self) -> u16 {
        self.kind.code()
    }

    /// Returns the contract message, identical to the `Display` output.
    #[must_use]
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Returns where the violation occurred, when known.
    #[must_use]
    pub fn context(&self) -> Option<&ErrorContext> {
        self.context.as_deref()
    }

    /// Creates an [`ErrorKind::UnknownError`].
    #[must_use]
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownError {
            message: message.into(),
        })
    }

    /// Creates an [`ErrorKind::EmptyInput`] error.
    #[must_use]
    pub const fn empty_input() -> Self {
        Self::new(ErrorKind::EmptyInput)
    }

    /// Creates an [`ErrorKind::ListenerConstructionFailure`].
    #[must_use]
    pub fn listener_construction_failure(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::ListenerConstructionFailure { name: name.into() })
    }

    /// Creates an [`ErrorKind::IdentifierNotAllowed`].
    #[must_use]
    pub fn identifier_not_allowed(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::IdentifierNotAllowed { name: name.into() })
    }

    /// Creates an [`ErrorKind::KeywordNotAllowed`].
    #[must_use]
    pub fn keyword_not_allowed(keyword: impl Into<String>) -> Self {
        Self::new(ErrorKind::KeywordNotAllowed {
            keyword: keyword.into(),
        })
    }

    /// Creates an [`ErrorKind::SyntaxTokenMismatch`], rendering `expected`.
    #[must_use]
    pub fn token_mismatch(actual: impl Into<String>, expected: &[String]) -> Self {
        Self::new(ErrorKind::SyntaxTokenMismatch {
            actual: actual.into(),
            expected: render_expected(expected),
        })
    }

    /// Creates an [`ErrorKind::SyntaxChildCountTooSmall`].
    #[must_use]
    pub const fn child_count_too_small(actual: usize, min: usize) -> Self {
        Self::new(ErrorKind::SyntaxChildCountTooSmall { actual, min })
    }

    /// Creates an [`ErrorKind::SyntaxChildCountTooLarge`].
    #[must_use]
    pub const fn child_count_too_large(actual: usize, max: usize) -> Self {
        Self::new(ErrorKind::SyntaxChildCountTooLarge { actual, max })
    }

    /// Creates an [`ErrorKind::SyntaxChildCountNotEqual`].
    #[must_use]
    pub const fn child_count_not_equal(actual: usize, expected: usize) -> Self {
        Self::new(ErrorKind::SyntaxChildCountNotEqual { actual, expected })
    }

    /// Creates an [`ErrorKind::RequiredFunctionMissing`].
    #[must_use]
    pub fn required_function_missing(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::RequiredFunctionMissing { name: name.into() })
    }

    /// Creates an [`ErrorKind::ArgumentCountMismatch`].
    #[must_use]
    pub const fn argument_count_mismatch(actual: usize, expected: usize) -> Self {
        Self::new(ErrorKind::ArgumentCountMismatch { actual, expected })
    }

    /// Converts a front-end failure for `source` into a sanitizer error.
    ///
    /// Token mismatches keep their location; anything else becomes an
    /// [`ErrorKind::UnknownError`] carrying the original error as its cause.
    #[must_use]
    pub fn from_syntax(error: SyntaxError, source: &str) -> Self {
        match error {
            SyntaxError::TokenMismatch {
                token,
                expected,
                span,
            } => Self::token_mismatch(token, &expected)
                .with_context(ErrorContext::new(source, span)),
            other => Self::unknown(other.to_string()).with_cause(other),
        }
    }
}

/// Renders an expected-token set: one item verbatim, otherwise `{a, b, c}`.
fn render_expected(expected: &[String]) -> String {
    match expected {
        [single] => single.clone(),
        items => format!("{{{}}}", items.join(", ")),
    }
}
