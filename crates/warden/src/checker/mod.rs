//! Checkers: parse one grammar entry point, walk it and validate its shape.
//!
//! Every checker follows the same pipeline. Scratch state from the previous
//! call is dropped, blank input is rejected before any parser exists, the
//! text is parsed for the checker's entry point, the policy listener walks
//! the result and finally any checker-specific structure is validated. The
//! first failure ends the check.

mod anonymous_function;
mod expression_sequence;
mod function;
mod module;
mod single_expression;
mod statement_list;

use std::fmt;

use tracing::debug;
use warden_syntax::{EntryPoint, JsParser, ParsedSource, SyntaxNode};

use crate::context::ErrorContext;
use crate::error::SanitizerError;
use crate::listener::{Listener, Violation};
use crate::policy::Policy;

pub use anonymous_function::AnonymousFunctionChecker;
pub use expression_sequence::ExpressionSequenceChecker;
pub use function::FunctionDeclaration;
pub use module::ModuleChecker;
pub use single_expression::SingleExpressionChecker;
pub use statement_list::StatementListChecker;

pub(crate) const CHECKER_TARGET: &str = "warden::checker";

/// Validates source text against a policy.
///
/// Checkers keep scratch state between calls for inspection but reset it at
/// the start of every check, so one instance can be reused sequentially.
pub trait Checker {
    /// Checks `source`, returning `Ok(())` when it is accepted.
    ///
    /// # Errors
    ///
    /// Returns the first [`SanitizerError`] encountered.
    fn check(&mut self, source: &str) -> Result<(), SanitizerError>;

    /// Checks optional source; `None` is treated as empty input.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ErrorKind::EmptyInput`] for `None`, otherwise as
    /// [`Checker::check`].
    fn check_optional(&mut self, source: Option<&str>) -> Result<(), SanitizerError> {
        source.map_or_else(|| Err(SanitizerError::empty_input()), |text| self.check(text))
    }

    /// Returns the policy applied by this checker.
    fn policy(&self) -> &Policy;
}

/// State and pipeline shared by every checker.
pub(crate) struct CheckerCore {
    label: &'static str,
    policy: Policy,
    entry_point: EntryPoint,
    parser: Option<JsParser>,
    parsed: Option<ParsedSource>,
}

impl CheckerCore {
    pub(crate) const fn new(label: &'static str, policy: Policy, entry_point: EntryPoint) -> Self {
        Self {
            label,
            policy,
            entry_point,
            parser: None,
            parsed: None,
        }
    }

    pub(crate) const fn policy(&self) -> &Policy {
        &self.policy
    }

    pub(crate) const fn parsed(&self) -> Option<&ParsedSource> {
        self.parsed.as_ref()
    }

    /// Runs the shared pipeline, then `validate` on the accepted tree.
    pub(crate) fn check_with<F>(&mut self, source: &str, validate: F) -> Result<(), SanitizerError>
    where
        F: FnOnce(&ParsedSource, &Policy) -> Result<(), SanitizerError>,
    {
        debug!(
            target: CHECKER_TARGET,
            checker = self.label,
            policy = self.policy.name(),
            bytes = source.len(),
            "check started"
        );
        let result = self.parse_and_walk(source).and_then(|()| {
            self.parsed
                .as_ref()
                .map_or(Ok(()), |parsed| validate(parsed, &self.policy))
        });
        match &result {
            Ok(()) => debug!(target: CHECKER_TARGET, checker = self.label, "check passed"),
            Err(error) => debug!(
                target: CHECKER_TARGET,
                checker = self.label,
                code = error.code(),
                message = %error,
                "check rejected"
            ),
        }
        result
    }

    fn parse_and_walk(&mut self, source: &str) -> Result<(), SanitizerError> {
        self.parsed = None;
        if source.trim().is_empty() {
            return Err(SanitizerError::empty_input());
        }
        let entry_point = self.entry_point;
        let parsed = self
            .parser()?
            .parse(source, entry_point)
            .map_err(|error| SanitizerError::from_syntax(error, source))?;
        Listener::new(&self.policy)
            .walk(parsed.entry_node())
            .map_err(Violation::into_error)?;
        self.parsed = Some(parsed);
        Ok(())
    }

    /// Returns the cached parser, creating it on first use.
    fn parser(&mut self) -> Result<&mut JsParser, SanitizerError> {
        let parser = self
            .parser
            .take()
            .map_or_else(JsParser::new, Ok)
            .map_err(|error| SanitizerError::unknown(error.to_string()).with_cause(error))?;
        Ok(self.parser.insert(parser))
    }
}

impl fmt::Debug for CheckerCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckerCore")
            .field("label", &self.label)
            .field("policy", &self.policy)
            .field("entry_point", &self.entry_point)
            .field("parsed", &self.parsed.is_some())
            .finish_non_exhaustive()
    }
}

/// Fails with [`crate::ErrorKind::SyntaxChildCountTooSmall`] when
/// `actual < min`, reporting against `node`.
///
/// # Errors
///
/// Returns the count violation.
pub fn validate_child_count_at_least(
    actual: usize,
    min: usize,
    node: SyntaxNode<'_>,
) -> Result<(), SanitizerError> {
    if actual >= min {
        return Ok(());
    }
    Err(SanitizerError::child_count_too_small(actual, min).with_context(ErrorContext::from_node(node)))
}

/// Fails with [`crate::ErrorKind::SyntaxChildCountTooLarge`] when
/// `actual > max`, reporting against `node`.
///
/// # Errors
///
/// Returns the count violation.
pub fn validate_child_count_at_most(
    actual: usize,
    max: usize,
    node: SyntaxNode<'_>,
) -> Result<(), SanitizerError> {
    if actual <= max {
        return Ok(());
    }
    Err(SanitizerError::child_count_too_large(actual, max).with_context(ErrorContext::from_node(node)))
}

/// Fails with [`crate::ErrorKind::SyntaxChildCountNotEqual`] when
/// `actual != expected`, reporting against `node`.
///
/// # Errors
///
/// Returns the count violation.
pub fn validate_child_count_equals(
    actual: usize,
    expected: usize,
    node: SyntaxNode<'_>,
) -> Result<(), SanitizerError> {
    if actual == expected {
        return Ok(());
    }
    Err(SanitizerError::child_count_not_equal(actual, expected)
        .with_context(ErrorContext::from_node(node)))
}
