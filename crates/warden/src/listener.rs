//! The single-pass walk that applies matchers to a syntax tree.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::trace;
use warden_syntax::{SyntaxNode, traverse};

use crate::context::ErrorContext;
use crate::error::{ErrorKind, SanitizerError};
use crate::matcher::{BuiltInObjectMatcher, IdentifierMatcher, KeywordMatcher, Matcher};
use crate::policy::Policy;

const LISTENER_TARGET: &str = "warden::listener";

/// Listener variant applied while walking a tree.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, Hash, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ListenerKind {
    /// Apply every matcher to every node.
    #[default]
    SecurityCheck,
    /// Walk the tree without applying any matcher.
    SyntaxOnly,
}

/// Errors encountered while parsing a [`ListenerKind`] from text.
pub type ListenerKindParseError = strum::ParseError;

/// The first policy violation found by a walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation<'a> {
    kind: ErrorKind,
    node: SyntaxNode<'a>,
}

impl<'a> Violation<'a> {
    /// Returns the kind of violation.
    #[must_use]
    pub const fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns the node the violation is reported against.
    #[must_use]
    pub const fn node(&self) -> SyntaxNode<'a> {
        self.node
    }

    /// Converts the violation into an error whose context covers its node.
    #[must_use]
    pub fn into_error(self) -> SanitizerError {
        SanitizerError::new(self.kind).with_context(ErrorContext::from_node(self.node))
    }
}

/// Applies a policy to syntax trees.
#[derive(Debug, Clone, Copy)]
pub struct Listener<'p> {
    policy: &'p Policy,
}

impl<'p> Listener<'p> {
    /// Creates a listener for `policy`.
    #[must_use]
    pub const fn new(policy: &'p Policy) -> Self {
        Self { policy }
    }

    /// Walks `root` in pre-order and stops at the first violation.
    ///
    /// # Errors
    ///
    /// Returns the first [`Violation`] found.
    pub fn walk<'a>(&self, root: SyntaxNode<'a>) -> Result<(), Violation<'a>> {
        match self.policy.listener() {
            ListenerKind::SyntaxOnly => Ok(()),
            ListenerKind::SecurityCheck => traverse(root, |node, _| self.enter(node)),
        }
    }

    /// Checks one node: built-in objects, then identifiers, then keywords.
    fn enter<'a>(&self, node: SyntaxNode<'a>) -> Result<(), Violation<'a>> {
        if !node.is_named() || node.is_extra() {
            return Ok(());
        }
        self.apply(&BuiltInObjectMatcher, node)?;
        self.apply(&IdentifierMatcher, node)?;
        self.apply(&KeywordMatcher, node)
    }

    fn apply<'a>(&self, matcher: &impl Matcher, node: SyntaxNode<'a>) -> Result<(), Violation<'a>> {
        let Some(offending) = matcher.matches(self.policy, node) else {
            return Ok(());
        };
        let kind = matcher.describe(offending);
        trace!(
            target: LISTENER_TARGET,
            node = node.raw_kind(),
            offending = offending.text(),
            code = kind.code(),
            "policy violation"
        );
        Err(Violation { kind, node })
    }
}
