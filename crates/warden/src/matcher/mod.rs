//! Stateless predicates deciding whether a syntax node violates policy.
//!
//! Each matcher inspects one visited node and, on a violation, returns the
//! offending node: the identifier or keyword token that broke the rule. The
//! listener reports the violation against the visited node.

mod built_in_object;
mod identifier;
mod keyword;

use warden_syntax::SyntaxNode;

use crate::error::ErrorKind;
use crate::policy::Policy;

pub use built_in_object::BuiltInObjectMatcher;
pub use identifier::IdentifierMatcher;
pub use keyword::KeywordMatcher;

/// A policy predicate over syntax nodes.
pub trait Matcher {
    /// Returns the offending node when `node` violates `policy`.
    fn matches<'a>(&self, policy: &Policy, node: SyntaxNode<'a>) -> Option<SyntaxNode<'a>>;

    /// Describes the violation represented by `offending`.
    fn describe(&self, offending: SyntaxNode<'_>) -> ErrorKind;
}

#[cfg(test)]
mod tests;
