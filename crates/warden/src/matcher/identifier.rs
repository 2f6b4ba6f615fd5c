use warden_syntax::{NodeKind, SyntaxNode};

use super::Matcher;
use crate::error::ErrorKind;
use crate::policy::{IdentifierSet, Policy};

/// Rejects identifiers the policy denies outright.
///
/// A name matching the reserved convention must be listed as reserved;
/// any other name must not be disallowed.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentifierMatcher;

impl Matcher for IdentifierMatcher {
    fn matches<'a>(&self, policy: &Policy, node: SyntaxNode<'a>) -> Option<SyntaxNode<'a>> {
        let kind = node.kind();
        if !kind.is_identifier_like() && kind != NodeKind::Undefined {
            return None;
        }
        let name = node.text();
        let offending = if policy.is_reserved(name) {
            !policy.contains(IdentifierSet::Reserved, name)
        } else {
            policy.contains(IdentifierSet::Disallowed, name)
        };
        offending.then_some(node)
    }

    fn describe(&self, offending: SyntaxNode<'_>) -> ErrorKind {
        ErrorKind::IdentifierNotAllowed {
            name: offending.text().to_owned(),
        }
    }
}
