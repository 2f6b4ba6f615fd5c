use warden_syntax::{EntryPoint, NodeKind, SyntaxNode};

use super::{Checker, CheckerCore, validate_child_count_at_least};
use crate::error::SanitizerError;
use crate::policy::Policy;

/// Accepts one or more comma-separated expressions.
#[derive(Debug)]
pub struct ExpressionSequenceChecker {
    core: CheckerCore,
}

impl ExpressionSequenceChecker {
    /// Creates a checker applying `policy`.
    #[must_use]
    pub const fn new(policy: Policy) -> Self {
        Self {
            core: CheckerCore::new(
                "expression_sequence",
                policy,
                EntryPoint::ExpressionSequence,
            ),
        }
    }
}

impl Default for ExpressionSequenceChecker {
    fn default() -> Self {
        Self::new(Policy::default())
    }
}

impl Checker for ExpressionSequenceChecker {
    fn check(&mut self, source: &str) -> Result<(), SanitizerError> {
        self.core.check_with(source, |parsed, _| {
            let entry = parsed.entry_node();
            validate_child_count_at_least(expression_count(entry), 1, entry)
        })
    }

    fn policy(&self) -> &Policy {
        self.core.policy()
    }
}

/// Counts the expressions of a possibly nested comma sequence.
fn expression_count(node: SyntaxNode<'_>) -> usize {
    if node.kind() != NodeKind::SequenceExpression {
        return 1;
    }
    node.named_children().into_iter().map(expression_count).sum()
}
