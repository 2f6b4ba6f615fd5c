use warden_syntax::{EntryPoint, ParsedSource, SyntaxNode};

use super::{Checker, CheckerCore, validate_child_count_at_least};
use crate::error::SanitizerError;
use crate::policy::Policy;

/// Accepts a script: one or more top-level statements.
#[derive(Debug)]
pub struct StatementListChecker {
    pub(super) core: CheckerCore,
}

impl StatementListChecker {
    /// Creates a checker applying `policy`.
    #[must_use]
    pub const fn new(policy: Policy) -> Self {
        Self::with_label("statement_list", policy)
    }

    pub(super) const fn with_label(label: &'static str, policy: Policy) -> Self {
        Self {
            core: CheckerCore::new(label, policy, EntryPoint::StatementList),
        }
    }

    /// Returns the top-level statements accepted by the last check.
    ///
    /// Empty until a check has parsed and walked successfully.
    #[must_use]
    pub fn statements(&self) -> Vec<SyntaxNode<'_>> {
        self.core
            .parsed()
            .map(ParsedSource::statements)
            .unwrap_or_default()
    }
}

impl Default for StatementListChecker {
    fn default() -> Self {
        Self::new(Policy::default())
    }
}

impl Checker for StatementListChecker {
    fn check(&mut self, source: &str) -> Result<(), SanitizerError> {
        self.core
            .check_with(source, |parsed, _| validate_statement_count(parsed))
    }

    fn policy(&self) -> &Policy {
        self.core.policy()
    }
}

/// Requires at least one statement; comments alone do not count.
pub(super) fn validate_statement_count(parsed: &ParsedSource) -> Result<(), SanitizerError> {
    validate_child_count_at_least(parsed.statements().len(), 1, parsed.root_node())
}
