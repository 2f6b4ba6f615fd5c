use warden_syntax::EntryPoint;

use super::{Checker, CheckerCore};
use crate::error::SanitizerError;
use crate::policy::Policy;

/// Accepts exactly one expression, such as `a + b` or `{ a: 1 }`.
#[derive(Debug)]
pub struct SingleExpressionChecker {
    core: CheckerCore,
}

impl SingleExpressionChecker {
    /// Creates a checker applying `policy`.
    #[must_use]
    pub const fn new(policy: Policy) -> Self {
        Self {
            core: CheckerCore::new("single_expression", policy, EntryPoint::SingleExpression),
        }
    }
}

impl Default for SingleExpressionChecker {
    fn default() -> Self {
        Self::new(Policy::default())
    }
}

impl Checker for SingleExpressionChecker {
    fn check(&mut self, source: &str) -> Result<(), SanitizerError> {
        self.core.check_with(source, |_, _| Ok(()))
    }

    fn policy(&self) -> &Policy {
        self.core.policy()
    }
}
