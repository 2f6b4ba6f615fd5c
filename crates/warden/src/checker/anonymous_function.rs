use warden_syntax::EntryPoint;

use super::{Checker, CheckerCore};
use crate::error::SanitizerError;
use crate::policy::Policy;

/// Accepts a single function literal: `function () {}`, `function* () {}` or
/// an arrow function. A name on the literal is tolerated.
#[derive(Debug)]
pub struct AnonymousFunctionChecker {
    core: CheckerCore,
}

impl AnonymousFunctionChecker {
    /// Creates a checker applying `policy`.
    #[must_use]
    pub const fn new(policy: Policy) -> Self {
        Self {
            core: CheckerCore::new("anonymous_function", policy, EntryPoint::AnonymousFunction),
        }
    }
}

impl Default for AnonymousFunctionChecker {
    fn default() -> Self {
        Self::new(Policy::default())
    }
}

impl Checker for AnonymousFunctionChecker {
    fn check(&mut self, source: &str) -> Result<(), SanitizerError> {
        self.core.check_with(source, |_, _| Ok(()))
    }

    fn policy(&self) -> &Policy {
        self.core.policy()
    }
}
