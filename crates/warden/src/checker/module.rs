use std::collections::BTreeMap;

use tracing::trace;
use warden_syntax::{NodeKind, ParsedSource, SyntaxNode};

use super::statement_list::{StatementListChecker, validate_statement_count};
use super::{CHECKER_TARGET, Checker, FunctionDeclaration};
use crate::context::ErrorContext;
use crate::error::SanitizerError;
use crate::keyword::Keyword;
use crate::policy::{IdentifierSet, Policy};

const EXPECTED_STATEMENT: &str = "function_declaration";

/// Position in the module body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ModuleState {
    /// Leading `import` statements may still appear.
    ImportsAllowed,
    /// Only function declarations may follow.
    ImportsClosed,
}

/// Accepts a module body: optional leading imports, then only function
/// declarations.
///
/// Every name in the policy's [`IdentifierSet::ReservedFunction`] set must be
/// declared. Imports are only accepted when [`Keyword::Import`] is enabled.
#[derive(Debug)]
pub struct ModuleChecker {
    statements: StatementListChecker,
    functions: BTreeMap<String, FunctionDeclaration>,
}

impl ModuleChecker {
    /// Creates a checker applying `policy`.
    #[must_use]
    pub const fn new(policy: Policy) -> Self {
        Self {
            statements: StatementListChecker::with_label("module", policy),
            functions: BTreeMap::new(),
        }
    }

    /// Returns the functions declared in the last checked module, by name.
    ///
    /// A name declared twice maps to its last declaration.
    #[must_use]
    pub const fn functions(&self) -> &BTreeMap<String, FunctionDeclaration> {
        &self.functions
    }

    /// Returns the top-level statements accepted by the last check.
    #[must_use]
    pub fn statements(&self) -> Vec<SyntaxNode<'_>> {
        self.statements.statements()
    }
}

impl Default for ModuleChecker {
    fn default() -> Self {
        Self::new(Policy::default())
    }
}

impl Checker for ModuleChecker {
    fn check(&mut self, source: &str) -> Result<(), SanitizerError> {
        self.functions.clear();
        let functions = &mut self.functions;
        self.statements.core.check_with(source, |parsed, policy| {
            validate_statement_count(parsed)?;
            collect_functions(parsed, policy, functions)?;
            validate_required_functions(policy, functions)
        })
    }

    fn policy(&self) -> &Policy {
        self.statements.policy()
    }
}

fn collect_functions(
    parsed: &ParsedSource,
    policy: &Policy,
    functions: &mut BTreeMap<String, FunctionDeclaration>,
) -> Result<(), SanitizerError> {
    let mut state = if policy.is_keyword_enabled(Keyword::Import) {
        ModuleState::ImportsAllowed
    } else {
        ModuleState::ImportsClosed
    };
    for statement in parsed.statements() {
        if state == ModuleState::ImportsAllowed && statement.kind() == NodeKind::ImportStatement {
            continue;
        }
        state = ModuleState::ImportsClosed;
        let declaration = FunctionDeclaration::from_node(statement).ok_or_else(|| {
            SanitizerError::token_mismatch(statement.raw_kind(), &[EXPECTED_STATEMENT.to_owned()])
                .with_context(ErrorContext::from_node(statement))
        })?;
        trace!(
            target: CHECKER_TARGET,
            function = declaration.name(),
            parameters = declaration.parameters().len(),
            "module function recorded"
        );
        functions.insert(declaration.name().to_owned(), declaration);
    }
    Ok(())
}

fn validate_required_functions(
    policy: &Policy,
    functions: &BTreeMap<String, FunctionDeclaration>,
) -> Result<(), SanitizerError> {
    policy
        .identifiers(IdentifierSet::ReservedFunction)
        .iter()
        .find(|name| !functions.contains_key(*name))
        .map_or(Ok(()), |missing| {
            Err(SanitizerError::required_function_missing(missing))
        })
}
