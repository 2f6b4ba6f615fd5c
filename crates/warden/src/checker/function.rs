use warden_syntax::{NodeKind, Span, SyntaxNode};

use crate::context::ErrorContext;
use crate::error::SanitizerError;

/// A top-level function recorded by the [`super::ModuleChecker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDeclaration {
    name: String,
    parameters: Vec<String>,
    rest_parameter: Option<String>,
    context: ErrorContext,
}

impl FunctionDeclaration {
    /// Reads a `function` or `function*` declaration; other nodes yield `None`.
    #[must_use]
    pub fn from_node(node: SyntaxNode<'_>) -> Option<Self> {
        if !node.kind().is_function_declaration() {
            return None;
        }
        let name = node.child_by_field("name")?.text().to_owned();
        let mut parameters = Vec::new();
        let mut rest_parameter = None;
        let declared = node
            .child_by_field("parameters")
            .map(|list| list.named_children())
            .unwrap_or_default();
        for parameter in declared {
            let text = parameter.text().to_owned();
            if parameter.kind() == NodeKind::RestPattern {
                rest_parameter = Some(text);
            } else {
                parameters.push(text);
            }
        }
        Some(Self {
            name,
            parameters,
            rest_parameter,
            context: ErrorContext::from_node(node),
        })
    }

    /// Returns the declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the source text of each formal parameter, excluding a
    /// trailing `...rest` parameter.
    #[must_use]
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    /// Returns the source text of the `...rest` parameter, if declared.
    #[must_use]
    pub fn rest_parameter(&self) -> Option<&str> {
        self.rest_parameter.as_deref()
    }

    /// Returns the span of the whole declaration.
    #[must_use]
    pub const fn span(&self) -> Span {
        self.context.span()
    }

    /// Returns the declaration's location in the checked text.
    #[must_use]
    pub const fn context(&self) -> &ErrorContext {
        &self.context
    }

    /// Requires exactly `expected` formal parameters. A `...rest` parameter
    /// is not counted.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ErrorKind::ArgumentCountMismatch`] carrying the
    /// declaration's context.
    pub fn validate_argument_count_equals(&self, expected: usize) -> Result<(), SanitizerError> {
        let actual = self.parameters.len();
        if actual == expected {
            return Ok(());
        }
        Err(SanitizerError::argument_count_mismatch(actual, expected)
            .with_context(self.context.clone()))
    }
}
