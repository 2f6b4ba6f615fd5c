//! Typed names for the grammar nodes the security checks look at.
//!
//! Only the node kinds that matter to the checks are modelled. Everything
//! else named collapses into [`NodeKind::Other`] and every anonymous token
//! into [`NodeKind::Token`]; [`crate::SyntaxNode::raw_kind`] still exposes
//! the grammar name for those.

use strum::{EnumString, IntoStaticStr};

/// Kind of a JavaScript syntax node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[non_exhaustive]
pub enum NodeKind {
    /// Root of a parse.
    Program,
    /// A tree-sitter recovery node.
    #[strum(serialize = "ERROR")]
    Error,
    /// A comment, which tree-sitter attaches as an extra.
    Comment,

    /// Plain identifier reference or binding.
    Identifier,
    /// Identifier after `.` or as an object/class member name.
    PropertyIdentifier,
    /// `{ a }` in an object literal.
    ShorthandPropertyIdentifier,
    /// `{ a }` in a destructuring pattern.
    ShorthandPropertyIdentifierPattern,
    /// Label of a labelled statement, `break` or `continue`.
    StatementIdentifier,
    /// The `undefined` global, which the grammar names separately.
    Undefined,

    /// `a = b`.
    AssignmentExpression,
    /// `a += b` and friends.
    AugmentedAssignmentExpression,
    /// One `name = value` entry of a declaration.
    VariableDeclarator,
    /// `var` declaration.
    VariableDeclaration,
    /// `let` or `const` declaration.
    LexicalDeclaration,
    /// `catch (param) { … }`.
    CatchClause,
    /// `class Name { … }` statement.
    ClassDeclaration,
    /// `class [Name] { … }` expression.
    Class,
    /// `function name() {}` statement.
    FunctionDeclaration,
    /// `function* name() {}` statement.
    GeneratorFunctionDeclaration,
    /// `function [name]() {}` expression.
    FunctionExpression,
    /// `function* [name]() {}` expression.
    GeneratorFunction,
    /// `(params) => body`.
    ArrowFunction,
    /// Method in a class body or object literal.
    MethodDefinition,
    /// Parenthesised parameter list.
    FormalParameters,

    /// `a.b`.
    MemberExpression,
    /// `a[b]`.
    SubscriptExpression,
    /// `[a, b]`.
    Array,
    /// `[a, b]` on the binding side.
    ArrayPattern,
    /// `{ a, b }` on the binding side.
    ObjectPattern,
    /// `{ key: value }` on the binding side.
    PairPattern,
    /// `a = default` on the binding side.
    AssignmentPattern,
    /// `{ a = default }` on the binding side.
    ObjectAssignmentPattern,
    /// `...rest` on the binding side.
    RestPattern,
    /// `( … )`.
    ParenthesizedExpression,
    /// `a, b`.
    SequenceExpression,

    /// An expression used as a statement.
    ExpressionStatement,
    /// `await value`.
    AwaitExpression,
    /// `yield value`.
    YieldExpression,
    /// `for (… in …)`, `for (… of …)` and `for await`.
    ForInStatement,
    /// `debugger;`.
    DebuggerStatement,
    /// `export …`.
    ExportStatement,
    /// `import … from …`.
    ImportStatement,
    /// `f(…)`, including dynamic `import(…)`.
    CallExpression,
    /// `new.target` and `import.meta`.
    MetaProperty,
    /// `with (obj) { … }`.
    WithStatement,

    /// Any other named node.
    #[strum(disabled)]
    Other,
    /// An anonymous token such as punctuation or a keyword.
    #[strum(disabled)]
    Token,
}

impl NodeKind {
    /// Classifies a tree-sitter node.
    #[must_use]
    pub fn of(node: tree_sitter::Node<'_>) -> Self {
        if node.is_error() {
            return Self::Error;
        }
        if !node.is_named() {
            return Self::Token;
        }
        node.kind().parse().unwrap_or(Self::Other)
    }

    /// Returns the grammar name of this kind.
    ///
    /// [`NodeKind::Other`] and [`NodeKind::Token`] have no single grammar
    /// name and return `"other"` and `"token"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Other => "other",
            Self::Token => "token",
            named => named.into(),
        }
    }

    /// Returns `true` for the identifier-like kinds that carry a name.
    #[must_use]
    pub const fn is_identifier_like(self) -> bool {
        matches!(
            self,
            Self::Identifier
                | Self::PropertyIdentifier
                | Self::ShorthandPropertyIdentifier
                | Self::ShorthandPropertyIdentifierPattern
                | Self::StatementIdentifier
        )
    }

    /// Returns `true` for function-valued expressions.
    #[must_use]
    pub const fn is_function_expression(self) -> bool {
        matches!(
            self,
            Self::FunctionExpression | Self::GeneratorFunction | Self::ArrowFunction
        )
    }

    /// Returns `true` for function declarations, generator or not.
    #[must_use]
    pub const fn is_function_declaration(self) -> bool {
        matches!(
            self,
            Self::FunctionDeclaration | Self::GeneratorFunctionDeclaration
        )
    }
}
