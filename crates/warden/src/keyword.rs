//! Keywords that a policy can switch on or off.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use warden_syntax::NodeKind;

/// A JavaScript keyword gated by policy.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Deserialize,
    Serialize,
    EnumString,
    Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Keyword {
    /// `async` functions, arrows and methods.
    Async,
    /// `await` expressions and `for await`.
    Await,
    /// `debugger` statements.
    Debugger,
    /// `export` declarations.
    Export,
    /// Static `import`, dynamic `import()` and `import.meta`.
    Import,
    /// `var` declarations.
    Var,
    /// `with` statements.
    With,
    /// `yield` expressions.
    Yield,
}

/// Errors encountered while parsing a [`Keyword`] from text.
pub type KeywordParseError = strum::ParseError;

impl Keyword {
    /// Every gated keyword, in alphabetical order.
    pub const ALL: [Self; 8] = [
        Self::Async,
        Self::Await,
        Self::Debugger,
        Self::Export,
        Self::Import,
        Self::Var,
        Self::With,
        Self::Yield,
    ];

    /// Returns the keyword as written in source.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Async => "async",
            Self::Await => "await",
            Self::Debugger => "debugger",
            Self::Export => "export",
            Self::Import => "import",
            Self::Var => "var",
            Self::With => "with",
            Self::Yield => "yield",
        }
    }

    /// Looks up the keyword spelled exactly as `text`.
    ///
    /// Unlike [`str::parse`], this is case-sensitive, matching the language.
    #[must_use]
    pub fn from_source(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|keyword| keyword.as_str() == text)
    }

    /// Returns the node kinds that can carry this keyword as a direct token.
    #[must_use]
    pub const fn hosts(self) -> &'static [NodeKind] {
        match self {
            Self::Async => &[
                NodeKind::FunctionExpression,
                NodeKind::FunctionDeclaration,
                NodeKind::GeneratorFunction,
                NodeKind::GeneratorFunctionDeclaration,
                NodeKind::ArrowFunction,
                NodeKind::MethodDefinition,
            ],
            Self::Await => &[NodeKind::AwaitExpression, NodeKind::ForInStatement],
            Self::Debugger => &[NodeKind::DebuggerStatement],
            Self::Export => &[NodeKind::ExportStatement],
            Self::Import => &[
                NodeKind::ImportStatement,
                NodeKind::CallExpression,
                NodeKind::MetaProperty,
            ],
            Self::Var => &[NodeKind::VariableDeclaration, NodeKind::ForInStatement],
            Self::With => &[NodeKind::WithStatement],
            Self::Yield => &[NodeKind::YieldExpression],
        }
    }
}
