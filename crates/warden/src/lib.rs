//! Pre-execution security checks for guest JavaScript.
//!
//! Before a host hands untrusted script text to its embedded engine, Warden
//! parses it and walks the syntax tree to reject constructs that could
//! escape the sandbox: rebinding built-in objects, reaching for disallowed
//! identifiers such as `eval` or `__proto__`, and keywords the host has not
//! switched on.
//!
//! # Architecture
//!
//! - A sealed [`Policy`] lists what guest code may touch. Start from
//!   [`Policy::default`], the strictest policy, and adjust it through a
//!   [`PolicyBuilder`] or a JSON [`PolicyConfig`].
//! - Three stateless [`matcher`]s decide whether one syntax node violates the
//!   policy.
//! - A single pre-order walk applies the matchers and stops at the first
//!   violation.
//! - Five [`checker`]s run parse, walk and shape validation for one grammar
//!   entry point each, from a single expression up to a module body.
//!
//! Every failure is a [`SanitizerError`] with a stable numeric code, the
//! contract message and, where a node can be blamed, an [`ErrorContext`].
//!
//! # Example
//!
//! ```
//! use warden::{Checker, Keyword, ModuleChecker, Policy};
//!
//! let mut checker = ModuleChecker::default();
//! assert!(checker.check("function main() { return 1; }").is_ok());
//!
//! let error = checker
//!     .check("function main() { eval('1'); }")
//!     .unwrap_err();
//! assert_eq!(error.to_string(), "Identifier eval is not allowed.");
//!
//! let policy = Policy::default()
//!     .to_builder()
//!     .enable_keyword(Keyword::Import)
//!     .seal();
//! let mut checker = ModuleChecker::new(policy);
//! assert!(checker.check("import { x } from 'x.mjs'; function main() {}").is_ok());
//! ```

pub mod checker;
mod context;
mod error;
mod keyword;
mod listener;
pub mod matcher;
pub mod policy;

#[cfg(test)]
mod tests;

pub use self::checker::{
    AnonymousFunctionChecker, Checker, ExpressionSequenceChecker, FunctionDeclaration,
    ModuleChecker, SingleExpressionChecker, StatementListChecker,
};
pub use self::context::ErrorContext;
pub use self::error::{ErrorKind, SanitizerError};
pub use self::keyword::{Keyword, KeywordParseError};
pub use self::listener::{Listener, ListenerKind, ListenerKindParseError, Violation};
pub use self::policy::{
    ConfigError, IdentifierList, IdentifierSet, Policy, PolicyBuilder, PolicyConfig,
    ReservedIdentifierMatcher,
};
