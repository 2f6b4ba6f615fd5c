//! Tree-sitter powered JavaScript front end for the Warden sanitizer.
//!
//! This crate turns JavaScript text into a syntax tree that the security
//! checks in `warden` can walk:
//!
//! - **Parsing** via [`JsParser`] for one of four [`EntryPoint`]s
//! - **Strict error reporting**: the first syntax error is reported as a
//!   [`SyntaxError::TokenMismatch`] with the offending token, the tokens the
//!   grammar would have accepted, and its [`Span`]
//! - **Tree access** via [`SyntaxNode`], [`NodeKind`] and [`traverse`]
//!
//! All positions are reported against the text the caller supplied, using
//! one-based lines, zero-based character columns and byte offsets.
//!
//! # Example
//!
//! ```
//! use warden_syntax::{EntryPoint, JsParser, NodeKind};
//!
//! let mut parser = JsParser::new()?;
//! let parsed = parser.parse("x => x + 1", EntryPoint::AnonymousFunction)?;
//! assert_eq!(parsed.entry_node().kind(), NodeKind::ArrowFunction);
//! # Ok::<(), warden_syntax::SyntaxError>(())
//! ```

mod entry_point;
mod error;
mod kind;
mod node;
mod parser;
mod span;
mod traverse;

pub use entry_point::{EntryPoint, EntryPointParseError};
pub use error::{END_OF_INPUT, SyntaxError};
pub use kind::NodeKind;
pub use node::SyntaxNode;
pub use parser::{JsParser, ParsedSource};
pub use span::{LineCol, LineIndex, Span};
pub use traverse::traverse;

#[cfg(test)]
mod tests;
