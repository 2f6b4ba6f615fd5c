//! Tree-sitter JavaScript parsing with strict error reporting.
//!
//! Tree-sitter recovers from errors; this wrapper does not. Any ERROR or
//! MISSING node becomes a [`SyntaxError::TokenMismatch`] describing the first
//! offending token. Expression entry points are parsed as `(` + text + `\n)`
//! and must occupy the whole wrapper.

use std::collections::BTreeSet;
use std::ops::Range;
use std::sync::Arc;

use crate::entry_point::EntryPoint;
use crate::error::{END_OF_INPUT, SyntaxError};
use crate::kind::NodeKind;
use crate::node::SyntaxNode;
use crate::span::{LineIndex, Span};

const WRAPPER_PREFIX: &str = "(";
const WRAPPER_SUFFIX: &str = "\n)";

/// Result of a successful parse.
///
/// Owns the tree and the text it was built from. Nodes borrowed from it
/// report positions relative to the original text, looked up through a
/// [`LineIndex`] built once per parse.
#[derive(Debug)]
pub struct ParsedSource {
    tree: tree_sitter::Tree,
    text_len: usize,
    prefix_len: usize,
    original: Arc<str>,
    line_index: LineIndex,
    entry_point: EntryPoint,
}

impl ParsedSource {
    /// Returns the text the caller supplied.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.original
    }

    /// Returns a shared handle to the text the caller supplied.
    #[must_use]
    pub fn shared_source(&self) -> Arc<str> {
        Arc::clone(&self.original)
    }

    /// Returns the entry point this source was parsed as.
    #[must_use]
    pub const fn entry_point(&self) -> EntryPoint {
        self.entry_point
    }

    /// Returns the parsed syntax tree.
    #[must_use]
    pub const fn tree(&self) -> &tree_sitter::Tree {
        &self.tree
    }

    /// Returns the `program` node at the root of the tree.
    #[must_use]
    pub fn root_node(&self) -> SyntaxNode<'_> {
        SyntaxNode::new(self.tree.root_node(), self)
    }

    /// Returns the node corresponding to the entry point.
    ///
    /// For [`EntryPoint::StatementList`] this is the `program` node. For the
    /// wrapped entry points it is the expression inside the wrapper.
    #[must_use]
    pub fn entry_node(&self) -> SyntaxNode<'_> {
        let root = self.root_node();
        if !self.entry_point.is_wrapped() {
            return root;
        }
        wrapper_parenthesis(root)
            .and_then(|wrapper| wrapper.named_children().first().copied())
            .unwrap_or(root)
    }

    /// Returns the top-level statements, skipping comments.
    #[must_use]
    pub fn statements(&self) -> Vec<SyntaxNode<'_>> {
        self.root_node().named_children()
    }

    pub(crate) fn span_of(&self, range: Range<usize>) -> Span {
        self.line_index.span(self.source(), self.to_original(range))
    }

    /// Slices a tree range without computing any line or column.
    pub(crate) fn text_of(&self, range: Range<usize>) -> &str {
        self.slice(self.to_original(range))
    }

    pub(crate) fn slice(&self, range: Range<usize>) -> &str {
        self.source().get(range).unwrap_or_default()
    }

    fn to_original(&self, range: Range<usize>) -> Range<usize> {
        let len = self.original.len();
        let end = range.end.saturating_sub(self.prefix_len).min(len);
        let start = range.start.saturating_sub(self.prefix_len).min(end);
        start..end
    }
}

/// Tree-sitter parser configured with the JavaScript grammar.
pub struct JsParser {
    inner: tree_sitter::Parser,
    language: tree_sitter::Language,
}

impl JsParser {
    /// Creates a new JavaScript parser.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar is incompatible with the linked
    /// Tree-sitter runtime.
    pub fn new() -> Result<Self, SyntaxError> {
        let language: tree_sitter::Language = tree_sitter_javascript::LANGUAGE.into();
        let mut inner = tree_sitter::Parser::new();
        inner
            .set_language(&language)
            .map_err(|e| SyntaxError::parser_init(e.to_string()))?;
        Ok(Self { inner, language })
    }

    /// Parses `source` as the given entry point.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::TokenMismatch`] for the first syntax error or
    /// shape violation, and [`SyntaxError::ParseError`] if Tree-sitter
    /// produced no tree.
    pub fn parse(
        &mut self,
        source: &str,
        entry_point: EntryPoint,
    ) -> Result<ParsedSource, SyntaxError> {
        let parsed = self.parse_tree(source, entry_point)?;
        let error = first_error(parsed.tree.root_node());

        if entry_point.is_wrapped() {
            // Errors pinned on the synthetic `(` say nothing about position.
            let error_start = error
                .filter(|node| !blames_wrapper(&parsed, *node))
                .map_or(usize::MAX, |node| node.start_byte());
            if let Some(close) =
                premature_close(&parsed).filter(|close| close.start_byte() <= error_start)
            {
                return Err(SyntaxError::token_mismatch(
                    close.kind(),
                    vec![END_OF_INPUT.to_owned()],
                    parsed.span_of(close.byte_range()),
                ));
            }
        }
        if let Some(error) = error {
            return Err(self.describe_error(&parsed, error));
        }
        if entry_point.is_wrapped() {
            check_wrapped_shape(&parsed)?;
        }
        Ok(parsed)
    }

    fn parse_tree(
        &mut self,
        source: &str,
        entry_point: EntryPoint,
    ) -> Result<ParsedSource, SyntaxError> {
        let (text, prefix_len) = if entry_point.is_wrapped() {
            (
                format!("{WRAPPER_PREFIX}{source}{WRAPPER_SUFFIX}"),
                WRAPPER_PREFIX.len(),
            )
        } else {
            (source.to_owned(), 0)
        };
        let tree = self
            .inner
            .parse(&text, None)
            .ok_or_else(|| SyntaxError::parse(entry_point, "parsing failed"))?;
        Ok(ParsedSource {
            tree,
            text_len: text.len(),
            prefix_len,
            original: Arc::from(source),
            line_index: LineIndex::new(source),
            entry_point,
        })
    }

    fn describe_error(
        &mut self,
        parsed: &ParsedSource,
        error: tree_sitter::Node<'_>,
    ) -> SyntaxError {
        if error.is_missing() {
            let next = next_token(parsed.tree.root_node(), error.end_byte());
            let (token, span) = next.map_or_else(
                || {
                    (
                        END_OF_INPUT.to_owned(),
                        parsed.span_of(error.start_byte()..error.end_byte()),
                    )
                },
                |node| token_at(parsed, node),
            );
            return SyntaxError::token_mismatch(token, vec![error.kind().to_owned()], span);
        }

        let leaf = first_leaf(error);
        if blames_wrapper(parsed, error) {
            return self.describe_rejected_wrapper(parsed, leaf);
        }
        let reported = if leaf.end_byte() <= parsed.prefix_len {
            next_token(parsed.tree.root_node(), parsed.prefix_len).unwrap_or(leaf)
        } else {
            leaf
        };
        let (token, span) = token_at(parsed, reported);
        let expected = expected_tokens(&self.language, leaf.parse_state());
        SyntaxError::token_mismatch(token, expected, span)
    }

    /// Locates an error tree-sitter recovered from by discarding the wrapper.
    ///
    /// The caller's text is parsed bare. Its own first syntax error is the
    /// offender if it has one; otherwise it is the first token that cannot
    /// continue the leading expression.
    fn describe_rejected_wrapper(
        &mut self,
        wrapped: &ParsedSource,
        wrapper: tree_sitter::Node<'_>,
    ) -> SyntaxError {
        let bare = match self.parse_tree(wrapped.source(), EntryPoint::StatementList) {
            Ok(bare) => bare,
            Err(error) => return error,
        };
        if let Some(error) = first_error(bare.tree.root_node()) {
            return self.describe_error(&bare, error);
        }

        let expression_end = bare
            .statements()
            .first()
            .filter(|statement| statement.kind() == NodeKind::ExpressionStatement)
            .and_then(|statement| statement.named_children().first().copied())
            .map(|expression| expression.as_tree_sitter().end_byte());
        let (from, expected) = expression_end.map_or_else(
            || (0, expected_tokens(&self.language, wrapper.next_parse_state())),
            |end| (end, vec![END_OF_INPUT.to_owned()]),
        );
        let (token, span) = next_token(bare.tree.root_node(), from).map_or_else(
            || (END_OF_INPUT.to_owned(), bare.span_of(from..from)),
            |node| token_at(&bare, node),
        );
        SyntaxError::token_mismatch(token, expected, span)
    }
}

/// `true` when an `ERROR` node starts with the synthetic `(` itself.
fn blames_wrapper(parsed: &ParsedSource, error: tree_sitter::Node<'_>) -> bool {
    parsed.prefix_len > 0
        && !error.is_missing()
        && first_leaf(error).end_byte() <= parsed.prefix_len
}

/// Finds a `)` in the caller's text that closes the wrapper early.
///
/// Brackets are matched over the leaf tokens, so parentheses inside
/// strings, comments, regular expressions and templates are ignored. A
/// mismatched closer is an ordinary syntax error and ends the search.
fn premature_close(parsed: &ParsedSource) -> Option<tree_sitter::Node<'_>> {
    let user_start = parsed.prefix_len;
    let user_end = user_start.saturating_add(parsed.original.len());
    let mut open: Vec<&'static str> = Vec::new();
    let mut cursor = parsed.tree.root_node().walk();
    loop {
        let node = cursor.node();
        if node.child_count() == 0 {
            if node.start_byte() >= user_end {
                return None;
            }
            if node.start_byte() >= user_start && !node.is_missing() && !node.is_extra() {
                match node.kind() {
                    "(" | "[" | "{" | "${" => open.push(node.kind()),
                    ")" if open.is_empty() => return Some(node),
                    closer @ (")" | "]" | "}") => {
                        if open.pop().map(closing_bracket) != Some(closer) {
                            return None;
                        }
                    }
                    _ => {}
                }
            }
        } else if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return None;
            }
        }
    }
}

fn closing_bracket(open: &str) -> &'static str {
    match open {
        "(" => ")",
        "[" => "]",
        _ => "}",
    }
}

fn token_at(parsed: &ParsedSource, node: tree_sitter::Node<'_>) -> (String, Span) {
    let span = parsed.span_of(node.byte_range());
    let original_end = parsed.source().len();
    let token = if node.start_byte() >= parsed.prefix_len.saturating_add(original_end)
        || span.is_empty()
    {
        END_OF_INPUT.to_owned()
    } else {
        parsed.slice(span.byte_range()).to_owned()
    };
    (token, span)
}

fn expected_tokens(language: &tree_sitter::Language, state: u16) -> Vec<String> {
    let Some(lookahead) = language.lookahead_iterator(state) else {
        return Vec::new();
    };
    let names: BTreeSet<String> = lookahead
        .filter_map(|symbol| {
            if symbol == 0 {
                return Some(END_OF_INPUT);
            }
            if !language.node_kind_is_visible(symbol) {
                return None;
            }
            language
                .node_kind_for_id(symbol)
                .filter(|name| *name != "ERROR")
        })
        .map(str::to_owned)
        .collect();
    names.into_iter().collect()
}

fn first_error(root: tree_sitter::Node<'_>) -> Option<tree_sitter::Node<'_>> {
    if !root.has_error() {
        return None;
    }
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return None;
            }
        }
    }
}

fn first_leaf(node: tree_sitter::Node<'_>) -> tree_sitter::Node<'_> {
    let mut current = node;
    while let Some(child) = current.child(0) {
        current = child;
    }
    current
}

fn next_token(root: tree_sitter::Node<'_>, offset: usize) -> Option<tree_sitter::Node<'_>> {
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        let is_leaf = node.child_count() == 0;
        if is_leaf
            && node.start_byte() >= offset
            && node.end_byte() > node.start_byte()
            && !node.is_extra()
        {
            return Some(node);
        }
        if !is_leaf && node.end_byte() > offset && cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return None;
            }
        }
    }
}

/// Finds the wrapper's parenthesised expression: the leftmost node at byte 0.
fn wrapper_parenthesis(root: SyntaxNode<'_>) -> Option<SyntaxNode<'_>> {
    let mut current = root.as_tree_sitter();
    loop {
        if current.start_byte() != 0 {
            return None;
        }
        if current.kind() == "parenthesized_expression" {
            return Some(SyntaxNode::new(current, root.source()));
        }
        current = current.child(0)?;
    }
}

fn check_wrapped_shape(parsed: &ParsedSource) -> Result<(), SyntaxError> {
    let root = parsed.root_node();
    let wrapper = wrapper_parenthesis(root)
        .ok_or_else(|| SyntaxError::parse(parsed.entry_point, "missing expression wrapper"))?;
    let wrapper_node = wrapper.as_tree_sitter();

    if wrapper_node.end_byte() != parsed.text_len {
        // A `)` inside the text closed the wrapper early.
        let closing = wrapper.children().last().copied().unwrap_or(wrapper);
        return Err(SyntaxError::token_mismatch(
            closing.raw_kind(),
            vec![END_OF_INPUT.to_owned()],
            closing.span(),
        ));
    }

    let inner = wrapper
        .named_children()
        .first()
        .copied()
        .ok_or_else(|| SyntaxError::parse(parsed.entry_point, "empty expression"))?;

    match parsed.entry_point {
        EntryPoint::SingleExpression if inner.kind() == NodeKind::SequenceExpression => {
            let comma = inner.child_of_kind(",").unwrap_or(inner);
            Err(SyntaxError::token_mismatch(
                comma.raw_kind(),
                vec![END_OF_INPUT.to_owned()],
                comma.span(),
            ))
        }
        EntryPoint::AnonymousFunction if !inner.kind().is_function_expression() => {
            Err(SyntaxError::token_mismatch(
                inner.raw_kind(),
                [
                    NodeKind::ArrowFunction,
                    NodeKind::FunctionExpression,
                    NodeKind::GeneratorFunction,
                ]
                .iter()
                .map(|kind| kind.as_str().to_owned())
                .collect(),
                inner.span(),
            ))
        }
        _ => Ok(()),
    }
}
