//! Borrowed view of a node in a parsed JavaScript tree.

use std::fmt;

use crate::kind::NodeKind;
use crate::parser::ParsedSource;
use crate::span::Span;

/// A node in a [`ParsedSource`] tree.
///
/// Text and spans are always reported against the caller's original text,
/// even when the entry point parsed it inside a wrapper.
#[derive(Clone, Copy)]
pub struct SyntaxNode<'a> {
    node: tree_sitter::Node<'a>,
    source: &'a ParsedSource,
    // Tree-sitter finds a parent by descending from the root; walks that
    // already know it record it here.
    known_parent: Option<tree_sitter::Node<'a>>,
}

impl<'a> SyntaxNode<'a> {
    pub(crate) const fn new(node: tree_sitter::Node<'a>, source: &'a ParsedSource) -> Self {
        Self {
            node,
            source,
            known_parent: None,
        }
    }

    pub(crate) const fn with_parent(
        node: tree_sitter::Node<'a>,
        source: &'a ParsedSource,
        parent: Option<tree_sitter::Node<'a>>,
    ) -> Self {
        Self {
            node,
            source,
            known_parent: parent,
        }
    }

    /// Returns the typed kind of this node.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        NodeKind::of(self.node)
    }

    /// Returns the grammar name of this node, e.g. `"identifier"` or `"("`.
    #[must_use]
    pub fn raw_kind(&self) -> &'static str {
        self.node.kind()
    }

    /// Returns `true` for named grammar nodes.
    #[must_use]
    pub fn is_named(&self) -> bool {
        self.node.is_named()
    }

    /// Returns `true` for nodes the grammar allows anywhere, such as comments.
    #[must_use]
    pub fn is_extra(&self) -> bool {
        self.node.is_extra()
    }

    /// Returns the node's source text.
    ///
    /// Wrapper characters added for expression entry points are never part
    /// of the returned text. No line or column is computed.
    #[must_use]
    pub fn text(&self) -> &'a str {
        self.source.text_of(self.node.byte_range())
    }

    /// Returns the node's location in the caller's original text.
    #[must_use]
    pub fn span(&self) -> Span {
        self.source.span_of(self.node.byte_range())
    }

    /// Returns the parent node, if any.
    ///
    /// Nodes handed out by [`crate::traverse`] answer in constant time;
    /// others cost a descent from the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.known_parent
            .or_else(|| self.node.parent())
            .map(|parent| Self::new(parent, self.source))
    }

    /// Returns the child stored under the given grammar field.
    #[must_use]
    pub fn child_by_field(&self, field: &str) -> Option<Self> {
        self.node
            .child_by_field_name(field)
            .map(|child| Self::new(child, self.source))
    }

    /// Returns all direct children, named and anonymous.
    #[must_use]
    pub fn children(&self) -> Vec<Self> {
        let mut cursor = self.node.walk();
        self.node
            .children(&mut cursor)
            .map(|child| Self::new(child, self.source))
            .collect()
    }

    /// Returns the named, non-extra direct children.
    #[must_use]
    pub fn named_children(&self) -> Vec<Self> {
        let mut cursor = self.node.walk();
        self.node
            .named_children(&mut cursor)
            .filter(|child| !child.is_extra())
            .map(|child| Self::new(child, self.source))
            .collect()
    }

    /// Returns the first direct child whose grammar name is `raw_kind`.
    #[must_use]
    pub fn child_of_kind(&self, raw_kind: &str) -> Option<Self> {
        let mut cursor = self.node.walk();
        self.node
            .children(&mut cursor)
            .find(|child| child.kind() == raw_kind)
            .map(|child| Self::new(child, self.source))
    }

    /// Returns the name of the field this node occupies in its parent.
    #[must_use]
    pub fn field_name(&self) -> Option<&'static str> {
        let parent = self.node.parent()?;
        let mut cursor = parent.walk();
        if !cursor.goto_first_child() {
            return None;
        }
        loop {
            if cursor.node() == self.node {
                return cursor.field_name();
            }
            if !cursor.goto_next_sibling() {
                return None;
            }
        }
    }

    /// Returns `true` when this node sits in `parent` under `field`.
    #[must_use]
    pub fn is_field_of(&self, parent: Self, field: &str) -> bool {
        parent
            .child_by_field(field)
            .is_some_and(|child| child.node == self.node)
    }

    /// Returns the parsed source this node belongs to.
    #[must_use]
    pub const fn source(&self) -> &'a ParsedSource {
        self.source
    }

    /// Returns the underlying tree-sitter node.
    #[must_use]
    pub const fn as_tree_sitter(&self) -> tree_sitter::Node<'a> {
        self.node
    }
}

impl PartialEq for SyntaxNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl Eq for SyntaxNode<'_> {}

impl fmt::Debug for SyntaxNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxNode")
            .field("kind", &self.raw_kind())
            .field("span", &self.span())
            .field("text", &self.text())
            .finish()
    }
}
