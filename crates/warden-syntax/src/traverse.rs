//! Depth-first, pre-order walks over a syntax tree.

use crate::node::SyntaxNode;

/// Visits `root` and every descendant in source order, parents first.
///
/// The visitor receives each node together with the grammar field it
/// occupies in its parent (when `root` itself is visited the field is
/// `None`). The first error returned by the visitor stops the walk and is
/// propagated.
///
/// The walk keeps its own ancestor stack, so nesting depth never grows the
/// call stack and [`SyntaxNode::parent`] is constant time on visited nodes.
///
/// # Errors
///
/// Returns whatever error the visitor produces first.
pub fn traverse<'a, E, F>(root: SyntaxNode<'a>, mut visit: F) -> Result<(), E>
where
    F: FnMut(SyntaxNode<'a>, Option<&'static str>) -> Result<(), E>,
{
    let source = root.source();
    let mut cursor = root.as_tree_sitter().walk();
    let mut ancestors: Vec<tree_sitter::Node<'a>> = Vec::new();
    let mut field = None;
    loop {
        let node = cursor.node();
        let visited = ancestors.last().copied().map_or(root, |parent| {
            SyntaxNode::with_parent(node, source, Some(parent))
        });
        visit(visited, field)?;
        if cursor.goto_first_child() {
            ancestors.push(node);
            field = cursor.field_name();
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                field = cursor.field_name();
                break;
            }
            if !cursor.goto_parent() {
                return Ok(());
            }
            ancestors.pop();
        }
    }
}
