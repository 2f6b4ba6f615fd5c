use warden_syntax::{NodeKind, SyntaxNode};

use super::Matcher;
use crate::error::ErrorKind;
use crate::policy::{IdentifierSet, Policy};

/// Rejects bindings and assignment targets that rebind a protected name.
///
/// Only binding positions are inspected; reading a built-in such as
/// `Object.keys(x)` is left to [`super::IdentifierMatcher`]. From the
/// position the matcher descends to the identifier that is actually being
/// bound or mutated, e.g. `Object` in `Object.prototype.x = 1` or in
/// `const { a: [Object] } = value`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltInObjectMatcher;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BindingRule {
    /// Reserved names must be listed as mutable.
    Binding,
    /// Reserved names must be listed as reserved functions.
    FunctionName,
}

impl Matcher for BuiltInObjectMatcher {
    fn matches<'a>(&self, policy: &Policy, node: SyntaxNode<'a>) -> Option<SyntaxNode<'a>> {
        let (target, rule) = match node.kind() {
            NodeKind::AssignmentExpression
            | NodeKind::AugmentedAssignmentExpression
            | NodeKind::ForInStatement => (node.child_by_field("left")?, BindingRule::Binding),
            NodeKind::VariableDeclarator | NodeKind::ClassDeclaration | NodeKind::Class => {
                (node.child_by_field("name")?, BindingRule::Binding)
            }
            NodeKind::CatchClause => (node.child_by_field("parameter")?, BindingRule::Binding),
            NodeKind::FunctionDeclaration
            | NodeKind::GeneratorFunctionDeclaration
            | NodeKind::FunctionExpression
            | NodeKind::GeneratorFunction => {
                (node.child_by_field("name")?, BindingRule::FunctionName)
            }
            _ if is_formal_parameter(node) => (node, BindingRule::Binding),
            _ => return None,
        };
        find_protected(policy, target, rule)
    }

    fn describe(&self, offending: SyntaxNode<'_>) -> ErrorKind {
        ErrorKind::IdentifierNotAllowed {
            name: offending.text().to_owned(),
        }
    }
}

fn is_formal_parameter(node: SyntaxNode<'_>) -> bool {
    if !node.is_named() || node.is_extra() {
        return false;
    }
    node.parent().is_some_and(|parent| match parent.kind() {
        NodeKind::FormalParameters => true,
        NodeKind::ArrowFunction => node.is_field_of(parent, "parameter"),
        _ => false,
    })
}

/// Descends from a binding position to the first protected identifier.
///
/// Patterns nest arbitrarily deep, so the search keeps its own stack rather
/// than recursing. Children are pushed in reverse to visit them in source
/// order.
fn find_protected<'a>(
    policy: &Policy,
    target: SyntaxNode<'a>,
    rule: BindingRule,
) -> Option<SyntaxNode<'a>> {
    let mut pending = vec![target];
    while let Some(node) = pending.pop() {
        match node.kind() {
            kind if kind.is_identifier_like() || kind == NodeKind::Undefined => {
                if is_protected(policy, node.text(), rule) {
                    return Some(node);
                }
            }
            NodeKind::MemberExpression | NodeKind::SubscriptExpression => {
                pending.extend(node.child_by_field("object"));
            }
            NodeKind::PairPattern => pending.extend(node.child_by_field("value")),
            NodeKind::AssignmentPattern | NodeKind::ObjectAssignmentPattern => {
                pending.extend(node.child_by_field("left"));
            }
            NodeKind::ParenthesizedExpression
            | NodeKind::Array
            | NodeKind::ArrayPattern
            | NodeKind::ObjectPattern
            | NodeKind::RestPattern => pending.extend(node.named_children().into_iter().rev()),
            _ => {}
        }
    }
    None
}

fn is_protected(policy: &Policy, name: &str, rule: BindingRule) -> bool {
    if policy.is_reserved(name) {
        let allowed = match rule {
            BindingRule::Binding => IdentifierSet::ReservedMutable,
            BindingRule::FunctionName => IdentifierSet::ReservedFunction,
        };
        !policy.contains(allowed, name)
    } else {
        policy.contains(IdentifierSet::BuiltInObject, name)
    }
}
