//! Unit tests for warden-syntax.

use rstest::{fixture, rstest};

use crate::{
    END_OF_INPUT, EntryPoint, JsParser, LineCol, NodeKind, SyntaxError, SyntaxNode, traverse,
};

#[fixture]
fn parser() -> JsParser {
    JsParser::new().expect("parser init")
}

fn find<'a>(root: SyntaxNode<'a>, raw_kind: &str, text: &str) -> SyntaxNode<'a> {
    let mut found = None;
    traverse(root, |node, _| {
        if found.is_none() && node.raw_kind() == raw_kind && node.text() == text {
            found = Some(node);
        }
        Ok::<(), ()>(())
    })
    .expect("walk");
    found.unwrap_or_else(|| panic!("no {raw_kind} node with text {text:?}"))
}

// =============================================================================
// Node Access Tests
// =============================================================================

#[rstest]
fn field_name_reports_parent_field(mut parser: JsParser) {
    let parsed = parser
        .parse("obj.prop = value;", EntryPoint::StatementList)
        .expect("parse");
    let member = find(parsed.root_node(), "member_expression", "obj.prop");
    assert_eq!(member.field_name(), Some("left"));

    let object = member.child_by_field("object").expect("object field");
    assert!(object.is_field_of(member, "object"));
    assert!(!object.is_field_of(member, "property"));
    assert_eq!(object.kind(), NodeKind::Identifier);
}

#[rstest]
fn arrow_function_single_parameter_field(mut parser: JsParser) {
    let parsed = parser
        .parse("x => x", EntryPoint::AnonymousFunction)
        .expect("parse");
    let arrow = parsed.entry_node();
    let parameter = arrow.child_by_field("parameter").expect("parameter");
    assert_eq!(parameter.text(), "x");
    assert_eq!(parameter.span().byte_range(), 0..1);
}

#[rstest]
fn child_of_kind_finds_anonymous_tokens(mut parser: JsParser) {
    let parsed = parser
        .parse("async function f() {}", EntryPoint::StatementList)
        .expect("parse");
    let statement = parsed.statements().first().copied().expect("statement");
    assert_eq!(statement.kind(), NodeKind::FunctionDeclaration);
    assert!(statement.child_of_kind("async").is_some());
    assert!(statement.child_of_kind("*").is_none());
}

#[rstest]
fn comments_are_extras(mut parser: JsParser) {
    let parsed = parser
        .parse("/* c */ a;", EntryPoint::StatementList)
        .expect("parse");
    let comment = parsed
        .root_node()
        .children()
        .into_iter()
        .find(SyntaxNode::is_extra)
        .expect("comment");
    assert_eq!(comment.kind(), NodeKind::Comment);
    assert_eq!(parsed.statements().len(), 1);
}

// =============================================================================
// Span Mapping Tests
// =============================================================================

#[rstest]
fn spans_in_wrapped_sources_map_to_original_text(mut parser: JsParser) {
    let parsed = parser
        .parse("a,\n  bb", EntryPoint::ExpressionSequence)
        .expect("parse");
    let bb = find(parsed.root_node(), "identifier", "bb");
    let span = bb.span();
    assert_eq!(span.byte_range(), 5..7);
    assert_eq!(span.start, LineCol::new(2, 2));
    assert_eq!(span.end, LineCol::new(2, 4));
}

#[rstest]
fn wrapper_characters_are_never_reported(mut parser: JsParser) {
    let source = "(a)";
    let parsed = parser
        .parse(source, EntryPoint::SingleExpression)
        .expect("parse");
    let mut widest = 0..0;
    traverse(parsed.root_node(), |node, _| {
        let range = node.span().byte_range();
        if range.len() > widest.len() {
            widest = range;
        }
        Ok::<(), ()>(())
    })
    .expect("walk");
    assert_eq!(widest, 0..source.len());
}

// =============================================================================
// Error Reporting Tests
// =============================================================================

#[rstest]
#[case(EntryPoint::StatementList, "let a = ;")]
#[case(EntryPoint::StatementList, "function (")]
#[case(EntryPoint::SingleExpression, "a +* b")]
#[case(EntryPoint::ExpressionSequence, "a, [b")]
fn error_token_matches_its_span(
    mut parser: JsParser,
    #[case] entry_point: EntryPoint,
    #[case] source: &str,
) {
    let err = parser.parse(source, entry_point).expect_err("syntax error");
    let SyntaxError::TokenMismatch { token, span, .. } = err else {
        panic!("expected a token mismatch");
    };
    assert!(span.end_byte <= source.len());
    if token != END_OF_INPUT {
        assert_eq!(source.get(span.byte_range()), Some(token.as_str()));
    }
}

#[rstest]
fn expected_tokens_are_sorted_and_unique(mut parser: JsParser) {
    let err = parser
        .parse("let a = ;", EntryPoint::StatementList)
        .expect_err("syntax error");
    let SyntaxError::TokenMismatch { expected, .. } = err else {
        panic!("expected a token mismatch");
    };
    let mut sorted = expected.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(expected, sorted);
}

#[rstest]
fn unterminated_wrapped_input_reports_end_of_input(mut parser: JsParser) {
    let err = parser
        .parse("f(", EntryPoint::SingleExpression)
        .expect_err("syntax error");
    let SyntaxError::TokenMismatch { span, .. } = err else {
        panic!("expected a token mismatch");
    };
    assert!(span.start_byte <= 2);
}

#[test]
fn end_of_input_placeholder() {
    assert_eq!(END_OF_INPUT, "<EOF>");
}
