//! Unit tests for the policy matchers.

use rstest::{fixture, rstest};
use warden_syntax::{EntryPoint, JsParser, traverse};

use super::*;
use crate::keyword::Keyword;
use crate::policy::{IdentifierSet, PolicyBuilder};

#[fixture]
fn parser() -> JsParser {
    JsParser::new().expect("parser init")
}

/// Returns the text of the first node `matcher` flags in `source`.
fn first_offending(
    parser: &mut JsParser,
    matcher: &impl Matcher,
    policy: &Policy,
    source: &str,
) -> Option<String> {
    let parsed = parser
        .parse(source, EntryPoint::StatementList)
        .expect("parse");
    traverse(parsed.root_node(), |node, _| {
        matcher
            .matches(policy, node)
            .map_or(Ok(()), |hit| Err(hit.text().to_owned()))
    })
    .err()
}

fn dollar_policy() -> Policy {
    PolicyBuilder::new()
        .reserved_identifier_prefix("$")
        .add_identifier(IdentifierSet::Reserved, "$c")
        .add_identifier(IdentifierSet::ReservedMutable, "$c")
        .add_identifier(IdentifierSet::Reserved, "$main")
        .add_identifier(IdentifierSet::ReservedFunction, "$main")
        .seal()
}

fn all_keywords_except(disabled: Keyword) -> Policy {
    Keyword::ALL
        .into_iter()
        .fold(PolicyBuilder::new(), |builder, keyword| {
            builder.set_keyword_enabled(keyword, keyword != disabled)
        })
        .seal()
}

#[rstest]
#[case("Object = 1;")]
#[case("Object += 1;")]
#[case("Object.a = 1;")]
#[case("Object.prototype.a = 1;")]
#[case("Object[0] = 1;")]
#[case("(Object).a = 1;")]
#[case("[a, Object] = b;")]
#[case("let Object = 1;")]
#[case("const { a: [Object] } = b;")]
#[case("const { Object } = b;")]
#[case("class Object {}")]
#[case("const a = class Object {};")]
#[case("function Object() {}")]
#[case("function* Object() {}")]
#[case("const a = function Object() {};")]
#[case("a = function* Object() {};")]
#[case("try {} catch (Object) {}")]
#[case("(Object) => {};")]
#[case("Object => 1;")]
#[case("function f(a, ...Object) {}")]
#[case("function f(Object = 1) {}")]
#[case("for (Object in a) {}")]
fn built_in_bindings_are_flagged(mut parser: JsParser, #[case] source: &str) {
    let hit = first_offending(&mut parser, &BuiltInObjectMatcher, &Policy::default(), source);
    assert_eq!(hit.as_deref(), Some("Object"), "source: {source}");
}

#[rstest]
#[case("const a = Object;")]
#[case("Object.keys(a);")]
#[case("a.Object = 1;")]
#[case("a = { Object: 1 };")]
#[case("function main(a, b) {}")]
#[case("const f = function named() {};")]
#[case("const g = function* () {};")]
#[case("let a = 1;")]
fn built_in_reads_and_other_bindings_pass(mut parser: JsParser, #[case] source: &str) {
    let hit = first_offending(&mut parser, &BuiltInObjectMatcher, &Policy::default(), source);
    assert_eq!(hit, None, "source: {source}");
}

#[rstest]
fn deeply_nested_patterns_are_searched_without_recursion(mut parser: JsParser) {
    let depth = 20_000;
    let nested = |name: &str| format!("{}{name}{} = b;", "[".repeat(depth), "]".repeat(depth));
    let policy = Policy::default();

    let hit = first_offending(&mut parser, &BuiltInObjectMatcher, &policy, &nested("Object"));
    assert_eq!(hit.as_deref(), Some("Object"));
    let clean = first_offending(&mut parser, &BuiltInObjectMatcher, &policy, &nested("a"));
    assert_eq!(clean, None);
}

#[rstest]
#[case("$c.a = 1;", None)]
#[case("$c = 1;", None)]
#[case("$abc.a = 1;", Some("$abc"))]
#[case("let $abc = 1;", Some("$abc"))]
#[case("function $main() {}", None)]
#[case("function $c() {}", Some("$c"))]
#[case("let $main = 1;", Some("$main"))]
fn reserved_names_follow_mutable_and_function_lists(
    mut parser: JsParser,
    #[case] source: &str,
    #[case] expected: Option<&str>,
) {
    let hit = first_offending(&mut parser, &BuiltInObjectMatcher, &dollar_policy(), source);
    assert_eq!(hit.as_deref(), expected, "source: {source}");
}

#[rstest]
#[case("eval('1');", Some("eval"))]
#[case("a.prototype;", Some("prototype"))]
#[case("a.__proto__ = b;", Some("__proto__"))]
#[case("const { setTimeout } = b;", Some("setTimeout"))]
#[case("Object.keys(a);", None)]
#[case("const b = a;", None)]
#[case("$abc;", None)]
#[case("const a = undefined;", None)]
fn disallowed_identifiers_are_flagged(
    mut parser: JsParser,
    #[case] source: &str,
    #[case] expected: Option<&str>,
) {
    let hit = first_offending(&mut parser, &IdentifierMatcher, &Policy::default(), source);
    assert_eq!(hit.as_deref(), expected, "source: {source}");
}

#[rstest]
#[case("$c.a;", None)]
#[case("$abc;", Some("$abc"))]
#[case("a.$abc;", Some("$abc"))]
#[case("a.b;", None)]
fn reserved_identifiers_must_be_listed(
    mut parser: JsParser,
    #[case] source: &str,
    #[case] expected: Option<&str>,
) {
    let hit = first_offending(&mut parser, &IdentifierMatcher, &dollar_policy(), source);
    assert_eq!(hit.as_deref(), expected, "source: {source}");
}

#[rstest]
fn undefined_can_be_disallowed(mut parser: JsParser) {
    let policy = Policy::default()
        .to_builder()
        .add_identifier(IdentifierSet::Disallowed, "undefined")
        .seal();
    let hit = first_offending(&mut parser, &IdentifierMatcher, &policy, "const a = undefined;");
    assert_eq!(hit.as_deref(), Some("undefined"));
}

#[rstest]
#[case(Keyword::Async, "async function f() {}")]
#[case(Keyword::Async, "const f = async () => 1;")]
#[case(Keyword::Async, "const o = { async m() {} };")]
#[case(Keyword::Async, "let async = 1;")]
#[case(Keyword::Await, "async function f() { await g(); }")]
#[case(Keyword::Await, "async function f() { for await (const a of b) {} }")]
#[case(Keyword::Debugger, "debugger;")]
#[case(Keyword::Export, "export function f() {}")]
#[case(Keyword::Export, "a.export = 1;")]
#[case(Keyword::Import, "import { x } from 'x.mjs';")]
#[case(Keyword::Import, "import('x.mjs');")]
#[case(Keyword::Import, "import.meta;")]
#[case(Keyword::Var, "var a = 1;")]
#[case(Keyword::Var, "for (var a in b) {}")]
#[case(Keyword::With, "with (a) {}")]
#[case(Keyword::Yield, "function* g() { yield 1; }")]
fn disabled_keywords_are_flagged(
    mut parser: JsParser,
    #[case] keyword: Keyword,
    #[case] source: &str,
) {
    let policy = all_keywords_except(keyword);
    let hit = first_offending(&mut parser, &KeywordMatcher, &policy, source);
    assert_eq!(hit.as_deref(), Some(keyword.as_str()), "source: {source}");

    let permissive = policy.to_builder().enable_keyword(keyword).seal();
    let allowed = first_offending(&mut parser, &KeywordMatcher, &permissive, source);
    assert_eq!(allowed, None, "source: {source}");
}

#[rstest]
#[case("let a = 1;")]
#[case("const f = () => 1;")]
#[case("function* g() {}")]
fn keyword_free_code_passes_default_policy(mut parser: JsParser, #[case] source: &str) {
    let hit = first_offending(&mut parser, &KeywordMatcher, &Policy::default(), source);
    assert_eq!(hit, None, "source: {source}");
}

#[test]
fn descriptions_name_the_offending_text() {
    let mut parser = JsParser::new().expect("parser init");
    let parsed = parser
        .parse("debugger;", EntryPoint::StatementList)
        .expect("parse");
    let statement = parsed
        .statements()
        .first()
        .copied()
        .expect("statement");
    let token = statement.child_of_kind("debugger").expect("keyword token");
    assert_eq!(
        KeywordMatcher.describe(token).to_string(),
        "Keyword debugger is not allowed."
    );
    assert_eq!(
        IdentifierMatcher.describe(token).to_string(),
        "Identifier debugger is not allowed."
    );
}
