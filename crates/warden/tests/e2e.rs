//! End-to-end tests for warden using insta for snapshot testing.
//!
//! These tests drive the public checkers and render rejections the way a
//! host would show them: message first, then the error context.

use std::io::Write as _;

use camino::Utf8Path;
use insta::assert_snapshot;
use rstest::rstest;

use warden::{
    AnonymousFunctionChecker, Checker, ConfigError, ErrorKind, Keyword, ModuleChecker, Policy,
    PolicyConfig, SanitizerError, SingleExpressionChecker, StatementListChecker,
};

fn render(error: &SanitizerError) -> String {
    match error.context() {
        Some(context) => format!("[{}] {error}\n{context}", error.code()),
        None => format!("[{}] {error}", error.code()),
    }
}

fn reject(checker: &mut dyn Checker, source: &str) -> String {
    let error = checker
        .check(source)
        .err()
        .unwrap_or_else(|| panic!("expected {source:?} to be rejected"));
    render(&error)
}

fn dollar_policy() -> Policy {
    PolicyConfig::from_json_str(
        r#"{
            "reserved_identifier_prefix": "$",
            "reserved_identifiers": ["$c"],
            "reserved_mutable_identifiers": ["$c"]
        }"#,
    )
    .unwrap_or_else(|err| panic!("config: {err}"))
    .into_policy()
    .unwrap_or_else(|err| panic!("policy: {err}"))
}

// =============================================================================
// Built-in objects
// =============================================================================

#[test]
fn assignment_to_built_in_reports_the_assignment() {
    let rendered = reject(&mut StatementListChecker::default(), "Object = 1;");
    assert_snapshot!(rendered, @r"
    [100] Identifier Object is not allowed.
    Source Code: Object = 1
    Line Number: 1, 1
    Column: 0, 10
    Position: 0, 10
    ");
}

#[test]
fn arrow_parameter_reports_the_parameter() {
    let rendered = reject(&mut StatementListChecker::default(), "(Object) => {}");
    assert_snapshot!(rendered, @r"
    [100] Identifier Object is not allowed.
    Source Code: Object
    Line Number: 1, 1
    Column: 1, 7
    Position: 1, 7
    ");
}

#[test]
fn catch_binding_reports_the_clause() {
    let rendered = reject(&mut StatementListChecker::default(), "try {} catch (Object) {}");
    assert_snapshot!(rendered, @r"
    [100] Identifier Object is not allowed.
    Source Code: catch (Object) {}
    Line Number: 1, 1
    Column: 7, 24
    Position: 7, 24
    ");
}

// =============================================================================
// Reserved identifiers
// =============================================================================

#[test]
fn unlisted_reserved_property_reports_the_property() {
    let rendered = reject(&mut StatementListChecker::new(dollar_policy()), "a.$abc = 1;");
    assert_snapshot!(rendered, @r"
    [100] Identifier $abc is not allowed.
    Source Code: $abc
    Line Number: 1, 1
    Column: 2, 6
    Position: 2, 6
    ");
}

#[rstest]
#[case("$c.a = 1;")]
#[case("$c['a'] = 1;")]
fn listed_mutable_reserved_names_pass(#[case] source: &str) {
    StatementListChecker::new(dollar_policy())
        .check(source)
        .unwrap_or_else(|err| panic!("{source}: {err}"));
}

// =============================================================================
// Keywords
// =============================================================================

#[test]
fn multiline_keyword_context() {
    let rendered = reject(
        &mut StatementListChecker::default(),
        "function a() {\n  import { x } from 'x.mjs';\n  return 1;\n}",
    );
    assert_snapshot!(rendered, @r"
    [101] Keyword import is not allowed.
    Source Code: import { x } from 'x.mjs';
    Line Number: 2, 2
    Column: 2, 28
    Position: 17, 43
    ");
}

#[test]
fn async_function_expression_reports_the_function() {
    let rendered = reject(&mut StatementListChecker::default(), "(async function() {})()");
    assert_snapshot!(rendered, @r"
    [101] Keyword async is not allowed.
    Source Code: async function() {}
    Line Number: 1, 1
    Column: 1, 20
    Position: 1, 20
    ");
}

#[rstest]
#[case(Keyword::Async, "async () => {}")]
#[case(Keyword::Yield, "function* g() { yield 1; }")]
#[case(Keyword::With, "with (a) {}")]
fn enabling_a_keyword_accepts_it(#[case] keyword: Keyword, #[case] source: &str) {
    let mut strict = StatementListChecker::default();
    let error = strict
        .check(source)
        .expect_err("keyword disabled by default");
    assert_eq!(
        error.kind(),
        &ErrorKind::KeywordNotAllowed {
            keyword: keyword.to_string()
        }
    );

    let policy = Policy::default().to_builder().enable_keyword(keyword).seal();
    StatementListChecker::new(policy)
        .check(source)
        .unwrap_or_else(|err| panic!("{source}: {err}"));
}

// =============================================================================
// Modules and syntax
// =============================================================================

#[test]
fn module_statement_shape() {
    let rendered = reject(&mut ModuleChecker::default(), "function main() {}\nconst a");
    assert_snapshot!(rendered, @r"
    [200] Token lexical_declaration is invalid. Expecting function_declaration.
    Source Code: const a
    Line Number: 2, 2
    Column: 0, 7
    Position: 19, 26
    ");
}

#[test]
fn missing_required_function() {
    let rendered = reject(&mut ModuleChecker::default(), "function a() {}");
    assert_snapshot!(rendered, @"[300] Function main is not found.");
}

#[test]
fn anonymous_function_rejects_other_expressions() {
    let rendered = reject(&mut AnonymousFunctionChecker::default(), "a + b");
    assert_snapshot!(rendered, @r"
    [200] Token binary_expression is invalid. Expecting {arrow_function, function_expression, generator_function}.
    Source Code: a + b
    Line Number: 1, 1
    Column: 0, 5
    Position: 0, 5
    ");
}

#[test]
fn trailing_statement_after_a_function_literal() {
    let rendered = reject(&mut AnonymousFunctionChecker::default(), "() => {} ; 1");
    assert_snapshot!(rendered, @r"
    [200] Token ; is invalid. Expecting <EOF>.
    Source Code: ;
    Line Number: 1, 1
    Column: 9, 10
    Position: 9, 10
    ");
}

#[test]
fn stray_closing_parenthesis() {
    let rendered = reject(&mut SingleExpressionChecker::default(), "a)");
    assert_snapshot!(rendered, @r"
    [200] Token ) is invalid. Expecting <EOF>.
    Source Code: )
    Line Number: 1, 1
    Column: 1, 2
    Position: 1, 2
    ");
}

// =============================================================================
// Configuration files
// =============================================================================

#[test]
fn policy_loads_from_a_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap_or_else(|err| panic!("tempfile: {err}"));
    file.write_all(br#"{ "enabled_keywords": ["var"], "listener": "security_check" }"#)
        .unwrap_or_else(|err| panic!("write: {err}"));
    let path = Utf8Path::from_path(file.path()).unwrap_or_else(|| panic!("non-UTF-8 temp path"));

    let policy = PolicyConfig::load(path)
        .unwrap_or_else(|err| panic!("load: {err}"))
        .into_policy()
        .unwrap_or_else(|err| panic!("policy: {err}"));
    assert!(policy.is_keyword_enabled(Keyword::Var));
    StatementListChecker::new(policy)
        .check("var a = 1;")
        .unwrap_or_else(|err| panic!("var enabled: {err}"));
}

#[test]
fn unknown_listener_fails_policy_construction() {
    let error = PolicyConfig::from_json_str(r#"{ "listener": "audit" }"#)
        .unwrap_or_else(|err| panic!("config: {err}"))
        .into_policy()
        .expect_err("unknown listener");
    assert_snapshot!(render(&error), @"[3] Failed to create listener audit.");
}

#[test]
fn missing_config_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap_or_else(|err| panic!("tempdir: {err}"));
    let path = Utf8Path::from_path(dir.path())
        .unwrap_or_else(|| panic!("non-UTF-8 temp path"))
        .join("missing.json");
    let error = PolicyConfig::load(&path).expect_err("file is missing");
    assert!(matches!(error, ConfigError::Read { .. }), "{error}");
}
