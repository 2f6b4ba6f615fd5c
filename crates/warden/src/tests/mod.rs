//! Crate-level integration and BDD tests.

use crate::checker::{Checker, ModuleChecker, StatementListChecker};
use crate::error::ErrorKind;
use crate::keyword::Keyword;
use crate::policy::{IdentifierSet, Policy, PolicyConfig};


#[test]
fn configured_policy_drives_a_module_check() {
    let config = PolicyConfig::from_json_str(
        r#"{
            "name": "plugins",
            "enabled_keywords": ["import"],
            "reserved_identifier_prefix": "$",
            "reserved_identifiers": ["$host", "$init"],
            "reserved_function_identifiers": ["main", "$init"]
        }"#,
    )
    .expect("valid config");
    let policy = config.into_policy().expect("known listener");
    let mut checker = ModuleChecker::new(policy);

    checker
        .check("import { x } from 'x.mjs';\nfunction main() { $host.log(x); }\nfunction $init() {}")
        .expect("module accepted");
    assert_eq!(checker.functions().len(), 2);

    let error = checker
        .check("function main() { $other.log(1); }\nfunction $init() {}")
        .expect_err("unlisted reserved name");
    assert_eq!(
        error.kind(),
        &ErrorKind::IdentifierNotAllowed {
            name: "$other".to_owned()
        }
    );
    assert_eq!(checker.policy().name(), "plugins");
}

#[test]
fn sealed_policies_are_shared_between_checkers() {
    let policy = Policy::default()
        .to_builder()
        .enable_keyword(Keyword::Async)
        .add_identifier(IdentifierSet::Disallowed, "fetch")
        .seal();
    let mut statements = StatementListChecker::new(policy.clone());
    let mut module = ModuleChecker::new(policy);

    statements
        .check("async function main() {}")
        .expect("async enabled");
    module
        .check("async function main() {}")
        .expect("async enabled");
    let error = module
        .check("async function main() { await fetch('a'); }")
        .expect_err("await still disabled");
    assert_eq!(error.to_string(), "Keyword await is not allowed.");
    let error = statements.check("fetch('a');").expect_err("fetch denied");
    assert_eq!(error.to_string(), "Identifier fetch is not allowed.");
}

#[test]
fn first_violation_in_source_order_wins() {
    let error = StatementListChecker::default()
        .check("const a = 1;\nvar b = eval;\nObject = 1;")
        .expect_err("several violations");
    assert_eq!(error.to_string(), "Keyword var is not allowed.");
    assert_eq!(error.context().map(|context| context.start_line()), Some(2));
}
