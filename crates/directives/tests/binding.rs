//! Argument-binding directive adapters against both target kinds.

use directives::{
    binding::{EqDirective, NotBetweenDirective, NotInDirective, WhereConditionsDirective},
    error::CompileError,
};
use model::{
    columns::ColumnSet,
    filter::{FilterNode, Operator},
    value::Value,
};
use query::{search::SearchQuery, sql::SqlQuery};

#[test]
fn test_eq_defaults_to_argument_name() {
    let directive = EqDirective::new("age");
    let query = directive.handle(SqlQuery::new("users"), Value::Int(30));
    assert_eq!(query.to_sql(), "SELECT * FROM users WHERE age = 30");
}

#[test]
fn test_eq_key_overrides_column() {
    let directive = EqDirective::new("name").with_key("full_name");
    let query = directive.handle(SqlQuery::new("users"), Value::from("Ada"));
    assert_eq!(query.to_sql(), "SELECT * FROM users WHERE full_name = 'Ada'");
}

#[test]
fn test_eq_works_on_search_targets() {
    let directive = EqDirective::new("city");
    let query = directive.handle(SearchQuery::new("users"), Value::from("Oslo"));
    assert_eq!(
        query.filters(),
        &[("city".to_string(), Value::from("Oslo"))]
    );
}

#[test]
fn test_not_in_excludes_values() {
    let directive = NotInDirective::new("id");
    let query = directive
        .handle(SqlQuery::new("users"), Value::from(vec![1i64, 2, 3]))
        .unwrap();
    assert_eq!(
        query.to_sql(),
        "SELECT * FROM users WHERE id NOT IN (1, 2, 3)"
    );
}

#[test]
fn test_not_in_rejects_search_targets() {
    let directive = NotInDirective::new("id");
    let err = directive
        .handle(SearchQuery::new("users"), Value::from(vec![1i64]))
        .unwrap_err();
    assert!(matches!(
        err,
        CompileError::UnsupportedTarget {
            directive: "@notIn",
            target: "search",
        }
    ));
}

#[test]
fn test_not_in_rejects_scalar_operand() {
    let directive = NotInDirective::new("id");
    let err = directive
        .handle(SqlQuery::new("users"), Value::Int(1))
        .unwrap_err();
    assert!(matches!(err, CompileError::InvalidOperand { .. }));
}

#[test]
fn test_not_between_excludes_range() {
    let directive = NotBetweenDirective::new("age");
    let query = directive
        .handle(SqlQuery::new("users"), Value::from(vec![18i64, 65]))
        .unwrap();
    assert_eq!(
        query.to_sql(),
        "SELECT * FROM users WHERE age NOT BETWEEN 18 AND 65"
    );
}

#[test]
fn test_not_between_requires_a_pair() {
    let directive = NotBetweenDirective::new("age");

    let err = directive
        .handle(SqlQuery::new("users"), Value::from(vec![18i64]))
        .unwrap_err();
    assert!(matches!(err, CompileError::InvalidOperand { .. }));

    let err = directive
        .handle(SqlQuery::new("users"), Value::Int(18))
        .unwrap_err();
    assert!(matches!(err, CompileError::InvalidOperand { .. }));
}

#[test]
fn test_not_between_rejects_search_targets() {
    let directive = NotBetweenDirective::new("age");
    let err = directive
        .handle(SearchQuery::new("users"), Value::from(vec![18i64, 65]))
        .unwrap_err();
    assert!(matches!(
        err,
        CompileError::UnsupportedTarget {
            directive: "@whereNotBetween",
            ..
        }
    ));
}

#[test]
fn test_where_conditions_null_is_noop() {
    let directive = WhereConditionsDirective::new(ColumnSet::new().allow("age"));
    let target = SqlQuery::new("users");
    let query = directive.handle(target.clone(), None).unwrap();
    assert_eq!(query, target);
}

#[test]
fn test_where_conditions_applies_tree() {
    let directive = WhereConditionsDirective::new(ColumnSet::new().allow("age").allow("status"));
    let root = FilterNode::and(vec![
        FilterNode::leaf("age", Operator::Eq, 30i64),
        FilterNode::leaf("status", Operator::Neq, "banned"),
    ]);
    let query = directive
        .handle(SqlQuery::new("users"), Some(&root))
        .unwrap();
    assert_eq!(
        query.to_sql(),
        "SELECT * FROM users WHERE (age = 30 AND status <> 'banned')"
    );
}

#[test]
fn test_where_conditions_rejects_search_targets() {
    let directive = WhereConditionsDirective::new(ColumnSet::new().allow("age"));
    let root = FilterNode::leaf("age", Operator::Eq, 30i64);
    let err = directive
        .handle(SearchQuery::new("users"), Some(&root))
        .unwrap_err();
    assert!(matches!(
        err,
        CompileError::UnsupportedTarget {
            directive: "@whereConditions",
            target: "search",
        }
    ));
}
