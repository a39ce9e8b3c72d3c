use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of operators a client may use in a condition tree.
///
/// Serialized names match the GraphQL-facing enum values (`EQ`, `NOT_IN`,
/// `HAS_RELATION`, ...).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operator {
    Eq,
    Neq,
    In,
    NotIn,
    Between,
    NotBetween,
    Like,
    IsNull,
    IsNotNull,
    And,
    Or,
    Not,
    HasRelation,
}

impl Operator {
    /// Group operators combine child conditions instead of comparing a
    /// column against a value.
    pub fn is_group(self) -> bool {
        matches!(
            self,
            Operator::And | Operator::Or | Operator::Not | Operator::HasRelation
        )
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operator::Eq => "EQ",
            Operator::Neq => "NEQ",
            Operator::In => "IN",
            Operator::NotIn => "NOT_IN",
            Operator::Between => "BETWEEN",
            Operator::NotBetween => "NOT_BETWEEN",
            Operator::Like => "LIKE",
            Operator::IsNull => "IS_NULL",
            Operator::IsNotNull => "IS_NOT_NULL",
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Not => "NOT",
            Operator::HasRelation => "HAS_RELATION",
        };
        write!(f, "{name}")
    }
}

/// One node of a client-submitted condition tree: either a single column
/// comparison (leaf) or a logical combinator over children (group).
///
/// Built fresh per request from parsed input, immutable once built, and
/// consumed once by the compiler.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilterNode {
    /// Target column; set on leaves, absent on groups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,

    pub operator: Operator,

    /// Operand(s); shape depends on the operator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    /// Child conditions; populated only for group operators.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FilterNode>,

    /// Association to traverse; set only when operator is `HAS_RELATION`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<String>,
}

impl FilterNode {
    pub fn leaf(column: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Self {
        FilterNode {
            column: Some(column.into()),
            operator,
            value: Some(value.into()),
            children: Vec::new(),
            relation: None,
        }
    }

    /// A leaf without an operand (`IS_NULL` / `IS_NOT_NULL`).
    pub fn check(column: impl Into<String>, operator: Operator) -> Self {
        FilterNode {
            column: Some(column.into()),
            operator,
            value: None,
            children: Vec::new(),
            relation: None,
        }
    }

    pub fn and(children: Vec<FilterNode>) -> Self {
        FilterNode::group(Operator::And, children)
    }

    pub fn or(children: Vec<FilterNode>) -> Self {
        FilterNode::group(Operator::Or, children)
    }

    pub fn not(child: FilterNode) -> Self {
        FilterNode::group(Operator::Not, vec![child])
    }

    pub fn has_relation(relation: impl Into<String>, children: Vec<FilterNode>) -> Self {
        FilterNode {
            relation: Some(relation.into()),
            ..FilterNode::group(Operator::HasRelation, children)
        }
    }

    fn group(operator: Operator, children: Vec<FilterNode>) -> Self {
        FilterNode {
            column: None,
            operator,
            value: None,
            children,
            relation: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FilterNode, Operator};
    use crate::value::Value;

    #[test]
    fn test_operator_names_match_graphql_enum() {
        let json = serde_json::to_string(&Operator::NotBetween).unwrap();
        assert_eq!(json, "\"NOT_BETWEEN\"");

        let parsed: Operator = serde_json::from_str("\"HAS_RELATION\"").unwrap();
        assert_eq!(parsed, Operator::HasRelation);
    }

    #[test]
    fn test_deserialize_nested_tree() {
        let input = r#"{
            "operator": "AND",
            "children": [
                {"column": "age", "operator": "EQ", "value": 30},
                {"column": "status", "operator": "NEQ", "value": "banned"}
            ]
        }"#;
        let node: FilterNode = serde_json::from_str(input).unwrap();

        assert_eq!(node.operator, Operator::And);
        assert_eq!(node.children.len(), 2);
        assert_eq!(node.children[0].column.as_deref(), Some("age"));
        assert_eq!(node.children[0].value, Some(Value::Int(30)));
    }

    #[test]
    fn test_leaf_constructor() {
        let node = FilterNode::leaf("age", Operator::Eq, 30i64);
        assert!(node.children.is_empty());
        assert_eq!(node.column.as_deref(), Some("age"));
    }
}
