use model::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The comparison a leaf condition performs against its column.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Comparator {
    Eq,
    Neq,
    In,
    NotIn,
    Between,
    NotBetween,
    Like,
    IsNull,
    IsNotNull,
}

/// A single column condition, already resolved to the storage column name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Condition {
    pub column: String,
    pub comparator: Comparator,
    pub value: Option<Value>,
}

impl Condition {
    pub fn new(column: impl Into<String>, comparator: Comparator, value: Option<Value>) -> Self {
        Condition {
            column: column.into(),
            comparator,
            value,
        }
    }

    /// Render just this one condition as SQL.
    pub fn to_sql_fragment(&self) -> String {
        match self.comparator {
            Comparator::Eq => format!("{} = {}", self.column, self.operand()),
            Comparator::Neq => format!("{} <> {}", self.column, self.operand()),
            Comparator::In => format!("{} IN {}", self.column, self.operand()),
            Comparator::NotIn => format!("{} NOT IN {}", self.column, self.operand()),
            Comparator::Between => self.between_fragment("BETWEEN"),
            Comparator::NotBetween => self.between_fragment("NOT BETWEEN"),
            Comparator::Like => format!("{} LIKE {}", self.column, self.operand()),
            Comparator::IsNull => format!("{} IS NULL", self.column),
            Comparator::IsNotNull => format!("{} IS NOT NULL", self.column),
        }
    }

    fn operand(&self) -> String {
        self.value
            .as_ref()
            .map(Value::to_string)
            .unwrap_or_else(|| "NULL".to_string())
    }

    fn between_fragment(&self, keyword: &str) -> String {
        // Arity is validated upstream; a malformed operand renders as NULLs.
        let (lo, hi) = match self.value.as_ref().and_then(Value::as_list) {
            Some([lo, hi]) => (lo.to_string(), hi.to_string()),
            _ => ("NULL".to_string(), "NULL".to_string()),
        };
        format!("{} {keyword} {lo} AND {hi}", self.column)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_sql_fragment())
    }
}

/// A full boolean predicate over a query target.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Predicate {
    /// A single leaf condition.
    Leaf(Condition),

    /// An AND of 1+ sub-predicates.
    And(Vec<Predicate>),

    /// An OR of 1+ sub-predicates.
    Or(Vec<Predicate>),

    /// A negated sub-predicate.
    Not(Box<Predicate>),

    /// An existence constraint over a related target
    /// (e.g. `EXISTS (SELECT 1 FROM posts WHERE ...)`).
    Exists {
        relation: String,
        inner: Box<Predicate>,
    },
}

impl Predicate {
    pub fn leaf(condition: Condition) -> Self {
        Predicate::Leaf(condition)
    }

    pub fn and(predicates: Vec<Predicate>) -> Self {
        Predicate::And(predicates)
    }

    pub fn or(predicates: Vec<Predicate>) -> Self {
        Predicate::Or(predicates)
    }

    pub fn not(predicate: Predicate) -> Self {
        Predicate::Not(Box::new(predicate))
    }

    pub fn exists(relation: impl Into<String>, inner: Predicate) -> Self {
        Predicate::Exists {
            relation: relation.into(),
            inner: Box::new(inner),
        }
    }

    /// Render this predicate as SQL. Child order is preserved, so the
    /// output is deterministic for a given tree.
    pub fn to_sql(&self) -> String {
        match self {
            Predicate::Leaf(condition) => condition.to_sql_fragment(),
            Predicate::And(children) => Self::joined(children, " AND "),
            Predicate::Or(children) => Self::joined(children, " OR "),
            Predicate::Not(inner) => format!("NOT ({})", inner.to_sql()),
            Predicate::Exists { relation, inner } => {
                format!("EXISTS (SELECT 1 FROM {relation} WHERE {})", inner.to_sql())
            }
        }
    }

    fn joined(children: &[Predicate], separator: &str) -> String {
        let rendered = children
            .iter()
            .map(Predicate::to_sql)
            .collect::<Vec<_>>()
            .join(separator);
        format!("({rendered})")
    }

    /// Conjoin `next` onto an optional existing predicate, flattening
    /// top-level AND groups instead of nesting them.
    pub fn merge(existing: Option<Predicate>, next: Predicate) -> Predicate {
        match existing {
            None => next,
            Some(Predicate::And(mut children)) => {
                children.push(next);
                Predicate::And(children)
            }
            Some(prior) => Predicate::And(vec![prior, next]),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_sql())
    }
}

#[cfg(test)]
mod tests {
    use super::{Comparator, Condition, Predicate};
    use model::value::Value;

    fn eq(column: &str, value: i64) -> Predicate {
        Predicate::leaf(Condition::new(column, Comparator::Eq, Some(Value::Int(value))))
    }

    #[test]
    fn test_leaf_fragments() {
        let cases = [
            (Comparator::Eq, Some(Value::Int(30)), "age = 30"),
            (Comparator::Neq, Some(Value::from("x")), "age <> 'x'"),
            (
                Comparator::In,
                Some(Value::from(vec![1i64, 2])),
                "age IN (1, 2)",
            ),
            (
                Comparator::NotBetween,
                Some(Value::from(vec![18i64, 65])),
                "age NOT BETWEEN 18 AND 65",
            ),
            (Comparator::IsNull, None, "age IS NULL"),
        ];

        for (comparator, value, expected) in cases {
            let condition = Condition::new("age", comparator, value);
            assert_eq!(condition.to_sql_fragment(), expected);
        }
    }

    #[test]
    fn test_nested_groups_parenthesize() {
        let predicate = Predicate::and(vec![
            eq("a", 1),
            Predicate::or(vec![eq("b", 2), Predicate::not(eq("c", 3))]),
        ]);
        assert_eq!(
            predicate.to_sql(),
            "(a = 1 AND (b = 2 OR NOT (c = 3)))"
        );
    }

    #[test]
    fn test_exists_renders_subquery() {
        let predicate = Predicate::exists("posts", eq("votes", 9));
        assert_eq!(
            predicate.to_sql(),
            "EXISTS (SELECT 1 FROM posts WHERE votes = 9)"
        );
    }

    #[test]
    fn test_merge_flattens_and() {
        let merged = Predicate::merge(Some(Predicate::and(vec![eq("a", 1), eq("b", 2)])), eq("c", 3));
        assert_eq!(merged.to_sql(), "(a = 1 AND b = 2 AND c = 3)");
    }
}
