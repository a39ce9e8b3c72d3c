use crate::{
    capabilities::TargetCapabilities,
    error::TargetError,
    predicate::{Comparator, Condition, Predicate},
    target::QueryTarget,
};
use model::value::Value;

/// A relational query under construction: a table plus an accumulated
/// predicate. Supports the full predicate surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlQuery {
    table: String,
    predicate: Option<Predicate>,
}

impl SqlQuery {
    pub fn new(table: impl Into<String>) -> Self {
        SqlQuery {
            table: table.into(),
            predicate: None,
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn predicate(&self) -> Option<&Predicate> {
        self.predicate.as_ref()
    }

    /// Render "SELECT * FROM t" plus the WHERE clause, if any.
    pub fn to_sql(&self) -> String {
        let where_clause = self
            .predicate
            .as_ref()
            .map(|p| format!(" WHERE {}", p.to_sql()))
            .unwrap_or_default();
        format!("SELECT * FROM {}{where_clause}", self.table)
    }
}

impl QueryTarget for SqlQuery {
    fn kind(&self) -> &'static str {
        "sql"
    }

    fn capabilities(&self) -> TargetCapabilities {
        TargetCapabilities {
            dynamic_predicates: true,
        }
    }

    fn constrain(mut self, predicate: Predicate) -> Result<Self, TargetError> {
        self.predicate = Some(Predicate::merge(self.predicate.take(), predicate));
        Ok(self)
    }

    fn where_eq(mut self, column: &str, value: Value) -> Self {
        let condition = Condition::new(column, Comparator::Eq, Some(value));
        self.predicate = Some(Predicate::merge(
            self.predicate.take(),
            Predicate::leaf(condition),
        ));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::SqlQuery;
    use crate::{
        predicate::{Comparator, Condition, Predicate},
        target::QueryTarget,
    };
    use model::value::Value;

    #[test]
    fn test_renders_without_predicate() {
        let query = SqlQuery::new("users");
        assert_eq!(query.to_sql(), "SELECT * FROM users");
    }

    #[test]
    fn test_where_eq_chains_conjoined() {
        let query = SqlQuery::new("users")
            .where_eq("age", Value::Int(30))
            .where_eq("city", Value::from("Oslo"));
        assert_eq!(
            query.to_sql(),
            "SELECT * FROM users WHERE (age = 30 AND city = 'Oslo')"
        );
    }

    #[test]
    fn test_constrain_merges_with_existing() {
        let predicate = Predicate::leaf(Condition::new(
            "status",
            Comparator::Neq,
            Some(Value::from("banned")),
        ));
        let query = SqlQuery::new("users")
            .where_eq("age", Value::Int(30))
            .constrain(predicate)
            .unwrap();
        assert_eq!(
            query.to_sql(),
            "SELECT * FROM users WHERE (age = 30 AND status <> 'banned')"
        );
    }
}
