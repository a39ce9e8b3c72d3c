use crate::{
    capabilities::TargetCapabilities, error::TargetError, predicate::Predicate,
    target::QueryTarget,
};
use model::value::Value;

/// A search-index-backed query. The index can match a phrase and filter on
/// single-column equality, but it cannot compose arbitrary predicates, so
/// `constrain` refuses instead of degrading silently.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    index: String,
    phrase: Option<String>,
    filters: Vec<(String, Value)>,
}

impl SearchQuery {
    pub fn new(index: impl Into<String>) -> Self {
        SearchQuery {
            index: index.into(),
            phrase: None,
            filters: Vec::new(),
        }
    }

    pub fn matching(mut self, phrase: impl Into<String>) -> Self {
        self.phrase = Some(phrase.into());
        self
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    pub fn filters(&self) -> &[(String, Value)] {
        &self.filters
    }
}

impl QueryTarget for SearchQuery {
    fn kind(&self) -> &'static str {
        "search"
    }

    fn capabilities(&self) -> TargetCapabilities {
        TargetCapabilities {
            dynamic_predicates: false,
        }
    }

    fn constrain(self, _predicate: Predicate) -> Result<Self, TargetError> {
        Err(TargetError::DynamicPredicates {
            target: self.kind(),
        })
    }

    fn where_eq(mut self, column: &str, value: Value) -> Self {
        self.filters.push((column.to_string(), value));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::SearchQuery;
    use crate::{
        predicate::{Comparator, Condition, Predicate},
        target::QueryTarget,
    };
    use model::value::Value;

    #[test]
    fn test_where_eq_collects_filters() {
        let query = SearchQuery::new("users")
            .matching("jo")
            .where_eq("city", Value::from("Oslo"));
        assert_eq!(query.filters().len(), 1);
    }

    #[test]
    fn test_constrain_refuses() {
        let predicate = Predicate::leaf(Condition::new(
            "age",
            Comparator::Eq,
            Some(Value::Int(30)),
        ));
        let result = SearchQuery::new("users").constrain(predicate);
        assert!(result.is_err());
    }
}
