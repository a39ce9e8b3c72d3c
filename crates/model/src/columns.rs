use crate::filter::Operator;
use std::collections::{HashMap, HashSet};

/// What a single allow-listed column permits: the storage column it maps
/// to (the GraphQL-facing name may differ) and, optionally, a restricted
/// operator set. `None` means every leaf operator is allowed.
#[derive(Debug, Clone)]
pub struct ColumnRule {
    pub column: String,
    pub operators: Option<HashSet<Operator>>,
}

impl ColumnRule {
    pub fn allows(&self, operator: Operator) -> bool {
        match &self.operators {
            Some(allowed) => allowed.contains(&operator),
            None => true,
        }
    }
}

/// The allow-list for one filterable argument: visible field names mapped
/// to column rules, plus nested scopes for traversable relations.
///
/// Built once at schema-build time from the directive's `columns` /
/// `columnsEnum` argument and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ColumnSet {
    columns: HashMap<String, ColumnRule>,
    relations: HashMap<String, ColumnSet>,
}

impl ColumnSet {
    pub fn new() -> Self {
        ColumnSet::default()
    }

    /// Allow `name` with the storage column equal to the visible name.
    pub fn allow(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        let rule = ColumnRule {
            column: name.clone(),
            operators: None,
        };
        self.columns.insert(name, rule);
        self
    }

    /// Allow `name`, stored under a differently named column.
    pub fn allow_as(mut self, name: impl Into<String>, column: impl Into<String>) -> Self {
        self.columns.insert(
            name.into(),
            ColumnRule {
                column: column.into(),
                operators: None,
            },
        );
        self
    }

    /// Allow `name` restricted to the given operators.
    pub fn allow_ops(
        mut self,
        name: impl Into<String>,
        operators: impl IntoIterator<Item = Operator>,
    ) -> Self {
        let name = name.into();
        self.columns.insert(
            name.clone(),
            ColumnRule {
                column: name,
                operators: Some(operators.into_iter().collect()),
            },
        );
        self
    }

    /// Register a traversable relation with its own nested allow-list.
    pub fn relation(mut self, name: impl Into<String>, columns: ColumnSet) -> Self {
        self.relations.insert(name.into(), columns);
        self
    }

    pub fn rule(&self, name: &str) -> Option<&ColumnRule> {
        self.columns.get(name)
    }

    pub fn relation_scope(&self, name: &str) -> Option<&ColumnSet> {
        self.relations.get(name)
    }

    /// Visible column names in sorted order, for error messages.
    pub fn visible_columns(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.columns.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
