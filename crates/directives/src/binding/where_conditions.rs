use crate::{compiler::ConditionCompiler, error::CompileError};
use model::{columns::ColumnSet, filter::FilterNode};
use query::target::QueryTarget;

/// `@whereConditions` — apply a dynamically client-controlled condition
/// tree to the field's query, restricted to an allow-listed column set.
#[derive(Debug, Clone)]
pub struct WhereConditionsDirective {
    columns: ColumnSet,
}

impl WhereConditionsDirective {
    pub fn new(columns: ColumnSet) -> Self {
        WhereConditionsDirective { columns }
    }

    /// A `None` condition tree is allowed and leaves the query untouched.
    pub fn handle<T: QueryTarget>(
        &self,
        target: T,
        conditions: Option<&FilterNode>,
    ) -> Result<T, CompileError> {
        ConditionCompiler::new(&self.columns).compile(target, conditions)
    }
}
