use crate::error::CompileError;
use model::{filter::Operator, value::Value};
use query::{
    predicate::{Comparator, Condition, Predicate},
    target::QueryTarget,
};

/// `@notIn` — exclude rows whose column value appears in the given list.
#[derive(Debug, Clone)]
pub struct NotInDirective {
    argument: String,
    key: Option<String>,
}

impl NotInDirective {
    pub fn new(argument: impl Into<String>) -> Self {
        NotInDirective {
            argument: argument.into(),
            key: None,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn column(&self) -> &str {
        self.key.as_deref().unwrap_or(&self.argument)
    }

    pub fn handle<T: QueryTarget>(&self, target: T, values: Value) -> Result<T, CompileError> {
        if !target.capabilities().dynamic_predicates {
            return Err(CompileError::UnsupportedTarget {
                directive: "@notIn",
                target: target.kind(),
            });
        }
        if values.as_list().is_none() {
            return Err(CompileError::InvalidOperand {
                operator: Operator::NotIn,
                reason: format!("expects a list, got {}", values.kind()),
            });
        }

        let condition = Condition::new(self.column(), Comparator::NotIn, Some(values));
        Ok(target.constrain(Predicate::leaf(condition))?)
    }
}
