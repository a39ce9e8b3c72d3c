use crate::error::CompileError;
use model::{filter::Operator, value::Value};
use query::{
    predicate::{Comparator, Condition, Predicate},
    target::QueryTarget,
};

/// `@whereNotBetween` — require the column value to lie outside the given
/// pair of bounds.
#[derive(Debug, Clone)]
pub struct NotBetweenDirective {
    argument: String,
    key: Option<String>,
}

impl NotBetweenDirective {
    pub fn new(argument: impl Into<String>) -> Self {
        NotBetweenDirective {
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

    pub fn handle<T: QueryTarget>(&self, target: T, bounds: Value) -> Result<T, CompileError> {
        if !target.capabilities().dynamic_predicates {
            return Err(CompileError::UnsupportedTarget {
                directive: "@whereNotBetween",
                target: target.kind(),
            });
        }
        match bounds.as_list() {
            Some(items) if items.len() == 2 => {}
            Some(items) => {
                return Err(invalid_bounds(format!(
                    "expects exactly 2 values, got {}",
                    items.len()
                )));
            }
            None => {
                return Err(invalid_bounds(format!(
                    "expects a list of 2 values, got {}",
                    bounds.kind()
                )));
            }
        }

        let condition = Condition::new(self.column(), Comparator::NotBetween, Some(bounds));
        Ok(target.constrain(Predicate::leaf(condition))?)
    }
}

fn invalid_bounds(reason: String) -> CompileError {
    CompileError::InvalidOperand {
        operator: Operator::NotBetween,
        reason,
    }
}
