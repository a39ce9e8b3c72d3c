use crate::error::CompileError;
use model::{
    columns::ColumnSet,
    filter::{FilterNode, Operator},
    value::Value,
};
use query::{
    predicate::{Comparator, Condition, Predicate},
    target::QueryTarget,
};
use tracing::debug;

/// Compiles a client-submitted condition tree into a predicate on a query
/// target.
///
/// Compilation is validate-then-build: the whole tree is checked and
/// lowered into a [`Predicate`] before the target is touched, so no error
/// path leaves a partially filtered target behind.
pub struct ConditionCompiler<'a> {
    columns: &'a ColumnSet,
    directive: &'static str,
}

impl<'a> ConditionCompiler<'a> {
    pub fn new(columns: &'a ColumnSet) -> Self {
        ConditionCompiler {
            columns,
            directive: "@whereConditions",
        }
    }

    /// Use a different directive name in error messages.
    pub fn for_directive(columns: &'a ColumnSet, directive: &'static str) -> Self {
        ConditionCompiler { columns, directive }
    }

    /// Apply `root` to `target`. A `None` root means "no filtering" and
    /// returns the target unchanged; it is not an error.
    pub fn compile<T: QueryTarget>(
        &self,
        target: T,
        root: Option<&FilterNode>,
    ) -> Result<T, CompileError> {
        let Some(root) = root else {
            return Ok(target);
        };

        // Checked before any traversal so an incompatible target is never
        // half-filtered.
        if !target.capabilities().dynamic_predicates {
            return Err(CompileError::UnsupportedTarget {
                directive: self.directive,
                target: target.kind(),
            });
        }

        debug!(directive = self.directive, "compiling condition tree");
        let predicate = self.lower(root, self.columns)?;
        Ok(target.constrain(predicate)?)
    }

    fn lower(&self, node: &FilterNode, scope: &ColumnSet) -> Result<Predicate, CompileError> {
        if node.operator.is_group() {
            self.lower_group(node, scope)
        } else {
            self.lower_leaf(node, scope)
        }
    }

    fn lower_group(&self, node: &FilterNode, scope: &ColumnSet) -> Result<Predicate, CompileError> {
        let operator = node.operator;

        if node.column.is_some() || node.value.is_some() {
            return Err(invalid(operator, "group operators take no column or value"));
        }
        if node.children.is_empty() {
            return Err(invalid(operator, "requires at least one child condition"));
        }

        match operator {
            Operator::And => Ok(Predicate::and(self.lower_all(&node.children, scope)?)),
            Operator::Or => Ok(Predicate::or(self.lower_all(&node.children, scope)?)),
            Operator::Not => {
                if node.children.len() != 1 {
                    return Err(invalid(operator, "takes exactly one child condition"));
                }
                Ok(Predicate::not(self.lower(&node.children[0], scope)?))
            }
            Operator::HasRelation => {
                let relation = node
                    .relation
                    .as_deref()
                    .ok_or_else(|| invalid(operator, "requires a relation name"))?;
                let nested = scope.relation_scope(relation).ok_or_else(|| {
                    CompileError::UnknownRelation {
                        relation: relation.to_string(),
                    }
                })?;

                // Children are validated against the related scope, then
                // attached as one existence constraint on the outer target.
                let mut inner = self.lower_all(&node.children, nested)?;
                let inner = if inner.len() == 1 {
                    inner.remove(0)
                } else {
                    Predicate::and(inner)
                };
                Ok(Predicate::exists(relation, inner))
            }
            _ => unreachable!("non-group operator in lower_group"),
        }
    }

    fn lower_all(
        &self,
        children: &[FilterNode],
        scope: &ColumnSet,
    ) -> Result<Vec<Predicate>, CompileError> {
        // Client-specified order is preserved for deterministic output.
        children
            .iter()
            .map(|child| self.lower(child, scope))
            .collect()
    }

    fn lower_leaf(&self, node: &FilterNode, scope: &ColumnSet) -> Result<Predicate, CompileError> {
        let operator = node.operator;

        if !node.children.is_empty() {
            return Err(invalid(operator, "comparison operators take no children"));
        }
        let column = node
            .column
            .as_deref()
            .ok_or_else(|| invalid(operator, "requires a column"))?;

        // Looked up per leaf because the rule also carries the storage
        // column name substituted into the condition below.
        let rule = scope
            .rule(column)
            .ok_or_else(|| CompileError::UnknownColumn {
                column: column.to_string(),
                allowed: scope
                    .visible_columns()
                    .into_iter()
                    .map(String::from)
                    .collect(),
            })?;
        if !rule.allows(operator) {
            return Err(CompileError::OperatorNotAllowed {
                column: column.to_string(),
                operator,
            });
        }

        let value = check_operand(operator, node.value.as_ref())?;
        let condition = Condition::new(rule.column.clone(), comparator_for(operator), value);
        Ok(Predicate::leaf(condition))
    }
}

/// The fixed operator table: every leaf operator maps to exactly one
/// comparator. Adding an operator means extending this match and the
/// operand contract below.
fn comparator_for(operator: Operator) -> Comparator {
    match operator {
        Operator::Eq => Comparator::Eq,
        Operator::Neq => Comparator::Neq,
        Operator::In => Comparator::In,
        Operator::NotIn => Comparator::NotIn,
        Operator::Between => Comparator::Between,
        Operator::NotBetween => Comparator::NotBetween,
        Operator::Like => Comparator::Like,
        Operator::IsNull => Comparator::IsNull,
        Operator::IsNotNull => Comparator::IsNotNull,
        _ => unreachable!("group operator has no comparator"),
    }
}

/// Validate the operand's arity and shape against the operator's contract
/// and return the value to embed in the condition.
fn check_operand(
    operator: Operator,
    value: Option<&Value>,
) -> Result<Option<Value>, CompileError> {
    match operator {
        Operator::Eq | Operator::Neq | Operator::Like => {
            let value = value.ok_or_else(|| invalid(operator, "requires a value"))?;
            if !value.is_scalar() {
                return Err(invalid(operator, "expects a single scalar, got a list"));
            }
            Ok(Some(value.clone()))
        }
        Operator::In | Operator::NotIn => {
            let value = value.ok_or_else(|| invalid(operator, "requires a value"))?;
            if value.as_list().is_none() {
                return Err(invalid(
                    operator,
                    &format!("expects a list, got {}", value.kind()),
                ));
            }
            Ok(Some(value.clone()))
        }
        Operator::Between | Operator::NotBetween => {
            let value = value.ok_or_else(|| invalid(operator, "requires a value"))?;
            match value.as_list() {
                Some(items) if items.len() == 2 => Ok(Some(value.clone())),
                Some(items) => Err(invalid(
                    operator,
                    &format!("expects exactly 2 values, got {}", items.len()),
                )),
                None => Err(invalid(
                    operator,
                    &format!("expects a list of 2 values, got {}", value.kind()),
                )),
            }
        }
        Operator::IsNull | Operator::IsNotNull => {
            if value.is_some() {
                return Err(invalid(operator, "takes no value"));
            }
            Ok(None)
        }
        _ => unreachable!("group operator has no operand contract"),
    }
}

fn invalid(operator: Operator, reason: &str) -> CompileError {
    CompileError::InvalidOperand {
        operator,
        reason: reason.to_string(),
    }
}
