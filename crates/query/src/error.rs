use thiserror::Error;

/// Errors raised by query targets themselves.
#[derive(Debug, Error)]
pub enum TargetError {
    /// A dynamic predicate was pushed onto a target that cannot compose
    /// arbitrary predicates. Callers are expected to check capabilities
    /// first, so reaching this is a caller bug, not a client error.
    #[error("{target} queries do not support dynamic predicates")]
    DynamicPredicates { target: &'static str },
}
