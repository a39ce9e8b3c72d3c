use model::filter::Operator;
use query::error::TargetError;
use thiserror::Error;

/// Client-input validation failures from condition compilation. All of
/// these surface to the request layer unmodified; none are retried.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("column \"{column}\" is not filterable, allowed columns: {allowed:?}")]
    UnknownColumn { column: String, allowed: Vec<String> },

    #[error("relation \"{relation}\" is not filterable")]
    UnknownRelation { relation: String },

    #[error("operator {operator} is not allowed on column \"{column}\"")]
    OperatorNotAllowed { column: String, operator: Operator },

    #[error("invalid operand for {operator}: {reason}")]
    InvalidOperand { operator: Operator, reason: String },

    #[error("using {directive} on {target} queries is not supported")]
    UnsupportedTarget {
        directive: &'static str,
        target: &'static str,
    },

    #[error(transparent)]
    Target(#[from] TargetError),
}

/// Misconfiguration detected while wiring a directive into the schema.
#[derive(Debug, Error)]
pub enum DirectiveError {
    #[error("named limiter \"{0}\" is not registered")]
    UnknownLimiter(String),
}

/// Failure of a wrapped field resolution.
#[derive(Debug, Error, PartialEq)]
pub enum FieldError {
    #[error("rate limit exceeded")]
    RateLimited,

    #[error("{0}")]
    Resolver(String),
}
