//! Argument-binding directives: each one translates a client-supplied
//! argument value into a constraint on the query target.

pub mod eq;
pub mod not_between;
pub mod not_in;
pub mod where_conditions;

pub use eq::EqDirective;
pub use not_between::NotBetweenDirective;
pub use not_in::NotInDirective;
pub use where_conditions::WhereConditionsDirective;
