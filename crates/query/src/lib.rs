pub mod capabilities;
pub mod error;
pub mod predicate;
pub mod search;
pub mod sql;
pub mod target;
