use crate::{capabilities::TargetCapabilities, error::TargetError, predicate::Predicate};
use model::value::Value;

/// The composable query object that directives mutate.
///
/// Targets are consumed and returned builder-style; a failed `constrain`
/// returns an error without a partially mutated target escaping.
pub trait QueryTarget: Sized {
    /// Short name for error messages, e.g. `"search"`.
    fn kind(&self) -> &'static str;

    fn capabilities(&self) -> TargetCapabilities;

    /// Attach a compiled predicate, conjoined with any existing one.
    fn constrain(self, predicate: Predicate) -> Result<Self, TargetError>;

    /// Add a plain equality constraint. Unlike `constrain`, this is
    /// supported by every target, including restricted ones.
    fn where_eq(self, column: &str, value: Value) -> Self;
}
