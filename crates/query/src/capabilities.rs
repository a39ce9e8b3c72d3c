/// What a query target supports beyond plain equality filtering.
///
/// Search-index-backed targets can match single columns but cannot compose
/// arbitrary predicate trees; callers must check before compiling anything
/// dynamic against them.
#[derive(Clone, Copy, Debug, Default)]
pub struct TargetCapabilities {
    /// Arbitrary predicate composition (grouping, negation, relation
    /// existence constraints).
    pub dynamic_predicates: bool,
}
