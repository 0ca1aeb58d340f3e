/// One NFA state, corresponding 1:1 to a call site.
///
/// Both identifiers are always populated regardless of the function's
/// chosen [`IdMode`](crate::model::IdMode) — the artifact carries both so a
/// loader can pick a mode independent of which one was baked into the
/// instrumentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Callee name, for diagnostics and DOT rendering.
    pub pretty_name: String,
    /// `counter mod M`, where counter is sequential within the function.
    pub dummy_id: i64,
    /// `counter div M`, diagnostic only.
    pub reset_count: i64,
    /// Sequential, injective within a function, starting at 1.
    pub unique_id: i64,
}
