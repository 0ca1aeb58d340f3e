/// The epsilon marker used in the textual artifact's `label` field (U+03F5,
/// "ϵ"). The loader must also accept the ASCII alias `"epsilon"` (see
/// [`crate::wire::loader`]).
pub const EPSILON_LABEL: &str = "\u{03f5}";

/// Variant of an NFA transition.
///
/// Modeled as a tagged record rather than a class hierarchy (spec's design
/// notes call this out explicitly): both variants share `src`/`dst`/`label`
/// on [`Edge`], and only the match identifiers differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// "Site A may be immediately followed by site B within the same basic
    /// block." `match_dummy`/`match_unique` are the *source* node's
    /// identifiers under each scheme; the loader selects one per the
    /// function's chosen id mode.
    Consuming { match_dummy: i64, match_unique: i64 },
    /// Inter-basic-block successorship. Matches no observation; traversed
    /// only during closure.
    Epsilon,
}

/// Directed, labeled transition between two [`Node`](super::Node)s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub src: usize,
    pub dst: usize,
    /// Callee name of the source site for consuming edges, [`EPSILON_LABEL`]
    /// otherwise.
    pub label: String,
    pub kind: EdgeKind,
}

impl Edge {
    pub fn is_epsilon(&self) -> bool {
        matches!(self.kind, EdgeKind::Epsilon)
    }
}
