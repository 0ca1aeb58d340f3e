use thiserror::Error;

/// Errors from parsing a textual policy artifact or building a binary blob
/// from it. Distinct from [`crate::engine::EngineError`], which covers
/// failures once a blob reaches the engine; the loader maps `WireError`s
/// into `EngineError`s at that boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WireError {
    #[error("malformed policy artifact: {0}")]
    MalformedArtifact(String),

    #[error("function index {index} out of range (artifact has {available} functions)")]
    FunctionIndexOutOfRange { index: usize, available: usize },

    #[error("function {function} has mismatched node array lengths (labels={labels}, dummy_ids={dummy_ids}, unique_ids={unique_ids})")]
    NodeArrayLengthMismatch {
        function: String,
        labels: usize,
        dummy_ids: usize,
        unique_ids: usize,
    },

    #[error("edge in function {function} references out-of-range node (src={src}, dst={dst}, num_nodes={num_nodes})")]
    EdgeNodeOutOfRange {
        function: String,
        src: u32,
        dst: u32,
        num_nodes: u32,
    },

    #[error("non-epsilon edge in function {function} has negative match id")]
    NegativeMatchId { function: String },

    #[error("num_edges {0} exceeds the maximum of 2^20")]
    TooManyEdges(u32),

    #[error("policy blob truncated: expected at least {expected} bytes, found {found}")]
    Truncated { expected: usize, found: usize },

    #[error("policy blob header invalid: {0}")]
    InvalidHeader(String),
}
