use thiserror::Error;

use crate::wire::WireError;

/// Error kinds the enforcement engine surfaces to callers of
/// `load_policy`/`unload` (§7). `violation` is deliberately not a member:
/// per spec it is never returned as an error, only observed as a
/// [`crate::engine::Verdict`] and acted on by killing the process.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid policy: {0}")]
    Invalid(String),
    #[error("allocation failed")]
    Oom,
    #[error("policy blob unreadable or truncated: {0}")]
    Fault(String),
    #[error("no policy registered for pid {0}")]
    NotFound(u32),
}

impl From<WireError> for EngineError {
    fn from(err: WireError) -> Self {
        match err {
            WireError::Truncated { .. } => EngineError::Fault(err.to_string()),
            other => EngineError::Invalid(other.to_string()),
        }
    }
}
