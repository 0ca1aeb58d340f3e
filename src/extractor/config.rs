use crate::model::IdMode;

/// Per-invocation extractor configuration.
///
/// Defaults mirror the original LLVM pass's command-line flags
/// (`-libcall-mod`, default 200; `-libcall-id-mode`, default `dummy`).
#[derive(Debug, Clone)]
pub struct Config {
    /// Identifier modulus `M`, `1 <= M <= 2^31`.
    pub modulus: u32,
    pub id_mode: IdMode,
    /// Callee name prefix reserved for compiler intrinsics; calls to names
    /// starting with this prefix are never candidates.
    pub intrinsic_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            modulus: 200,
            id_mode: IdMode::Dummy,
            intrinsic_prefix: "llvm.".to_string(),
        }
    }
}

impl Config {
    pub fn is_candidate(&self, callee: &str) -> bool {
        !callee.starts_with(self.intrinsic_prefix.as_str())
    }
}
