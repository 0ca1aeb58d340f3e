use serde::{Deserialize, Serialize};

/// Which call-site identifier an automaton's consuming edges match against.
///
/// Every node carries both a dummy and a unique id regardless of mode (the
/// artifact always exports both); `IdMode` only determines which one is
/// baked into the instrumentation call and which one the loader selects
/// into `match_id` when building the binary blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdMode {
    Dummy,
    Unique,
}

impl IdMode {
    /// Encoding used by the packed binary header (`0 = dummy`, `1 = unique`).
    pub fn wire_code(self) -> u32 {
        match self {
            IdMode::Dummy => 0,
            IdMode::Unique => 1,
        }
    }

    pub fn from_wire_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(IdMode::Dummy),
            1 => Some(IdMode::Unique),
            _ => None,
        }
    }

    /// Textual spelling used by the policy artifact's `idMode` field.
    pub fn as_str(self) -> &'static str {
        match self {
            IdMode::Dummy => "dummy",
            IdMode::Unique => "unique",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "dummy" => Some(IdMode::Dummy),
            "unique" => Some(IdMode::Unique),
            _ => None,
        }
    }
}

impl std::fmt::Display for IdMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_wire_code() {
        assert_eq!(IdMode::from_wire_code(0), Some(IdMode::Dummy));
        assert_eq!(IdMode::from_wire_code(1), Some(IdMode::Unique));
        assert_eq!(IdMode::from_wire_code(2), None);
    }

    #[test]
    fn round_trips_str() {
        assert_eq!(IdMode::parse("dummy"), Some(IdMode::Dummy));
        assert_eq!(IdMode::parse("unique"), Some(IdMode::Unique));
        assert_eq!(IdMode::parse("bogus"), None);
    }
}
