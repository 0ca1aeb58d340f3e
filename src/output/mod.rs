// Output formatting utilities for the loader CLI.

use std::io::IsTerminal;

// Colors for terminal output (when supported)
pub const RED: &str = "\x1b[0;31m";
pub const GREEN: &str = "\x1b[0;32m";
pub const YELLOW: &str = "\x1b[1;33m";
pub const MAGENTA: &str = "\x1b[0;35m";
pub const NC: &str = "\x1b[0m"; // No Color

/// Check if stderr is a terminal (for color output); diagnostics all go
/// to stderr so stdout stays clean for `--output json` consumers.
#[inline]
pub fn is_terminal() -> bool {
    std::io::stderr().is_terminal()
}

/// Print info message
pub fn info(msg: &str) {
    let color = if is_terminal() { GREEN } else { "" };
    let reset = if is_terminal() { NC } else { "" };
    eprintln!("{}[INFO]{} {}", color, reset, msg);
}

/// Print warning message
pub fn warn(msg: &str) {
    let color = if is_terminal() { YELLOW } else { "" };
    let reset = if is_terminal() { NC } else { "" };
    eprintln!("{}[WARN]{} {}", color, reset, msg);
}

/// Print error message
pub fn error(msg: &str) {
    let color = if is_terminal() { RED } else { "" };
    let reset = if is_terminal() { NC } else { "" };
    eprintln!("{}[ERROR]{} {}", color, reset, msg);
}

/// Print success message
pub fn success(msg: &str) {
    let color = if is_terminal() { MAGENTA } else { "" };
    let reset = if is_terminal() { NC } else { "" };
    eprintln!("{}[OK]{} {}", color, reset, msg);
}

/// Exit codes per spec §6.3: `0` success, `1` argument or parse error,
/// `2` engine rejected blob.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ARG_OR_PARSE_ERROR: i32 = 1;
pub const EXIT_ENGINE_REJECTED: i32 = 2;

/// JSON response envelope for `--output json`, in the shape a caller
/// scripting this tool would want: a machine-readable record instead of
/// scraping human text.
#[derive(Debug, Clone, serde::Serialize)]
pub struct LoadReport {
    pub pid: u32,
    pub function_index: usize,
    pub function_name: String,
    pub id_mode: String,
    pub num_nodes: u32,
    pub num_edges: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_report_serializes_to_json() {
        let report = LoadReport {
            pid: 42,
            function_index: 0,
            function_name: "f".into(),
            id_mode: "dummy".into(),
            num_nodes: 3,
            num_edges: 2,
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"pid\":42"));
        assert!(json.contains("\"function_name\":\"f\""));
    }
}
