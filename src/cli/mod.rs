//! `loader` CLI (§6.3): `loader -p <pid> -j <artifact> [-f <function-index>=0] [--unique]`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Load one function's automaton from a policy artifact into the
/// enforcement engine for a given process id.
#[derive(Parser, Debug, Clone)]
#[command(name = "loader")]
#[command(author, version, about)]
pub struct Cli {
    /// Target process id to install the policy for.
    #[arg(short = 'p', long)]
    pub pid: u32,

    /// Path to the policy artifact (JSON) produced by the extractor.
    #[arg(short = 'j', long = "json", env = "LIBCALL_POLICY_JSON")]
    pub artifact: PathBuf,

    /// Index of the function within the artifact to load.
    #[arg(short = 'f', long, default_value_t = 0)]
    pub function_index: usize,

    /// Select unique ids for matching instead of dummy ids.
    #[arg(long)]
    pub unique: bool,

    /// Diagnostic output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text on stderr.
    Human,
    /// A single JSON object on stdout.
    Json,
}
