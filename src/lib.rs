// libcall-sandbox: static library-call policy extraction, wire format, and
// runtime enforcement engine.
//
// Data flows one direction: source program -> extractor -> policy artifact
// -> loader -> enforcement engine -> per-process verdict.

#![allow(dead_code)]

pub mod cli;
pub mod engine;
pub mod extractor;
pub mod model;
pub mod output;
pub mod wire;

pub use cli::{Cli, OutputFormat};
pub use engine::{Automaton, EngineError, Registry, Verdict};
pub use model::{Edge, EdgeKind, FunctionAutomaton, IdMode, Node};
pub use wire::{PolicyArtifact, WireError};
