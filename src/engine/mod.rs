//! Enforcement engine (§4.3, §5): the process registry, frontier bitset,
//! epsilon closure, advance, and the `load_policy`/`observe`/`unload`
//! operations a notifier hook drives.

mod automaton;
mod bitset;
mod error;
mod registry;

pub use automaton::Automaton;
pub use error::EngineError;
pub use registry::{Registry, Verdict};
