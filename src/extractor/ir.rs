//! The extractor's input type: a minimal, serializable stand-in for the
//! host compiler framework's IR.
//!
//! Walking a real compilation unit (LLVM `Module`, rustc MIR, a bytecode
//! file) is the host framework's job and explicitly out of scope. This
//! type is the seam such a frontend fills; it mirrors the shape the
//! teacher codebase uses to ingest an external MIR-like representation
//! (Charon's ULLBC) before converting it to its own CFG.

use serde::{Deserialize, Serialize};

/// A compilation unit handed to the extractor: an ordered list of
/// functions, each an ordered list of basic blocks.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CompilationUnit {
    pub functions: Vec<Function>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    /// Blocks in iteration order. Successor indices in each block's
    /// `successors` refer to positions in this vector.
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Block {
    /// Instructions in source order.
    pub instructions: Vec<Instruction>,
    /// CFG successor blocks, by index into the owning function's `blocks`.
    pub successors: Vec<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Instruction {
    /// A call whose callee is named. Candidacy (external declaration,
    /// non-intrinsic) is judged by the extractor, not encoded here — the
    /// host framework hands over every call site it sees.
    Call { callee: String },
    /// Any instruction that is not a call the extractor cares about.
    Other,
}

impl Instruction {
    pub fn callee(&self) -> Option<&str> {
        match self {
            Instruction::Call { callee } => Some(callee.as_str()),
            Instruction::Other => None,
        }
    }
}
