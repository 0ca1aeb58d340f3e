use crate::model::IdMode;
use crate::wire::blob::{self, BlobEdge, MAX_EDGES};

use super::bitset::Bitset;
use super::error::EngineError;

/// One edge as loaded into the engine: flat, `Copy`, no back-pointers.
#[derive(Debug, Clone, Copy)]
struct LoadedEdge {
    src: u32,
    dst: u32,
    match_id: i32,
    is_epsilon: bool,
}

impl From<BlobEdge> for LoadedEdge {
    fn from(e: BlobEdge) -> Self {
        Self {
            src: e.src,
            dst: e.dst,
            match_id: e.match_id,
            is_epsilon: e.is_epsilon,
        }
    }
}

/// A process's loaded automaton: validated edges plus a live frontier.
///
/// `scratch` is a pre-allocated bitset reused by every `advance` call —
/// the production fix spec §9's design notes flag as future work for the
/// "current design"'s per-observation allocation.
#[derive(Debug)]
pub struct Automaton {
    pub(super) num_nodes: u32,
    pub(super) id_mode: IdMode,
    edges: Vec<LoadedEdge>,
    pub(super) frontier: Bitset,
    scratch: Bitset,
}

impl Automaton {
    /// Decode and validate a policy blob (§4.3 `load_policy` header
    /// validation), then compute the start set and epsilon-close it.
    pub fn from_blob(bytes: &[u8]) -> Result<(u32, Self), EngineError> {
        let (header, edges) = blob::decode(bytes)?;

        if header.num_nodes == 0 {
            return Err(EngineError::Invalid("num_nodes must be >= 1".to_string()));
        }
        if header.num_edges > MAX_EDGES {
            return Err(EngineError::Invalid(format!(
                "num_edges {} exceeds maximum of 2^20",
                header.num_edges
            )));
        }
        let id_mode = IdMode::from_wire_code(header.id_mode)
            .ok_or_else(|| EngineError::Invalid(format!("unknown id_mode {}", header.id_mode)))?;

        for e in &edges {
            if e.src >= header.num_nodes || e.dst >= header.num_nodes {
                return Err(EngineError::Invalid(format!(
                    "edge references out-of-range node (src={}, dst={}, num_nodes={})",
                    e.src, e.dst, header.num_nodes
                )));
            }
            if !e.is_epsilon && e.match_id < 0 {
                return Err(EngineError::Invalid(
                    "non-epsilon edge has negative match_id".to_string(),
                ));
            }
        }

        let loaded_edges: Vec<LoadedEdge> = edges.into_iter().map(LoadedEdge::from).collect();

        let mut automaton = Self {
            num_nodes: header.num_nodes,
            id_mode,
            edges: loaded_edges,
            frontier: Bitset::new(header.num_nodes as usize),
            scratch: Bitset::new(header.num_nodes as usize),
        };
        automaton.seed_start_set();
        automaton.epsilon_closure();

        Ok((header.pid, automaton))
    }

    /// Start set: all nodes whose in-degree in *consuming* edges is zero
    /// (epsilon in-edges are ignored). Falls back to node 0 if that set is
    /// empty, preserving forward progress on cyclic CFGs (§4.3).
    fn seed_start_set(&mut self) {
        let mut consuming_in_degree = vec![0u32; self.num_nodes as usize];
        for e in &self.edges {
            if !e.is_epsilon {
                consuming_in_degree[e.dst as usize] += 1;
            }
        }

        let mut any = false;
        for (node, &deg) in consuming_in_degree.iter().enumerate() {
            if deg == 0 {
                self.frontier.set(node);
                any = true;
            }
        }
        if !any {
            self.frontier.set(0);
        }
    }

    /// Fixed-point epsilon closure: repeatedly scan the edge list, adding
    /// any epsilon edge's destination when its source is active, until a
    /// full scan adds nothing. `O(E*N)` worst case, acceptable per §4.3
    /// because closures are infrequent (once per observation).
    pub(super) fn epsilon_closure(&mut self) {
        loop {
            let mut changed = false;
            for e in &self.edges {
                if e.is_epsilon && self.frontier.test(e.src as usize) && !self.frontier.test(e.dst as usize) {
                    self.frontier.set(e.dst as usize);
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
    }

    /// Advance on an observed id: compute the next frontier from consuming
    /// edges whose source is active and whose match id equals `id`, derived
    /// entirely from the pre-advance frontier (never mutated in place while
    /// being read), then epsilon-close. Returns whether the post-closure
    /// frontier is non-empty.
    pub(super) fn advance(&mut self, id: i32) -> bool {
        self.scratch.clear_all();
        for e in &self.edges {
            if !e.is_epsilon && e.match_id == id && self.frontier.test(e.src as usize) {
                self.scratch.set(e.dst as usize);
            }
        }
        std::mem::swap(&mut self.frontier, &mut self.scratch);
        self.epsilon_closure();
        !self.frontier.is_empty()
    }

    /// Test-only peek at the frontier, for callers outside this module
    /// (e.g. `registry`'s tests) that need to assert on frontier contents
    /// without their own access to the private `edges`/`scratch` fields.
    #[cfg(test)]
    pub(crate) fn frontier_contains(&self, node: usize) -> bool {
        self.frontier.test(node)
    }
}
