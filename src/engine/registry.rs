use std::collections::HashMap;
use std::sync::Mutex;

use super::automaton::Automaton;
use super::error::EngineError;

/// Outcome of an `observe` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The process has an active policy and the frontier is still
    /// non-empty after this observation.
    Ok,
    /// No policy is registered for this pid; the process is unsupervised.
    /// Not an error — per §4.3, this is a deliberate no-op.
    Unsupervised,
    /// The frontier emptied on this observation. The caller must terminate
    /// the process with an unconditional, uncatchable kill; the registry
    /// entry is left in place.
    Violation { pid: u32, id: i32 },
}

/// The process-wide `pid -> automaton` registry (§4.3, §5).
///
/// A single mutex guards the registry and every automaton's frontier for
/// the duration of `load_policy`, `observe`, and `unload` — observations
/// serialize per host, which spec §5 calls out as acceptable given the
/// expected notify rate relative to lock cost.
#[derive(Default)]
pub struct Registry {
    automata: Mutex<HashMap<u32, Automaton>>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            automata: Mutex::new(HashMap::new()),
        }
    }

    /// Validate, build, and atomically install a new automaton for `pid`,
    /// freeing any previous entry first (§8 invariant 5: no leak, no
    /// dangling reference).
    pub fn load_policy(&self, blob: &[u8]) -> Result<u32, EngineError> {
        let (pid, automaton) = Automaton::from_blob(blob)?;
        let mut table = self.automata.lock().unwrap_or_else(|e| e.into_inner());
        let previous = table.insert(pid, automaton);
        drop(previous);
        tracing::info!(pid, "loaded policy");
        Ok(pid)
    }

    /// Deliver one `notify(id)` observation. No-op for an unsupervised
    /// pid. Advances the frontier and epsilon-closes; an empty post-
    /// closure frontier is a violation.
    pub fn observe(&self, pid: u32, id: i32) -> Verdict {
        let mut table = self.automata.lock().unwrap_or_else(|e| e.into_inner());
        let Some(automaton) = table.get_mut(&pid) else {
            return Verdict::Unsupervised;
        };

        if automaton.advance(id) {
            Verdict::Ok
        } else {
            tracing::error!(pid, id, "policy violation: frontier emptied, killing process");
            Verdict::Violation { pid, id }
        }
    }

    /// Free the entry and its frontier.
    pub fn unload(&self, pid: u32) {
        let mut table = self.automata.lock().unwrap_or_else(|e| e.into_inner());
        if table.remove(&pid).is_some() {
            tracing::info!(pid, "unloaded policy");
        }
    }

    pub fn is_loaded(&self, pid: u32) -> bool {
        let table = self.automata.lock().unwrap_or_else(|e| e.into_inner());
        table.contains_key(&pid)
    }

    /// Test-only peek at a loaded automaton's frontier, the way
    /// `automaton`'s own tests reach into `automaton.frontier.test(..)`
    /// directly — `Registry` hides the table behind a mutex, so its tests
    /// need this instead of raw field access.
    #[cfg(test)]
    fn frontier_contains(&self, pid: u32, node: usize) -> bool {
        let table = self.automata.lock().unwrap_or_else(|e| e.into_inner());
        table
            .get(&pid)
            .map(|automaton| automaton.frontier_contains(node))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::blob::{encode, BlobEdge, BlobHeader};

    fn linear_blob(pid: u32) -> Vec<u8> {
        // A(0) --match=0--> B(1) --match=1--> C(2)
        encode(
            BlobHeader {
                pid,
                num_nodes: 3,
                num_edges: 2,
                id_mode: 0,
            },
            &[
                BlobEdge {
                    src: 0,
                    dst: 1,
                    match_id: 0,
                    is_epsilon: false,
                },
                BlobEdge {
                    src: 1,
                    dst: 2,
                    match_id: 1,
                    is_epsilon: false,
                },
            ],
        )
    }

    #[test]
    fn linear_path_violates_on_third_observation() {
        let registry = Registry::new();
        registry.load_policy(&linear_blob(42)).unwrap();

        assert_eq!(registry.observe(42, 0), Verdict::Ok);
        assert_eq!(registry.observe(42, 1), Verdict::Ok);
        assert_eq!(
            registry.observe(42, 2),
            Verdict::Violation { pid: 42, id: 2 }
        );
    }

    #[test]
    fn unknown_pid_is_a_no_op() {
        let registry = Registry::new();
        assert_eq!(registry.observe(99_999, 5), Verdict::Unsupervised);
    }

    #[test]
    fn malformed_blob_leaves_registry_unchanged() {
        let registry = Registry::new();
        registry.load_policy(&linear_blob(42)).unwrap();

        // num_edges claims 1 but edge references dst = num_nodes (out of range).
        let bad = encode(
            BlobHeader {
                pid: 42,
                num_nodes: 1,
                num_edges: 1,
                id_mode: 0,
            },
            &[BlobEdge {
                src: 0,
                dst: 1,
                match_id: 0,
                is_epsilon: false,
            }],
        );
        let err = registry.load_policy(&bad).unwrap_err();
        assert!(matches!(err, EngineError::Invalid(_)));

        // Original policy for pid 42 must still be intact.
        assert_eq!(registry.observe(42, 0), Verdict::Ok);
    }

    #[test]
    fn replacing_a_policy_drops_no_frontier_bits_from_the_old_one() {
        let registry = Registry::new();
        registry.load_policy(&linear_blob(42)).unwrap();
        assert_eq!(registry.observe(42, 0), Verdict::Ok); // frontier now {B}

        // Load a disjoint policy B for the same pid.
        let other = encode(
            BlobHeader {
                pid: 42,
                num_nodes: 1,
                num_edges: 0,
                id_mode: 0,
            },
            &[],
        );
        registry.load_policy(&other).unwrap();

        // Observing id=1 (valid under the old policy's frontier) must not
        // resolve against any stale state from A.
        assert_eq!(
            registry.observe(42, 1),
            Verdict::Violation { pid: 42, id: 1 }
        );
    }

    #[test]
    fn unload_frees_the_entry() {
        let registry = Registry::new();
        registry.load_policy(&linear_blob(7)).unwrap();
        assert!(registry.is_loaded(7));
        registry.unload(7);
        assert!(!registry.is_loaded(7));
        assert_eq!(registry.observe(7, 0), Verdict::Unsupervised);
    }

    #[test]
    fn branch_scenario_widens_frontier_across_merge() {
        // X -> eps -> {Y,Z} -> eps -> W ; nodes 0=X,1=Y,2=Z,3=W
        let blob = encode(
            BlobHeader {
                pid: 1,
                num_nodes: 4,
                num_edges: 4,
                id_mode: 0,
            },
            &[
                BlobEdge {
                    src: 0,
                    dst: 1,
                    match_id: -1,
                    is_epsilon: true,
                },
                BlobEdge {
                    src: 0,
                    dst: 2,
                    match_id: -1,
                    is_epsilon: true,
                },
                BlobEdge {
                    src: 1,
                    dst: 3,
                    match_id: -1,
                    is_epsilon: true,
                },
                BlobEdge {
                    src: 2,
                    dst: 3,
                    match_id: -1,
                    is_epsilon: true,
                },
            ],
        );
        let registry = Registry::new();
        registry.load_policy(&blob).unwrap();
        // All four nodes have zero consuming in-degree, so the start set
        // is {X,Y,Z,W} even before any observation; closure must have
        // pulled X's epsilon successors (and W, through Y/Z) into the
        // frontier on load, not left it sitting at {X} alone.
        assert!(registry.frontier_contains(1, 0)); // X
        assert!(registry.frontier_contains(1, 1)); // Y
        assert!(registry.frontier_contains(1, 2)); // Z
        assert!(registry.frontier_contains(1, 3)); // W
    }

    #[test]
    fn loop_scenario_reenters_only_through_epsilon_and_violates_on_repeat_observation() {
        // One block P then Q, with a CFG back-edge to itself (spec's
        // "Loop" scenario): consume(P->Q, match=dummy_id(P)=0),
        // eps(Q->P). Nodes: 0=P, 1=Q.
        let blob = encode(
            BlobHeader {
                pid: 9,
                num_nodes: 2,
                num_edges: 2,
                id_mode: 0,
            },
            &[
                BlobEdge {
                    src: 0,
                    dst: 1,
                    match_id: 0,
                    is_epsilon: false,
                },
                BlobEdge {
                    src: 1,
                    dst: 0,
                    match_id: -1,
                    is_epsilon: true,
                },
            ],
        );
        let registry = Registry::new();
        registry.load_policy(&blob).unwrap();

        // Node 1 (Q) has a consuming in-edge from P, so the start set is
        // {P} alone.
        assert!(registry.frontier_contains(9, 0));
        assert!(!registry.frontier_contains(9, 1));

        // observe(P) (match=0): advances to {Q}, then epsilon-closes the
        // back-edge Q->P, widening the frontier to {P,Q}.
        assert_eq!(registry.observe(9, 0), Verdict::Ok);
        assert!(registry.frontier_contains(9, 0));
        assert!(registry.frontier_contains(9, 1));

        // observe(Q) (match=dummy_id(Q)=1): no consuming edge matches 1
        // from either P or Q, so the frontier empties.
        assert_eq!(registry.observe(9, 1), Verdict::Violation { pid: 9, id: 1 });
    }
}
