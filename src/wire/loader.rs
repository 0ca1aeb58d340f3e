//! Loader: artifact + function selector -> compact binary policy (§4.2, §6.2).

use crate::model::IdMode;

use super::artifact::{FunctionPolicy, PolicyArtifact};
use super::blob::{self, BlobEdge, BlobHeader, MAX_EDGES};
use super::error::WireError;

/// Select one function's policy out of an artifact by index.
pub fn select_function(
    artifact: &PolicyArtifact,
    function_index: usize,
) -> Result<&FunctionPolicy, WireError> {
    artifact
        .functions
        .get(function_index)
        .ok_or(WireError::FunctionIndexOutOfRange {
            index: function_index,
            available: artifact.functions.len(),
        })
}

/// Build the packed binary blob the engine's `load_policy` consumes, for
/// the given process id and a chosen id mode (which may differ from the
/// function's own `idMode` field — the artifact carries both match ids
/// specifically so a loader can choose).
///
/// Picks `match_id` from `match_dummy` or `match_unique` according to
/// `id_mode`, sets `is_epsilon` from the label (accepting both the literal
/// marker and the `"epsilon"` alias), and rejects artifacts whose shape
/// violates the invariants in spec §3/§6.2.
///
/// A function with zero call sites (legal per §4.1 — "any observation from
/// this process fails") is loadable: spec §6.2 separately requires
/// `num_nodes != 0` in the binary header, so the loader synthesizes a
/// single unreachable placeholder node with no edges. The frontier then
/// starts (and stays) at that node, epsilon-closes to nothing further, and
/// every subsequent observation correctly violates — realizing the
/// documented intent without breaking the header invariant.
pub fn build_blob(
    artifact: &PolicyArtifact,
    function_index: usize,
    pid: u32,
    id_mode: IdMode,
) -> Result<Vec<u8>, WireError> {
    let func = select_function(artifact, function_index)?;

    if func.node_labels.len() != func.node_dummy_ids.len()
        || func.node_labels.len() != func.node_unique_ids.len()
    {
        return Err(WireError::NodeArrayLengthMismatch {
            function: func.function_name.clone(),
            labels: func.node_labels.len(),
            dummy_ids: func.node_dummy_ids.len(),
            unique_ids: func.node_unique_ids.len(),
        });
    }

    if func.node_labels.is_empty() {
        let header = BlobHeader {
            pid,
            num_nodes: 1,
            num_edges: 0,
            id_mode: id_mode.wire_code(),
        };
        return Ok(blob::encode(header, &[]));
    }

    let num_nodes = func.node_labels.len() as u32;

    if func.edges.len() as u64 > MAX_EDGES as u64 {
        return Err(WireError::TooManyEdges(func.edges.len() as u32));
    }
    let num_edges = func.edges.len() as u32;

    let mut edges = Vec::with_capacity(func.edges.len());
    for e in &func.edges {
        if e.src >= num_nodes || e.dst >= num_nodes {
            return Err(WireError::EdgeNodeOutOfRange {
                function: func.function_name.clone(),
                src: e.src,
                dst: e.dst,
                num_nodes,
            });
        }

        let is_epsilon = e.is_epsilon();
        let match_id = if is_epsilon {
            -1
        } else {
            match id_mode {
                IdMode::Dummy => e.match_dummy,
                IdMode::Unique => e.match_unique,
            }
        };

        if !is_epsilon && match_id < 0 {
            return Err(WireError::NegativeMatchId {
                function: func.function_name.clone(),
            });
        }

        edges.push(BlobEdge {
            src: e.src,
            dst: e.dst,
            match_id: match_id as i32,
            is_epsilon,
        });
    }

    let header = BlobHeader {
        pid,
        num_nodes,
        num_edges,
        id_mode: id_mode.wire_code(),
    };
    Ok(blob::encode(header, &edges))
}
