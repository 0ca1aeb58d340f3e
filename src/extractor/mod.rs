//! Policy extractor (§4.1): walks a compilation unit's function bodies,
//! identifies library-call sites, builds a per-function NFA, assigns
//! dummy/unique identifiers, and records where a `notify(id)` call would be
//! instrumented.

pub mod config;
pub mod ir;

use petgraph::graph::NodeIndex;

pub use config::Config;

use crate::model::{Edge, EdgeKind, FunctionAutomaton, Node, EPSILON_LABEL};
use crate::wire::{CallSiteRecord, EdgeRecord, FunctionPolicy};

/// One instrumentation point: a call to `notify(chosen_id)` to insert
/// immediately before the corresponding call site. Representing this as
/// data rather than mutating a host IR keeps the extractor usable without
/// a live compiler frontend; wiring the actual instruction insertion back
/// into the host's IR is that frontend's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotifySite {
    pub block_index: usize,
    pub instruction_index: usize,
    pub unique_id: i64,
    pub dummy_id: i64,
    pub chosen_id: i64,
}

#[derive(Debug, Clone)]
pub struct ExtractedFunction {
    pub automaton: FunctionAutomaton,
    pub notify_sites: Vec<NotifySite>,
    pub calls_in_order: Vec<CallSiteRecord>,
}

/// One call site found during block traversal, before node/edge
/// construction: its position, callee name, and assigned identifiers.
struct Site {
    block_index: usize,
    instruction_index: usize,
    callee: String,
    unique_id: i64,
    dummy_id: i64,
    reset_count: i64,
}

/// Run the per-function procedure described in spec §4.1 steps 1-5.
pub fn extract_function(func: &ir::Function, config: &Config) -> ExtractedFunction {
    // Step 1 + 2: site enumeration and identifier assignment, walking
    // blocks then instructions in order, with per-function counters.
    let mut sites_per_block: Vec<Vec<Site>> = Vec::with_capacity(func.blocks.len());
    let mut unique_counter: i64 = 1;
    let mut dummy_counter: i64 = 0;
    let modulus = config.modulus.max(1) as i64;

    for block in &func.blocks {
        let mut sites = Vec::new();
        for (instr_idx, instr) in block.instructions.iter().enumerate() {
            if let Some(callee) = instr.callee() {
                if config.is_candidate(callee) {
                    let unique_id = unique_counter;
                    unique_counter += 1;
                    let dummy_id = dummy_counter % modulus;
                    let reset_count = dummy_counter / modulus;
                    dummy_counter += 1;
                    sites.push(Site {
                        block_index: sites_per_block.len(),
                        instruction_index: instr_idx,
                        callee: callee.to_string(),
                        unique_id,
                        dummy_id,
                        reset_count,
                    });
                }
            }
        }
        sites_per_block.push(sites);
    }

    // Build nodes, recording each block's entry/exit node index and
    // each site's global node index for edge construction.
    let mut automaton = FunctionAutomaton::new(&func.name, config.modulus, config.id_mode);
    let mut block_entry_exit: Vec<Option<(NodeIndex, NodeIndex)>> =
        Vec::with_capacity(func.blocks.len());
    let mut site_nodes: Vec<Vec<NodeIndex>> = Vec::with_capacity(func.blocks.len());
    let mut notify_sites = Vec::new();
    let mut calls_in_order = Vec::new();

    for sites in &sites_per_block {
        let mut nodes = Vec::with_capacity(sites.len());
        for site in sites {
            let node_idx = automaton.add_node(Node {
                pretty_name: site.callee.clone(),
                dummy_id: site.dummy_id,
                reset_count: site.reset_count,
                unique_id: site.unique_id,
            });
            nodes.push(node_idx);

            let chosen_id = match config.id_mode {
                crate::model::IdMode::Dummy => site.dummy_id,
                crate::model::IdMode::Unique => site.unique_id,
            };
            notify_sites.push(NotifySite {
                block_index: site.block_index,
                instruction_index: site.instruction_index,
                unique_id: site.unique_id,
                dummy_id: site.dummy_id,
                chosen_id,
            });
            calls_in_order.push(CallSiteRecord {
                name: site.callee.clone(),
                unique_id: match config.id_mode {
                    crate::model::IdMode::Unique => site.unique_id,
                    crate::model::IdMode::Dummy => -1,
                },
                dummy_id: site.dummy_id,
                reset_count: site.reset_count,
                ir_location: format!("block {} instr {}", site.block_index, site.instruction_index),
            });
        }

        block_entry_exit.push(match (nodes.first(), nodes.last()) {
            (Some(&first), Some(&last)) => Some((first, last)),
            _ => None,
        });
        site_nodes.push(nodes);
    }

    // Step 3: intra-block consuming edges between consecutive sites.
    for (block_idx, sites) in sites_per_block.iter().enumerate() {
        let nodes = &site_nodes[block_idx];
        for i in 0..sites.len().saturating_sub(1) {
            let src_node = nodes[i];
            let dst_node = nodes[i + 1];
            let src_site = &sites[i];
            automaton.add_edge(
                src_node,
                dst_node,
                Edge {
                    src: src_node.index(),
                    dst: dst_node.index(),
                    label: src_site.callee.clone(),
                    kind: EdgeKind::Consuming {
                        match_dummy: src_site.dummy_id,
                        match_unique: src_site.unique_id,
                    },
                },
            );
        }
    }

    // Step 4: inter-block epsilon edges from each block's exit to every
    // CFG successor block's entry, for successors that have sites.
    // Deliberately includes self-loops (a block whose own successor list
    // names itself) — see spec §4.1 edge cases.
    for (block_idx, block) in func.blocks.iter().enumerate() {
        let Some((_, exit)) = block_entry_exit[block_idx] else {
            continue;
        };
        for &succ_idx in &block.successors {
            if let Some(Some((entry, _))) = block_entry_exit.get(succ_idx).copied() {
                automaton.add_edge(
                    exit,
                    entry,
                    Edge {
                        src: exit.index(),
                        dst: entry.index(),
                        label: EPSILON_LABEL.to_string(),
                        kind: EdgeKind::Epsilon,
                    },
                );
            }
        }
    }

    ExtractedFunction {
        automaton,
        notify_sites,
        calls_in_order,
    }
}

/// Flatten an [`ExtractedFunction`] into the textual artifact's per-function
/// record (§6.1), in the same dense node/edge order the automaton holds
/// them — this is what makes the extractor's output deterministic
/// byte-for-byte across identical runs.
pub fn to_function_policy(extracted: &ExtractedFunction) -> FunctionPolicy {
    let automaton = &extracted.automaton;
    let mut node_labels = Vec::with_capacity(automaton.num_nodes());
    let mut node_dummy_ids = Vec::with_capacity(automaton.num_nodes());
    let mut node_unique_ids = Vec::with_capacity(automaton.num_nodes());
    for (_, node) in automaton.nodes_in_order() {
        node_labels.push(node.pretty_name.clone());
        node_dummy_ids.push(node.dummy_id);
        node_unique_ids.push(node.unique_id);
    }

    let mut edges = Vec::with_capacity(automaton.num_edges());
    for edge in automaton.edges_in_order() {
        let (match_dummy, match_unique) = match edge.kind {
            EdgeKind::Consuming {
                match_dummy,
                match_unique,
            } => (match_dummy, match_unique),
            EdgeKind::Epsilon => (-1, -1),
        };
        edges.push(EdgeRecord {
            src: edge.src as u32,
            dst: edge.dst as u32,
            label: edge.label.clone(),
            match_dummy,
            match_unique,
        });
    }

    FunctionPolicy {
        function_name: automaton.function_name.clone(),
        modulus: automaton.modulus,
        id_mode: automaton.id_mode.as_str().to_string(),
        calls_in_order: extracted.calls_in_order.clone(),
        node_labels,
        node_dummy_ids,
        node_unique_ids,
        edges,
    }
}

/// Run the extractor over an entire compilation unit, producing the
/// complete artifact (§6.1) in function order.
pub fn extract_compilation_unit(
    unit: &ir::CompilationUnit,
    config: &Config,
) -> crate::wire::PolicyArtifact {
    let functions = unit
        .functions
        .iter()
        .map(|f| to_function_policy(&extract_function(f, config)))
        .collect();
    crate::wire::PolicyArtifact { functions }
}
