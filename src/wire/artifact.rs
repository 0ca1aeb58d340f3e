//! The textual policy artifact (§6.1): a human-inspectable document listing
//! one function policy per function, produced by the extractor and
//! consumed by the loader.

use serde::{Deserialize, Serialize};

use crate::model::EPSILON_LABEL;

/// Aggregated artifact: one top-level list of function records.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PolicyArtifact {
    pub functions: Vec<FunctionPolicy>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionPolicy {
    #[serde(rename = "functionName")]
    pub function_name: String,
    #[serde(rename = "mod")]
    pub modulus: u32,
    #[serde(rename = "idMode")]
    pub id_mode: String,
    /// Diagnostic only; not consulted by the engine.
    #[serde(rename = "callsInOrder")]
    pub calls_in_order: Vec<CallSiteRecord>,
    #[serde(rename = "nodeLabels")]
    pub node_labels: Vec<String>,
    #[serde(rename = "nodeDummyIDs")]
    pub node_dummy_ids: Vec<i64>,
    #[serde(rename = "nodeUniqueIDs")]
    pub node_unique_ids: Vec<i64>,
    pub edges: Vec<EdgeRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallSiteRecord {
    pub name: String,
    #[serde(rename = "uniqueID")]
    pub unique_id: i64,
    #[serde(rename = "dummyID")]
    pub dummy_id: i64,
    #[serde(rename = "resetCount")]
    pub reset_count: i64,
    #[serde(rename = "irLocation")]
    pub ir_location: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub src: u32,
    pub dst: u32,
    pub label: String,
    #[serde(rename = "matchDummy")]
    pub match_dummy: i64,
    #[serde(rename = "matchUnique")]
    pub match_unique: i64,
}

impl EdgeRecord {
    /// The loader must accept both the literal epsilon marker and the
    /// ASCII alias `"epsilon"`.
    pub fn is_epsilon(&self) -> bool {
        is_epsilon_label(&self.label)
    }
}

pub fn is_epsilon_label(label: &str) -> bool {
    label == EPSILON_LABEL || label == "epsilon"
}
