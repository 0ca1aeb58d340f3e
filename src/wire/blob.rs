//! The packed binary policy blob (§6.2): loader output, engine input.
//!
//! ```text
//! header:  u32 pid, u32 num_nodes, u32 num_edges, u32 id_mode   (16 bytes)
//! edges:   num_edges x { u32 src, u32 dst, i32 match_id, u8 is_epsilon }  (13 bytes each, packed)
//! ```
//!
//! All fields little-endian. Hand-rolled rather than derive-based: the
//! layout is externally fixed and packed, not self-describing, so a serde
//! codec would fight the format rather than implement it.

use super::error::WireError;

pub const HEADER_LEN: usize = 16;
pub const EDGE_LEN: usize = 13;
pub const MAX_EDGES: u32 = 1 << 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlobHeader {
    pub pid: u32,
    pub num_nodes: u32,
    pub num_edges: u32,
    pub id_mode: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlobEdge {
    pub src: u32,
    pub dst: u32,
    pub match_id: i32,
    pub is_epsilon: bool,
}

/// Encode a header plus its edges into the packed wire layout.
pub fn encode(header: BlobHeader, edges: &[BlobEdge]) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_LEN + edges.len() * EDGE_LEN);
    out.extend_from_slice(&header.pid.to_le_bytes());
    out.extend_from_slice(&header.num_nodes.to_le_bytes());
    out.extend_from_slice(&header.num_edges.to_le_bytes());
    out.extend_from_slice(&header.id_mode.to_le_bytes());
    for e in edges {
        out.extend_from_slice(&e.src.to_le_bytes());
        out.extend_from_slice(&e.dst.to_le_bytes());
        out.extend_from_slice(&e.match_id.to_le_bytes());
        out.push(e.is_epsilon as u8);
    }
    out
}

/// Decode a packed blob back into a header and its edges.
///
/// Rejects truncated input (`WireError::Truncated`) but does not apply any
/// semantic validation (node bounds, negative match ids, etc.) — that is
/// the engine's `load_policy` responsibility (§4.3), so the same bytes can
/// be validated independently by both the loader and the engine.
pub fn decode(bytes: &[u8]) -> Result<(BlobHeader, Vec<BlobEdge>), WireError> {
    if bytes.len() < HEADER_LEN {
        return Err(WireError::Truncated {
            expected: HEADER_LEN,
            found: bytes.len(),
        });
    }
    let pid = u32::from_le_bytes(bytes[0..4].try_into().unwrap());
    let num_nodes = u32::from_le_bytes(bytes[4..8].try_into().unwrap());
    let num_edges = u32::from_le_bytes(bytes[8..12].try_into().unwrap());
    let id_mode = u32::from_le_bytes(bytes[12..16].try_into().unwrap());

    let expected_len = HEADER_LEN + num_edges as usize * EDGE_LEN;
    if bytes.len() < expected_len {
        return Err(WireError::Truncated {
            expected: expected_len,
            found: bytes.len(),
        });
    }

    let mut edges = Vec::with_capacity(num_edges as usize);
    let mut offset = HEADER_LEN;
    for _ in 0..num_edges {
        let src = u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap());
        let dst = u32::from_le_bytes(bytes[offset + 4..offset + 8].try_into().unwrap());
        let match_id = i32::from_le_bytes(bytes[offset + 8..offset + 12].try_into().unwrap());
        let is_epsilon = bytes[offset + 12] != 0;
        edges.push(BlobEdge {
            src,
            dst,
            match_id,
            is_epsilon,
        });
        offset += EDGE_LEN;
    }

    Ok((
        BlobHeader {
            pid,
            num_nodes,
            num_edges,
            id_mode,
        },
        edges,
    ))
}
