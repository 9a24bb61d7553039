//! peek wire format — JSON bodies exchanged between storage nodes and clients.
//!
//! Chunk ids travel in their textual form (`0x` + 16 hex digits) so they
//! survive JSON number precision limits. Chunk data travels hex-encoded.

use serde::{Deserialize, Serialize};

use crate::config::TypeLayout;

/// `GET /api/chunks/{cid}`, `POST /api/chunks` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkResponse {
    pub chunk_id: String,
    pub size: usize,
    /// Hex-encoded chunk bytes.
    pub data: String,
}

/// `POST /api/chunks` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateChunkRequest {
    /// Hex-encoded chunk bytes.
    pub data: String,
    /// Explicit local id. Absent = next free id on the node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_id: Option<u64>,
}

/// `DELETE /api/chunks/{cid}` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveResponse {
    pub removed: bool,
}

/// `GET /api/chunks/{cid}/typed/{type_name}` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedObjectResponse {
    pub chunk_id: String,
    pub type_name: String,
    pub size: usize,
    pub value: serde_json::Value,
}

/// `GET /api/status` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub node_id: u16,
    pub chunks: usize,
    pub bytes: u64,
    pub types: Vec<String>,
}

/// `GET /api/types` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypesResponse {
    pub types: Vec<TypeLayout>,
}
