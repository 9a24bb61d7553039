//! HTTP API handlers — exposes a node's chunks as JSON.

pub mod chunks;
pub mod status;

use axum::http::StatusCode;

use peek_core::ChunkId;
use peek_services::MemoryStore;

#[derive(Clone)]
pub struct ApiState {
    pub store: MemoryStore,
}

impl ApiState {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

// ── Shared helpers ────────────────────────────────────────────────────────────

/// Parse a chunk id path segment (`0x` hex or decimal).
fn parse_chunk_id(text: &str) -> Result<ChunkId, (StatusCode, String)> {
    text.parse()
        .map_err(|e: peek_core::id::ParseChunkIdError| (StatusCode::BAD_REQUEST, e.to_string()))
}

/// Decode a hex-encoded chunk body.
fn parse_data(hex_str: &str) -> Result<Vec<u8>, (StatusCode, String)> {
    hex::decode(hex_str).map_err(|_| (StatusCode::BAD_REQUEST, "invalid hex".to_string()))
}

fn not_found(id: ChunkId) -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, format!("chunk {} not found", id))
}

// Re-export handler functions for use in router setup.
pub use chunks::{handle_create_chunk, handle_get_chunk, handle_get_typed, handle_remove_chunk};
pub use status::{handle_status, handle_types};
