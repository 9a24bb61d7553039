//! Chunk types — what a storage collaborator hands back to the inspector.

use std::fmt;

use bytes::Bytes;
use peek_core::ChunkId;

/// A chunk fetched from a storage node. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub id: ChunkId,
    pub data: Bytes,
}

impl Chunk {
    pub fn new(id: ChunkId, data: impl Into<Bytes>) -> Self {
        Self {
            id,
            data: data.into(),
        }
    }

    /// Declared payload size in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Result of a batch fetch. `success_count` is the number of ids that were
/// found; `chunks` holds them in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOutcome {
    pub success_count: usize,
    pub chunks: Vec<Chunk>,
}

impl FetchOutcome {
    pub fn from_chunks(chunks: Vec<Chunk>) -> Self {
        Self {
            success_count: chunks.len(),
            chunks,
        }
    }
}

/// A chunk materialized as a named structure.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedObject {
    pub type_name: String,
    /// Size of the underlying chunk.
    pub size: usize,
    pub value: serde_json::Value,
}

impl fmt::Display for TypedObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string_pretty(&self.value) {
            Ok(text) => f.write_str(&text),
            Err(_) => write!(f, "{}", self.value),
        }
    }
}
