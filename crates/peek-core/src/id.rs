//! Chunk addressing — node ids, local ids, and cluster-wide chunk ids.
//!
//! A chunk id packs the hosting node into the top 16 bits and the node-local
//! id into the low 48 bits. Only the storage layer composes or splits ids;
//! everything above it treats a `ChunkId` as opaque.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of low bits of a chunk id that hold the local id.
pub const LOCAL_ID_BITS: u32 = 48;

/// Mask selecting the local id part of a chunk id.
pub const LOCAL_ID_MASK: u64 = (1 << LOCAL_ID_BITS) - 1;

/// Identifies a cluster member.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u16);

impl NodeId {
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u16 {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId(0x{:04X})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}", self.0)
    }
}

impl From<u16> for NodeId {
    fn from(id: u16) -> Self {
        Self(id)
    }
}

/// Identifies a chunk within one node.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalId(u64);

impl LocalId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for LocalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LocalId(0x{:X})", self.0)
    }
}

impl From<u64> for LocalId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Cluster-wide chunk identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChunkId(u64);

impl ChunkId {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Pack a node id and a local id. Local id bits above bit 47 are dropped.
    pub const fn compose(node: NodeId, local: LocalId) -> Self {
        Self(((node.0 as u64) << LOCAL_ID_BITS) | (local.0 & LOCAL_ID_MASK))
    }

    /// Hosting node of this chunk.
    pub const fn node(self) -> NodeId {
        NodeId((self.0 >> LOCAL_ID_BITS) as u16)
    }

    pub const fn local(self) -> LocalId {
        LocalId(self.0 & LOCAL_ID_MASK)
    }
}

impl fmt::Debug for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkId({})", self)
    }
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016X}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid chunk id: {0:?}")]
pub struct ParseChunkIdError(pub String);

impl FromStr for ChunkId {
    type Err = ParseChunkIdError;

    /// Accepts `0x`-prefixed hex (either case) or plain decimal.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parsed = match trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
        {
            Some(hex) => u64::from_str_radix(hex, 16),
            None => trimmed.parse::<u64>(),
        };
        parsed
            .map(ChunkId)
            .map_err(|_| ParseChunkIdError(s.to_string()))
    }
}
