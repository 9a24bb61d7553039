//! Storage trait — the seam between the inspector and a chunk cluster.
//!
//! The inspector never touches a node directly. Everything it needs from
//! the cluster goes through these three calls, which keeps it testable
//! against an in-memory store and usable against remote nodes.

use anyhow::Result;
use peek_core::{ChunkId, LocalId, NodeId};

use crate::chunk_types::{FetchOutcome, TypedObject};

pub trait ChunkStore {
    /// Build the cluster-wide id for a chunk hosted on `node`.
    fn combine_identifier(&self, node: NodeId, local: LocalId) -> ChunkId;

    /// Fetch raw chunks. Ids that do not exist are left out of the outcome;
    /// `Err` is reserved for transport failures.
    fn fetch_chunks(&self, ids: &[ChunkId]) -> Result<FetchOutcome>;

    /// Materialize a chunk as the named structure. `Ok(None)` when the type
    /// is unknown or the chunk does not exist or does not fit the type.
    fn fetch_typed_object(&self, id: ChunkId, type_name: &str) -> Result<Option<TypedObject>>;
}
