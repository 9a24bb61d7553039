//! In-memory chunk store for one storage node.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::Result;
use bytes::Bytes;
use dashmap::DashMap;
use peek_core::{ChunkId, LocalId, NodeId};

use crate::chunk_types::{Chunk, FetchOutcome, TypedObject};
use crate::schema::TypeRegistry;
use crate::store::ChunkStore;

/// Chunks hosted by a single node, keyed by cluster-wide id. Cheap to
/// clone; clones share the same chunks.
#[derive(Clone)]
pub struct MemoryStore {
    node_id: NodeId,
    chunks: Arc<DashMap<ChunkId, Bytes>>,
    /// Next local id handed out by `create`. Local id 0 is never allocated.
    next_local: Arc<AtomicU64>,
    types: Arc<TypeRegistry>,
}

impl MemoryStore {
    pub fn new(node_id: NodeId) -> Self {
        Self::with_types(node_id, TypeRegistry::default())
    }

    pub fn with_types(node_id: NodeId, types: TypeRegistry) -> Self {
        Self {
            node_id,
            chunks: Arc::new(DashMap::new()),
            next_local: Arc::new(AtomicU64::new(1)),
            types: Arc::new(types),
        }
    }

    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    /// Store a chunk under the next free local id.
    pub fn create(&self, data: impl Into<Bytes>) -> ChunkId {
        let local = LocalId::new(self.next_local.fetch_add(1, Ordering::Relaxed));
        self.put(local, data)
    }

    /// Store a chunk under an explicit local id, replacing any previous data.
    pub fn put(&self, local: LocalId, data: impl Into<Bytes>) -> ChunkId {
        let id = ChunkId::compose(self.node_id, local);
        self.next_local
            .fetch_max(id.local().get() + 1, Ordering::Relaxed);
        let data = data.into();
        tracing::trace!(chunk_id = %id, size = data.len(), "chunk stored");
        self.chunks.insert(id, data);
        id
    }

    pub fn get(&self, id: ChunkId) -> Option<Bytes> {
        self.chunks.get(&id).map(|data| data.clone())
    }

    pub fn remove(&self, id: ChunkId) -> bool {
        self.chunks.remove(&id).is_some()
    }

    pub fn count(&self) -> usize {
        self.chunks.len()
    }

    /// Total payload bytes.
    pub fn size(&self) -> u64 {
        self.chunks.iter().map(|e| e.value().len() as u64).sum()
    }

    pub fn clear(&self) {
        self.chunks.clear();
    }
}

impl ChunkStore for MemoryStore {
    fn combine_identifier(&self, node: NodeId, local: LocalId) -> ChunkId {
        ChunkId::compose(node, local)
    }

    fn fetch_chunks(&self, ids: &[ChunkId]) -> Result<FetchOutcome> {
        let chunks = ids
            .iter()
            .filter_map(|&id| self.get(id).map(|data| Chunk::new(id, data)))
            .collect();
        Ok(FetchOutcome::from_chunks(chunks))
    }

    fn fetch_typed_object(&self, id: ChunkId, type_name: &str) -> Result<Option<TypedObject>> {
        let Some(data) = self.get(id) else {
            return Ok(None);
        };
        match self.types.decode(type_name, &data) {
            Ok(object) => Ok(Some(object)),
            Err(e) => {
                tracing::debug!(chunk_id = %id, type_name = %type_name, error = %e, "typed decode failed");
                Ok(None)
            }
        }
    }
}
