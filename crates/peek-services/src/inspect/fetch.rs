//! Chunk fetcher — exactly one chunk per inspection.

use peek_core::ChunkId;

use super::InspectError;
use crate::chunk_types::Chunk;
use crate::store::ChunkStore;

/// Fetch `id`. Anything other than exactly one fetched chunk is a failure;
/// transport errors are logged and reported the same way.
pub fn fetch_one<S: ChunkStore + ?Sized>(store: &S, id: ChunkId) -> Result<Chunk, InspectError> {
    let outcome = store.fetch_chunks(&[id]).map_err(|e| {
        tracing::warn!(chunk_id = %id, error = %e, "chunk fetch failed");
        InspectError::ChunkFetchFailed(id)
    })?;

    if outcome.success_count != 1 {
        tracing::debug!(
            chunk_id = %id,
            success_count = outcome.success_count,
            "chunk not fetched"
        );
        return Err(InspectError::ChunkFetchFailed(id));
    }

    let chunk = outcome
        .chunks
        .into_iter()
        .next()
        .ok_or(InspectError::ChunkFetchFailed(id))?;
    tracing::debug!(chunk_id = %id, size = chunk.size(), "chunk fetched");
    Ok(chunk)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk_types::{FetchOutcome, TypedObject};
    use crate::memory_store::MemoryStore;
    use peek_core::{LocalId, NodeId};

    /// Reports whatever outcome it was built with.
    struct FixedStore(anyhow::Result<FetchOutcome>);

    impl ChunkStore for FixedStore {
        fn combine_identifier(&self, node: NodeId, local: LocalId) -> ChunkId {
            ChunkId::compose(node, local)
        }

        fn fetch_chunks(&self, _ids: &[ChunkId]) -> anyhow::Result<FetchOutcome> {
            match &self.0 {
                Ok(outcome) => Ok(outcome.clone()),
                Err(e) => Err(anyhow::anyhow!("{e}")),
            }
        }

        fn fetch_typed_object(&self, _id: ChunkId, _type_name: &str) -> anyhow::Result<Option<TypedObject>> {
            Ok(None)
        }
    }

    #[test]
    fn present_chunk_is_returned() {
        let store = MemoryStore::new(NodeId::new(1));
        let id = store.create(&b"abc"[..]);
        let chunk = fetch_one(&store, id).unwrap();
        assert_eq!(chunk.id, id);
        assert_eq!(&chunk.data[..], b"abc");
    }

    #[test]
    fn absent_chunk_fails() {
        let store = MemoryStore::new(NodeId::new(1));
        let id = ChunkId::from_raw(0x0001_0000_0000_0042);
        assert_eq!(fetch_one(&store, id), Err(InspectError::ChunkFetchFailed(id)));
    }

    #[test]
    fn success_count_must_be_one() {
        let id = ChunkId::from_raw(1);
        let chunk = Chunk::new(id, &b"x"[..]);
        let store = FixedStore(Ok(FetchOutcome {
            success_count: 2,
            chunks: vec![chunk.clone(), chunk],
        }));
        assert_eq!(fetch_one(&store, id), Err(InspectError::ChunkFetchFailed(id)));
    }

    #[test]
    fn count_without_payload_fails() {
        let id = ChunkId::from_raw(1);
        let store = FixedStore(Ok(FetchOutcome {
            success_count: 1,
            chunks: Vec::new(),
        }));
        assert_eq!(fetch_one(&store, id), Err(InspectError::ChunkFetchFailed(id)));
    }

    #[test]
    fn transport_error_is_a_fetch_failure() {
        let id = ChunkId::from_raw(1);
        let store = FixedStore(Err(anyhow::anyhow!("connection refused")));
        assert_eq!(fetch_one(&store, id), Err(InspectError::ChunkFetchFailed(id)));
    }
}
