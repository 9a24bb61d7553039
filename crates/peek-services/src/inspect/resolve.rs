//! Identifier resolution — one canonical chunk id per call.

use peek_core::ChunkId;

use super::shape::Target;
use super::InspectError;
use crate::store::ChunkStore;

/// Resolve `target` to a chunk id. Split ids are combined by the store;
/// nothing here knows the id layout.
pub fn resolve<S: ChunkStore + ?Sized>(store: &S, target: &Target) -> Result<ChunkId, InspectError> {
    match *target {
        Target::Chunk(Some(id)) => Ok(id),
        Target::Chunk(None) => Err(InspectError::MissingChunkId),
        Target::Split { node: None, .. } => Err(InspectError::MissingNodeId),
        Target::Split { local: None, .. } => Err(InspectError::MissingLocalId),
        Target::Split {
            node: Some(node),
            local: Some(local),
        } => Ok(store.combine_identifier(node, local)),
    }
}
