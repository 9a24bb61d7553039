//! Chunk inspection — resolve a chunk reference, fetch it, and render a
//! window of its bytes.
//!
//! Pipeline: [`shape`] parses the loosely typed argument list into a
//! [`CallShape`], [`resolve`] turns its target into a [`ChunkId`],
//! [`fetch`] pulls the chunk from a [`ChunkStore`](crate::ChunkStore),
//! [`window`] clamps the requested byte range, and [`decode`] renders it.
//! [`command`] strings the stages together and reports to an output sink.

pub mod args;
pub mod command;
pub mod decode;
pub mod fetch;
pub mod resolve;
pub mod shape;
pub mod window;

use peek_core::ChunkId;

pub use args::Arg;
pub use command::{decode_chunk, execute, inspect, Outcome, RenderedOutput};
pub use decode::{Cursor, Element, Radix};
pub use shape::{CallShape, DecodeOptions, DecodeRequest, Target};
pub use window::Window;

/// Why an inspection was aborted. None of these are retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InspectError {
    #[error("no nid specified")]
    MissingNodeId,
    #[error("no lid specified")]
    MissingLocalId,
    #[error("no cid or nid|lid specified")]
    MissingChunkId,
    #[error("invalid cid {0:?}")]
    InvalidChunkId(String),
    #[error("invalid {name} argument {value:?}")]
    InvalidArgument { name: &'static str, value: String },
    #[error("getting chunk {0} failed")]
    ChunkFetchFailed(ChunkId),
    #[error("getting {type_name} from chunk {id} failed")]
    TypedObjectFailed { id: ChunkId, type_name: String },
    #[error("unsupported data type {0:?}")]
    UnsupportedElementType(String),
}
