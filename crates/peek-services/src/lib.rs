//! peek-services — the chunk inspector and the storage collaborators it
//! runs against.

pub mod chunk_types;
pub mod inspect;
pub mod memory_store;
pub mod schema;
pub mod sink;
pub mod store;

pub use chunk_types::{Chunk, FetchOutcome, TypedObject};
pub use inspect::{Arg, CallShape, InspectError, Outcome};
pub use memory_store::MemoryStore;
pub use schema::TypeRegistry;
pub use sink::{BufferSink, OutputSink, Terminal};
pub use store::ChunkStore;
