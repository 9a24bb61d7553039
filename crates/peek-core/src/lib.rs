//! peek-core — chunk addressing, configuration, and the node API wire types.
//! All other peek crates depend on this one.

pub mod config;
pub mod element;
pub mod id;
pub mod wire;

pub use element::ElementType;
pub use id::{ChunkId, LocalId, NodeId};
