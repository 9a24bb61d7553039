//! CLI command modules.

pub mod chunks;
pub mod status;
