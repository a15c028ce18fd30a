//! Pass control flow: pagination, hierarchical fan-out, and the reader
//! contract handed to the cache writer.

pub mod expander;
pub mod pagination;
pub mod reader;
pub mod stats;
