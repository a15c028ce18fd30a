//! # HrSync Core
//!
//! Pure synchronization logic - no HTTP, no configuration loading.
//!
//! This crate contains:
//! - Record mappers from upstream wire shapes to canonical records
//! - Offset pagination and hierarchical fan-out control flow
//! - Port interfaces (traits) for page sources, dependent fetches, readers
//!   and the downstream record sink
//!
//! ## Architecture Principles
//! - Only depends on `hrsync-domain`
//! - All I/O reaches this crate through traits
//! - Pure, testable business logic

pub mod mapping;
pub mod sync;

// Re-export specific items to avoid ambiguity
pub use sync::expander::{
    DependentFetch, ExpanderConfig, HierarchicalRecordExpander, LevelFailure, LevelFailureKind,
    LevelResultExt,
};
pub use sync::pagination::{Page, PageCursor, PageSource, PagedCollectionFetcher};
pub use sync::reader::{run_pass, EntityReader, PassContext, RecordSink, RecordStream};
pub use sync::stats::SyncStats;
