//! Pass statistics
//!
//! Counters are accumulated while a pass runs and read once when it ends.

use serde::{Deserialize, Serialize};

/// Point-in-time copy of a pass's parent counters.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SyncStatsSnapshot {
    /// Parents whose dependent fetches were attempted
    pub processed: u64,
    /// Parents whose dependent fetches all succeeded
    pub succeeded: u64,
    /// Parents skipped because a dependent fetch failed
    pub failed: u64,
}

/// Outcome of a pass that finished without a pass-fatal error.
///
/// Per-parent failures show up only in `stats.failed`; they never turn the
/// pass into a failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PassReport {
    pub entity: String,
    /// Records handed to the sink
    pub emitted: u64,
    pub stats: SyncStatsSnapshot,
    /// The caller cancelled before every parent was scheduled
    pub cancelled: bool,
}
