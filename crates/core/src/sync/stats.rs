//! Per-pass parent counters

use std::sync::atomic::{AtomicU64, Ordering};

use hrsync_domain::SyncStatsSnapshot;

/// Write-only counters for one pass, read once when the pass ends.
///
/// Owned by a single pass; never shared across entity types.
#[derive(Debug, Default)]
pub struct SyncStats {
    processed: AtomicU64,
    succeeded: AtomicU64,
    failed: AtomicU64,
}

impl SyncStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one parent whose fetches all succeeded. Returns the new
    /// processed total.
    pub fn record_success(&self) -> u64 {
        self.succeeded.fetch_add(1, Ordering::Relaxed);
        self.processed.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Count one parent that was skipped after a failed fetch. Returns the
    /// new processed total.
    pub fn record_failure(&self) -> u64 {
        self.failed.fetch_add(1, Ordering::Relaxed);
        self.processed.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Count `n` records from a flat collection as processed and succeeded.
    pub fn record_flat(&self, n: u64) {
        self.succeeded.fetch_add(n, Ordering::Relaxed);
        self.processed.fetch_add(n, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> SyncStatsSnapshot {
        SyncStatsSnapshot {
            processed: self.processed.load(Ordering::Relaxed),
            succeeded: self.succeeded.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}
