//! Worker list shared by the per-worker readers of one run

use std::collections::HashSet;
use std::sync::Arc;

use hrsync_domain::wire::WorkerDto;
use hrsync_domain::{HrSyncError, Result};
use tokio::sync::OnceCell;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::client::AdpClient;

/// Fetches the worker list at most once and hands the same list to every
/// reader built with this roster.
///
/// A failed or cancelled fetch is not cached; the next caller tries again.
/// A new run needs a new roster.
pub struct WorkerRoster {
    client: Arc<AdpClient>,
    workers: OnceCell<Arc<Vec<WorkerDto>>>,
}

impl WorkerRoster {
    pub fn new(client: Arc<AdpClient>) -> Self {
        Self { client, workers: OnceCell::new() }
    }

    pub fn client(&self) -> &Arc<AdpClient> {
        &self.client
    }

    /// The deduplicated worker list, fetching it on first use.
    ///
    /// # Errors
    /// The page failure that aborted the fetch.
    pub async fn workers(&self, cancel: &CancellationToken) -> Result<Arc<Vec<WorkerDto>>> {
        self.workers
            .get_or_try_init(|| async {
                let pages = self.client.workers(cancel.clone());
                let fetched = self.client.fetcher().fetch_all(&pages, cancel).await?;
                let workers = dedupe(fetched);
                info!(workers = workers.len(), "worker roster loaded");
                Ok::<_, HrSyncError>(Arc::new(workers))
            })
            .await
            .cloned()
    }
}

/// Drop repeated associate OIDs, keeping the first occurrence.
fn dedupe(workers: Vec<WorkerDto>) -> Vec<WorkerDto> {
    let mut seen = HashSet::new();
    workers
        .into_iter()
        .filter(|worker| match worker.usable_oid() {
            Some(oid) if !seen.insert(oid.to_string()) => {
                warn!(associate_oid = oid, "duplicate worker dropped");
                false
            }
            _ => true,
        })
        .collect()
}
