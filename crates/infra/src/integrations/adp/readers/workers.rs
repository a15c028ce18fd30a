use std::sync::Arc;

use hrsync_core::mapping::map_worker;
use hrsync_core::{EntityReader, PassContext, RecordStream};
use hrsync_domain::{Result, WorkerRecord};

use super::flat_stream;
use crate::integrations::adp::roster::WorkerRoster;

/// Workers, read from the roster so the tax readers of the same run reuse
/// the fetch.
pub struct WorkersReader {
    roster: Arc<WorkerRoster>,
}

impl WorkersReader {
    pub fn new(roster: Arc<WorkerRoster>) -> Self {
        Self { roster }
    }
}

impl EntityReader for WorkersReader {
    type Record = WorkerRecord;

    fn read(&self, ctx: PassContext) -> RecordStream<WorkerRecord> {
        flat_stream(read_workers(Arc::clone(&self.roster), ctx))
    }
}

async fn read_workers(roster: Arc<WorkerRoster>, ctx: PassContext) -> Result<Vec<WorkerRecord>> {
    let workers = roster.workers(&ctx.cancel).await?;
    ctx.stats.record_flat(workers.len() as u64);
    Ok(workers.iter().cloned().map(map_worker).collect())
}
