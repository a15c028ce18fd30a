//! Entity reader contract and the pass runner
//!
//! An [`EntityReader`] turns one entity type into a lazy, finite record
//! stream. [`run_pass`] drains that stream into the cache writer's
//! [`RecordSink`] and decides whether the pass succeeded.

use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;
use hrsync_domain::{HrSyncError, PassReport, Result, SyncRecord};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument};

use super::stats::SyncStats;

/// Lazy record sequence for one pass.
///
/// Ends cleanly when the pass is complete; a pass-fatal error is yielded as
/// the last item.
pub type RecordStream<R> = BoxStream<'static, Result<R>>;

/// State owned by exactly one pass
#[derive(Debug, Clone)]
pub struct PassContext {
    pub cancel: CancellationToken,
    pub stats: Arc<SyncStats>,
}

impl PassContext {
    pub fn new(cancel: CancellationToken) -> Self {
        Self { cancel, stats: Arc::new(SyncStats::new()) }
    }
}

/// Produces the records of one entity type.
///
/// Every call to [`read`](Self::read) starts a new pass from the beginning.
pub trait EntityReader: Send + Sync {
    type Record: SyncRecord;

    fn entity(&self) -> &'static str {
        Self::Record::ENTITY
    }

    fn read(&self, ctx: PassContext) -> RecordStream<Self::Record>;
}

/// Downstream cache writer
#[async_trait]
pub trait RecordSink<R: SyncRecord>: Send {
    async fn accept(&mut self, record: R) -> Result<()>;

    /// Called once after the last record of a pass that did not abort.
    async fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl<R: SyncRecord> RecordSink<R> for Vec<R> {
    async fn accept(&mut self, record: R) -> Result<()> {
        self.push(record);
        Ok(())
    }
}

/// Run one pass of `reader` into `sink`.
///
/// Per-parent failures only show up in the report's stats. Cancellation ends
/// the pass early but still successfully.
///
/// # Errors
/// `HrSyncError::PassFatal` wrapping the error that aborted the pass. Records
/// already accepted by `sink` stay there.
#[instrument(skip_all, fields(entity = reader.entity()))]
pub async fn run_pass<E, S>(
    reader: &E,
    sink: &mut S,
    cancel: CancellationToken,
) -> Result<PassReport>
where
    E: EntityReader + ?Sized,
    S: RecordSink<E::Record> + ?Sized,
{
    let entity = reader.entity();
    let ctx = PassContext::new(cancel);
    info!("sync pass started");

    let mut records = reader.read(ctx.clone());
    let mut emitted: u64 = 0;

    while let Some(item) = records.next().await {
        match item {
            Ok(record) => {
                debug_assert!(!record.primary_key().is_empty());
                sink.accept(record).await.map_err(|err| fail(entity, err))?;
                emitted += 1;
            }
            Err(err) if err.is_cancelled() => {
                debug!("record stream stopped by cancellation");
                break;
            }
            Err(err) => return Err(fail(entity, err)),
        }
    }

    sink.finish().await.map_err(|err| fail(entity, err))?;

    let report = PassReport {
        entity: entity.to_string(),
        emitted,
        stats: ctx.stats.snapshot(),
        cancelled: ctx.cancel.is_cancelled(),
    };
    info!(
        emitted = report.emitted,
        processed = report.stats.processed,
        succeeded = report.stats.succeeded,
        failed = report.stats.failed,
        cancelled = report.cancelled,
        "sync pass finished"
    );
    Ok(report)
}

fn fail(entity: &str, err: HrSyncError) -> HrSyncError {
    let err = HrSyncError::pass_fatal(entity, err);
    error!(
        status = ?err.status(),
        category = err.root().category().as_str(),
        error = %err,
        "sync pass failed"
    );
    err
}
