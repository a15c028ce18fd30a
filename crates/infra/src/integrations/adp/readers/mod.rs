//! One [`EntityReader`](hrsync_core::EntityReader) per ADP entity type
//!
//! Flat entities (workers, time cards, labor charge codes) are fetched in
//! full, then streamed. Tax profiles fan out over the shared
//! [`WorkerRoster`].

mod tax;
mod time;
mod workers;

use std::future::Future;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use hrsync_core::{DependentFetch, HierarchicalRecordExpander, PassContext, RecordStream};
use hrsync_domain::wire::WorkerDto;
use hrsync_domain::Result;

pub use tax::{FederalTaxProfilesReader, LocalTaxProfilesReader, StateTaxProfilesReader};
pub use time::{LaborChargeCodesReader, TimeCardsReader};
pub use workers::WorkersReader;

use super::roster::WorkerRoster;

/// Stream the records of an all-or-nothing fetch.
fn flat_stream<R, Fut>(records: Fut) -> RecordStream<R>
where
    R: Send + 'static,
    Fut: Future<Output = Result<Vec<R>>> + Send + 'static,
{
    stream::once(records)
        .flat_map(|outcome| {
            let items: Vec<Result<R>> = match outcome {
                Ok(records) => records.into_iter().map(Ok).collect(),
                Err(err) => vec![Err(err)],
            };
            stream::iter(items)
        })
        .boxed()
}

/// Load the roster, then expand every worker in it.
fn expand_roster<F>(
    roster: Arc<WorkerRoster>,
    expander: Arc<HierarchicalRecordExpander<F>>,
    ctx: PassContext,
) -> RecordStream<F::Record>
where
    F: DependentFetch<Parent = WorkerDto>,
{
    stream::once(async move {
        match roster.workers(&ctx.cancel).await {
            Ok(workers) => expander.expand(workers.as_ref().clone(), &ctx),
            Err(err) => stream::iter([Err(err)]).boxed(),
        }
    })
    .flatten()
    .boxed()
}
