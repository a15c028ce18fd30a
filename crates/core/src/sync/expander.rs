//! Hierarchical fan-out over parent records
//!
//! For entities that are only reachable through per-parent calls (a worker's
//! tax profile, then that profile's state detail), the expander runs the
//! dependent fetch for every parent and flattens the results into one
//! record stream.
//!
//! ```text
//!   parents ──► take_while(!cancelled) ──► fetch (≤ concurrency in flight)
//!                                               │
//!                      ┌────────────────────────┼──────────────────────┐
//!                      ▼                        ▼                      ▼
//!                  Ok(records)         recoverable failure      fatal failure
//!                  emit + count        warn + count failed      emit Err, stop
//! ```
//!
//! A parent's failure never affects its siblings. With `concurrency == 1`
//! records come out in parent order; above that, in completion order.

use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use hrsync_domain::constants::{DEFAULT_CONCURRENCY, DEFAULT_PROGRESS_EVERY};
use hrsync_domain::{HrSyncError, Result, SyncConfig};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::reader::{PassContext, RecordStream};
use super::stats::SyncStats;

/// Why a parent produced no records at one fetch level
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelFailureKind {
    /// The call succeeded but carried nothing usable (e.g. no profile id)
    Absent,
    Failed(HrSyncError),
}

/// A dependent fetch failure, tagged with the level it happened at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelFailure {
    pub level: &'static str,
    pub kind: LevelFailureKind,
}

impl LevelFailure {
    pub const fn absent(level: &'static str) -> Self {
        Self { level, kind: LevelFailureKind::Absent }
    }

    pub const fn failed(level: &'static str, error: HrSyncError) -> Self {
        Self { level, kind: LevelFailureKind::Failed(error) }
    }

    /// Failures that make every later parent fail the same way.
    pub fn is_fatal(&self) -> bool {
        match &self.kind {
            LevelFailureKind::Absent => false,
            LevelFailureKind::Failed(err) => {
                !err.is_recoverable_per_parent() && !err.is_cancelled()
            }
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(&self.kind, LevelFailureKind::Failed(err) if err.is_cancelled())
    }

    /// The underlying error; an absent result reads as a body we could not use.
    pub fn into_source(self) -> HrSyncError {
        match self.kind {
            LevelFailureKind::Absent => HrSyncError::Deserialization(format!(
                "{} response carried no usable data",
                self.level
            )),
            LevelFailureKind::Failed(err) => err,
        }
    }
}

/// Tag an optional fetch result with its level.
pub trait LevelResultExt<T> {
    /// `Ok(None)` becomes [`LevelFailureKind::Absent`], `Err` becomes
    /// [`LevelFailureKind::Failed`].
    ///
    /// # Errors
    /// Returns the tagged [`LevelFailure`].
    fn at_level(self, level: &'static str) -> std::result::Result<T, LevelFailure>;
}

impl<T> LevelResultExt<T> for Result<Option<T>> {
    fn at_level(self, level: &'static str) -> std::result::Result<T, LevelFailure> {
        match self {
            Ok(Some(value)) => Ok(value),
            Ok(None) => Err(LevelFailure::absent(level)),
            Err(err) => Err(LevelFailure::failed(level, err)),
        }
    }
}

/// All dependent calls needed to turn one parent into records
#[async_trait]
pub trait DependentFetch: Send + Sync + 'static {
    type Parent: Send + Sync + 'static;
    type Record: Send + 'static;

    /// Join key of `parent`, used in logs
    fn parent_key(&self, parent: &Self::Parent) -> String;

    /// Run every level for `parent` and map the results.
    ///
    /// An empty `Ok` is a parent with nothing to emit, not a failure.
    async fn fetch(
        &self,
        parent: &Self::Parent,
        cancel: &CancellationToken,
    ) -> std::result::Result<Vec<Self::Record>, LevelFailure>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpanderConfig {
    /// Parents in flight at once
    pub concurrency: usize,
    /// Progress log cadence, in parents; 0 disables it
    pub progress_every: usize,
}

impl Default for ExpanderConfig {
    fn default() -> Self {
        Self { concurrency: DEFAULT_CONCURRENCY, progress_every: DEFAULT_PROGRESS_EVERY }
    }
}

impl From<&SyncConfig> for ExpanderConfig {
    fn from(config: &SyncConfig) -> Self {
        Self { concurrency: config.concurrency, progress_every: config.progress_every }
    }
}

pub struct HierarchicalRecordExpander<F: DependentFetch> {
    entity: &'static str,
    fetcher: Arc<F>,
    config: ExpanderConfig,
}

impl<F: DependentFetch> HierarchicalRecordExpander<F> {
    pub fn new(entity: &'static str, fetcher: Arc<F>, config: ExpanderConfig) -> Self {
        Self { entity, fetcher, config }
    }

    /// Stream the records of every parent.
    ///
    /// The stream yields at most one `Err`, the pass-fatal one, and ends
    /// right after it. Cancellation is checked before each parent is
    /// scheduled; parents already in flight finish and their records are
    /// still yielded.
    pub fn expand(&self, parents: Vec<F::Parent>, ctx: &PassContext) -> RecordStream<F::Record> {
        let total = parents.len();
        let concurrency = self.config.concurrency.max(1);
        let fetcher = Arc::clone(&self.fetcher);
        let cancel = ctx.cancel.clone();
        let gate = ctx.cancel.clone();

        info!(entity = self.entity, parents = total, concurrency, "expanding parents");

        let outcomes = stream::iter(parents)
            .take_while(move |_| futures::future::ready(!gate.is_cancelled()))
            .map(move |parent| {
                let fetcher = Arc::clone(&fetcher);
                let cancel = cancel.clone();
                async move {
                    let key = fetcher.parent_key(&parent);
                    let outcome = fetcher.fetch(&parent, &cancel).await;
                    (key, outcome)
                }
            })
            .buffer_unordered(concurrency)
            .boxed();

        let state = Expansion {
            entity: self.entity,
            total,
            progress_every: self.config.progress_every,
            stats: Arc::clone(&ctx.stats),
            outcomes,
            finished: false,
        };

        stream::unfold(state, |mut state| async move {
            let batch = state.next_batch().await?;
            Some((batch, state))
        })
        .flat_map(stream::iter)
        .boxed()
    }
}

type Outcome<R> = (String, std::result::Result<Vec<R>, LevelFailure>);

struct Expansion<R> {
    entity: &'static str,
    total: usize,
    progress_every: usize,
    stats: Arc<SyncStats>,
    outcomes: futures::stream::BoxStream<'static, Outcome<R>>,
    finished: bool,
}

impl<R: Send + 'static> Expansion<R> {
    /// Items to yield for the next parent that produced output, or `None`
    /// once the expansion is over.
    async fn next_batch(&mut self) -> Option<Vec<Result<R>>> {
        if self.finished {
            return None;
        }

        while let Some((parent, outcome)) = self.outcomes.next().await {
            match outcome {
                Ok(records) => {
                    let processed = self.stats.record_success();
                    debug!(
                        entity = self.entity,
                        parent = %parent,
                        records = records.len(),
                        "parent expanded"
                    );
                    self.progress(processed);
                    return Some(records.into_iter().map(Ok).collect());
                }
                Err(failure) if failure.is_cancelled() => {
                    debug!(
                        entity = self.entity,
                        parent = %parent,
                        "parent skipped after cancellation"
                    );
                }
                Err(failure) if failure.is_fatal() => {
                    self.finished = true;
                    let level = failure.level;
                    let err = failure.into_source();
                    error!(
                        entity = self.entity,
                        parent = %parent,
                        level,
                        category = err.category().as_str(),
                        error = %err,
                        "dependent fetch failed fatally"
                    );
                    return Some(vec![Err(HrSyncError::pass_fatal(self.entity, err))]);
                }
                Err(failure) => {
                    let processed = self.stats.record_failure();
                    let level = failure.level;
                    let err = HrSyncError::per_parent(&parent, failure.into_source());
                    warn!(
                        entity = self.entity,
                        parent = %parent,
                        level,
                        status = ?err.status(),
                        error = %err,
                        "skipping parent"
                    );
                    self.progress(processed);
                }
            }
        }

        self.finished = true;
        let snapshot = self.stats.snapshot();
        info!(
            entity = self.entity,
            processed = snapshot.processed,
            succeeded = snapshot.succeeded,
            failed = snapshot.failed,
            "expansion finished"
        );
        None
    }

    fn progress(&self, processed: u64) {
        if self.progress_every == 0 || processed % self.progress_every as u64 != 0 {
            return;
        }
        let snapshot = self.stats.snapshot();
        info!(
            entity = self.entity,
            processed,
            total = self.total,
            succeeded = snapshot.succeeded,
            failed = snapshot.failed,
            "expansion progress"
        );
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use futures::TryStreamExt;

    use super::*;

    /// Parent `n` yields records `n*10 .. n*10 + n`; behaviour per parent
    /// can be overridden.
    #[derive(Default)]
    struct FakeFetch {
        failing: HashSet<u32>,
        fatal: HashSet<u32>,
        absent: HashSet<u32>,
        cancel_on: Option<u32>,
        calls: AtomicUsize,
        delay_ms: Option<fn(u32) -> u64>,
    }

    #[async_trait]
    impl DependentFetch for FakeFetch {
        type Parent = u32;
        type Record = u32;

        fn parent_key(&self, parent: &u32) -> String {
            format!("P{parent}")
        }

        async fn fetch(
            &self,
            parent: &u32,
            cancel: &CancellationToken,
        ) -> std::result::Result<Vec<u32>, LevelFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let delay = self.delay_ms.map_or(0, |delay| delay(*parent));
            tokio::time::sleep(Duration::from_millis(delay)).await;
            if self.cancel_on == Some(*parent) {
                cancel.cancel();
            }
            if self.failing.contains(parent) {
                return Err(LevelFailure::failed(
                    "profile",
                    HrSyncError::HttpStatus { status: 500, body: String::new() },
                ));
            }
            if self.fatal.contains(parent) {
                return Err(LevelFailure::failed("profile", HrSyncError::Auth("revoked".into())));
            }
            if self.absent.contains(parent) {
                return Err(LevelFailure::absent("profile"));
            }
            Ok((parent * 10..parent * 10 + parent).collect())
        }
    }

    fn fetch() -> FakeFetch {
        FakeFetch::default()
    }

    fn expander(fetch: FakeFetch, concurrency: usize) -> HierarchicalRecordExpander<FakeFetch> {
        HierarchicalRecordExpander::new(
            "test_entity",
            Arc::new(fetch),
            ExpanderConfig { concurrency, progress_every: 2 },
        )
    }

    #[tokio::test]
    async fn failed_parent_is_skipped_and_counted() {
        let fetch = FakeFetch { failing: HashSet::from([2]), ..fetch() };
        let ctx = PassContext::new(CancellationToken::new());

        let records: Vec<u32> =
            expander(fetch, 1).expand(vec![1, 2, 3], &ctx).try_collect().await.unwrap();

        assert_eq!(records, vec![10, 30, 31, 32]);
        let stats = ctx.stats.snapshot();
        assert_eq!((stats.processed, stats.succeeded, stats.failed), (3, 2, 1));
    }

    #[tokio::test]
    async fn absent_data_counts_as_failure() {
        let fetch = FakeFetch { absent: HashSet::from([1]), ..fetch() };
        let ctx = PassContext::new(CancellationToken::new());

        let records: Vec<u32> =
            expander(fetch, 1).expand(vec![1, 2], &ctx).try_collect().await.unwrap();

        assert_eq!(records, vec![20, 21]);
        assert_eq!(ctx.stats.snapshot().failed, 1);
    }

    #[tokio::test]
    async fn empty_parent_list_yields_nothing() {
        let ctx = PassContext::new(CancellationToken::new());
        let records: Vec<u32> =
            expander(fetch(), 4).expand(Vec::new(), &ctx).try_collect().await.unwrap();

        assert!(records.is_empty());
        assert_eq!(ctx.stats.snapshot().processed, 0);
    }

    #[tokio::test]
    async fn fatal_failure_ends_stream_with_error() {
        let fetch = FakeFetch { fatal: HashSet::from([2]), ..fetch() };
        let ctx = PassContext::new(CancellationToken::new());

        let items: Vec<Result<u32>> =
            expander(fetch, 1).expand(vec![1, 2, 3], &ctx).collect().await;

        assert_eq!(items.len(), 2);
        assert_eq!(items[0], Ok(10));
        let err = items[1].clone().unwrap_err();
        assert!(matches!(err, HrSyncError::PassFatal { .. }));
        assert!(matches!(err.root(), HrSyncError::Auth(_)));
    }

    #[tokio::test]
    async fn cancellation_stops_scheduling_but_keeps_produced_records() {
        let fetch = FakeFetch { cancel_on: Some(2), ..fetch() };
        let ctx = PassContext::new(CancellationToken::new());
        let expander = expander(fetch, 1);

        let records: Vec<u32> =
            expander.expand(vec![1, 2, 3, 4], &ctx).try_collect().await.unwrap();

        assert_eq!(records, vec![10, 20, 21]);
        assert_eq!(expander.fetcher.calls.load(Ordering::SeqCst), 2);
        assert!(ctx.cancel.is_cancelled());
    }

    #[tokio::test]
    async fn sequential_expansion_preserves_parent_order() {
        fn reverse_delay(parent: u32) -> u64 {
            u64::from(10 - parent)
        }
        let fetch = FakeFetch { delay_ms: Some(reverse_delay), ..fetch() };
        let ctx = PassContext::new(CancellationToken::new());

        let records: Vec<u32> =
            expander(fetch, 1).expand(vec![1, 2, 3], &ctx).try_collect().await.unwrap();

        assert_eq!(records, vec![10, 20, 21, 30, 31, 32]);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_expansion_emits_in_completion_order() {
        fn reverse_delay(parent: u32) -> u64 {
            u64::from(10 - parent) * 10
        }
        let fetch = FakeFetch { delay_ms: Some(reverse_delay), ..fetch() };
        let ctx = PassContext::new(CancellationToken::new());

        let records: Vec<u32> =
            expander(fetch, 3).expand(vec![1, 2, 3], &ctx).try_collect().await.unwrap();

        assert_eq!(records, vec![30, 31, 32, 20, 21, 10]);
        assert_eq!(ctx.stats.snapshot().succeeded, 3);
    }

    #[test]
    fn level_result_ext_tags_outcomes() {
        let found: Result<Option<u8>> = Ok(Some(1));
        assert_eq!(found.at_level("profile"), Ok(1));

        let missing: Result<Option<u8>> = Ok(None);
        assert_eq!(missing.at_level("profile"), Err(LevelFailure::absent("profile")));

        let failed: Result<Option<u8>> = Err(HrSyncError::Transport("reset".into()));
        let failure = failed.at_level("state").unwrap_err();
        assert_eq!(failure.level, "state");
        assert!(!failure.is_fatal());
    }
}
