//! Offset pagination over a single collection endpoint
//!
//! Pages are requested with `$skip`/`$top` until one of:
//! - a page comes back shorter than requested
//! - a page comes back empty (authoritative, whatever the totals say)
//! - the reported record or page total is reached
//!
//! A failed page aborts the whole fetch and discards what was collected.

use async_trait::async_trait;
use hrsync_domain::constants::MAX_PAGE_SIZE;
use hrsync_domain::{HrSyncError, Result};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

/// Position of the next page to request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    /// Records to skip (`$skip`)
    pub skip: u32,
    /// Page size (`$top`)
    pub top: u32,
}

impl PageCursor {
    /// Cursor for the first page, with `top` capped at [`MAX_PAGE_SIZE`].
    pub fn first(top: u32) -> Self {
        Self { skip: 0, top: top.clamp(1, MAX_PAGE_SIZE) }
    }

    #[must_use]
    pub const fn advance(self, received: u32) -> Self {
        Self { skip: self.skip.saturating_add(received), top: self.top }
    }
}

/// One decoded page plus whatever totals the endpoint reported
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_records: Option<u64>,
    pub total_pages: Option<u64>,
}

impl<T> Page<T> {
    pub const fn new(items: Vec<T>) -> Self {
        Self { items, total_records: None, total_pages: None }
    }

    #[must_use]
    pub const fn with_total_records(mut self, total: Option<u64>) -> Self {
        self.total_records = total;
        self
    }

    #[must_use]
    pub const fn with_total_pages(mut self, total: Option<u64>) -> Self {
        self.total_pages = total;
        self
    }
}

/// A paginated collection endpoint
#[async_trait]
pub trait PageSource: Send + Sync {
    type Item: Send;

    /// Endpoint label for logs
    fn endpoint(&self) -> &str;

    /// Fetch the page at `cursor`.
    async fn fetch_page(&self, cursor: PageCursor) -> Result<Page<Self::Item>>;
}

/// Drives a [`PageSource`] to the end of its collection.
#[derive(Debug, Clone, Copy)]
pub struct PagedCollectionFetcher {
    page_size: u32,
}

impl PagedCollectionFetcher {
    pub fn new(page_size: u32) -> Self {
        Self { page_size: page_size.clamp(1, MAX_PAGE_SIZE) }
    }

    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Collect every item of `source`.
    ///
    /// # Errors
    /// The first page failure, or `HrSyncError::Cancelled` if `cancel` fires
    /// between pages. Nothing collected so far is returned in either case.
    #[instrument(skip_all, fields(endpoint = source.endpoint(), top = self.page_size))]
    pub async fn fetch_all<S>(&self, source: &S, cancel: &CancellationToken) -> Result<Vec<S::Item>>
    where
        S: PageSource + ?Sized,
    {
        let mut cursor = PageCursor::first(self.page_size);
        let mut items = Vec::new();
        let mut pages: u64 = 0;

        loop {
            if cancel.is_cancelled() {
                return Err(HrSyncError::Cancelled);
            }

            let page = source.fetch_page(cursor).await?;
            pages += 1;
            let received = page.items.len();
            debug!(skip = cursor.skip, received, "page fetched");

            if received == 0 {
                break;
            }
            items.extend(page.items);

            if received < cursor.top as usize {
                break;
            }
            if page.total_records.is_some_and(|total| items.len() as u64 >= total) {
                break;
            }
            if page.total_pages.is_some_and(|total| pages >= total) {
                break;
            }

            cursor = cursor.advance(u32::try_from(received).unwrap_or(u32::MAX));
        }

        debug!(pages, total = items.len(), "collection complete");
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;

    /// Serves `0..len` in pages; optionally fails on one call.
    struct FakeSource {
        len: u32,
        total_records: Option<u64>,
        total_pages: Option<u64>,
        fail_on_call: Option<usize>,
        calls: AtomicUsize,
        cursors: Mutex<Vec<PageCursor>>,
    }

    impl FakeSource {
        fn new(len: u32) -> Self {
            Self {
                len,
                total_records: None,
                total_pages: None,
                fail_on_call: None,
                calls: AtomicUsize::new(0),
                cursors: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PageSource for FakeSource {
        type Item = u32;

        fn endpoint(&self) -> &str {
            "fake"
        }

        async fn fetch_page(&self, cursor: PageCursor) -> Result<Page<u32>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            self.cursors.lock().unwrap().push(cursor);
            if self.fail_on_call == Some(call) {
                return Err(HrSyncError::HttpStatus { status: 503, body: "busy".into() });
            }
            let end = (cursor.skip + cursor.top).min(self.len);
            let items = (cursor.skip.min(end)..end).collect();
            Ok(Page::new(items)
                .with_total_records(self.total_records)
                .with_total_pages(self.total_pages))
        }
    }

    #[tokio::test]
    async fn stops_on_short_page() {
        let source = FakeSource::new(25);
        let items = PagedCollectionFetcher::new(10)
            .fetch_all(&source, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(items, (0..25).collect::<Vec<_>>());
        let cursors = source.cursors.lock().unwrap().clone();
        assert_eq!(
            cursors,
            vec![
                PageCursor { skip: 0, top: 10 },
                PageCursor { skip: 10, top: 10 },
                PageCursor { skip: 20, top: 10 },
            ]
        );
    }

    #[tokio::test]
    async fn exact_multiple_needs_one_empty_page() {
        let source = FakeSource::new(20);
        let items = PagedCollectionFetcher::new(10)
            .fetch_all(&source, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(items.len(), 20);
        assert_eq!(source.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn empty_page_wins_over_total() {
        let mut source = FakeSource::new(10);
        source.total_records = Some(50);
        let items = PagedCollectionFetcher::new(10)
            .fetch_all(&source, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(items.len(), 10);
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn total_records_avoids_extra_request() {
        let mut source = FakeSource::new(20);
        source.total_records = Some(20);
        let items = PagedCollectionFetcher::new(10)
            .fetch_all(&source, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(items.len(), 20);
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn total_pages_stops_iteration() {
        let mut source = FakeSource::new(100);
        source.total_pages = Some(2);
        let items = PagedCollectionFetcher::new(10)
            .fetch_all(&source, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(items.len(), 20);
    }

    #[tokio::test]
    async fn page_size_is_capped() {
        let source = FakeSource::new(150);
        let fetcher = PagedCollectionFetcher::new(1000);
        assert_eq!(fetcher.page_size(), MAX_PAGE_SIZE);

        let items = fetcher.fetch_all(&source, &CancellationToken::new()).await.unwrap();
        assert_eq!(items.len(), 150);
        assert_eq!(source.cursors.lock().unwrap()[1], PageCursor { skip: 100, top: 100 });
    }

    #[tokio::test]
    async fn failure_discards_partial_collection() {
        let mut source = FakeSource::new(50);
        source.fail_on_call = Some(3);
        let err = PagedCollectionFetcher::new(10)
            .fetch_all(&source, &CancellationToken::new())
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(503));
        assert_eq!(source.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn repeated_fetch_is_stable() {
        let source = FakeSource::new(37);
        let fetcher = PagedCollectionFetcher::new(10);
        let cancel = CancellationToken::new();

        let first = fetcher.fetch_all(&source, &cancel).await.unwrap();
        let second = fetcher.fetch_all(&source, &cancel).await.unwrap();
        assert_eq!(first.len(), second.len());
    }

    #[tokio::test]
    async fn cancelled_before_first_page() {
        let source = FakeSource::new(10);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = PagedCollectionFetcher::new(10).fetch_all(&source, &cancel).await.unwrap_err();
        assert!(err.is_cancelled());
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }
}
