//! Minimum-interval rate limiting
//!
//! Enforces a fixed minimum gap between the *starts* of consecutive calls.
//! Waiters are released strictly in arrival order (the underlying
//! `tokio::sync::Mutex` is FIFO-fair), so a burst of callers is spread out
//! evenly instead of racing for the next slot.
//!
//! One limiter represents one upstream quota. Create it once and share it
//! (`Arc<MinIntervalLimiter>`) between every gateway using that quota.

use std::time::Duration;

use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Errors produced by [`MinIntervalLimiter`]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LimiterError {
    #[error("max requests per second must be greater than 0")]
    ZeroRate,

    #[error("cancelled while waiting for a request slot")]
    Cancelled,
}

/// Global FIFO throttle with a fixed minimum inter-request interval
///
/// # Examples
///
/// ```rust
/// use hrsync_common::resilience::MinIntervalLimiter;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let limiter = MinIntervalLimiter::per_second(10)?;
///
/// limiter.acquire().await;
/// // ... first request starts here
/// limiter.acquire().await;
/// // ... second request starts at least 100ms later
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct MinIntervalLimiter {
    interval: Duration,
    last_start: Mutex<Option<Instant>>,
}

impl MinIntervalLimiter {
    /// Create a limiter with the given minimum gap between call starts.
    ///
    /// A zero interval disables throttling but keeps FIFO ordering.
    pub fn new(interval: Duration) -> Self {
        Self { interval, last_start: Mutex::new(None) }
    }

    /// Create a limiter from a documented requests-per-second quota.
    ///
    /// # Errors
    /// Returns [`LimiterError::ZeroRate`] when `max_requests` is zero.
    pub fn per_second(max_requests: u32) -> Result<Self, LimiterError> {
        if max_requests == 0 {
            return Err(LimiterError::ZeroRate);
        }
        Ok(Self::new(Duration::from_secs(1) / max_requests))
    }

    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Wait for the next slot and return the instant the slot was granted.
    ///
    /// The returned instant is recorded as the start of the caller's request.
    pub async fn acquire(&self) -> Instant {
        let mut last_start = self.last_start.lock().await;

        if let Some(previous) = *last_start {
            let ready_at = previous + self.interval;
            if ready_at > Instant::now() {
                let wait_ms = (ready_at - Instant::now()).as_millis() as u64;
                debug!(wait_ms, "throttling request");
                sleep_until(ready_at).await;
            }
        }

        let now = Instant::now();
        *last_start = Some(now);
        now
    }

    /// [`acquire`](Self::acquire), giving up if `cancel` fires first.
    ///
    /// A cancelled waiter leaves the queue without consuming a slot.
    ///
    /// # Errors
    /// Returns [`LimiterError::Cancelled`] when the token is cancelled before
    /// a slot is granted.
    pub async fn acquire_cancellable(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Instant, LimiterError> {
        if cancel.is_cancelled() {
            return Err(LimiterError::Cancelled);
        }
        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(LimiterError::Cancelled),
            started = self.acquire() => Ok(started),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn per_second_derives_interval() {
        let limiter = MinIntervalLimiter::per_second(10).unwrap();
        assert_eq!(limiter.interval(), Duration::from_millis(100));
        assert_eq!(MinIntervalLimiter::per_second(0).unwrap_err(), LimiterError::ZeroRate);
    }

    #[tokio::test(start_paused = true)]
    async fn first_acquire_does_not_wait() {
        let limiter = MinIntervalLimiter::new(Duration::from_millis(100));
        let before = Instant::now();
        let started = limiter.acquire().await;
        assert_eq!(started, before);
    }

    #[tokio::test(start_paused = true)]
    async fn consecutive_starts_are_spaced() {
        let limiter = MinIntervalLimiter::new(Duration::from_millis(100));

        let mut starts = Vec::new();
        for _ in 0..5 {
            starts.push(limiter.acquire().await);
        }

        for pair in starts.windows(2) {
            assert!(pair[1] - pair[0] >= Duration::from_millis(100));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn waiter_stays_pending_until_interval_elapses() {
        let limiter = MinIntervalLimiter::new(Duration::from_millis(100));
        limiter.acquire().await;

        let mut next = tokio_test::task::spawn(limiter.acquire());
        tokio_test::assert_pending!(next.poll());

        tokio::time::advance(Duration::from_millis(100)).await;
        tokio_test::assert_ready!(next.poll());
    }

    #[tokio::test(start_paused = true)]
    async fn idle_gap_longer_than_interval_is_not_penalised() {
        let limiter = MinIntervalLimiter::new(Duration::from_millis(100));
        limiter.acquire().await;
        tokio::time::sleep(Duration::from_millis(500)).await;

        let before = Instant::now();
        let started = limiter.acquire().await;
        assert_eq!(started, before);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_waiters_are_released_in_arrival_order() {
        let limiter = Arc::new(MinIntervalLimiter::new(Duration::from_millis(50)));
        let order = Arc::new(Mutex::new(Vec::new()));

        let mut handles = Vec::new();
        for id in 0..4u32 {
            let limiter = limiter.clone();
            let order = order.clone();
            handles.push(tokio::spawn(async move {
                let started = limiter.acquire().await;
                order.lock().await.push((id, started));
            }));
            // Make arrival order deterministic.
            tokio::task::yield_now().await;
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let order = order.lock().await;
        let ids: Vec<u32> = order.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        for pair in order.windows(2) {
            assert!(pair[1].1 - pair[0].1 >= Duration::from_millis(50));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_releases_waiter() {
        let limiter = MinIntervalLimiter::new(Duration::from_secs(10));
        limiter.acquire().await;

        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = limiter.acquire_cancellable(&cancel).await;
        assert_eq!(result, Err(LimiterError::Cancelled));
    }
}
