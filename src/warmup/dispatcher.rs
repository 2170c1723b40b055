//! Bounded concurrent dispatch of warmup fetches
//!
//! The dispatcher holds at most `concurrency` fetches in flight at once and
//! refills a slot the moment its fetch resolves, so no slot sits idle while
//! work remains. Completion order is whatever the network gives us; only the
//! start order follows the queue. The dispatcher holds no result state -
//! accumulation is the aggregator's job.

use crate::warmup::fetcher::Fetcher;
use crate::warmup::outcome::{classify, CrawlOutcome, WarmupTarget};
use futures::stream::{self, Stream, StreamExt};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation signal for a warmup run
///
/// Once set, targets that have not started yet are skipped without issuing a
/// fetch; fetches already in flight resolve naturally and their outcomes are
/// still delivered.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signals cancellation; no new fetches start after this
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Dispatches every target through the fetcher with bounded concurrency
///
/// Returns a finite stream with one classified outcome per dispatched target,
/// in completion order. Targets skipped due to cancellation produce no
/// outcome.
///
/// # Arguments
///
/// * `targets` - The ordered, limited, deduplicated target list
/// * `concurrency` - Maximum number of fetches in flight (clamped to >= 1)
/// * `fetcher` - The transport executing each fetch
/// * `cancel` - Cancellation signal checked before each fetch starts
pub fn dispatch(
    targets: Vec<WarmupTarget>,
    concurrency: usize,
    fetcher: Arc<dyn Fetcher>,
    cancel: CancelFlag,
) -> impl Stream<Item = CrawlOutcome> {
    stream::iter(targets.into_iter().map(move |target| {
        let fetcher = Arc::clone(&fetcher);
        let cancel = cancel.clone();

        async move {
            // Checked at start time, when the slot opens, not at queue time
            if cancel.is_cancelled() {
                tracing::debug!("Skipping {} after cancellation", target.url);
                return None;
            }

            let fetch = fetcher.fetch(&target.url).await;
            Some(classify(target, fetch))
        }
    }))
    .buffer_unordered(concurrency.max(1))
    .filter_map(|outcome| async move { outcome })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::warmup::outcome::FetchOutcome;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;
    use url::Url;

    fn targets(count: usize) -> Vec<WarmupTarget> {
        (0..count)
            .map(|i| WarmupTarget {
                url: Url::parse(&format!("https://example.com/page{}", i)).unwrap(),
                priority: None,
                origin: None,
            })
            .collect()
    }

    /// Fetcher that tracks how many fetches run simultaneously
    struct CountingFetcher {
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl CountingFetcher {
        fn new() -> Self {
            Self {
                in_flight: AtomicUsize::new(0),
                max_in_flight: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Fetcher for CountingFetcher {
        async fn fetch(&self, _url: &Url) -> FetchOutcome {
            let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(current, Ordering::SeqCst);

            tokio::time::sleep(Duration::from_millis(20)).await;

            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            FetchOutcome::Response { status: 200 }
        }
    }

    #[tokio::test]
    async fn test_in_flight_never_exceeds_concurrency() {
        let fetcher = Arc::new(CountingFetcher::new());
        let stream = dispatch(targets(12), 3, fetcher.clone(), CancelFlag::new());

        let outcomes: Vec<CrawlOutcome> = stream.collect().await;

        assert_eq!(outcomes.len(), 12);
        let max = fetcher.max_in_flight.load(Ordering::SeqCst);
        assert!(max <= 3, "saw {} fetches in flight, expected <= 3", max);
    }

    #[tokio::test]
    async fn test_slots_actually_fill() {
        let fetcher = Arc::new(CountingFetcher::new());
        let stream = dispatch(targets(10), 5, fetcher.clone(), CancelFlag::new());

        let _outcomes: Vec<CrawlOutcome> = stream.collect().await;

        // With 10 slow targets and 5 slots, the window must have been full
        assert_eq!(fetcher.max_in_flight.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_one_outcome_per_target() {
        let fetcher = Arc::new(CountingFetcher::new());
        let stream = dispatch(targets(7), 2, fetcher, CancelFlag::new());

        let outcomes: Vec<CrawlOutcome> = stream.collect().await;

        assert_eq!(outcomes.len(), 7);
        let mut urls: Vec<&str> = outcomes.iter().map(|o| o.target.identity()).collect();
        urls.sort();
        urls.dedup();
        assert_eq!(urls.len(), 7);
    }

    #[tokio::test]
    async fn test_empty_target_list_yields_empty_stream() {
        let fetcher = Arc::new(CountingFetcher::new());
        let stream = dispatch(vec![], 5, fetcher, CancelFlag::new());

        let outcomes: Vec<CrawlOutcome> = stream.collect().await;
        assert!(outcomes.is_empty());
    }

    #[tokio::test]
    async fn test_cancellation_skips_unstarted_targets() {
        let fetcher = Arc::new(CountingFetcher::new());
        let cancel = CancelFlag::new();
        let stream = dispatch(targets(10), 1, fetcher, cancel.clone());
        futures::pin_mut!(stream);

        // Let the first two complete, then cancel
        let first = stream.next().await;
        assert!(first.is_some());
        let second = stream.next().await;
        assert!(second.is_some());

        cancel.cancel();

        let remaining: Vec<CrawlOutcome> = stream.collect().await;

        // At most the already-started fetch may still arrive
        assert!(
            remaining.len() <= 1,
            "expected at most 1 in-flight outcome after cancel, got {}",
            remaining.len()
        );
    }

    #[tokio::test]
    async fn test_zero_concurrency_is_clamped() {
        let fetcher = Arc::new(CountingFetcher::new());
        let stream = dispatch(targets(2), 0, fetcher, CancelFlag::new());

        let outcomes: Vec<CrawlOutcome> = stream.collect().await;
        assert_eq!(outcomes.len(), 2);
    }
}
