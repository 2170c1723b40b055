//! Outcome accumulation into the final warmup result
//!
//! The aggregator is the single serial accumulation point for a run: fetches
//! complete concurrently, but every outcome is folded in from one consumer
//! loop. Lists are append-only, one insertion per completed target, ordered
//! by completion.

use crate::warmup::outcome::CrawlOutcome;

/// Final result of a warmup invocation
#[derive(Debug, Clone, Default)]
pub struct CacheWarmupResult {
    /// Outcomes that reached the origin server, in completion order
    pub successful: Vec<CrawlOutcome>,

    /// Outcomes that failed at the transport level, in completion order
    pub failed: Vec<CrawlOutcome>,

    /// Sitemaps the URL source deliberately left out, verbatim
    pub excluded_sitemaps: Vec<String>,

    /// URLs the URL source deliberately left out, verbatim
    pub excluded_urls: Vec<String>,
}

impl CacheWarmupResult {
    /// An empty result: the valid "nothing to do" outcome
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn processed_count(&self) -> usize {
        self.successful.len() + self.failed.len()
    }

    pub fn success_count(&self) -> usize {
        self.successful.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failed.len()
    }
}

/// Accumulates classified outcomes into a result
///
/// Single consumer only: the orchestrator serializes all outcome handling
/// onto one fold even though fetches run concurrently.
#[derive(Debug, Default)]
pub struct Aggregator {
    result: CacheWarmupResult,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an outcome to the successful or failed list
    pub fn accumulate(&mut self, outcome: CrawlOutcome) {
        if outcome.succeeded {
            self.result.successful.push(outcome);
        } else {
            self.result.failed.push(outcome);
        }
    }

    pub fn processed_count(&self) -> usize {
        self.result.processed_count()
    }

    pub fn success_count(&self) -> usize {
        self.result.success_count()
    }

    pub fn failure_count(&self) -> usize {
        self.result.failure_count()
    }

    /// Finalizes the result, attaching the exclusion lists supplied by the
    /// URL source
    pub fn into_result(
        mut self,
        excluded_sitemaps: Vec<String>,
        excluded_urls: Vec<String>,
    ) -> CacheWarmupResult {
        self.result.excluded_sitemaps = excluded_sitemaps;
        self.result.excluded_urls = excluded_urls;
        self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::warmup::outcome::{classify, FetchOutcome, WarmupTarget};
    use url::Url;

    fn outcome(url: &str, fetch: FetchOutcome) -> CrawlOutcome {
        let target = WarmupTarget {
            url: Url::parse(url).unwrap(),
            priority: None,
            origin: None,
        };
        classify(target, fetch)
    }

    #[test]
    fn test_accumulate_splits_by_success() {
        let mut aggregator = Aggregator::new();

        aggregator.accumulate(outcome(
            "https://example.com/a",
            FetchOutcome::Response { status: 200 },
        ));
        aggregator.accumulate(outcome(
            "https://example.com/b",
            FetchOutcome::TransportError {
                message: "Request timeout".to_string(),
            },
        ));
        aggregator.accumulate(outcome(
            "https://example.com/c",
            FetchOutcome::Response { status: 404 },
        ));

        assert_eq!(aggregator.success_count(), 2);
        assert_eq!(aggregator.failure_count(), 1);
        assert_eq!(aggregator.processed_count(), 3);
    }

    #[test]
    fn test_completion_order_is_preserved() {
        let mut aggregator = Aggregator::new();

        aggregator.accumulate(outcome(
            "https://example.com/second-queued",
            FetchOutcome::Response { status: 200 },
        ));
        aggregator.accumulate(outcome(
            "https://example.com/first-queued",
            FetchOutcome::Response { status: 200 },
        ));

        let result = aggregator.into_result(vec![], vec![]);
        assert_eq!(
            result.successful[0].target.url.path(),
            "/second-queued"
        );
        assert_eq!(result.successful[1].target.url.path(), "/first-queued");
    }

    #[test]
    fn test_into_result_threads_exclusions_verbatim() {
        let aggregator = Aggregator::new();
        let result = aggregator.into_result(
            vec!["https://example.com/news-sitemap.xml".to_string()],
            vec!["https://example.com/internal/".to_string()],
        );

        assert_eq!(result.excluded_sitemaps.len(), 1);
        assert_eq!(result.excluded_urls.len(), 1);
        assert_eq!(result.processed_count(), 0);
    }
}
