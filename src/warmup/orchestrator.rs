//! Warmup orchestration
//!
//! The orchestrator is the public entry point of a warmup run. It resolves
//! requests through the URL source, dedups and reorders the target list,
//! applies the limit, drives the bounded dispatcher, and folds every
//! completed fetch through classify -> enrich -> aggregate -> report in one
//! sequential section. Partial failure is a normal return, not an error:
//! only configuration and resolution problems surface as `Err`.

use crate::config::Config;
use crate::progress::{NullSink, ProgressReporter, ProgressSink, ProgressSnapshot};
use crate::source::{
    ConfigUrlSource, PageWarmupRequest, ResolutionCache, SiteWarmupRequest, UrlSource,
};
use crate::strategy::{CrawlStrategy, IdentityStrategy, StrategyRegistry};
use crate::warmup::aggregator::{Aggregator, CacheWarmupResult};
use crate::warmup::dispatcher::{dispatch, CancelFlag};
use crate::warmup::enrich::{apply_enrichers, Enricher};
use crate::warmup::fetcher::{build_http_client, with_logging, Fetcher, HttpFetcher};
use crate::warmup::outcome::WarmupTarget;
use crate::{HearthError, Result};
use futures::StreamExt;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

/// Coordinates one or more warmup invocations
///
/// Construction wires up the collaborators (URL source, fetcher, strategy,
/// enrichers, progress sink); each `warmup` call owns its own bounded set of
/// concurrent fetches.
pub struct Orchestrator {
    source: Arc<dyn UrlSource>,
    fetcher: Arc<dyn Fetcher>,
    strategy: Arc<dyn CrawlStrategy>,
    enrichers: Vec<Arc<dyn Enricher>>,
    sink: Arc<dyn ProgressSink>,
    concurrency: usize,
    limit: i64,
    emit_every: usize,
    min_emit_interval: Duration,
}

impl Orchestrator {
    /// Creates an orchestrator with defaults: identity strategy, no
    /// enrichers, no progress sink, concurrency 5, unlimited
    pub fn new(source: Arc<dyn UrlSource>, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            source,
            fetcher,
            strategy: Arc::new(IdentityStrategy),
            enrichers: Vec::new(),
            sink: Arc::new(NullSink),
            concurrency: 5,
            limit: 0,
            emit_every: 1,
            min_emit_interval: Duration::ZERO,
        }
    }

    /// Creates a fully wired orchestrator from a loaded configuration
    ///
    /// Builds the HTTP client with the configured user agent and timeouts,
    /// wraps it in the logging decorator, backs the URL source with a fresh
    /// per-orchestrator resolution cache, and resolves the strategy name
    /// against the built-in registry (failing fast on unknown names).
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = build_http_client(&config.user_agent, &config.http)?;
        let fetcher = with_logging(Arc::new(HttpFetcher::new(client)));

        let cache = Arc::new(ResolutionCache::new());
        let source = Arc::new(ConfigUrlSource::new(config, cache));

        let registry = StrategyRegistry::with_builtins();
        let strategy = registry.resolve_or_default(config.crawler.strategy.as_deref())?;

        Ok(Self {
            source,
            fetcher,
            strategy,
            enrichers: Vec::new(),
            sink: Arc::new(NullSink),
            concurrency: config.crawler.concurrency as usize,
            limit: config.crawler.limit,
            emit_every: 1,
            min_emit_interval: Duration::ZERO,
        })
    }

    pub fn with_strategy(mut self, strategy: Arc<dyn CrawlStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    /// Registers an enrichment hook; hooks run in registration order
    pub fn with_enricher(mut self, enricher: Arc<dyn Enricher>) -> Self {
        self.enrichers.push(enricher);
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn ProgressSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Sets the target limit; values <= 0 mean unlimited
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    /// Throttles progress emission to every `emit_every` outcomes and at
    /// least `min_interval` apart (the final snapshot is never throttled)
    pub fn with_throttle(mut self, emit_every: usize, min_interval: Duration) -> Self {
        self.emit_every = emit_every.max(1);
        self.min_emit_interval = min_interval;
        self
    }

    /// Warms every URL the requests resolve to
    ///
    /// See [`Orchestrator::warmup_with_cancel`]; this variant runs to
    /// completion.
    pub async fn warmup(
        &self,
        sites: &[SiteWarmupRequest],
        pages: &[PageWarmupRequest],
    ) -> Result<CacheWarmupResult> {
        self.warmup_with_cancel(sites, pages, CancelFlag::new())
            .await
    }

    /// Warms every URL the requests resolve to, stopping early if `cancel`
    /// is signaled
    ///
    /// # Steps
    ///
    /// 1. Resolve requests through the URL source
    /// 2. Dedup by normalized URL (first occurrence wins)
    /// 3. Reorder via the crawl strategy
    /// 4. Truncate to the limit (after reordering, so priority + limit
    ///    warms the top N)
    /// 5. Dispatch with bounded concurrency
    /// 6. Fold each outcome: enrich, aggregate, report progress
    ///
    /// An empty resolved target list returns an empty result immediately
    /// without touching the dispatcher or the progress sink. Fetch failures
    /// are folded into `failed`, never returned as `Err`.
    pub async fn warmup_with_cancel(
        &self,
        sites: &[SiteWarmupRequest],
        pages: &[PageWarmupRequest],
        cancel: CancelFlag,
    ) -> Result<CacheWarmupResult> {
        let resolved = self
            .source
            .resolve(sites, pages)
            .await
            .map_err(HearthError::Source)?;

        let targets = self.prepare_targets(resolved.targets);

        if targets.is_empty() {
            tracing::info!("No targets to warm, returning empty result");
            return Ok(Aggregator::new()
                .into_result(resolved.excluded_sitemaps, resolved.excluded_urls));
        }

        let total = targets.len();
        tracing::info!(
            "Warming {} URLs with concurrency {} (strategy: {})",
            total,
            self.concurrency,
            self.strategy.name()
        );

        let mut aggregator = Aggregator::new();
        let mut reporter =
            ProgressReporter::throttled(&*self.sink, self.emit_every, self.min_emit_interval);

        let stream = dispatch(targets, self.concurrency, Arc::clone(&self.fetcher), cancel);
        futures::pin_mut!(stream);

        // One sequential critical section per completed fetch: enrich,
        // aggregate, report. Concurrency lives in the dispatcher only.
        while let Some(mut outcome) = stream.next().await {
            apply_enrichers(&self.enrichers, &mut outcome);

            let current_url = outcome.target.identity().to_string();
            aggregator.accumulate(outcome);

            reporter.report(ProgressSnapshot {
                current_url,
                processed: aggregator.processed_count(),
                total,
                success: aggregator.success_count(),
                failure: aggregator.failure_count(),
            });
        }

        let result =
            aggregator.into_result(resolved.excluded_sitemaps, resolved.excluded_urls);

        tracing::info!(
            "Warmup finished: {} ok, {} failed, {} excluded URLs",
            result.success_count(),
            result.failure_count(),
            result.excluded_urls.len()
        );

        Ok(result)
    }

    /// Dedups by URL identity, reorders, and applies the limit
    fn prepare_targets(&self, targets: Vec<WarmupTarget>) -> Vec<WarmupTarget> {
        let mut seen = HashSet::new();
        let deduped: Vec<WarmupTarget> = targets
            .into_iter()
            .filter(|t| seen.insert(t.identity().to_string()))
            .collect();

        let mut ordered = self.strategy.reorder(deduped);

        // limit <= 0 means unlimited; truncation happens after reordering
        if self.limit > 0 {
            ordered.truncate(self.limit as usize);
        }

        ordered
    }
}
