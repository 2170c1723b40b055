//! Cache warmup core
//!
//! This module contains the warmup engine, including:
//! - Target and outcome types with status-code-tolerant classification
//! - HTTP fetching behind a decorator-friendly trait
//! - Bounded concurrent dispatch with cooperative cancellation
//! - Outcome aggregation and enrichment hooks
//! - The orchestrator entry point

mod aggregator;
mod dispatcher;
mod enrich;
mod fetcher;
mod orchestrator;
mod outcome;

pub use aggregator::{Aggregator, CacheWarmupResult};
pub use dispatcher::{dispatch, CancelFlag};
pub use enrich::{apply_enrichers, Enricher, StatusClassEnricher};
pub use fetcher::{build_http_client, with_logging, Fetcher, HttpFetcher};
pub use orchestrator::Orchestrator;
pub use outcome::{classify, CrawlOutcome, FetchOutcome, OriginRef, WarmupTarget};
