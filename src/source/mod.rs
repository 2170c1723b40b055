//! URL sources: resolving warmup requests into target lists
//!
//! A `UrlSource` turns site/page + language requests into an ordered list of
//! warmup targets plus the exclusions it deliberately filtered out. The
//! warmup core consumes this as input and threads the exclusion lists
//! through to the final result verbatim.

mod cache;
mod config_source;
mod pattern;

pub use cache::{ResolutionCache, ResolutionKey};
pub use config_source::ConfigUrlSource;
pub use pattern::matches_pattern;

use crate::warmup::WarmupTarget;
use crate::SourceResult;
use async_trait::async_trait;

/// Request to warm every URL of a site in the given languages
///
/// An empty language list means every language the site is configured with.
#[derive(Debug, Clone)]
pub struct SiteWarmupRequest {
    pub site: String,
    pub languages: Vec<String>,
}

/// Request to warm a single page in the given languages
///
/// An empty language list means every language the page has a target for.
#[derive(Debug, Clone)]
pub struct PageWarmupRequest {
    pub page: String,
    pub languages: Vec<String>,
}

/// What a URL source produced for a set of requests
#[derive(Debug, Clone, Default)]
pub struct ResolvedTargets {
    /// Ordered warmup candidates (may contain cross-request duplicates;
    /// the orchestrator dedups by URL identity)
    pub targets: Vec<WarmupTarget>,

    /// Sitemaps deliberately left out, reported verbatim
    pub excluded_sitemaps: Vec<String>,

    /// URLs filtered out by exclusion patterns, reported verbatim
    pub excluded_urls: Vec<String>,
}

/// Produces warmup targets and exclusions for site/page requests
#[async_trait]
pub trait UrlSource: Send + Sync {
    async fn resolve(
        &self,
        sites: &[SiteWarmupRequest],
        pages: &[PageWarmupRequest],
    ) -> SourceResult<ResolvedTargets>;
}
