//! Config-backed URL source
//!
//! Resolves warmup requests against the target lists declared in the TOML
//! configuration. Sitemap parsing lives upstream of this crate; the config
//! stands in as the external producer of the URL sequence. Exclusion
//! patterns are applied here, and everything filtered out is reported in the
//! exclusion lists rather than silently dropped.

use crate::config::{Config, PageEntry, SiteEntry, TargetEntry};
use crate::source::cache::{ResolutionCache, ResolutionKey};
use crate::source::pattern::matches_pattern;
use crate::source::{PageWarmupRequest, ResolvedTargets, SiteWarmupRequest, UrlSource};
use crate::warmup::{OriginRef, WarmupTarget};
use crate::{SourceError, SourceResult};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use url::Url;

/// URL source backed by the loaded configuration
pub struct ConfigUrlSource {
    sites: Vec<SiteEntry>,
    pages: Vec<PageEntry>,
    cache: Arc<ResolutionCache>,
}

impl ConfigUrlSource {
    pub fn new(config: &Config, cache: Arc<ResolutionCache>) -> Self {
        Self {
            sites: config.site.clone(),
            pages: config.page.clone(),
            cache,
        }
    }

    fn find_site(&self, identifier: &str) -> SourceResult<&SiteEntry> {
        self.sites
            .iter()
            .find(|s| s.identifier == identifier)
            .ok_or_else(|| SourceError::UnknownSite(identifier.to_string()))
    }

    fn find_page(&self, id: &str) -> SourceResult<&PageEntry> {
        self.pages
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| SourceError::UnknownPage(id.to_string()))
    }

    /// Languages to resolve for a site request: the requested ones, or every
    /// configured language when the request names none
    fn site_languages<'a>(
        site: &'a SiteEntry,
        requested: &'a [String],
    ) -> SourceResult<Vec<&'a str>> {
        if requested.is_empty() {
            if !site.languages.is_empty() {
                return Ok(site.languages.iter().map(String::as_str).collect());
            }
            // No declared language list; fall back to the distinct target
            // languages in declaration order
            let mut seen = HashSet::new();
            return Ok(site
                .target
                .iter()
                .map(|t| t.language.as_str())
                .filter(|l| seen.insert(*l))
                .collect());
        }

        for language in requested {
            if !site.languages.is_empty() && !site.languages.contains(language) {
                return Err(SourceError::UnknownLanguage {
                    site: site.identifier.clone(),
                    language: language.clone(),
                });
            }
        }
        Ok(requested.iter().map(String::as_str).collect())
    }

    /// Languages to resolve for a page request: the requested ones, or every
    /// language the page has targets for when the request names none
    fn page_languages<'a>(
        page: &'a PageEntry,
        requested: &'a [String],
    ) -> SourceResult<Vec<&'a str>> {
        if requested.is_empty() {
            let mut seen = HashSet::new();
            return Ok(page
                .target
                .iter()
                .map(|t| t.language.as_str())
                .filter(|l| seen.insert(*l))
                .collect());
        }

        for language in requested {
            if !page.target.iter().any(|t| t.language == *language) {
                return Err(SourceError::UnknownPageLanguage {
                    page: page.id.clone(),
                    language: language.clone(),
                });
            }
        }
        Ok(requested.iter().map(String::as_str).collect())
    }

    /// Resolves one (site, language) pair, applying exclusion patterns
    ///
    /// Exclusions are recorded only on a cache miss; a hit means the same
    /// pair was already resolved (and its exclusions reported) during this
    /// invocation.
    fn resolve_site_language(
        &self,
        site: &SiteEntry,
        language: &str,
        excluded_urls: &mut Vec<String>,
    ) -> Vec<WarmupTarget> {
        let key = ResolutionKey::Site {
            identifier: site.identifier.clone(),
            language: language.to_string(),
        };

        if let Some(cached) = self.cache.get(&key) {
            return cached;
        }

        let mut targets = Vec::new();
        for entry in site.target.iter().filter(|t| t.language == language) {
            if let Some(pattern) = site
                .exclude_patterns
                .iter()
                .find(|p| matches_pattern(p, &entry.url))
            {
                tracing::debug!(
                    "Excluding {} (matched pattern '{}')",
                    entry.url,
                    pattern
                );
                excluded_urls.push(entry.url.clone());
                continue;
            }

            if let Some(target) = build_target(entry, Some(&site.identifier), None) {
                targets.push(target);
            }
        }

        self.cache.insert(key, targets.clone());
        targets
    }

    fn resolve_page_language(
        &self,
        page: &PageEntry,
        language: &str,
    ) -> Vec<WarmupTarget> {
        let key = ResolutionKey::Page {
            id: page.id.clone(),
            language: language.to_string(),
        };

        if let Some(cached) = self.cache.get(&key) {
            return cached;
        }

        let targets: Vec<WarmupTarget> = page
            .target
            .iter()
            .filter(|t| t.language == language)
            .filter_map(|entry| build_target(entry, None, Some(&page.id)))
            .collect();

        self.cache.insert(key, targets.clone());
        targets
    }
}

/// Builds a warmup target from a config entry; unparseable URLs are dropped
/// with a warning (validation should have caught them already)
fn build_target(
    entry: &TargetEntry,
    site: Option<&str>,
    page: Option<&str>,
) -> Option<WarmupTarget> {
    match Url::parse(&entry.url) {
        Ok(url) => Some(WarmupTarget {
            url,
            priority: entry.priority,
            origin: Some(OriginRef {
                site: site.map(str::to_string),
                page: page.map(str::to_string),
                language: Some(entry.language.clone()),
            }),
        }),
        Err(e) => {
            tracing::warn!("Skipping unparseable target URL '{}': {}", entry.url, e);
            None
        }
    }
}

#[async_trait]
impl UrlSource for ConfigUrlSource {
    async fn resolve(
        &self,
        sites: &[SiteWarmupRequest],
        pages: &[PageWarmupRequest],
    ) -> SourceResult<ResolvedTargets> {
        let mut resolved = ResolvedTargets::default();
        let mut sitemap_seen = HashSet::new();

        for request in sites {
            let site = self.find_site(&request.site)?;

            for sitemap in &site.excluded_sitemaps {
                if sitemap_seen.insert(sitemap.clone()) {
                    resolved.excluded_sitemaps.push(sitemap.clone());
                }
            }

            for language in Self::site_languages(site, &request.languages)? {
                let targets =
                    self.resolve_site_language(site, language, &mut resolved.excluded_urls);
                resolved.targets.extend(targets);
            }
        }

        for request in pages {
            let page = self.find_page(&request.page)?;

            for language in Self::page_languages(page, &request.languages)? {
                resolved
                    .targets
                    .extend(self.resolve_page_language(page, language));
            }
        }

        Ok(resolved)
    }
}
