//! Core warmup data types and outcome classification
//!
//! A `WarmupTarget` goes in, a `CrawlOutcome` comes out. Classification is
//! deliberately status-code tolerant: a 404 or 500 response still reached the
//! origin server and asked it to compute (and cache) the page, so it counts
//! as a successful warmup. Only transport-level failures - timeouts,
//! connection refusals, DNS or TLS errors - classify as failed.

use url::Url;

/// Provenance of a warmup target: which site/language/sitemap produced it
///
/// Threaded through to the final result for downstream filtering; never
/// interpreted by the warmup core itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginRef {
    pub site: Option<String>,
    pub page: Option<String>,
    pub language: Option<String>,
}

/// A single URL to warm
#[derive(Debug, Clone)]
pub struct WarmupTarget {
    /// The URL to request
    pub url: Url,

    /// Optional priority weight; higher is warmed first under the priority
    /// strategy
    pub priority: Option<f64>,

    /// Where this target came from
    pub origin: Option<OriginRef>,
}

impl WarmupTarget {
    /// Target identity: the normalized URL string
    ///
    /// The `url` crate normalizes on parse (lowercased host, default port
    /// stripped), so the serialized form is the dedup key.
    pub fn identity(&self) -> &str {
        self.url.as_str()
    }
}

/// Raw result of a single HTTP fetch, before classification
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// The server responded; any status code counts
    Response { status: u16 },

    /// The server was never reached (timeout, connection refused, DNS, TLS)
    TransportError { message: String },
}

/// Classified result of warming one target
///
/// Created exactly once per dispatched target, immediately after the fetch
/// resolves. `extra_data` may be appended by enrichment hooks before the
/// outcome is folded into the aggregate, never after.
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    pub target: WarmupTarget,
    pub succeeded: bool,
    pub status_code: Option<u16>,
    pub error_message: Option<String>,
    pub extra_data: serde_json::Map<String, serde_json::Value>,
}

/// Classifies a completed fetch into a crawl outcome
///
/// `succeeded` is true iff the fetch produced an HTTP response, regardless
/// of status code value. This mirrors "did we warm the cache", not "was the
/// page healthy".
pub fn classify(target: WarmupTarget, fetch: FetchOutcome) -> CrawlOutcome {
    match fetch {
        FetchOutcome::Response { status } => CrawlOutcome {
            target,
            succeeded: true,
            status_code: Some(status),
            error_message: None,
            extra_data: serde_json::Map::new(),
        },
        FetchOutcome::TransportError { message } => CrawlOutcome {
            target,
            succeeded: false,
            status_code: None,
            error_message: Some(message),
            extra_data: serde_json::Map::new(),
        },
    }
}
