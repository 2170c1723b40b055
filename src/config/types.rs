use serde::Deserialize;

/// Main configuration structure for Hearth
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub site: Vec<SiteEntry>,
    #[serde(default)]
    pub page: Vec<PageEntry>,
}

/// Warmup behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of concurrent fetches per warmup invocation
    #[serde(default = "default_concurrency")]
    pub concurrency: u32,

    /// Maximum number of URLs warmed per invocation (0 = unlimited)
    #[serde(default = "default_limit")]
    pub limit: i64,

    /// Optional crawl strategy name (identity when absent)
    #[serde(default)]
    pub strategy: Option<String>,
}

fn default_concurrency() -> u32 {
    5
}

fn default_limit() -> i64 {
    250
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl UserAgentConfig {
    /// Formats the full User-Agent header value
    ///
    /// Format: CrawlerName/Version (+ContactURL; ContactEmail)
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// HTTP transport configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout in milliseconds
    #[serde(rename = "request-timeout-ms", default = "default_request_timeout")]
    pub request_timeout_ms: u64,

    /// Connection timeout in milliseconds
    #[serde(rename = "connect-timeout-ms", default = "default_connect_timeout")]
    pub connect_timeout_ms: u64,
}

fn default_request_timeout() -> u64 {
    30_000
}

fn default_connect_timeout() -> u64 {
    10_000
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: default_request_timeout(),
            connect_timeout_ms: default_connect_timeout(),
        }
    }
}

/// A site whose URLs can be warmed
#[derive(Debug, Clone, Deserialize)]
pub struct SiteEntry {
    /// Site identifier referenced by warmup requests
    pub identifier: String,

    /// Languages this site publishes in
    #[serde(default)]
    pub languages: Vec<String>,

    /// Sitemaps deliberately left out of warming, reported verbatim
    #[serde(rename = "excluded-sitemaps", default)]
    pub excluded_sitemaps: Vec<String>,

    /// Wildcard patterns; matching URLs are excluded and reported
    #[serde(rename = "exclude-patterns", default)]
    pub exclude_patterns: Vec<String>,

    /// Warmup targets for this site
    #[serde(default)]
    pub target: Vec<TargetEntry>,
}

/// A single page warmed by id instead of by site
#[derive(Debug, Clone, Deserialize)]
pub struct PageEntry {
    /// Page id referenced by warmup requests
    pub id: String,

    /// Warmup targets for this page
    #[serde(default)]
    pub target: Vec<TargetEntry>,
}

/// One URL produced for a site or page
#[derive(Debug, Clone, Deserialize)]
pub struct TargetEntry {
    /// Absolute URL to request
    pub url: String,

    /// Language this URL belongs to
    pub language: String,

    /// Optional priority weight (higher is warmed first under the
    /// priority strategy)
    #[serde(default)]
    pub priority: Option<f64>,
}
