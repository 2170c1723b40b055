//! HTTP fetcher implementation
//!
//! This module owns the outbound side of a warmup run:
//! - Building a reqwest client with the identifying user agent and timeouts
//! - The `Fetcher` trait the dispatcher executes targets through
//! - Transport error classification
//! - Explicit decorator composition (e.g. a logging wrapper around any
//!   fetcher), instead of behavior mixed in through inheritance

use crate::config::{HttpConfig, UserAgentConfig};
use crate::warmup::outcome::FetchOutcome;
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// A thing that performs an HTTP request for a URL and reports status or
/// transport error
///
/// The dispatcher only depends on this trait, so tests can substitute a
/// scripted fetcher and callers can wrap the real one with decorators.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> FetchOutcome;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `http` - Transport timeouts
///
/// # Example
///
/// ```no_run
/// use hearth::config::{HttpConfig, UserAgentConfig};
/// use hearth::warmup::build_http_client;
///
/// let user_agent = UserAgentConfig {
///     crawler_name: "Hearth".to_string(),
///     crawler_version: "1.0".to_string(),
///     contact_url: "https://example.com/about".to_string(),
///     contact_email: "admin@example.com".to_string(),
/// };
///
/// let client = build_http_client(&user_agent, &HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    http: &HttpConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_millis(http.request_timeout_ms))
        .connect_timeout(Duration::from_millis(http.connect_timeout_ms))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetcher backed by a reqwest client
///
/// Issues a GET and discards the body; the point of the request is to make
/// the origin compute and cache the page, not to read it.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> FetchOutcome {
        match self.client.get(url.clone()).send().await {
            Ok(response) => FetchOutcome::Response {
                status: response.status().as_u16(),
            },
            Err(e) => FetchOutcome::TransportError {
                message: classify_transport_error(&e),
            },
        }
    }
}

/// Maps a reqwest error to a stable transport error description
fn classify_transport_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else {
        e.to_string()
    }
}

/// Decorator that logs every fetch and its outcome
///
/// Chain explicitly around any fetcher: `with_logging(Arc::new(inner))`.
pub struct LoggingFetcher {
    inner: Arc<dyn Fetcher>,
}

/// Wraps a fetcher so every request and outcome is traced
pub fn with_logging(inner: Arc<dyn Fetcher>) -> Arc<dyn Fetcher> {
    Arc::new(LoggingFetcher { inner })
}

#[async_trait]
impl Fetcher for LoggingFetcher {
    async fn fetch(&self, url: &Url) -> FetchOutcome {
        tracing::debug!("Warming {}", url);
        let outcome = self.inner.fetch(url).await;

        match &outcome {
            FetchOutcome::Response { status } => {
                tracing::debug!("Warmed {} with status {}", url, status);
            }
            FetchOutcome::TransportError { message } => {
                tracing::warn!("Failed to warm {}: {}", url, message);
            }
        }

        outcome
    }
}
