//! Hearth: a cache warmup crawler
//!
//! This crate pre-populates web page caches by crawling URL lists resolved
//! per site and language, with bounded concurrency, live progress reporting,
//! and partial-failure tolerance.

pub mod config;
pub mod progress;
pub mod report;
pub mod source;
pub mod strategy;
pub mod warmup;

use thiserror::Error;

/// Main error type for Hearth operations
#[derive(Debug, Error)]
pub enum HearthError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL source error: {0}")]
    Source(#[from] SourceError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid exclusion pattern: {0}")]
    InvalidPattern(String),

    #[error("Unknown crawl strategy: {0}")]
    UnknownStrategy(String),
}

/// URL source resolution errors
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Unknown site identifier: {0}")]
    UnknownSite(String),

    #[error("Unknown page id: {0}")]
    UnknownPage(String),

    #[error("Site {site} has no targets for language {language}")]
    UnknownLanguage { site: String, language: String },

    #[error("Page {page} has no targets for language {language}")]
    UnknownPageLanguage { page: String, language: String },
}

/// Result type alias for Hearth operations
pub type Result<T> = std::result::Result<T, HearthError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL source operations
pub type SourceResult<T> = std::result::Result<T, SourceError>;

// Re-export commonly used types
pub use config::Config;
pub use progress::{ProgressSink, ProgressSnapshot};
pub use strategy::{CrawlStrategy, StrategyRegistry};
pub use warmup::{CacheWarmupResult, CrawlOutcome, Orchestrator, WarmupTarget};
