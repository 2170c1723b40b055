//! Configuration loading and validation
//!
//! Configuration is a TOML file declaring crawler behavior (concurrency,
//! limit, strategy), the identifying user agent, HTTP transport options,
//! and the per-site / per-page warmup targets.

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{
    Config, CrawlerConfig, HttpConfig, PageEntry, SiteEntry, TargetEntry, UserAgentConfig,
};
pub use validation::validate;
