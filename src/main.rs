//! Hearth main entry point
//!
//! Command-line interface for the Hearth cache warmup crawler.

use clap::Parser;
use hearth::config::load_config_with_hash;
use hearth::progress::LogSink;
use hearth::report::print_summary;
use hearth::source::{PageWarmupRequest, SiteWarmupRequest};
use hearth::warmup::Orchestrator;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Hearth: a cache warmup crawler
///
/// Hearth pre-populates web page caches by requesting the URLs configured
/// per site and language, with bounded concurrency and live progress
/// reporting. Failed URLs are reported but do not abort the run.
#[derive(Parser, Debug)]
#[command(name = "hearth")]
#[command(version = "1.0.0")]
#[command(about = "A cache warmup crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Warm only this site (repeatable; defaults to all configured sites)
    #[arg(long = "site", value_name = "IDENTIFIER")]
    sites: Vec<String>,

    /// Warm only this page (repeatable)
    #[arg(long = "page", value_name = "ID")]
    pages: Vec<String>,

    /// Warm only these languages (repeatable; defaults to all)
    #[arg(long = "language", value_name = "LANG")]
    languages: Vec<String>,

    /// Override the configured URL limit (0 = unlimited)
    #[arg(long)]
    limit: Option<i64>,

    /// Override the configured concurrency
    #[arg(long)]
    concurrency: Option<u32>,

    /// Override the configured crawl strategy
    #[arg(long, value_name = "NAME")]
    strategy: Option<String>,

    /// Exit non-zero if any URL failed to warm
    #[arg(long)]
    strict: bool,

    /// Validate config and show what would be warmed without crawling
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, _config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    apply_overrides(&cli, &mut config);

    let (site_requests, page_requests) = build_requests(&cli, &config);

    if cli.dry_run {
        handle_dry_run(&config, &site_requests, &page_requests);
        return Ok(());
    }

    handle_warmup(&config, &site_requests, &page_requests, cli.strict).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("hearth=info,warn"),
            1 => EnvFilter::new("hearth=debug,info"),
            2 => EnvFilter::new("hearth=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Applies CLI overrides on top of the loaded configuration
///
/// Overrides land in the config before the orchestrator is built, so an
/// unknown strategy name still fails fast through the registry.
fn apply_overrides(cli: &Cli, config: &mut hearth::Config) {
    if let Some(limit) = cli.limit {
        config.crawler.limit = limit;
    }
    if let Some(concurrency) = cli.concurrency {
        config.crawler.concurrency = concurrency;
    }
    if let Some(strategy) = &cli.strategy {
        config.crawler.strategy = Some(strategy.clone());
    }
}

/// Builds the warmup requests from CLI selection, defaulting to every
/// configured site
fn build_requests(
    cli: &Cli,
    config: &hearth::Config,
) -> (Vec<SiteWarmupRequest>, Vec<PageWarmupRequest>) {
    let site_ids: Vec<String> = if cli.sites.is_empty() && cli.pages.is_empty() {
        config.site.iter().map(|s| s.identifier.clone()).collect()
    } else {
        cli.sites.clone()
    };

    let sites = site_ids
        .into_iter()
        .map(|site| SiteWarmupRequest {
            site,
            languages: cli.languages.clone(),
        })
        .collect();

    let pages = cli
        .pages
        .iter()
        .map(|page| PageWarmupRequest {
            page: page.clone(),
            languages: cli.languages.clone(),
        })
        .collect();

    (sites, pages)
}

/// Handles the --dry-run mode: validates config and shows what would be warmed
fn handle_dry_run(
    config: &hearth::Config,
    sites: &[SiteWarmupRequest],
    pages: &[PageWarmupRequest],
) {
    println!("=== Hearth Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Concurrency: {}", config.crawler.concurrency);
    if config.crawler.limit > 0 {
        println!("  Limit: {}", config.crawler.limit);
    } else {
        println!("  Limit: unlimited");
    }
    println!(
        "  Strategy: {}",
        config.crawler.strategy.as_deref().unwrap_or("identity")
    );

    println!("\nUser Agent: {}", config.user_agent.header_value());

    println!("\nSites to warm ({}):", sites.len());
    for request in sites {
        if request.languages.is_empty() {
            println!("  - {} (all languages)", request.site);
        } else {
            println!("  - {} [{}]", request.site, request.languages.join(", "));
        }
    }

    if !pages.is_empty() {
        println!("\nPages to warm ({}):", pages.len());
        for request in pages {
            println!("  - {}", request.page);
        }
    }

    let target_count: usize = config.site.iter().map(|s| s.target.len()).sum::<usize>()
        + config.page.iter().map(|p| p.target.len()).sum::<usize>();

    println!("\n✓ Configuration is valid");
    println!("✓ {} configured warmup targets", target_count);
}

/// Runs the warmup and prints the summary
async fn handle_warmup(
    config: &hearth::Config,
    sites: &[SiteWarmupRequest],
    pages: &[PageWarmupRequest],
    strict: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let orchestrator = Orchestrator::from_config(config)?
        .with_sink(Arc::new(LogSink))
        .with_throttle(10, Duration::from_millis(500));

    let result = match orchestrator.warmup(sites, pages).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("Warmup failed: {}", e);
            return Err(e.into());
        }
    };

    print_summary(&result);

    // Partial failure is a normal outcome unless the caller opted in
    if strict && result.failure_count() > 0 {
        tracing::error!(
            "{} URLs failed to warm (strict mode)",
            result.failure_count()
        );
        std::process::exit(1);
    }

    Ok(())
}
