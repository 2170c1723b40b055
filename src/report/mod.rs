//! Human-readable summary of a warmup result
//!
//! Renders the final `CacheWarmupResult` for the CLI: counts, failed URLs
//! with their transport errors, and the exclusion lists.

use crate::warmup::CacheWarmupResult;

/// Prints a warmup summary to stdout
pub fn print_summary(result: &CacheWarmupResult) {
    println!("=== Cache Warmup Summary ===\n");

    let total = result.processed_count();
    println!("Overview:");
    println!("  URLs processed: {}", total);
    println!("  Warmed successfully: {}", result.success_count());
    println!("  Failed: {}", result.failure_count());
    println!();

    let breakdown = status_code_breakdown(result);
    if !breakdown.is_empty() {
        println!("Status Codes:");
        for (status, count) in &breakdown {
            println!("  {}: {}", status, count);
        }
        println!();
    }

    if !result.failed.is_empty() {
        println!("Failed URLs:");
        for outcome in &result.failed {
            println!(
                "  - {} ({})",
                outcome.target.url,
                outcome.error_message.as_deref().unwrap_or("unknown error")
            );
        }
        println!();
    }

    if !result.excluded_sitemaps.is_empty() {
        println!("Excluded sitemaps ({}):", result.excluded_sitemaps.len());
        for sitemap in &result.excluded_sitemaps {
            println!("  - {}", sitemap);
        }
        println!();
    }

    if !result.excluded_urls.is_empty() {
        println!("Excluded URLs ({}):", result.excluded_urls.len());
        for url in &result.excluded_urls {
            println!("  - {}", url);
        }
        println!();
    }

    let success_rate = if total > 0 {
        (result.success_count() as f64 / total as f64) * 100.0
    } else {
        0.0
    };

    println!(
        "Success Rate: {:.1}% ({} / {} URLs warmed)",
        success_rate,
        result.success_count(),
        total
    );
}

/// Counts status codes among the successful outcomes, descending by count
///
/// Useful for spotting sites that were warmed but answered with errors.
pub fn status_code_breakdown(result: &CacheWarmupResult) -> Vec<(u16, usize)> {
    let mut counts = std::collections::HashMap::new();
    for outcome in &result.successful {
        if let Some(status) = outcome.status_code {
            *counts.entry(status).or_insert(0usize) += 1;
        }
    }

    let mut breakdown: Vec<(u16, usize)> = counts.into_iter().collect();
    breakdown.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::warmup::{classify, FetchOutcome, WarmupTarget};
    use url::Url;

    fn result_with_statuses(statuses: &[u16]) -> CacheWarmupResult {
        let mut result = CacheWarmupResult::empty();
        for (i, status) in statuses.iter().enumerate() {
            let target = WarmupTarget {
                url: Url::parse(&format!("https://example.com/page{}", i)).unwrap(),
                priority: None,
                origin: None,
            };
            result
                .successful
                .push(classify(target, FetchOutcome::Response { status: *status }));
        }
        result
    }

    #[test]
    fn test_status_code_breakdown_sorted_by_count() {
        let result = result_with_statuses(&[200, 200, 404, 200, 404, 301]);
        let breakdown = status_code_breakdown(&result);

        assert_eq!(breakdown, vec![(200, 3), (404, 2), (301, 1)]);
    }

    #[test]
    fn test_status_code_breakdown_empty_result() {
        let result = CacheWarmupResult::empty();
        assert!(status_code_breakdown(&result).is_empty());
    }
}
