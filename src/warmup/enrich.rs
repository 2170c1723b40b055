//! Enrichment hooks
//!
//! Registered at orchestrator construction time and run synchronously, in
//! registration order, on every classified outcome before it is aggregated.
//! An enricher error is logged and swallowed - it never affects
//! classification and never aborts the run.

use crate::warmup::outcome::CrawlOutcome;
use std::sync::Arc;

/// Attaches structured extra data to a classified outcome
pub trait Enricher: Send + Sync {
    /// Key the enrichment value is stored under in `extra_data`
    fn name(&self) -> &'static str;

    /// Inspects the outcome and produces the value to attach
    fn enrich(&self, outcome: &CrawlOutcome) -> anyhow::Result<serde_json::Value>;
}

/// Runs every enricher against an outcome, attaching results to `extra_data`
pub fn apply_enrichers(enrichers: &[Arc<dyn Enricher>], outcome: &mut CrawlOutcome) {
    for enricher in enrichers {
        match enricher.enrich(outcome) {
            Ok(value) => {
                outcome.extra_data.insert(enricher.name().to_string(), value);
            }
            Err(e) => {
                tracing::warn!(
                    "Enricher '{}' failed for {}: {}",
                    enricher.name(),
                    outcome.target.url,
                    e
                );
            }
        }
    }
}

/// Built-in enricher that buckets the HTTP status code class
///
/// Lets callers distinguish "warmed but unhealthy" pages (4xx/5xx) from
/// healthy ones without changing the transport-only failure classification.
pub struct StatusClassEnricher;

impl Enricher for StatusClassEnricher {
    fn name(&self) -> &'static str {
        "status_class"
    }

    fn enrich(&self, outcome: &CrawlOutcome) -> anyhow::Result<serde_json::Value> {
        let class = match outcome.status_code {
            Some(s) if (200..300).contains(&s) => "success",
            Some(s) if (300..400).contains(&s) => "redirect",
            Some(s) if (400..500).contains(&s) => "client-error",
            Some(s) if (500..600).contains(&s) => "server-error",
            Some(_) => "other",
            None => "unreachable",
        };
        Ok(serde_json::Value::String(class.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::warmup::outcome::{classify, FetchOutcome, WarmupTarget};
    use url::Url;

    fn outcome(fetch: FetchOutcome) -> CrawlOutcome {
        let target = WarmupTarget {
            url: Url::parse("https://example.com/").unwrap(),
            priority: None,
            origin: None,
        };
        classify(target, fetch)
    }

    struct FailingEnricher;

    impl Enricher for FailingEnricher {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn enrich(&self, _outcome: &CrawlOutcome) -> anyhow::Result<serde_json::Value> {
            anyhow::bail!("enrichment backend unavailable")
        }
    }

    #[test]
    fn test_status_class_enricher() {
        let cases = [
            (FetchOutcome::Response { status: 200 }, "success"),
            (FetchOutcome::Response { status: 301 }, "redirect"),
            (FetchOutcome::Response { status: 404 }, "client-error"),
            (FetchOutcome::Response { status: 503 }, "server-error"),
            (
                FetchOutcome::TransportError {
                    message: "timeout".to_string(),
                },
                "unreachable",
            ),
        ];

        for (fetch, expected) in cases {
            let mut o = outcome(fetch);
            apply_enrichers(&[Arc::new(StatusClassEnricher) as Arc<dyn Enricher>], &mut o);
            assert_eq!(
                o.extra_data.get("status_class"),
                Some(&serde_json::Value::String(expected.to_string()))
            );
        }
    }

    #[test]
    fn test_enricher_error_is_swallowed() {
        let enrichers: Vec<Arc<dyn Enricher>> = vec![
            Arc::new(FailingEnricher),
            Arc::new(StatusClassEnricher),
        ];
        let mut o = outcome(FetchOutcome::Response { status: 200 });

        apply_enrichers(&enrichers, &mut o);

        // The failing enricher left no entry, the next one still ran
        assert!(!o.extra_data.contains_key("failing"));
        assert!(o.extra_data.contains_key("status_class"));
        assert!(o.succeeded);
    }

    #[test]
    fn test_enrichers_run_in_registration_order() {
        struct Recorder(&'static str);

        impl Enricher for Recorder {
            fn name(&self) -> &'static str {
                self.0
            }

            fn enrich(&self, outcome: &CrawlOutcome) -> anyhow::Result<serde_json::Value> {
                // Each recorder sees the keys left by those before it
                Ok(serde_json::Value::from(outcome.extra_data.len() as u64))
            }
        }

        let enrichers: Vec<Arc<dyn Enricher>> =
            vec![Arc::new(Recorder("first")), Arc::new(Recorder("second"))];
        let mut o = outcome(FetchOutcome::Response { status: 200 });

        apply_enrichers(&enrichers, &mut o);

        assert_eq!(o.extra_data.get("first"), Some(&serde_json::Value::from(0u64)));
        assert_eq!(o.extra_data.get("second"), Some(&serde_json::Value::from(1u64)));
    }
}
