//! Crawl strategies: pure reordering policies applied to the target list
//! before dispatch
//!
//! A strategy never adds, drops, or mutates targets; it only changes their
//! order. Strategies are looked up by name in a registry, once, before any
//! dispatch starts, so an unknown name is a configuration error rather than
//! a mid-run surprise.

use crate::warmup::WarmupTarget;
use crate::ConfigError;
use std::collections::HashMap;
use std::sync::Arc;

/// A pure reordering policy for warmup targets
///
/// Implementations must return the same set of targets they were given,
/// possibly in a different order.
pub trait CrawlStrategy: Send + Sync {
    /// Name this strategy is registered under
    fn name(&self) -> &'static str;

    /// Reorders the target list
    fn reorder(&self, targets: Vec<WarmupTarget>) -> Vec<WarmupTarget>;
}

/// Default strategy: returns targets in the order the URL source produced them
pub struct IdentityStrategy;

impl CrawlStrategy for IdentityStrategy {
    fn name(&self) -> &'static str {
        "identity"
    }

    fn reorder(&self, targets: Vec<WarmupTarget>) -> Vec<WarmupTarget> {
        targets
    }
}

/// Sorts targets by descending priority so that, under a limit, the dropped
/// tail is the least important content
///
/// Targets without a priority sort last. The sort is stable: ties keep their
/// original relative order.
pub struct SortByPriorityStrategy;

impl CrawlStrategy for SortByPriorityStrategy {
    fn name(&self) -> &'static str {
        "priority"
    }

    fn reorder(&self, mut targets: Vec<WarmupTarget>) -> Vec<WarmupTarget> {
        targets.sort_by(|a, b| {
            match (a.priority, b.priority) {
                (Some(pa), Some(pb)) => pb.partial_cmp(&pa).unwrap_or(std::cmp::Ordering::Equal),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            }
        });
        targets
    }
}

/// Registry mapping strategy names to strategy instances
///
/// Resolved once at orchestrator construction time, not per target.
pub struct StrategyRegistry {
    strategies: HashMap<&'static str, Arc<dyn CrawlStrategy>>,
}

impl StrategyRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }

    /// Creates a registry with the built-in strategies registered
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(IdentityStrategy));
        registry.register(Arc::new(SortByPriorityStrategy));
        registry
    }

    /// Registers a strategy under its own name
    pub fn register(&mut self, strategy: Arc<dyn CrawlStrategy>) {
        self.strategies.insert(strategy.name(), strategy);
    }

    /// Looks up a strategy by name
    ///
    /// An unregistered name is a configuration error.
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn CrawlStrategy>, ConfigError> {
        self.strategies
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownStrategy(name.to_string()))
    }

    /// Resolves an optional strategy name, defaulting to identity
    pub fn resolve_or_default(
        &self,
        name: Option<&str>,
    ) -> Result<Arc<dyn CrawlStrategy>, ConfigError> {
        match name {
            Some(name) => self.resolve(name),
            None => self.resolve("identity"),
        }
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn target(url: &str, priority: Option<f64>) -> WarmupTarget {
        WarmupTarget {
            url: Url::parse(url).unwrap(),
            priority,
            origin: None,
        }
    }

    #[test]
    fn test_identity_preserves_order() {
        let targets = vec![
            target("https://example.com/a", Some(0.2)),
            target("https://example.com/b", Some(0.9)),
        ];
        let reordered = IdentityStrategy.reorder(targets.clone());
        assert_eq!(reordered[0].url, targets[0].url);
        assert_eq!(reordered[1].url, targets[1].url);
    }

    #[test]
    fn test_priority_sorts_descending() {
        let targets = vec![
            target("https://example.com/low", Some(0.2)),
            target("https://example.com/high", Some(0.9)),
            target("https://example.com/mid", Some(0.5)),
        ];
        let reordered = SortByPriorityStrategy.reorder(targets);
        let paths: Vec<&str> = reordered.iter().map(|t| t.url.path()).collect();
        assert_eq!(paths, vec!["/high", "/mid", "/low"]);
    }

    #[test]
    fn test_priority_nones_sort_last() {
        let targets = vec![
            target("https://example.com/none", None),
            target("https://example.com/some", Some(0.1)),
        ];
        let reordered = SortByPriorityStrategy.reorder(targets);
        assert_eq!(reordered[0].url.path(), "/some");
        assert_eq!(reordered[1].url.path(), "/none");
    }

    #[test]
    fn test_priority_ties_are_stable() {
        let targets = vec![
            target("https://example.com/first", Some(0.5)),
            target("https://example.com/second", Some(0.5)),
            target("https://example.com/third", Some(0.5)),
        ];
        let reordered = SortByPriorityStrategy.reorder(targets);
        let paths: Vec<&str> = reordered.iter().map(|t| t.url.path()).collect();
        assert_eq!(paths, vec!["/first", "/second", "/third"]);
    }

    #[test]
    fn test_priority_same_length_and_set() {
        let targets = vec![
            target("https://example.com/a", Some(0.3)),
            target("https://example.com/b", None),
            target("https://example.com/c", Some(0.7)),
        ];
        let reordered = SortByPriorityStrategy.reorder(targets.clone());
        assert_eq!(reordered.len(), targets.len());
        for t in &targets {
            assert!(reordered.iter().any(|r| r.url == t.url));
        }
    }

    #[test]
    fn test_registry_resolves_builtins() {
        let registry = StrategyRegistry::with_builtins();
        assert_eq!(registry.resolve("identity").unwrap().name(), "identity");
        assert_eq!(registry.resolve("priority").unwrap().name(), "priority");
    }

    #[test]
    fn test_registry_unknown_name_is_config_error() {
        let registry = StrategyRegistry::with_builtins();
        let result = registry.resolve("alphabetical");
        assert!(matches!(result, Err(ConfigError::UnknownStrategy(_))));
    }

    #[test]
    fn test_resolve_or_default_falls_back_to_identity() {
        let registry = StrategyRegistry::with_builtins();
        let strategy = registry.resolve_or_default(None).unwrap();
        assert_eq!(strategy.name(), "identity");
    }
}
