//! Per-invocation resolution cache
//!
//! Repeated (site, language) or (page, language) lookups within one warmup
//! invocation hit this memo instead of re-resolving. The cache is an
//! explicit object injected into the URL source and scoped to a single
//! orchestrator invocation, so tests can assert on hit counts without
//! global state leaking between cases.

use crate::warmup::WarmupTarget;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Key for one resolution: the requested identifier kind + id + language
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResolutionKey {
    Site { identifier: String, language: String },
    Page { id: String, language: String },
}

/// Memoizes resolved target lists for the duration of one invocation
#[derive(Debug, Default)]
pub struct ResolutionCache {
    entries: Mutex<HashMap<ResolutionKey, Vec<WarmupTarget>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached targets for a key, if present
    pub fn get(&self, key: &ResolutionKey) -> Option<Vec<WarmupTarget>> {
        let entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some(targets) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(targets.clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Stores the targets resolved for a key
    pub fn insert(&self, key: ResolutionKey, targets: Vec<WarmupTarget>) {
        self.entries.lock().unwrap().insert(key, targets);
    }

    pub fn hit_count(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn miss_count(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}
