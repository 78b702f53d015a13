//! Caching layer for search outcomes.
//!
//! Route searches are pure functions of (snapshot, request), so outcomes can
//! be cached safely. The cache key includes the snapshot generation: a
//! schedule swap changes the generation, so stale entries simply stop being
//! hit and age out via TTL.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::resolver::{SearchOutcome, SearchRequest};

/// Configuration for the search cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 1000,
        }
    }
}

/// Cache key: snapshot generation plus every request parameter that affects
/// the outcome.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchKey {
    generation: u64,
    origin: u32,
    destination: u32,
    max_transfers: Option<usize>,
    max_results: Option<usize>,
    min_transfer_buffer_mins: Option<i64>,
    max_transfer_wait_mins: Option<i64>,
}

impl SearchKey {
    /// Build a key for a request against a given snapshot generation.
    pub fn new(generation: u64, request: &SearchRequest) -> Self {
        Self {
            generation,
            origin: request.origin.0,
            destination: request.destination.0,
            max_transfers: request.overrides.max_transfers,
            max_results: request.overrides.max_results,
            min_transfer_buffer_mins: request.overrides.min_transfer_buffer_mins,
            max_transfer_wait_mins: request.overrides.max_transfer_wait_mins,
        }
    }
}

/// Cache of search outcomes.
pub struct SearchCache {
    entries: MokaCache<SearchKey, Arc<SearchOutcome>>,
}

impl SearchCache {
    /// Create a cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let entries = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { entries }
    }

    /// Get a cached outcome.
    pub async fn get(&self, key: &SearchKey) -> Option<Arc<SearchOutcome>> {
        self.entries.get(key).await
    }

    /// Insert an outcome.
    pub async fn insert(&self, key: SearchKey, outcome: Arc<SearchOutcome>) {
        self.entries.insert(key, outcome).await;
    }

    /// Number of cached entries (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }

    /// Drop all cached entries.
    pub fn invalidate_all(&self) {
        self.entries.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LocationId;

    fn request() -> SearchRequest {
        SearchRequest::new(LocationId(1), LocationId(2))
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(60));
        assert_eq!(config.max_capacity, 1000);
    }

    #[test]
    fn key_distinguishes_generations() {
        let req = request();
        assert_ne!(SearchKey::new(0, &req), SearchKey::new(1, &req));
    }

    #[test]
    fn key_distinguishes_parameters() {
        let base = request();

        let mut tighter = request();
        tighter.overrides.max_transfer_wait_mins = Some(30);

        assert_ne!(SearchKey::new(0, &base), SearchKey::new(0, &tighter));
        assert_eq!(SearchKey::new(0, &base), SearchKey::new(0, &request()));
    }

    #[tokio::test]
    async fn insert_then_get() {
        let cache = SearchCache::new(&CacheConfig::default());
        let key = SearchKey::new(0, &request());

        assert!(cache.get(&key).await.is_none());

        let outcome = Arc::new(SearchOutcome {
            routes: vec![],
            explored: 0,
            truncated: false,
        });
        cache.insert(key.clone(), outcome).await;

        let hit = cache.get(&key).await.expect("cached outcome");
        assert!(hit.routes.is_empty());

        // A different generation misses
        let other = SearchKey::new(1, &request());
        assert!(cache.get(&other).await.is_none());
    }
}
