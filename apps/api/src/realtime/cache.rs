//! Bounded LRU cache for optimization results.
//!
//! Keys are SHA-256 digests of the serialized request, so equal requests share
//! an entry regardless of how large the resume is. Storage and eviction are
//! delegated to `moka`; hit, miss and eviction counters live beside it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use moka::notification::RemovalCause;
use moka::policy::EvictionPolicy;
use moka::sync::Cache;
use serde::Serialize;
use sha2::{Digest, Sha256};

pub const DEFAULT_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub size: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

pub struct SuggestionCache<V> {
    capacity: usize,
    inner: Cache<String, V>,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: Arc<AtomicU64>,
}

impl<V> SuggestionCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let evictions = Arc::new(AtomicU64::new(0));

        let counter = Arc::clone(&evictions);
        let inner = Cache::builder()
            .max_capacity(capacity as u64)
            .eviction_policy(EvictionPolicy::lru())
            .eviction_listener(move |_key, _value, cause| {
                // replacements and explicit invalidation are not evictions
                if cause == RemovalCause::Size {
                    counter.fetch_add(1, Ordering::Relaxed);
                }
            })
            .build();

        Self {
            capacity,
            inner,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions,
        }
    }

    /// Returns a clone of the cached value and marks it most recently used.
    pub fn get(&self, key: &str) -> Option<V> {
        let value = self.inner.get(key);
        let counter = if value.is_some() { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
        value
    }

    /// Inserts or replaces `key`; the least recently used entry goes once full.
    pub fn insert(&self, key: String, value: V) {
        self.inner.insert(key, value);
    }

    /// Drops every entry. Counters are kept.
    pub fn clear(&self) {
        self.inner.invalidate_all();
        self.inner.run_pending_tasks();
    }

    pub fn len(&self) -> usize {
        self.inner.run_pending_tasks();
        self.inner.entry_count() as usize
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.len(),
            capacity: self.capacity,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }
}

/// Hex SHA-256 of the JSON serialization of `value`.
pub fn cache_key<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let bytes = serde_json::to_vec(value)?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Inserts and flushes moka's pending maintenance so eviction is observable.
    fn put(cache: &SuggestionCache<i32>, key: &str, value: i32) {
        cache.insert(key.to_string(), value);
        cache.inner.run_pending_tasks();
    }

    #[test]
    fn test_get_miss_then_hit() {
        let cache = SuggestionCache::new(2);
        assert_eq!(cache.get("a"), None);
        put(&cache, "a", 1);
        assert_eq!(cache.get("a"), Some(1));

        let stats = cache.stats();
        assert_eq!((stats.hits, stats.misses, stats.size), (1, 1, 1));
    }

    #[test]
    fn test_evicts_least_recently_used() {
        let cache = SuggestionCache::new(2);
        put(&cache, "a", 1);
        put(&cache, "b", 2);
        // touch "a" so "b" becomes the eviction candidate
        assert_eq!(cache.get("a"), Some(1));
        cache.inner.run_pending_tasks();
        put(&cache, "c", 3);

        assert_eq!(cache.get("b"), None);
        assert_eq!(cache.get("a"), Some(1));
        assert_eq!(cache.get("c"), Some(3));
        assert_eq!(cache.stats().evictions, 1);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_replacing_a_key_does_not_evict() {
        let cache = SuggestionCache::new(2);
        put(&cache, "a", 1);
        put(&cache, "b", 2);
        put(&cache, "a", 10);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("a"), Some(10));
        assert_eq!(cache.get("b"), Some(2));
        assert_eq!(cache.stats().evictions, 0);
    }

    #[test]
    fn test_size_never_exceeds_capacity() {
        let cache = SuggestionCache::new(3);
        for i in 0..50 {
            put(&cache, &format!("k{i}"), i);
            assert!(cache.len() <= 3);
        }
        assert_eq!(cache.stats().evictions, 47);
        assert_eq!(cache.get("k49"), Some(49));
        assert_eq!(cache.get("k0"), None);
    }

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        let cache = SuggestionCache::new(0);
        put(&cache, "a", 1);
        assert_eq!(cache.stats().capacity, 1);
        assert_eq!(cache.get("a"), Some(1));
    }

    #[test]
    fn test_clear_keeps_counters() {
        let cache = SuggestionCache::new(4);
        put(&cache, "a", 1);
        cache.get("a");
        cache.clear();

        let stats = cache.stats();
        assert_eq!(stats.size, 0);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.evictions, 0);
        assert_eq!(cache.get("a"), None);
    }

    #[test]
    fn test_shared_across_threads() {
        let cache = Arc::new(SuggestionCache::new(DEFAULT_CAPACITY));
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    for i in 0..25 {
                        cache.insert(format!("{t}-{i}"), i);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.len(), 100);
    }

    #[test]
    fn test_cache_key_is_stable_and_distinct() {
        let a = cache_key(&("summary", "text")).unwrap();
        let b = cache_key(&("summary", "text")).unwrap();
        let c = cache_key(&("summary", "other")).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
    }
}
