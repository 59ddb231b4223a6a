//! In-memory cache implementation with LRU eviction.
//!
//! Thread-safe cache with TTL support using tokio synchronization
//! primitives and an LRU eviction policy. Expiry is lazy: entries are
//! treated as absent once their deadline passes and evicted on access.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::RwLock;

use practika_core::cache::{pattern_matches, Cache, Result};

/// A single cache entry with optional expiration.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    /// Creates a new cache entry with optional TTL.
    fn new(value: Vec<u8>, ttl: Option<Duration>) -> Self {
        let expires_at = ttl.map(|d| Instant::now() + d);
        Self { value, expires_at }
    }

    /// Returns true if this entry has expired.
    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Instant::now() > exp)
    }
}

/// In-memory cache with LRU eviction.
///
/// Uses `Arc<RwLock<LruCache>>` for concurrent access. `delete_pattern`
/// scans all resident keys; the cache is bounded, so the scan is too.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    store: Arc<RwLock<LruCache<String, CacheEntry>>>,
}

impl MemoryCache {
    /// Creates a new in-memory cache with LRU eviction.
    ///
    /// # Panics
    ///
    /// Panics if `max_entries` is 0.
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).expect("max_entries must be > 0");
        Self {
            store: Arc::new(RwLock::new(LruCache::new(capacity))),
        }
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut store = self.store.write().await;

        match store.get(key) {
            Some(entry) if entry.is_expired() => {
                store.pop(key);
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.value.clone())),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut store = self.store.write().await;
        store.put(key.to_string(), CacheEntry::new(value.to_vec(), ttl));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut store = self.store.write().await;
        store.pop(key);
        Ok(())
    }

    async fn delete_pattern(&self, pattern: &str) -> Result<()> {
        let mut store = self.store.write().await;
        let keys_to_delete: Vec<String> = store
            .iter()
            .filter(|(key, _)| pattern_matches(pattern, key))
            .map(|(key, _)| key.clone())
            .collect();
        for key in keys_to_delete {
            store.pop(&key);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_and_get() {
        let cache = MemoryCache::new(16);

        cache.set("entry:1", b"value", None).await.unwrap();

        assert_eq!(cache.get("entry:1").await.unwrap(), Some(b"value".to_vec()));
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let cache = MemoryCache::new(16);
        assert_eq!(cache.get("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_expired_entry_reads_as_absent() {
        let cache = MemoryCache::new(16);

        cache
            .set("entry:1", b"value", Some(Duration::from_millis(10)))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;

        assert_eq!(cache.get("entry:1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete() {
        let cache = MemoryCache::new(16);

        cache.set("entry:1", b"value", None).await.unwrap();
        cache.delete("entry:1").await.unwrap();

        assert_eq!(cache.get("entry:1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let cache = MemoryCache::new(16);
        cache.delete("never-set").await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_pattern_removes_only_matches() {
        let cache = MemoryCache::new(16);

        cache.set("entries:1:50:-:createdAt", b"a", None).await.unwrap();
        cache.set("entries:2:50:-:createdAt", b"b", None).await.unwrap();
        cache.set("entry:abc", b"c", None).await.unwrap();
        cache.set("selected_routine", b"d", None).await.unwrap();

        cache.delete_pattern("entries:*").await.unwrap();

        assert_eq!(cache.get("entries:1:50:-:createdAt").await.unwrap(), None);
        assert_eq!(cache.get("entries:2:50:-:createdAt").await.unwrap(), None);
        assert_eq!(cache.get("entry:abc").await.unwrap(), Some(b"c".to_vec()));
        assert_eq!(
            cache.get("selected_routine").await.unwrap(),
            Some(b"d".to_vec())
        );
    }

    #[tokio::test]
    async fn test_lru_eviction_respects_capacity() {
        let cache = MemoryCache::new(2);

        cache.set("a", b"1", None).await.unwrap();
        cache.set("b", b"2", None).await.unwrap();
        cache.set("c", b"3", None).await.unwrap();

        // "a" was least recently used and must be gone
        assert_eq!(cache.get("a").await.unwrap(), None);
        assert_eq!(cache.get("c").await.unwrap(), Some(b"3".to_vec()));
    }

    #[tokio::test]
    async fn test_set_overwrites_existing_value() {
        let cache = MemoryCache::new(16);

        cache.set("entry:1", b"old", None).await.unwrap();
        cache.set("entry:1", b"new", None).await.unwrap();

        assert_eq!(cache.get("entry:1").await.unwrap(), Some(b"new".to_vec()));
    }
}
