//! Response Cache
//!
//! In-memory cache of upstream response bodies keyed by endpoint.
//! Entries expire after a TTL; a janitor task purges expired entries
//! on an interval so slow endpoints don't pin stale payloads forever.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::config::CacheConfig;

/// A cached upstream response body
#[derive(Clone)]
struct CacheEntry {
    body: Arc<Vec<u8>>,
    stored_at: Instant,
}

/// TTL cache for upstream response bodies
pub struct ResponseCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
    sweep_interval: Duration,
}

impl ResponseCache {
    /// Create a new cache from configuration
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: Duration::from_secs(config.ttl_secs),
            sweep_interval: Duration::from_secs(config.sweep_interval_secs),
        }
    }

    /// Get a cached body if present and not expired
    pub async fn get(&self, key: &str) -> Option<Arc<Vec<u8>>> {
        let entries = self.entries.read().await;
        entries.get(key).and_then(|entry| {
            if entry.stored_at.elapsed() < self.ttl {
                Some(Arc::clone(&entry.body))
            } else {
                None
            }
        })
    }

    /// Store a body under the given key
    pub async fn insert(&self, key: &str, body: Vec<u8>) {
        let entry = CacheEntry {
            body: Arc::new(body),
            stored_at: Instant::now(),
        };
        self.entries.write().await.insert(key.to_string(), entry);
    }

    /// Remove all expired entries
    pub async fn purge_expired(&self) {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.stored_at.elapsed() < self.ttl);

        let purged = before - entries.len();
        if purged > 0 {
            tracing::debug!(purged, "Purged expired cache entries");
        }
    }

    /// Remove everything
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Number of entries currently stored (expired included until purged)
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the cache is empty
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Start the janitor task purging expired entries on an interval
    pub fn start_janitor(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.sweep_interval);
            // The first tick fires immediately; skip it
            interval.tick().await;

            loop {
                interval.tick().await;
                self.purge_expired().await;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_cache(ttl_ms: u64) -> ResponseCache {
        ResponseCache {
            entries: RwLock::new(HashMap::new()),
            ttl: Duration::from_millis(ttl_ms),
            sweep_interval: Duration::from_millis(ttl_ms),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let cache = ResponseCache::new(&CacheConfig::default());

        assert!(cache.get("stations").await.is_none());

        cache.insert("stations", b"{\"Stations\":[]}".to_vec()).await;

        let body = cache.get("stations").await.unwrap();
        assert_eq!(body.as_slice(), b"{\"Stations\":[]}");
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_expired_entry_is_a_miss() {
        let cache = test_cache(20);

        cache.insert("lines", b"{}".to_vec()).await;
        assert!(cache.get("lines").await.is_some());

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert!(cache.get("lines").await.is_none());
    }

    #[tokio::test]
    async fn test_purge_expired() {
        let cache = test_cache(20);

        cache.insert("stations", b"a".to_vec()).await;
        cache.insert("lines", b"b".to_vec()).await;
        assert_eq!(cache.len().await, 2);

        tokio::time::sleep(Duration::from_millis(40)).await;
        cache.insert("fresh", b"c".to_vec()).await;

        cache.purge_expired().await;
        assert_eq!(cache.len().await, 1);
        assert!(cache.get("fresh").await.is_some());
    }

    #[tokio::test]
    async fn test_insert_overwrites() {
        let cache = ResponseCache::new(&CacheConfig::default());

        cache.insert("stations", b"old".to_vec()).await;
        cache.insert("stations", b"new".to_vec()).await;

        let body = cache.get("stations").await.unwrap();
        assert_eq!(body.as_slice(), b"new");
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = ResponseCache::new(&CacheConfig::default());
        cache.insert("stations", b"a".to_vec()).await;
        cache.clear().await;
        assert!(cache.is_empty().await);
    }
}
