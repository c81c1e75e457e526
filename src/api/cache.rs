// src/api/cache.rs
//! In-memory response cache for catalog calls.
//!
//! Caches raw JSON responses keyed by URL, with TTL-based expiry.
//! On cache hit, the cached JSON is re-parsed through the same parsers
//! used for live responses. The domain model is never stored.

use super::client::{ApiResponse, CatalogHttpClient};
use super::parser;
use crate::error::FetchError;
use crate::model::Product;
use crate::types::ProductId;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};
use url::Url;

// ---------------------------------------------------------------------------
// Response cache
// ---------------------------------------------------------------------------

/// Bounded, TTL-based cache of raw response bodies.
pub struct ResponseCache {
    entries: Mutex<LruCache<String, CacheEntry>>,
    ttl: Duration,
}

struct CacheEntry {
    data: String,
    cached_at: Instant,
}

impl ResponseCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }

    /// Returns cached data if the entry exists and has not expired.
    pub fn get(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.lock();
        let expired = match entries.get(key) {
            Some(entry) if entry.cached_at.elapsed() <= self.ttl => {
                return Some(entry.data.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.pop(key);
        }
        None
    }

    pub fn set(&self, key: &str, data: &str) {
        self.entries.lock().put(
            key.to_string(),
            CacheEntry {
                data: data.to_string(),
                cached_at: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// Cached catalog client
// ---------------------------------------------------------------------------

/// A [`CatalogRepository`](super::CatalogRepository) that serves repeated
/// requests from memory. Only successful responses are stored.
pub struct CachedCatalogClient {
    inner: CatalogHttpClient,
    cache: ResponseCache,
}

impl CachedCatalogClient {
    pub fn new(inner: CatalogHttpClient, capacity: usize, ttl: Duration) -> Self {
        Self {
            inner,
            cache: ResponseCache::new(capacity, ttl),
        }
    }

    async fn cached_get(&self, url: Url) -> Result<ApiResponse<String>, FetchError> {
        let key = url.to_string();
        if let Some(cached) = self.cache.get(&key) {
            log::debug!("Cache hit: {}", key);
            return Ok(ApiResponse {
                data: cached,
                status: reqwest::StatusCode::OK,
                url: key,
            });
        }

        log::debug!("Cache miss: {}", key);
        let response = self.inner.get(url).await?;
        if response.status.is_success() {
            self.cache.set(&key, &response.data);
        }
        Ok(response)
    }
}

#[async_trait::async_trait]
impl super::CatalogRepository for CachedCatalogClient {
    async fn list_products(&self) -> Result<Vec<Product>, FetchError> {
        let url = self.inner.endpoints().products();
        parser::parse_product_list(self.cached_get(url).await?)
    }

    async fn search_products(&self, text: &str) -> Result<Vec<Product>, FetchError> {
        let url = self.inner.endpoints().search(text);
        parser::parse_search_results(self.cached_get(url).await?)
    }

    async fn retrieve_product(&self, id: &ProductId) -> Result<Product, FetchError> {
        let url = self.inner.endpoints().product(id);
        parser::parse_product(self.cached_get(url).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_within_ttl() {
        let cache = ResponseCache::new(4, Duration::from_secs(60));
        cache.set("https://fakestoreapi.com/products", "[]");
        assert_eq!(
            cache.get("https://fakestoreapi.com/products").as_deref(),
            Some("[]")
        );
        assert_eq!(cache.get("https://fakestoreapi.com/products/1"), None);
    }

    #[test]
    fn test_expired_entries_are_evicted() {
        let cache = ResponseCache::new(4, Duration::ZERO);
        cache.set("k", "v");
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(cache.get("k"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_capacity_evicts_least_recent() {
        let cache = ResponseCache::new(2, Duration::from_secs(60));
        cache.set("a", "1");
        cache.set("b", "2");
        assert!(cache.get("a").is_some());
        cache.set("c", "3");
        assert_eq!(cache.get("b"), None);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_zero_capacity_still_caches_one() {
        let cache = ResponseCache::new(0, Duration::from_secs(60));
        cache.set("a", "1");
        assert_eq!(cache.get("a").as_deref(), Some("1"));
    }
}
