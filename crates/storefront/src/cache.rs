//! In-memory catalog cache.
//!
//! The catalog changes rarely and is read on every storefront page view, so
//! responses from Supabase are cached with a short TTL. Orders and profiles
//! are never cached.

use std::time::Duration;

use moka::future::Cache;

use qotore_core::Fragrance;

/// Cache key for catalog lookups.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    /// The full visible catalog.
    Catalog,
    /// A single fragrance by slug.
    Fragrance(String),
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Catalog(Vec<Fragrance>),
    Fragrance(Box<Fragrance>),
}

/// TTL-bounded cache for catalog responses.
#[derive(Clone)]
pub struct CatalogCache {
    cache: Cache<CacheKey, CacheValue>,
}

impl CatalogCache {
    /// Create a cache that expires entries `ttl_secs` after insertion.
    #[must_use]
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            cache: Cache::builder()
                .max_capacity(1024)
                .time_to_live(Duration::from_secs(ttl_secs))
                .build(),
        }
    }

    pub async fn get(&self, key: &CacheKey) -> Option<CacheValue> {
        self.cache.get(key).await
    }

    pub async fn insert(&self, key: CacheKey, value: CacheValue) {
        self.cache.insert(key, value).await;
    }

    /// Drop all entries immediately instead of waiting out the TTL.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cache_roundtrip() {
        let cache = CatalogCache::new(60);
        assert!(cache.get(&CacheKey::Catalog).await.is_none());

        cache
            .insert(CacheKey::Catalog, CacheValue::Catalog(vec![]))
            .await;
        assert!(matches!(
            cache.get(&CacheKey::Catalog).await,
            Some(CacheValue::Catalog(_))
        ));
    }

    #[tokio::test]
    async fn test_invalidate_all() {
        let cache = CatalogCache::new(60);
        cache
            .insert(CacheKey::Catalog, CacheValue::Catalog(vec![]))
            .await;
        cache.invalidate_all();
        // moka invalidation is eventually consistent; run pending tasks first
        cache.cache.run_pending_tasks().await;
        assert!(cache.get(&CacheKey::Catalog).await.is_none());
    }
}
