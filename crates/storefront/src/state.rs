//! Application state shared across handlers.

use std::sync::Arc;

use crate::cache::CatalogCache;
use crate::config::StorefrontConfig;
use crate::supabase::SupabaseClient;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the Supabase client and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    supabase: SupabaseClient,
    catalog_cache: CatalogCache,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let supabase = SupabaseClient::new(&config.supabase);
        let catalog_cache = CatalogCache::new(config.catalog_cache_ttl_secs);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                supabase,
                catalog_cache,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the Supabase REST client.
    #[must_use]
    pub fn supabase(&self) -> &SupabaseClient {
        &self.inner.supabase
    }

    /// Get a reference to the catalog cache.
    #[must_use]
    pub fn catalog_cache(&self) -> &CatalogCache {
        &self.inner.catalog_cache
    }
}
