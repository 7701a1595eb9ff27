use crate::modules::provider::infrastructure::cache::{CacheStats, ProviderCache};
use crate::modules::show::Show;
use crate::shared::errors::AppResult;
use std::sync::Arc;
use tracing::debug;

/// Cache-aside wrapper shared by every fetch a provider client makes
pub struct CachedProviderBehavior {
    cache: Option<Arc<ProviderCache>>,
    provider_name: &'static str,
}

impl CachedProviderBehavior {
    pub fn new(cache: Option<Arc<ProviderCache>>, provider_name: &'static str) -> Self {
        Self {
            cache,
            provider_name,
        }
    }

    /// Serve from cache when fresh, otherwise run `fetch_fn` and cache its
    /// successful result. Errors are never cached.
    pub async fn cached_fetch<F, Fut>(
        &self,
        namespace: &str,
        key: &str,
        fetch_fn: F,
    ) -> AppResult<Vec<Show>>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = AppResult<Vec<Show>>>,
    {
        let Some(cache) = &self.cache else {
            return fetch_fn().await;
        };

        if let Some(cached) = cache.get(namespace, key) {
            debug!(
                "{} {} cache hit for '{}'",
                self.provider_name, namespace, key
            );
            return Ok(cached.as_ref().clone());
        }

        let results = fetch_fn().await?;
        cache.insert(namespace, key, results.clone());
        debug!(
            "{} {} fetched and cached for '{}' ({} shows)",
            self.provider_name,
            namespace,
            key,
            results.len()
        );
        Ok(results)
    }

    /// Get cache statistics for monitoring
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(|cache| cache.stats())
    }

    /// Clear all cached data
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
            debug!("{} client cache cleared", self.provider_name);
        }
    }
}
