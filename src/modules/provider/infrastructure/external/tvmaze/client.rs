use crate::modules::provider::infrastructure::cache::{CacheStats, ProviderCache};
use crate::modules::provider::infrastructure::external::common::CachedProviderBehavior;
use crate::modules::provider::infrastructure::http_client::RateLimitClient;
use crate::modules::provider::traits::ShowProviderClient;
use crate::modules::show::Show;
use crate::shared::{
    config::AppConfig,
    errors::{AppError, AppResult},
    utils::TimedOperation,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use super::{
    dto::{TvMazeSearchHit, TvMazeShow},
    mapper::TvMazeMapper,
};

const PROVIDER_NAME: &str = "TVmaze";

pub struct TvMazeClient {
    http: RateLimitClient,
    base_url: String,
    cached_behavior: CachedProviderBehavior,
}

impl TvMazeClient {
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        let cache = (!config.cache_ttl().is_zero())
            .then(|| Arc::new(ProviderCache::with_ttl(config.cache_ttl())));
        Self::with_cache(config, cache)
    }

    pub fn with_cache(config: &AppConfig, cache: Option<Arc<ProviderCache>>) -> AppResult<Self> {
        Ok(Self {
            http: RateLimitClient::for_tvmaze(config)?,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            cached_behavior: CachedProviderBehavior::new(cache, PROVIDER_NAME),
        })
    }

    pub async fn search_shows(&self, query: &str) -> AppResult<Vec<Show>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::ValidationError(
                "Search query cannot be empty".to_string(),
            ));
        }

        self.cached_behavior
            .cached_fetch("search", query, || self.search_shows_uncached(query))
            .await
    }

    async fn search_shows_uncached(&self, query: &str) -> AppResult<Vec<Show>> {
        let url = format!("{}/search/shows", self.base_url);
        let hits: Vec<TvMazeSearchHit> = self.http.get_json(&url, &[("q", query)]).await?;

        Ok(hits.into_iter().map(TvMazeMapper::hit_to_domain).collect())
    }

    pub async fn list_all_shows(&self) -> AppResult<Vec<Show>> {
        self.cached_behavior
            .cached_fetch("catalog", "all", || self.list_all_shows_uncached())
            .await
    }

    async fn list_all_shows_uncached(&self) -> AppResult<Vec<Show>> {
        let url = format!("{}/shows", self.base_url);
        let timer = TimedOperation::start("TVmaze catalog fetch");
        let shows: Vec<TvMazeShow> = self.http.get_json(&url, &[]).await?;
        timer.finish(Some(&format!("{} shows", shows.len())));

        Ok(shows.into_iter().map(TvMazeMapper::to_domain).collect())
    }

    /// Get cache statistics for monitoring
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cached_behavior.cache_stats()
    }

    /// Clear all cached data
    pub fn clear_cache(&self) {
        self.cached_behavior.clear_cache();
        info!("TVmaze client cache cleared");
    }
}

#[async_trait]
impl ShowProviderClient for TvMazeClient {
    fn provider_name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn search_shows(&self, query: &str) -> AppResult<Vec<Show>> {
        self.search_shows(query).await
    }

    async fn list_all_shows(&self) -> AppResult<Vec<Show>> {
        self.list_all_shows().await
    }
}
