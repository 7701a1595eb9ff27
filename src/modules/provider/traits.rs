use crate::modules::show::Show;
use crate::shared::errors::AppResult;
use async_trait::async_trait;

/// Source of show metadata. Implementations do their own rate limiting and
/// retries; cancellation is applied by the caller by dropping the future.
#[async_trait]
pub trait ShowProviderClient: Send + Sync {
    /// Human-readable provider name for logs
    fn provider_name(&self) -> &str;

    /// Free-text show search, in upstream relevance order
    async fn search_shows(&self, query: &str) -> AppResult<Vec<Show>>;

    /// The full catalog, unordered
    async fn list_all_shows(&self) -> AppResult<Vec<Show>>;
}
