pub mod provider_cache;

pub use provider_cache::{CacheStats, ProviderCache};
