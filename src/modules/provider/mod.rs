pub mod infrastructure;
pub mod traits;

pub use infrastructure::cache::{CacheStats, ProviderCache};
pub use infrastructure::external::TvMazeClient;
pub use traits::ShowProviderClient;
