pub mod common;
pub mod tvmaze;

pub use common::CachedProviderBehavior;
pub use tvmaze::TvMazeClient;
