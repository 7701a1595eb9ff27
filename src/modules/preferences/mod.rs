pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod traits;

pub use application::service::PreferenceService;
pub use domain::{FavoriteEntry, Favorites, SearchHistory, ViewMode};
pub use infrastructure::{FilePreferenceStore, InMemoryPreferenceStore};
pub use traits::PreferenceStore;
