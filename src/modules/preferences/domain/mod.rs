pub mod favorites;
pub mod search_history;
pub mod view_mode;

pub use favorites::{FavoriteEntry, Favorites};
pub use search_history::SearchHistory;
pub use view_mode::ViewMode;
