use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::modules::preferences::domain::{Favorites, SearchHistory, ViewMode};
use crate::modules::preferences::traits::PreferenceStore;
use crate::modules::show::{Show, ShowId};
use crate::shared::errors::{AppError, AppResult};

pub const HISTORY_KEY: &str = "search_history";
pub const FAVORITES_KEY: &str = "favorites";
pub const VIEW_MODE_KEY: &str = "view_mode";

/// In-memory preferences backed by a [`PreferenceStore`].
///
/// The in-memory copy is authoritative for the session. Every mutating call
/// updates it first and then tries to persist; an `Err` return means only
/// the write failed and the caller should surface a storage notice.
pub struct PreferenceService {
    store: Arc<dyn PreferenceStore>,
    history: SearchHistory,
    favorites: Favorites,
    view_mode: ViewMode,
}

impl PreferenceService {
    /// Load all three collections. Missing keys give defaults; unreadable
    /// ones give defaults plus a returned warning.
    pub fn load(store: Arc<dyn PreferenceStore>, history_capacity: usize) -> (Self, Vec<AppError>) {
        let mut warnings = Vec::new();

        let history_entries: Vec<String> = read_or_default(store.as_ref(), HISTORY_KEY, &mut warnings);
        let favorites: Favorites = read_or_default(store.as_ref(), FAVORITES_KEY, &mut warnings);
        let view_mode = read_view_mode(store.as_ref(), &mut warnings);

        debug!(
            "Loaded preferences: {} history entries, {} favorites, {} view",
            history_entries.len(),
            favorites.len(),
            view_mode
        );

        let service = Self {
            store,
            history: SearchHistory::from_entries(history_entries, history_capacity),
            favorites,
            view_mode,
        };
        (service, warnings)
    }

    pub fn history(&self) -> &SearchHistory {
        &self.history
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn is_favorite(&self, id: &ShowId) -> bool {
        self.favorites.contains(id)
    }

    pub fn record_search(&mut self, query: &str) -> AppResult<()> {
        if !self.history.record(query) {
            return Ok(());
        }
        self.persist(HISTORY_KEY, &self.history.entries())
    }

    pub fn clear_history(&mut self) -> AppResult<()> {
        self.history.clear();
        self.persist(HISTORY_KEY, &self.history.entries())
    }

    /// Returns whether the show is a favorite after the toggle, together
    /// with the outcome of persisting it.
    pub fn toggle_favorite(&mut self, show: &Show) -> (bool, AppResult<()>) {
        let now_favorite = self.favorites.toggle(show, Utc::now());
        let persisted = self.persist(FAVORITES_KEY, &self.favorites);
        (now_favorite, persisted)
    }

    /// Remove by id alone, for favorites whose show is no longer loaded.
    /// `Ok(false)` when the id was not a favorite.
    pub fn remove_favorite(&mut self, id: &ShowId) -> (bool, AppResult<()>) {
        if self.favorites.remove(id).is_none() {
            return (false, Ok(()));
        }
        (true, self.persist(FAVORITES_KEY, &self.favorites))
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) -> AppResult<()> {
        self.view_mode = mode;
        self.persist(VIEW_MODE_KEY, &mode)
    }

    fn persist<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> AppResult<()> {
        let encoded = serde_json::to_string(value)?;
        self.store.set(key, &encoded).map_err(|e| {
            warn!("Failed to persist '{}', keeping it in memory: {}", key, e);
            match e {
                AppError::StorageError(_) => e,
                other => AppError::StorageError(other.to_string()),
            }
        })
    }
}

fn read_or_default<T>(store: &dyn PreferenceStore, key: &str, warnings: &mut Vec<AppError>) -> T
where
    T: DeserializeOwned + Default,
{
    match store.get(key) {
        Ok(None) => T::default(),
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("Ignoring unreadable preference '{}': {}", key, e);
            warnings.push(AppError::StorageError(format!("'{}' is unreadable: {}", key, e)));
            T::default()
        }),
        Err(e) => {
            warn!("Failed to read preference '{}': {}", key, e);
            warnings.push(AppError::StorageError(e.to_string()));
            T::default()
        }
    }
}

fn read_view_mode(store: &dyn PreferenceStore, warnings: &mut Vec<AppError>) -> ViewMode {
    match store.get(VIEW_MODE_KEY) {
        Ok(None) => ViewMode::default(),
        Ok(Some(raw)) => raw.parse().unwrap_or_else(|_| {
            warn!("Unknown view mode '{}', using default", raw);
            warnings.push(AppError::StorageError(format!("Unknown view mode '{}'", raw)));
            ViewMode::default()
        }),
        Err(e) => {
            warn!("Failed to read view mode: {}", e);
            warnings.push(AppError::StorageError(e.to_string()));
            ViewMode::default()
        }
    }
}
