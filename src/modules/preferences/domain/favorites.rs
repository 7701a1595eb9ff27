use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::modules::show::{Show, ShowId};

/// Display data kept alongside a favorite so it renders without a refetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    pub added_at: DateTime<Utc>,
}

impl FavoriteEntry {
    pub fn from_show(show: &Show, added_at: DateTime<Utc>) -> Self {
        Self {
            name: show.name.clone(),
            image: show.image.clone(),
            added_at,
        }
    }
}

/// Favorited shows keyed by id. No size limit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites {
    entries: HashMap<ShowId, FavoriteEntry>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `show` if absent, remove it if present. Returns whether the show
    /// is a favorite afterwards.
    pub fn toggle(&mut self, show: &Show, now: DateTime<Utc>) -> bool {
        if self.entries.remove(&show.id).is_some() {
            false
        } else {
            self.entries
                .insert(show.id.clone(), FavoriteEntry::from_show(show, now));
            true
        }
    }

    pub fn remove(&mut self, id: &ShowId) -> Option<FavoriteEntry> {
        self.entries.remove(id)
    }

    pub fn contains(&self, id: &ShowId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn get(&self, id: &ShowId) -> Option<&FavoriteEntry> {
        self.entries.get(id)
    }

    pub fn ids(&self) -> HashSet<ShowId> {
        self.entries.keys().cloned().collect()
    }

    /// Newest first
    pub fn sorted_entries(&self) -> Vec<(ShowId, FavoriteEntry)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|(id, entry)| (id.clone(), entry.clone()))
            .collect();
        entries.sort_by(|a, b| b.1.added_at.cmp(&a.1.added_at).then_with(|| a.0.cmp(&b.0)));
        entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
