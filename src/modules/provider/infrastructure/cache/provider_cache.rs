use crate::modules::show::Show;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Cached entry with TTL support
#[derive(Debug, Clone)]
struct CacheEntry {
    data: Arc<Vec<Show>>,
    created_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn new(data: Vec<Show>, ttl: Duration) -> Self {
        Self {
            data: Arc::new(data),
            created_at: Instant::now(),
            ttl,
        }
    }

    fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.ttl
    }
}

/// Cache statistics for monitoring
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries_count: usize,
    pub expired_cleanups: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        if self.hits + self.misses == 0 {
            0.0
        } else {
            self.hits as f64 / (self.hits + self.misses) as f64
        }
    }
}

/// Response cache for already-fetched show lists. Expired entries are
/// dropped lazily on access and on insert.
#[derive(Debug)]
pub struct ProviderCache {
    cache: DashMap<String, CacheEntry>,
    hits: AtomicU64,
    misses: AtomicU64,
    cleanups: AtomicU64,
    default_ttl: Duration,
    not_found_ttl: Duration,
    max_entries: usize,
}

impl ProviderCache {
    pub fn new(default_ttl: Duration, not_found_ttl: Duration, max_entries: usize) -> Self {
        Self {
            cache: DashMap::new(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            cleanups: AtomicU64::new(0),
            default_ttl,
            not_found_ttl,
            max_entries: max_entries.max(1),
        }
    }

    /// Empty results expire faster so new shows appear quickly.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self::new(ttl, ttl / 2, 200)
    }

    /// Normalized key: trimmed, lowercased, prefixed by namespace
    fn generate_cache_key(namespace: &str, query: &str) -> String {
        let trimmed = query.trim();
        let mut result = String::with_capacity(namespace.len() + 1 + trimmed.len());
        result.push_str(namespace);
        result.push(':');
        for ch in trimmed.chars() {
            result.extend(ch.to_lowercase());
        }
        result
    }

    pub fn get(&self, namespace: &str, query: &str) -> Option<Arc<Vec<Show>>> {
        let key = Self::generate_cache_key(namespace, query);

        if let Some(entry) = self.cache.get(&key) {
            if !entry.is_expired() {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!("Cache hit for key: {}", key);
                return Some(entry.data.clone());
            }
        }

        if self.cache.remove_if(&key, |_, entry| entry.is_expired()).is_some() {
            self.cleanups.fetch_add(1, Ordering::Relaxed);
            debug!("Removed expired cache entry for key: {}", key);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!("Cache miss for key: {}", key);
        None
    }

    pub fn insert(&self, namespace: &str, query: &str, results: Vec<Show>) {
        if self.cache.len() >= self.max_entries {
            self.purge_expired();
        }
        if self.cache.len() >= self.max_entries {
            self.evict_oldest_entries();
        }

        let key = Self::generate_cache_key(namespace, query);
        let ttl = if results.is_empty() {
            self.not_found_ttl
        } else {
            self.default_ttl
        };

        debug!("Cached {} results for key: {} with TTL: {:?}", results.len(), key, ttl);
        self.cache.insert(key, CacheEntry::new(results, ttl));
    }

    /// Drop every expired entry, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let before = self.cache.len();
        self.cache.retain(|_, entry| !entry.is_expired());
        let removed = before.saturating_sub(self.cache.len());
        if removed > 0 {
            self.cleanups.fetch_add(removed as u64, Ordering::Relaxed);
            debug!("Cleaned up {} expired cache entries", removed);
        }
        removed
    }

    /// Evict oldest entries down to 90% of capacity
    fn evict_oldest_entries(&self) {
        let current_size = self.cache.len();
        let mut entries: Vec<(String, Instant)> = self
            .cache
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().created_at))
            .collect();
        entries.sort_by_key(|(_, created_at)| *created_at);

        let target_size = (self.max_entries * 9) / 10;
        let to_evict = current_size.saturating_sub(target_size).max(1);

        for (key, _) in entries.into_iter().take(to_evict) {
            self.cache.remove(&key);
        }

        debug!(
            "Evicted {} old cache entries (was {}, now {})",
            to_evict,
            current_size,
            self.cache.len()
        );
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries_count: self.cache.len(),
            expired_cleanups: self.cleanups.load(Ordering::Relaxed),
        }
    }

    pub fn clear(&self) {
        self.cache.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.cleanups.store(0, Ordering::Relaxed);
        info!("Cache cleared");
    }
}

impl Default for ProviderCache {
    /// 5 minute TTL, 200 entries
    fn default() -> Self {
        Self::with_ttl(Duration::from_secs(300))
    }
}
