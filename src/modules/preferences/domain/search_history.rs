use std::collections::VecDeque;

pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Most-recent-first list of past queries with no duplicates.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHistory {
    entries: VecDeque<String>,
    capacity: usize,
}

impl SearchHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Rebuild from persisted entries, dropping duplicates and anything
    /// past capacity.
    pub fn from_entries(entries: Vec<String>, capacity: usize) -> Self {
        let mut history = Self::new(capacity);
        for entry in entries {
            if history.entries.len() >= history.capacity {
                break;
            }
            if !entry.is_empty() && !history.entries.contains(&entry) {
                history.entries.push_back(entry);
            }
        }
        history
    }

    /// Move `query` to the front, inserting it if new. Returns false for
    /// empty queries, which are never recorded.
    pub fn record(&mut self, query: &str) -> bool {
        if query.is_empty() {
            return false;
        }

        self.entries.retain(|existing| existing != query);
        self.entries.push_front(query.to_string());
        self.entries.truncate(self.capacity);
        true
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    pub fn most_recent(&self) -> Option<&str> {
        self.entries.front().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for SearchHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}
