use crate::modules::preferences::traits::PreferenceStore;
use crate::shared::errors::AppResult;
use dashmap::DashMap;

/// Process-local store. Used when no persistent location is configured.
#[derive(Debug, Default)]
pub struct InMemoryPreferenceStore {
    values: DashMap<String, String>,
}

impl InMemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PreferenceStore for InMemoryPreferenceStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.values.get(key).map(|value| value.clone()))
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_none() {
        let store = InMemoryPreferenceStore::new();
        assert_eq!(store.get("nothing").unwrap(), None);
    }

    #[test]
    fn test_set_overwrites() {
        let store = InMemoryPreferenceStore::new();
        store.set("view_mode", "\"grid\"").unwrap();
        store.set("view_mode", "\"list\"").unwrap();
        assert_eq!(store.get("view_mode").unwrap().as_deref(), Some("\"list\""));
        assert_eq!(store.len(), 1);
    }
}
