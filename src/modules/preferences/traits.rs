use crate::shared::errors::AppResult;

/// Synchronous string-keyed storage for preference blobs. Values are JSON
/// text; encoding is the caller's job.
pub trait PreferenceStore: Send + Sync {
    /// `Ok(None)` when the key has never been written
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> AppResult<()>;
}
