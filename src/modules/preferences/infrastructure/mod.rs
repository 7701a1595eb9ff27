pub mod file_store;
pub mod memory_store;

pub use file_store::FilePreferenceStore;
pub use memory_store::InMemoryPreferenceStore;
