pub mod preferences;
pub mod provider;
pub mod search;
pub mod show;
