pub mod app_config;
pub mod feature_flags;

pub use app_config::AppConfig;
pub use feature_flags::{resolve_feature, DisabledReason, FeatureState};
