//! Application configuration
//!
//! One explicit [`AppConfig`] value is built at startup and handed to every
//! component that needs it. Values come from `SHOWSCOUT_*` environment
//! variables (optionally via a `.env` file) layered over the defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

/// Hard ceiling on how many shows one search may display
pub const MAX_RESULTS_LIMIT: usize = 50;
/// Hard ceiling on remembered search history entries
pub const HISTORY_CAPACITY_LIMIT: usize = 10;
/// Upper bound for the minimum query length override
pub const MIN_QUERY_CHARS_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the show metadata API, without trailing slash
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Quiet period before a keystroke turns into a search
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_min_query_chars")]
    pub min_query_chars: usize,
    /// Rendering ceiling for a single result set
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
    /// Response cache TTL; zero disables caching
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    /// Upstream allows 20 calls per 10 seconds
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: f64,
    #[serde(default)]
    pub preferences_path: Option<PathBuf>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub analytics_enabled: bool,
    #[serde(default = "default_feature_probe_attempts")]
    pub feature_probe_attempts: u32,
    #[serde(default = "default_feature_probe_interval_ms")]
    pub feature_probe_interval_ms: u64,
}

fn default_api_base_url() -> String { "https://api.tvmaze.com".to_string() }
fn default_user_agent() -> String { "showscout/0.1".to_string() }
fn default_request_timeout_secs() -> u64 { 10 }
fn default_debounce_ms() -> u64 { 300 }
fn default_min_query_chars() -> usize { 2 }
fn default_max_results() -> usize { MAX_RESULTS_LIMIT }
fn default_history_capacity() -> usize { HISTORY_CAPACITY_LIMIT }
fn default_cache_ttl_secs() -> u64 { 300 }
fn default_requests_per_second() -> f64 { 2.0 }
fn default_log_level() -> String { "info".to_string() }
fn default_feature_probe_attempts() -> u32 { 10 }
fn default_feature_probe_interval_ms() -> u64 { 100 }

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            user_agent: default_user_agent(),
            request_timeout_secs: default_request_timeout_secs(),
            debounce_ms: default_debounce_ms(),
            min_query_chars: default_min_query_chars(),
            max_results: default_max_results(),
            history_capacity: default_history_capacity(),
            cache_ttl_secs: default_cache_ttl_secs(),
            requests_per_second: default_requests_per_second(),
            preferences_path: None,
            log_level: default_log_level(),
            analytics_enabled: false,
            feature_probe_attempts: default_feature_probe_attempts(),
            feature_probe_interval_ms: default_feature_probe_interval_ms(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Unparseable values keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("SHOWSCOUT_API_BASE_URL") {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(agent) = lookup("SHOWSCOUT_USER_AGENT") {
            config.user_agent = agent;
        }
        if let Some(level) = lookup("SHOWSCOUT_LOG_LEVEL") {
            config.log_level = level;
        }
        if let Some(path) = lookup("SHOWSCOUT_PREFERENCES_PATH") {
            config.preferences_path = Some(PathBuf::from(path));
        }

        parse_into(&lookup, "SHOWSCOUT_REQUEST_TIMEOUT_SECS", &mut config.request_timeout_secs);
        parse_into(&lookup, "SHOWSCOUT_DEBOUNCE_MS", &mut config.debounce_ms);
        parse_bounded(
            &lookup,
            "SHOWSCOUT_MIN_QUERY_CHARS",
            1,
            MIN_QUERY_CHARS_LIMIT,
            &mut config.min_query_chars,
        );
        parse_bounded(
            &lookup,
            "SHOWSCOUT_MAX_RESULTS",
            1,
            MAX_RESULTS_LIMIT,
            &mut config.max_results,
        );
        parse_bounded(
            &lookup,
            "SHOWSCOUT_HISTORY_CAPACITY",
            1,
            HISTORY_CAPACITY_LIMIT,
            &mut config.history_capacity,
        );
        parse_into(&lookup, "SHOWSCOUT_CACHE_TTL_SECS", &mut config.cache_ttl_secs);
        parse_into(&lookup, "SHOWSCOUT_REQUESTS_PER_SECOND", &mut config.requests_per_second);
        parse_into(&lookup, "SHOWSCOUT_ANALYTICS_ENABLED", &mut config.analytics_enabled);
        parse_into(&lookup, "SHOWSCOUT_FEATURE_PROBE_ATTEMPTS", &mut config.feature_probe_attempts);
        parse_into(&lookup, "SHOWSCOUT_FEATURE_PROBE_INTERVAL_MS", &mut config.feature_probe_interval_ms);

        config
    }

    /// Pull the search limits back inside their hard bounds.
    pub fn bounded(mut self) -> Self {
        self.min_query_chars = self.min_query_chars.clamp(1, MIN_QUERY_CHARS_LIMIT);
        self.max_results = self.max_results.clamp(1, MAX_RESULTS_LIMIT);
        self.history_capacity = self.history_capacity.clamp(1, HISTORY_CAPACITY_LIMIT);
        self
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn feature_probe_interval(&self) -> Duration {
        Duration::from_millis(self.feature_probe_interval_ms)
    }
}

fn parse_into<F, T>(lookup: &F, key: &str, target: &mut T)
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    if let Some(raw) = lookup(key) {
        match raw.trim().parse::<T>() {
            Ok(value) => *target = value,
            Err(_) => warn!("Ignoring invalid value '{}' for {}", raw, key),
        }
    }
}

/// Like [`parse_into`], but values outside `min..=max` are clamped into range.
fn parse_bounded<F>(lookup: &F, key: &str, min: usize, max: usize, target: &mut usize)
where
    F: Fn(&str) -> Option<String>,
{
    let mut value = *target;
    parse_into(lookup, key, &mut value);
    let clamped = value.clamp(min, max);
    if clamped != value {
        warn!("Value {} for {} is outside {}..={}, using {}", value, key, min, max, clamped);
    }
    *target = clamped;
}
