pub mod modules;
pub mod shared;

use std::future::Future;
use std::sync::Arc;

use modules::preferences::{FilePreferenceStore, InMemoryPreferenceStore, PreferenceStore};
use modules::provider::{ShowProviderClient, TvMazeClient};
use modules::search::{ResultPresenter, SearchController, UiBindings};
use shared::config::{resolve_feature, AppConfig, FeatureState};
use shared::errors::AppResult;
use shared::utils::init_logger;

/// A running search session and the optional integrations resolved for it
pub struct App<A> {
    pub config: AppConfig,
    pub controller: SearchController,
    pub analytics: FeatureState<A>,
}

/// JSON file store when a path is configured, memory otherwise. A corrupt
/// file is reset rather than blocking startup.
pub fn preference_store(config: &AppConfig) -> Arc<dyn PreferenceStore> {
    match &config.preferences_path {
        Some(path) => Arc::new(FilePreferenceStore::open_or_reset(path.clone())),
        None => {
            log::info!("No preferences path configured, preferences last for this session only");
            Arc::new(InMemoryPreferenceStore::new())
        }
    }
}

/// Start a session against the TVMaze API.
///
/// Initializes logging, builds the provider and preference store, attaches
/// the controller to `bindings` and resolves the analytics integration with
/// a bounded number of probes. Fails only when the UI bindings cannot be
/// attached.
pub async fn start<A, F, Fut>(
    config: AppConfig,
    presenter: Arc<dyn ResultPresenter>,
    bindings: Arc<dyn UiBindings>,
    analytics_probe: F,
) -> AppResult<App<A>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Option<A>>,
{
    init_logger(&config.log_level);

    let provider: Arc<dyn ShowProviderClient> = Arc::new(TvMazeClient::new(&config)?);
    start_with_provider(config, provider, presenter, bindings, analytics_probe).await
}

/// [`start`] with an explicit provider
pub async fn start_with_provider<A, F, Fut>(
    config: AppConfig,
    provider: Arc<dyn ShowProviderClient>,
    presenter: Arc<dyn ResultPresenter>,
    bindings: Arc<dyn UiBindings>,
    analytics_probe: F,
) -> AppResult<App<A>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Option<A>>,
{
    let store = preference_store(&config);
    let controller = SearchController::new(config.clone(), provider, store, presenter);
    controller.attach(bindings)?;

    let analytics = resolve_feature(
        "analytics",
        config.analytics_enabled,
        config.feature_probe_attempts,
        config.feature_probe_interval(),
        analytics_probe,
    )
    .await;

    log::info!(
        "Session started (analytics {})",
        if analytics.is_enabled() { "on" } else { "off" }
    );

    Ok(App {
        config,
        controller,
        analytics,
    })
}
