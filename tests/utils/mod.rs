#![allow(dead_code)]

pub mod factories;
pub mod fakes;

use showscout_lib::modules::preferences::{InMemoryPreferenceStore, PreferenceStore};
use showscout_lib::modules::search::SearchController;
use showscout_lib::shared::config::AppConfig;
use std::sync::Arc;
use std::time::Duration;

use fakes::{FakeProvider, RecordingPresenter};

/// Default config, in-memory preferences
pub fn build_controller(
    provider: Arc<FakeProvider>,
    presenter: Arc<RecordingPresenter>,
) -> SearchController {
    build_controller_with_store(provider, presenter, Arc::new(InMemoryPreferenceStore::new()))
}

pub fn build_controller_with_store(
    provider: Arc<FakeProvider>,
    presenter: Arc<RecordingPresenter>,
    store: Arc<dyn PreferenceStore>,
) -> SearchController {
    SearchController::new(AppConfig::default(), provider, store, presenter)
}

/// Let spawned tasks run to their next await point
pub async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

/// Advance the paused clock and let timers fire
pub async fn advance(millis: u64) {
    tokio::time::sleep(Duration::from_millis(millis)).await;
    settle().await;
}
