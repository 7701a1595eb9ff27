//! Search controller.
//!
//! Owns the search pipeline: keystrokes are debounced, each accepted query
//! gets a monotonically increasing token, the previous fetch is cancelled
//! when a new one starts, and completions whose token is no longer the
//! latest are dropped. All state sits behind one mutex; presenter calls are
//! collected as [`Effect`]s and applied after the lock is released.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::modules::preferences::{Favorites, PreferenceService, PreferenceStore, ViewMode};
use crate::modules::provider::ShowProviderClient;
use crate::modules::search::application::bindings::{
    EventHandler, ListenerId, UiBindings, UiEvent, UiEventKind,
};
use crate::modules::search::application::presenter::{
    EmptyState, ErrorView, Notice, RenderContext, ResultPresenter,
};
use crate::modules::search::domain::category::filter_by_category;
use crate::modules::search::domain::derivation::{available_facets, derive_view, Facets};
use crate::modules::search::domain::filter_state::{FilterState, SortKey};
use crate::modules::show::{Show, ShowId};
use crate::shared::config::AppConfig;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::{LogContext, Validator};

#[derive(Debug, Clone, PartialEq)]
enum SearchTarget {
    Text(String),
    Category(String),
}

impl SearchTarget {
    fn label(&self) -> &str {
        match self {
            SearchTarget::Text(query) => query,
            SearchTarget::Category(label) => label,
        }
    }
}

struct InFlight {
    token: u64,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

struct ControllerState {
    preferences: PreferenceService,
    filter: FilterState,
    raw_results: Vec<Show>,
    /// Target whose results are currently in `raw_results`
    accepted: Option<SearchTarget>,
    /// Sanitized text of the last text search issued; cleared on failure
    last_issued_query: Option<String>,
    retry_target: Option<SearchTarget>,
    latest_token: u64,
    debounce_generation: u64,
    debounce: Option<JoinHandle<()>>,
    in_flight: Option<InFlight>,
    bindings: Option<Arc<dyn UiBindings>>,
    listeners: Vec<ListenerId>,
}

enum Effect {
    Loading(bool),
    Results(Vec<Show>, RenderContext),
    Empty(EmptyState),
    Error(ErrorView),
    Validation(String),
    CategoryBrowser,
    History(Vec<String>),
    Notice(Notice),
}

struct ControllerInner {
    config: AppConfig,
    provider: Arc<dyn ShowProviderClient>,
    presenter: Arc<dyn ResultPresenter>,
    destroyed: AtomicBool,
    state: Mutex<ControllerState>,
}

/// Cloneable handle to a search session. Every method that starts work
/// spawns onto the current tokio runtime and must be called from within one.
#[derive(Clone)]
pub struct SearchController {
    inner: Arc<ControllerInner>,
}

impl SearchController {
    /// Load persisted preferences and render the initial history. Unreadable
    /// preferences fall back to defaults and surface a storage notice.
    pub fn new(
        config: AppConfig,
        provider: Arc<dyn ShowProviderClient>,
        store: Arc<dyn PreferenceStore>,
        presenter: Arc<dyn ResultPresenter>,
    ) -> Self {
        let config = config.bounded();
        let (preferences, warnings) = PreferenceService::load(store, config.history_capacity);
        let history = preferences.history().entries();

        let inner = Arc::new(ControllerInner {
            config,
            provider,
            presenter,
            destroyed: AtomicBool::new(false),
            state: Mutex::new(ControllerState {
                preferences,
                filter: FilterState::default(),
                raw_results: Vec::new(),
                accepted: None,
                last_issued_query: None,
                retry_target: None,
                latest_token: 0,
                debounce_generation: 0,
                debounce: None,
                in_flight: None,
                bindings: None,
                listeners: Vec::new(),
            }),
        });

        let mut effects: Vec<Effect> = warnings
            .iter()
            .map(|warning| Effect::Notice(Notice::storage(warning)))
            .collect();
        effects.push(Effect::History(history));
        inner.apply(effects);

        info!(
            "Search controller ready (provider: {})",
            inner.provider.provider_name()
        );
        Self { inner }
    }

    /// Register a handler for every UI event kind. Any registration failure
    /// is fatal: listeners registered so far are removed, the error is
    /// rendered once and the controller is torn down.
    pub fn attach(&self, bindings: Arc<dyn UiBindings>) -> AppResult<()> {
        if self.inner.is_destroyed() {
            return Err(AppError::InitializationError(
                "Search controller has been torn down".to_string(),
            ));
        }
        if self.inner.state().bindings.is_some() {
            return Err(AppError::InitializationError(
                "UI bindings are already attached".to_string(),
            ));
        }

        let mut registered = Vec::with_capacity(UiEventKind::ALL.len());
        for kind in UiEventKind::ALL {
            let weak = Arc::downgrade(&self.inner);
            let handler: EventHandler = Arc::new(move |event| {
                if let Some(inner) = weak.upgrade() {
                    inner.handle_event(event);
                }
            });

            match bindings.on(kind, handler) {
                Ok(id) => registered.push(id),
                Err(error) => {
                    for id in registered {
                        bindings.off(id);
                    }
                    let error = match error {
                        AppError::InitializationError(_) => error,
                        other => AppError::InitializationError(other.to_string()),
                    };
                    LogContext::error_with_context(&error, &format!("Binding {:?} failed", kind));
                    self.inner.presenter.render_error(&ErrorView::from(&error));
                    self.inner.destroy();
                    return Err(error);
                }
            }
        }

        debug!("Attached {} UI listeners", registered.len());
        let mut state = self.inner.state();
        state.listeners = registered;
        state.bindings = Some(bindings);
        Ok(())
    }

    /// Raw input value changed. Short input cancels pending work and shows
    /// the category browser; anything else restarts the debounce timer.
    pub fn on_input(&self, value: &str) {
        self.inner.on_input(value);
    }

    /// Search immediately, skipping the debounce and the unchanged-query check
    pub fn submit(&self, query: &str) {
        self.inner.submit(query);
    }

    pub fn search_category(&self, label: &str) {
        self.inner.search_category(label);
    }

    /// Re-issue the last search, whatever its outcome
    pub fn retry(&self) {
        self.inner.retry();
    }

    pub fn set_filter(&self, filter: FilterState) {
        self.inner.set_filter(filter);
    }

    pub fn set_sort(&self, sort: SortKey) {
        let mut filter = self.filter();
        filter.sort = sort;
        self.inner.set_filter(filter);
    }

    /// Toggle a show in the current results, or remove a favorite by id.
    /// Returns whether the show is a favorite afterwards.
    pub fn toggle_favorite(&self, id: &ShowId) -> AppResult<bool> {
        self.inner.toggle_favorite(id)
    }

    pub fn set_view_mode(&self, mode: ViewMode) {
        self.inner.set_view_mode(mode);
    }

    pub fn clear_history(&self) {
        self.inner.clear_history();
    }

    /// Tear everything down. Safe to call more than once.
    pub fn destroy(&self) {
        self.inner.destroy();
    }

    pub fn is_destroyed(&self) -> bool {
        self.inner.is_destroyed()
    }

    /// The filtered and sorted view of the current results
    pub fn displayed(&self) -> Vec<Show> {
        let state = self.inner.state();
        let favorites = state.preferences.favorites().ids();
        derive_view(&state.raw_results, &state.filter, &favorites)
    }

    pub fn raw_results(&self) -> Vec<Show> {
        self.inner.state().raw_results.clone()
    }

    pub fn facets(&self) -> Facets {
        available_facets(&self.inner.state().raw_results)
    }

    pub fn filter(&self) -> FilterState {
        self.inner.state().filter.clone()
    }

    pub fn history(&self) -> Vec<String> {
        self.inner.state().preferences.history().entries()
    }

    pub fn favorites(&self) -> Favorites {
        self.inner.state().preferences.favorites().clone()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.inner.state().preferences.view_mode()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state().in_flight.is_some()
    }
}

impl ControllerInner {
    fn state(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::SeqCst)
    }

    fn handle_event(self: &Arc<Self>, event: UiEvent) {
        if self.is_destroyed() {
            return;
        }
        match event {
            UiEvent::Input(value) => self.on_input(&value),
            UiEvent::CategoryClick(label) => self.search_category(&label),
            UiEvent::HistorySelect(query) => self.submit(&query),
            UiEvent::FilterChange(filter) => self.set_filter(filter),
            UiEvent::FavoriteToggle(id) => {
                if let Err(e) = self.toggle_favorite(&id) {
                    warn!("Ignoring favorite toggle for {}: {}", id, e);
                }
            }
            UiEvent::ViewModeChange(mode) => self.set_view_mode(mode),
            UiEvent::Retry => self.retry(),
        }
    }

    fn on_input(self: &Arc<Self>, value: &str) {
        if self.is_destroyed() {
            return;
        }
        let value = value.trim().to_string();
        let mut state = self.state();
        Self::cancel_debounce(&mut state);

        if !Validator::meets_min_length(&value, self.config.min_query_chars) {
            let mut effects = Vec::new();
            if Self::cancel_in_flight(&mut state) {
                effects.push(Effect::Loading(false));
            }
            // Anything still resolving belongs to a query the user deleted
            state.latest_token += 1;
            state.last_issued_query = None;
            drop(state);

            effects.push(Effect::CategoryBrowser);
            self.apply(effects);
            return;
        }

        let generation = state.debounce_generation;
        let delay = self.config.debounce();
        let weak = Arc::downgrade(self);
        state.debounce = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(inner) = weak.upgrade() {
                inner.fire_debounced(generation, &value);
            }
        }));
    }

    fn fire_debounced(self: &Arc<Self>, generation: u64, value: &str) {
        if self.is_destroyed() {
            return;
        }
        let mut state = self.state();
        // A newer keystroke won the race for the lock
        if generation != state.debounce_generation {
            return;
        }
        state.debounce = None;

        let sanitized = Validator::sanitize_query(value);
        if !sanitized.is_empty() && state.last_issued_query.as_deref() == Some(sanitized.as_str()) {
            debug!("Query '{}' unchanged, not searching again", sanitized);
            return;
        }

        let effects = self.begin_text_search(&mut state, value);
        drop(state);
        self.apply(effects);
    }

    fn submit(self: &Arc<Self>, query: &str) {
        if self.is_destroyed() {
            return;
        }
        let mut state = self.state();
        Self::cancel_debounce(&mut state);
        let effects = self.begin_text_search(&mut state, query);
        drop(state);
        self.apply(effects);
    }

    fn search_category(self: &Arc<Self>, label: &str) {
        if self.is_destroyed() {
            return;
        }
        let mut state = self.state();
        Self::cancel_debounce(&mut state);
        let effects = self.begin_category_search(&mut state, label);
        drop(state);
        self.apply(effects);
    }

    fn retry(self: &Arc<Self>) {
        if self.is_destroyed() {
            return;
        }
        let mut state = self.state();
        let Some(target) = state.retry_target.clone() else {
            debug!("Nothing to retry");
            return;
        };
        Self::cancel_debounce(&mut state);
        info!("Retrying '{}'", target.label());

        let effects = match target {
            SearchTarget::Text(query) => self.begin_text_search(&mut state, &query),
            SearchTarget::Category(label) => self.begin_category_search(&mut state, &label),
        };
        drop(state);
        self.apply(effects);
    }

    /// Cancel, sanitize, record in history and fetch
    fn begin_text_search(self: &Arc<Self>, state: &mut ControllerState, raw: &str) -> Vec<Effect> {
        let mut effects = Vec::new();
        let cancelled = Self::cancel_in_flight(state);

        let query = match Validator::validate_query(raw, self.config.min_query_chars) {
            Ok(query) => query,
            Err(error) => {
                state.latest_token += 1;
                state.last_issued_query = None;
                if cancelled {
                    effects.push(Effect::Loading(false));
                }
                effects.push(Effect::Validation(validation_message(&error)));
                return effects;
            }
        };

        // History is written before the fetch so failed searches are kept
        if let Err(e) = state.preferences.record_search(&query) {
            effects.push(Effect::Notice(Notice::storage(&e)));
        }
        effects.push(Effect::History(state.preferences.history().entries()));

        state.last_issued_query = Some(query.clone());
        effects.push(self.spawn_fetch(state, SearchTarget::Text(query)));
        effects
    }

    fn begin_category_search(
        self: &Arc<Self>,
        state: &mut ControllerState,
        label: &str,
    ) -> Vec<Effect> {
        let cancelled = Self::cancel_in_flight(state);
        state.last_issued_query = None;

        let label = label.trim();
        if label.is_empty() {
            state.latest_token += 1;
            let mut effects = Vec::new();
            if cancelled {
                effects.push(Effect::Loading(false));
            }
            effects.push(Effect::Validation("Pick a category to browse".to_string()));
            return effects;
        }

        vec![self.spawn_fetch(state, SearchTarget::Category(label.to_string()))]
    }

    fn spawn_fetch(self: &Arc<Self>, state: &mut ControllerState, target: SearchTarget) -> Effect {
        state.latest_token += 1;
        let token = state.latest_token;
        state.retry_target = Some(target.clone());
        LogContext::search_operation(target.label(), Some(token), None);

        let cancel = CancellationToken::new();
        let cancelled = cancel.clone();
        let provider = Arc::clone(&self.provider);
        let weak = Arc::downgrade(self);

        let handle = tokio::spawn(async move {
            let outcome = tokio::select! {
                _ = cancelled.cancelled() => Err(AppError::Cancelled),
                result = fetch(provider.as_ref(), &target) => result,
            };
            if let Some(inner) = weak.upgrade() {
                inner.complete(token, target, outcome);
            }
        });

        state.in_flight = Some(InFlight {
            token,
            cancel,
            handle,
        });
        Effect::Loading(true)
    }

    fn complete(self: &Arc<Self>, token: u64, target: SearchTarget, outcome: AppResult<Vec<Show>>) {
        if self.is_destroyed() {
            return;
        }
        let mut state = self.state();
        if token != state.latest_token {
            debug!(
                "Discarding stale result for '{}' (#{}, latest #{})",
                target.label(),
                token,
                state.latest_token
            );
            return;
        }
        if state.in_flight.as_ref().is_some_and(|f| f.token == token) {
            state.in_flight = None;
        }

        let effects = match outcome {
            Err(error) if error.is_cancellation() => {
                debug!("Search #{} for '{}' cancelled", token, target.label());
                Vec::new()
            }
            Err(error) => {
                LogContext::error_with_context(
                    &error,
                    &format!("Search for '{}' failed", target.label()),
                );
                // Retyping the same text should reach the network again
                state.last_issued_query = None;
                vec![Effect::Loading(false), Effect::Error(ErrorView::from(&error))]
            }
            Ok(shows) => match target {
                SearchTarget::Category(label) if shows.is_empty() => {
                    info!("No shows on '{}', searching by name instead", label);
                    self.begin_text_search(&mut state, &label)
                }
                target => self.accept(&mut state, token, target, shows),
            },
        };

        drop(state);
        self.apply(effects);
    }

    fn accept(
        &self,
        state: &mut ControllerState,
        token: u64,
        target: SearchTarget,
        mut shows: Vec<Show>,
    ) -> Vec<Effect> {
        if shows.len() > self.config.max_results {
            debug!(
                "Clamping {} results for '{}' to {}",
                shows.len(),
                target.label(),
                self.config.max_results
            );
            shows.truncate(self.config.max_results);
        }
        LogContext::search_operation(target.label(), Some(token), Some(shows.len()));

        state.raw_results = shows;
        state.accepted = Some(target);
        vec![Effect::Loading(false), Self::render_current(state)]
    }

    fn set_filter(&self, filter: FilterState) {
        if self.is_destroyed() {
            return;
        }
        let mut state = self.state();
        state.filter = filter.normalized();
        let effect = Self::render_current(&state);
        drop(state);
        self.apply(vec![effect]);
    }

    fn toggle_favorite(&self, id: &ShowId) -> AppResult<bool> {
        if self.is_destroyed() {
            return Err(AppError::InitializationError(
                "Search controller has been torn down".to_string(),
            ));
        }
        let mut state = self.state();
        let show = state.raw_results.iter().find(|show| &show.id == id).cloned();

        let (now_favorite, persisted) = match show {
            Some(show) => state.preferences.toggle_favorite(&show),
            None => {
                let (removed, persisted) = state.preferences.remove_favorite(id);
                if !removed {
                    return Err(AppError::NotFound(format!(
                        "Show {} is not in the current results",
                        id
                    )));
                }
                (false, persisted)
            }
        };
        debug!("Show {} favorite: {}", id, now_favorite);

        let mut effects = Vec::new();
        if let Err(e) = persisted {
            effects.push(Effect::Notice(Notice::storage(&e)));
        }
        effects.push(Self::render_current(&state));
        drop(state);

        self.apply(effects);
        Ok(now_favorite)
    }

    fn set_view_mode(&self, mode: ViewMode) {
        if self.is_destroyed() {
            return;
        }
        let mut state = self.state();
        let mut effects = Vec::new();
        if let Err(e) = state.preferences.set_view_mode(mode) {
            effects.push(Effect::Notice(Notice::storage(&e)));
        }
        effects.push(Self::render_current(&state));
        drop(state);
        self.apply(effects);
    }

    fn clear_history(&self) {
        if self.is_destroyed() {
            return;
        }
        let mut state = self.state();
        let mut effects = Vec::new();
        if let Err(e) = state.preferences.clear_history() {
            effects.push(Effect::Notice(Notice::storage(&e)));
        }
        effects.push(Effect::History(Vec::new()));
        drop(state);
        self.apply(effects);
    }

    fn destroy(&self) {
        if self.destroyed.swap(true, Ordering::SeqCst) {
            return;
        }
        let mut state = self.state();
        Self::cancel_debounce(&mut state);
        if let Some(in_flight) = state.in_flight.take() {
            in_flight.cancel.cancel();
            in_flight.handle.abort();
        }
        let listeners = std::mem::take(&mut state.listeners);
        let bindings = state.bindings.take();
        drop(state);

        if let Some(bindings) = bindings {
            for id in listeners {
                bindings.off(id);
            }
        }
        info!("Search controller torn down");
    }

    fn cancel_debounce(state: &mut ControllerState) {
        state.debounce_generation += 1;
        if let Some(timer) = state.debounce.take() {
            timer.abort();
        }
    }

    fn cancel_in_flight(state: &mut ControllerState) -> bool {
        match state.in_flight.take() {
            Some(in_flight) => {
                debug!("Cancelling search #{}", in_flight.token);
                in_flight.cancel.cancel();
                true
            }
            None => false,
        }
    }

    fn render_current(state: &ControllerState) -> Effect {
        let query = state.accepted.as_ref().map(|t| t.label().to_string());
        if state.raw_results.is_empty() {
            return Effect::Empty(match query {
                Some(query) => EmptyState::NoMatches { query },
                None => EmptyState::NoQuery,
            });
        }

        let favorites = state.preferences.favorites().ids();
        let view = derive_view(&state.raw_results, &state.filter, &favorites);
        if view.is_empty() {
            return Effect::Empty(EmptyState::FilteredOut {
                query,
                hidden: state.raw_results.len(),
            });
        }

        let context = RenderContext {
            view_mode: state.preferences.view_mode(),
            favorites,
            total_results: state.raw_results.len(),
            query,
            facets: available_facets(&state.raw_results),
        };
        Effect::Results(view, context)
    }

    fn apply(&self, effects: Vec<Effect>) {
        for effect in effects {
            if self.is_destroyed() {
                return;
            }
            match effect {
                Effect::Loading(loading) => self.presenter.set_loading(loading),
                Effect::Results(shows, context) => self.presenter.render_results(&shows, &context),
                Effect::Empty(empty) => self.presenter.render_empty(&empty),
                Effect::Error(error) => self.presenter.render_error(&error),
                Effect::Validation(message) => self.presenter.render_validation(&message),
                Effect::CategoryBrowser => self.presenter.show_category_browser(),
                Effect::History(history) => self.presenter.render_history(&history),
                Effect::Notice(notice) => self.presenter.notify(&notice),
            }
        }
    }
}

async fn fetch(provider: &dyn ShowProviderClient, target: &SearchTarget) -> AppResult<Vec<Show>> {
    match target {
        SearchTarget::Text(query) => provider.search_shows(query).await,
        SearchTarget::Category(label) => {
            let catalog = provider.list_all_shows().await?;
            Ok(filter_by_category(&catalog, label))
        }
    }
}

fn validation_message(error: &AppError) -> String {
    match error {
        AppError::ValidationError(message) => message.clone(),
        other => other.user_message().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::preferences::InMemoryPreferenceStore;
    use async_trait::async_trait;

    struct StaticProvider;

    #[async_trait]
    impl ShowProviderClient for StaticProvider {
        fn provider_name(&self) -> &str {
            "static"
        }

        async fn search_shows(&self, query: &str) -> AppResult<Vec<Show>> {
            Ok(vec![Show::new(1u64, query)])
        }

        async fn list_all_shows(&self) -> AppResult<Vec<Show>> {
            Ok(Vec::new())
        }
    }

    #[derive(Default)]
    struct CountingPresenter {
        results: Mutex<Vec<Vec<String>>>,
    }

    impl ResultPresenter for CountingPresenter {
        fn render_results(&self, shows: &[Show], _context: &RenderContext) {
            let names = shows.iter().map(|s| s.name.clone()).collect();
            self.results.lock().unwrap().push(names);
        }
        fn render_empty(&self, _state: &EmptyState) {}
        fn render_error(&self, _error: &ErrorView) {}
        fn render_validation(&self, _message: &str) {}
        fn show_category_browser(&self) {}
        fn notify(&self, _notice: &Notice) {}
    }

    fn controller(presenter: Arc<CountingPresenter>) -> SearchController {
        SearchController::new(
            AppConfig::default(),
            Arc::new(StaticProvider),
            Arc::new(InMemoryPreferenceStore::new()),
            presenter,
        )
    }

    #[tokio::test]
    async fn test_completion_with_superseded_token_is_dropped() {
        let presenter = Arc::new(CountingPresenter::default());
        let controller = controller(presenter.clone());

        controller.inner.state().latest_token = 7;
        controller.inner.complete(
            6,
            SearchTarget::Text("old".to_string()),
            Ok(vec![Show::new(1u64, "Old")]),
        );
        assert!(controller.raw_results().is_empty());

        controller.inner.complete(
            7,
            SearchTarget::Text("new".to_string()),
            Ok(vec![Show::new(2u64, "New")]),
        );
        assert_eq!(presenter.results.lock().unwrap().clone(), vec![vec!["New".to_string()]]);
    }

    #[tokio::test]
    async fn test_destroy_twice_is_harmless() {
        let controller = controller(Arc::new(CountingPresenter::default()));
        controller.destroy();
        controller.destroy();
        assert!(controller.is_destroyed());

        controller.on_input("batman");
        assert!(controller.inner.state().debounce.is_none());
    }

    #[tokio::test]
    async fn test_results_are_clamped_to_max() {
        let controller = controller(Arc::new(CountingPresenter::default()));
        let token = controller.inner.state().latest_token;
        let many: Vec<Show> = (0..80u64).map(|i| Show::new(i, format!("Show {}", i))).collect();

        controller
            .inner
            .complete(token, SearchTarget::Category("HBO".to_string()), Ok(many));
        assert_eq!(controller.raw_results().len(), 50);
    }
}
