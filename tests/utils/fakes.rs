/// Hand-written collaborators for driving the search controller in tests
use async_trait::async_trait;
use showscout_lib::modules::provider::ShowProviderClient;
use showscout_lib::modules::search::{
    EmptyState, ErrorView, EventHandler, ListenerId, Notice, RenderContext, ResultPresenter,
    UiBindings, UiEvent, UiEventKind,
};
use showscout_lib::modules::show::Show;
use showscout_lib::shared::errors::{AppError, AppResult};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone)]
struct Scripted {
    delay: Duration,
    result: AppResult<Vec<Show>>,
}

impl Default for Scripted {
    fn default() -> Self {
        Self {
            delay: Duration::ZERO,
            result: Ok(Vec::new()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCall {
    Search(String),
    Catalog,
}

/// Provider with per-query scripted latency and result. Unscripted queries
/// resolve immediately with no shows.
#[derive(Default)]
pub struct FakeProvider {
    searches: Mutex<HashMap<String, Scripted>>,
    catalog: Mutex<Scripted>,
    calls: Mutex<Vec<ProviderCall>>,
    completed: AtomicUsize,
}

impl FakeProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, query: &str, delay_ms: u64, result: AppResult<Vec<Show>>) {
        self.searches.lock().unwrap().insert(
            query.to_string(),
            Scripted {
                delay: Duration::from_millis(delay_ms),
                result,
            },
        );
    }

    pub fn respond_catalog(&self, delay_ms: u64, result: AppResult<Vec<Show>>) {
        *self.catalog.lock().unwrap() = Scripted {
            delay: Duration::from_millis(delay_ms),
            result,
        };
    }

    pub fn calls(&self) -> Vec<ProviderCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn search_queries(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ProviderCall::Search(query) => Some(query),
                ProviderCall::Catalog => None,
            })
            .collect()
    }

    /// Fetches that ran to completion instead of being dropped
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    async fn play(&self, scripted: Scripted) -> AppResult<Vec<Show>> {
        if !scripted.delay.is_zero() {
            tokio::time::sleep(scripted.delay).await;
        }
        self.completed.fetch_add(1, Ordering::SeqCst);
        scripted.result
    }
}

#[async_trait]
impl ShowProviderClient for FakeProvider {
    fn provider_name(&self) -> &str {
        "fake"
    }

    async fn search_shows(&self, query: &str) -> AppResult<Vec<Show>> {
        self.calls
            .lock()
            .unwrap()
            .push(ProviderCall::Search(query.to_string()));
        let scripted = self
            .searches
            .lock()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_default();
        self.play(scripted).await
    }

    async fn list_all_shows(&self) -> AppResult<Vec<Show>> {
        self.calls.lock().unwrap().push(ProviderCall::Catalog);
        let scripted = self.catalog.lock().unwrap().clone();
        self.play(scripted).await
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Results {
        names: Vec<String>,
        context: RenderContext,
    },
    Empty(EmptyState),
    Error(ErrorView),
    Validation(String),
    CategoryBrowser,
    Notice(Notice),
    Loading(bool),
    History(Vec<String>),
}

#[derive(Default)]
pub struct RecordingPresenter {
    calls: Mutex<Vec<Rendered>>,
}

impl RecordingPresenter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<Rendered> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn last_results(&self) -> Option<Vec<String>> {
        self.calls().into_iter().rev().find_map(|call| match call {
            Rendered::Results { names, .. } => Some(names),
            _ => None,
        })
    }

    pub fn results_renders(&self) -> usize {
        self.count(|call| matches!(call, Rendered::Results { .. }))
    }

    pub fn errors(&self) -> Vec<ErrorView> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Rendered::Error(error) => Some(error),
                _ => None,
            })
            .collect()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Rendered::Notice(notice) => Some(notice),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, predicate: impl Fn(&Rendered) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| predicate(c)).count()
    }

    fn push(&self, call: Rendered) {
        self.calls.lock().unwrap().push(call);
    }
}

impl ResultPresenter for RecordingPresenter {
    fn render_results(&self, shows: &[Show], context: &RenderContext) {
        self.push(Rendered::Results {
            names: shows.iter().map(|s| s.name.clone()).collect(),
            context: context.clone(),
        });
    }

    fn render_empty(&self, state: &EmptyState) {
        self.push(Rendered::Empty(state.clone()));
    }

    fn render_error(&self, error: &ErrorView) {
        self.push(Rendered::Error(error.clone()));
    }

    fn render_validation(&self, message: &str) {
        self.push(Rendered::Validation(message.to_string()));
    }

    fn show_category_browser(&self) {
        self.push(Rendered::CategoryBrowser);
    }

    fn notify(&self, notice: &Notice) {
        self.push(Rendered::Notice(notice.clone()));
    }

    fn set_loading(&self, loading: bool) {
        self.push(Rendered::Loading(loading));
    }

    fn render_history(&self, history: &[String]) {
        self.push(Rendered::History(history.to_vec()));
    }
}

/// Event source with optionally missing elements
#[derive(Default)]
pub struct FakeBindings {
    missing: HashSet<UiEventKind>,
    handlers: Mutex<HashMap<ListenerId, (UiEventKind, EventHandler)>>,
    removed: Mutex<Vec<ListenerId>>,
    next_id: AtomicU64,
}

impl FakeBindings {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn without(missing: &[UiEventKind]) -> Arc<Self> {
        Arc::new(Self {
            missing: missing.iter().copied().collect(),
            ..Self::default()
        })
    }

    /// Deliver `event` to every listener for its kind; returns how many ran
    pub fn dispatch(&self, event: UiEvent) -> usize {
        let kind = event.kind();
        let handlers: Vec<EventHandler> = self
            .handlers
            .lock()
            .unwrap()
            .values()
            .filter(|(k, _)| *k == kind)
            .map(|(_, handler)| Arc::clone(handler))
            .collect();

        for handler in &handlers {
            handler(event.clone());
        }
        handlers.len()
    }

    pub fn listener_count(&self) -> usize {
        self.handlers.lock().unwrap().len()
    }

    pub fn removed(&self) -> Vec<ListenerId> {
        self.removed.lock().unwrap().clone()
    }
}

impl UiBindings for FakeBindings {
    fn on(&self, kind: UiEventKind, handler: EventHandler) -> AppResult<ListenerId> {
        if self.missing.contains(&kind) {
            return Err(AppError::InitializationError(format!(
                "No element for {:?}",
                kind
            )));
        }
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.handlers.lock().unwrap().insert(id, (kind, handler));
        Ok(id)
    }

    fn off(&self, id: ListenerId) {
        self.handlers.lock().unwrap().remove(&id);
        self.removed.lock().unwrap().push(id);
    }
}
