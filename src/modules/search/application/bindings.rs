//! Capability interface between the controller and whatever dispatches UI
//! events. The presentation layer implements [`UiBindings`]; the controller
//! registers one handler per event kind and unregisters them all on
//! teardown.

use std::sync::Arc;

use crate::modules::preferences::ViewMode;
use crate::modules::search::domain::filter_state::FilterState;
use crate::modules::show::ShowId;
use crate::shared::errors::AppResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiEventKind {
    Input,
    CategoryClick,
    HistorySelect,
    FilterChange,
    FavoriteToggle,
    ViewModeChange,
    Retry,
}

impl UiEventKind {
    pub const ALL: [UiEventKind; 7] = [
        UiEventKind::Input,
        UiEventKind::CategoryClick,
        UiEventKind::HistorySelect,
        UiEventKind::FilterChange,
        UiEventKind::FavoriteToggle,
        UiEventKind::ViewModeChange,
        UiEventKind::Retry,
    ];
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Input(String),
    CategoryClick(String),
    HistorySelect(String),
    FilterChange(FilterState),
    FavoriteToggle(ShowId),
    ViewModeChange(ViewMode),
    Retry,
}

impl UiEvent {
    pub fn kind(&self) -> UiEventKind {
        match self {
            UiEvent::Input(_) => UiEventKind::Input,
            UiEvent::CategoryClick(_) => UiEventKind::CategoryClick,
            UiEvent::HistorySelect(_) => UiEventKind::HistorySelect,
            UiEvent::FilterChange(_) => UiEventKind::FilterChange,
            UiEvent::FavoriteToggle(_) => UiEventKind::FavoriteToggle,
            UiEvent::ViewModeChange(_) => UiEventKind::ViewModeChange,
            UiEvent::Retry => UiEventKind::Retry,
        }
    }
}

pub type EventHandler = Arc<dyn Fn(UiEvent) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

pub trait UiBindings: Send + Sync {
    /// Register `handler` for `kind`. Fails with
    /// [`AppError::InitializationError`](crate::shared::errors::AppError)
    /// when the element backing that event does not exist.
    fn on(&self, kind: UiEventKind, handler: EventHandler) -> AppResult<ListenerId>;

    fn off(&self, id: ListenerId);
}
