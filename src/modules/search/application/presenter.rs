use std::collections::HashSet;

use crate::modules::preferences::ViewMode;
use crate::modules::search::domain::derivation::Facets;
use crate::modules::show::{Show, ShowId};
use crate::shared::errors::{AppError, FailureCategory};

/// Everything a result list needs besides the shows themselves
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    pub view_mode: ViewMode,
    pub favorites: HashSet<ShowId>,
    /// Size of the raw set before filtering
    pub total_results: usize,
    pub query: Option<String>,
    pub facets: Facets,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyState {
    /// Nothing searched yet
    NoQuery,
    /// The search itself came back empty
    NoMatches { query: String },
    /// Results exist but the active filters hide all of them
    FilteredOut { query: Option<String>, hidden: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ErrorView {
    pub category: FailureCategory,
    pub message: String,
    pub retryable: bool,
}

impl From<&AppError> for ErrorView {
    fn from(error: &AppError) -> Self {
        let category = error.category();
        Self {
            category,
            message: category.user_message().to_string(),
            retryable: category.is_retryable(),
        }
    }
}

/// Transient, non-blocking messages
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    StorageUnavailable { message: String },
}

impl Notice {
    pub fn storage(error: &AppError) -> Self {
        tracing::debug!("Storage notice for: {}", error);
        Notice::StorageUnavailable {
            message: FailureCategory::Storage.user_message().to_string(),
        }
    }
}

/// Rendering boundary implemented by the presentation layer. Calls are made
/// without any controller lock held, so implementations may call back into
/// the controller.
pub trait ResultPresenter: Send + Sync {
    fn render_results(&self, shows: &[Show], context: &RenderContext);

    fn render_empty(&self, state: &EmptyState);

    /// Retry-capable error state
    fn render_error(&self, error: &ErrorView);

    /// Lightweight inline message for rejected input
    fn render_validation(&self, message: &str);

    fn show_category_browser(&self);

    fn notify(&self, notice: &Notice);

    fn set_loading(&self, _loading: bool) {}

    fn render_history(&self, _history: &[String]) {}
}
