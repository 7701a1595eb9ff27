pub mod application;
pub mod domain;

pub use application::{
    bindings::{EventHandler, ListenerId, UiBindings, UiEvent, UiEventKind},
    controller::SearchController,
    presenter::{EmptyState, ErrorView, Notice, RenderContext, ResultPresenter},
};
pub use domain::{
    category::{filter_by_category, matches_category},
    derivation::{available_facets, derive_view, Facets},
    filter_state::{FilterState, SortKey},
};
