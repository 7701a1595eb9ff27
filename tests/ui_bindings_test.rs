//! Attaching to, driving and detaching from the UI event source

mod utils;

use showscout_lib::modules::preferences::ViewMode;
use showscout_lib::modules::search::{FilterState, SortKey, UiEvent, UiEventKind};
use showscout_lib::modules::show::ShowId;
use showscout_lib::shared::errors::{AppError, FailureCategory};
use tokio_test::{assert_err, assert_ok};
use utils::factories::ShowFactory;
use utils::fakes::{FakeBindings, FakeProvider, RecordingPresenter, Rendered};
use utils::{advance, build_controller, settle};

#[tokio::test(start_paused = true)]
async fn attach_registers_one_listener_per_event_kind() {
    let bindings = FakeBindings::new();
    let controller = build_controller(FakeProvider::new(), RecordingPresenter::new());

    assert_ok!(controller.attach(bindings.clone()));

    assert_eq!(bindings.listener_count(), UiEventKind::ALL.len());
}

#[tokio::test(start_paused = true)]
async fn events_drive_the_controller() {
    let provider = FakeProvider::new();
    provider.respond(
        "westworld",
        0,
        Ok(vec![
            ShowFactory::named(1, "Westworld").with_rating(8.0).build(),
            ShowFactory::named(2, "Westworld Extras").with_rating(9.0).build(),
        ]),
    );
    let presenter = RecordingPresenter::new();
    let bindings = FakeBindings::new();
    let controller = build_controller(provider.clone(), presenter.clone());
    assert_ok!(controller.attach(bindings.clone()));

    assert_eq!(bindings.dispatch(UiEvent::Input("westworld".to_string())), 1);
    advance(300).await;
    assert_eq!(provider.search_queries(), vec!["westworld"]);

    bindings.dispatch(UiEvent::FilterChange(FilterState {
        sort: SortKey::RatingDesc,
        ..FilterState::default()
    }));
    assert_eq!(
        presenter.last_results(),
        Some(vec!["Westworld Extras".to_string(), "Westworld".to_string()])
    );

    bindings.dispatch(UiEvent::FavoriteToggle(ShowId::from(1u64)));
    assert!(controller.favorites().contains(&ShowId::from(1u64)));

    bindings.dispatch(UiEvent::ViewModeChange(ViewMode::List));
    assert_eq!(controller.view_mode(), ViewMode::List);

    bindings.dispatch(UiEvent::HistorySelect("westworld".to_string()));
    settle().await;
    assert_eq!(provider.search_queries(), vec!["westworld", "westworld"]);
}

#[tokio::test(start_paused = true)]
async fn missing_element_is_fatal() {
    let provider = FakeProvider::new();
    let presenter = RecordingPresenter::new();
    let bindings = FakeBindings::without(&[UiEventKind::Retry]);
    let controller = build_controller(provider.clone(), presenter.clone());

    let error = assert_err!(controller.attach(bindings.clone()));

    assert!(matches!(error, AppError::InitializationError(_)));
    assert!(controller.is_destroyed());
    assert_eq!(bindings.listener_count(), 0, "Partial registrations are undone");

    let errors = presenter.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].category, FailureCategory::Initialization);
    assert!(!errors[0].retryable);

    controller.on_input("batman");
    advance(1_000).await;
    assert!(provider.calls().is_empty(), "No degraded operation after failure");
}

#[tokio::test(start_paused = true)]
async fn attaching_twice_is_rejected() {
    let controller = build_controller(FakeProvider::new(), RecordingPresenter::new());
    assert_ok!(controller.attach(FakeBindings::new()));

    let second = FakeBindings::new();
    assert_err!(controller.attach(second.clone()));
    assert_eq!(second.listener_count(), 0);
    assert!(!controller.is_destroyed());
}

#[tokio::test(start_paused = true)]
async fn destroy_detaches_every_listener_exactly_once() {
    let bindings = FakeBindings::new();
    let controller = build_controller(FakeProvider::new(), RecordingPresenter::new());
    assert_ok!(controller.attach(bindings.clone()));

    controller.destroy();
    controller.destroy();

    assert_eq!(bindings.listener_count(), 0);
    assert_eq!(bindings.removed().len(), UiEventKind::ALL.len());
}

#[tokio::test(start_paused = true)]
async fn nothing_renders_after_destroy() {
    let provider = FakeProvider::new();
    provider.respond("bat", 500, Ok(vec![ShowFactory::named(1, "Batman").build()]));
    let presenter = RecordingPresenter::new();
    let controller = build_controller(provider.clone(), presenter.clone());

    controller.on_input("bat");
    advance(300).await;
    assert_eq!(provider.search_queries(), vec!["bat"]);

    presenter.clear();
    controller.destroy();
    advance(2_000).await;

    assert!(presenter.calls().is_empty());
    assert_eq!(provider.completed(), 0);
}

#[tokio::test(start_paused = true)]
async fn pending_debounce_never_fires_after_destroy() {
    let provider = FakeProvider::new();
    let controller = build_controller(provider.clone(), RecordingPresenter::new());

    controller.on_input("bat");
    advance(100).await;
    controller.destroy();
    advance(1_000).await;

    assert!(provider.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn handlers_outliving_the_controller_do_nothing() {
    let provider = FakeProvider::new();
    let presenter = RecordingPresenter::new();
    let bindings = FakeBindings::new();
    let controller = build_controller(provider.clone(), presenter.clone());
    assert_ok!(controller.attach(bindings.clone()));
    drop(controller);

    presenter.clear();
    bindings.dispatch(UiEvent::Input("batman".to_string()));
    bindings.dispatch(UiEvent::Retry);
    advance(1_000).await;

    assert!(provider.calls().is_empty());
    assert!(presenter.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn retry_event_after_failure_searches_again() {
    let provider = FakeProvider::new();
    provider.respond(
        "bat",
        0,
        Err(AppError::Timeout("deadline".to_string())),
    );
    let presenter = RecordingPresenter::new();
    let bindings = FakeBindings::new();
    let controller = build_controller(provider.clone(), presenter.clone());
    assert_ok!(controller.attach(bindings.clone()));

    bindings.dispatch(UiEvent::Input("bat".to_string()));
    advance(300).await;
    bindings.dispatch(UiEvent::Retry);
    settle().await;

    assert_eq!(provider.search_queries(), vec!["bat", "bat"]);
    assert_eq!(presenter.count(|c| matches!(c, Rendered::Error(_))), 2);
}
