use std::time::Duration;

use picker_engine::{
    ColorPickerViewModel, KeyValueStore, PickerSettings, RepositoryError, StaticColorRepository,
};
use pretty_assertions::assert_eq;

mod common;
use common::{blue, is_saving, red, wait_until, Harness, Navigation};

async fn open_loaded(harness: &Harness, initial: u64) -> ColorPickerViewModel {
    let view_model =
        ColorPickerViewModel::open(harness.deps(), PickerSettings::default(), initial);
    let mut views = view_model.subscribe();
    views
        .wait_for(|view| view.content.is_success())
        .await
        .expect("actor alive");
    view_model
}

#[tokio::test(start_paused = true)]
async fn loads_colors_and_titles_the_selection() {
    common::init_logging();
    let harness = Harness::new();
    let view_model = ColorPickerViewModel::open(harness.deps(), PickerSettings::default(), 1);
    assert!(view_model.current().content.is_loading());
    assert_eq!(view_model.current().screen_title, "Change color");

    let mut views = view_model.subscribe();
    let view = views
        .wait_for(|view| view.content.is_success())
        .await
        .expect("actor alive")
        .clone();

    let content = view.content.as_success().expect("loaded");
    assert!(content.colors_list[0].selected);
    assert!(!content.colors_list[1].selected);
    assert_eq!(view.screen_title, "Change color: Red");
    assert_eq!(harness.repository.load_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn title_follows_selection_and_selection_is_persisted() {
    common::init_logging();
    let harness = Harness::new();
    let view_model = open_loaded(&harness, 1).await;

    view_model.select(blue());
    let mut views = view_model.subscribe();
    views
        .wait_for(|view| view.screen_title == "Change color: Blue")
        .await
        .expect("actor alive");
    assert_eq!(harness.store.get_u64("selected_color_id"), Some(2));
    view_model.close().await;

    // A new screen starts from the persisted id, not the supplied default.
    let reopened = open_loaded(&harness, 1).await;
    assert_eq!(reopened.current().screen_title, "Change color: Blue");
}

#[tokio::test(start_paused = true)]
async fn load_failure_is_exposed_and_retry_recovers() {
    common::init_logging();
    let harness = Harness::new();
    harness
        .repository
        .set_load_error(Some(RepositoryError::Unavailable("offline".into())));
    let view_model = ColorPickerViewModel::open(harness.deps(), PickerSettings::default(), 1);
    let mut views = view_model.subscribe();

    let failed = views
        .wait_for(|view| view.content.is_failure())
        .await
        .expect("actor alive")
        .clone();
    let failure = failed.content.failure().expect("failure");
    assert!(failure.message.contains("offline"));
    assert_eq!(failed.screen_title, "Change color");

    harness.repository.set_load_error(None);
    view_model.load();
    views
        .wait_for(|view| view.content.is_loading())
        .await
        .expect("actor alive");
    views
        .wait_for(|view| view.content.is_success())
        .await
        .expect("actor alive");
    assert_eq!(harness.repository.load_calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn successful_save_navigates_back_with_item_and_resets_progress() {
    common::init_logging();
    let harness = Harness::new();
    let view_model = open_loaded(&harness, 2).await;
    let mut views = view_model.subscribe();

    view_model.save();
    views.wait_for(is_saving).await.expect("actor alive");
    wait_until(|| !harness.navigator.calls().is_empty()).await;

    assert_eq!(harness.navigator.calls(), vec![Navigation::BackWith(blue())]);
    assert_eq!(harness.repository.persist_runs(), 1);
    assert!(harness.notifier.messages().is_empty());

    let view = view_model.current();
    let content = view.content.as_success().expect("loaded");
    assert!(!content.show_save_progress_bar);
    assert!(content.show_save_button);
    assert_eq!(content.save_progress_percentage, 0);
    assert_eq!(content.save_progress_percentage_message, "0%");
}

#[tokio::test(start_paused = true)]
async fn selection_is_ignored_while_saving() {
    common::init_logging();
    let harness = Harness::new();
    let view_model = open_loaded(&harness, 1).await;

    view_model.save();
    view_model.select(blue());
    wait_until(|| !harness.navigator.calls().is_empty()).await;

    assert_eq!(harness.navigator.calls(), vec![Navigation::BackWith(red())]);
    assert_eq!(view_model.current().screen_title, "Change color: Red");
    assert_eq!(harness.store.get_u64("selected_color_id"), None);
}

#[tokio::test(start_paused = true)]
async fn second_save_while_running_is_dropped() {
    common::init_logging();
    let harness = Harness::new();
    let view_model = open_loaded(&harness, 1).await;

    view_model.save();
    view_model.save();
    wait_until(|| !harness.navigator.calls().is_empty()).await;
    tokio::time::sleep(Duration::from_secs(1)).await;

    assert_eq!(harness.repository.persist_runs(), 1);
    assert_eq!(harness.navigator.calls().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn failed_save_notifies_once_and_resets_progress() {
    common::init_logging();
    let harness = Harness::new();
    harness.repository.set_persist_fail_after(Some(2));
    let view_model = open_loaded(&harness, 1).await;
    let mut views = view_model.subscribe();

    view_model.save();
    views.wait_for(is_saving).await.expect("actor alive");
    views
        .wait_for(|view| !is_saving(view))
        .await
        .expect("actor alive");
    wait_until(|| !harness.notifier.messages().is_empty()).await;

    assert_eq!(
        harness.notifier.messages(),
        vec!["Something went wrong. Please try again.".to_string()]
    );
    assert!(harness.navigator.calls().is_empty());

    // Selection is possible again once the sampled flag cleared.
    view_model.select(blue());
    views
        .wait_for(|view| view.screen_title == "Change color: Blue")
        .await
        .expect("actor alive");
}

#[tokio::test(start_paused = true)]
async fn teardown_cancels_save_silently() {
    common::init_logging();
    let repository = StaticColorRepository::new(vec![red(), blue()])
        .with_step_delay(Duration::from_millis(100));
    let harness = Harness::with_repository(repository);
    let view_model = open_loaded(&harness, 1).await;
    let mut views = view_model.subscribe();

    view_model.save();
    views
        .wait_for(|view| {
            view.content
                .as_success()
                .is_some_and(|state| state.save_progress_percentage >= 25)
        })
        .await
        .expect("actor alive");

    view_model.close().await;

    let last = views.borrow().clone();
    let content = last.content.as_success().expect("loaded");
    assert!(!content.show_save_progress_bar);
    assert_eq!(content.save_progress_percentage, 0);
    assert!(harness.notifier.messages().is_empty());
    assert!(harness.navigator.calls().is_empty());
    assert_eq!(harness.repository.persist_runs(), 1);
    assert!(harness.repository.saved().is_empty());
}

#[tokio::test(start_paused = true)]
async fn cancel_button_navigates_back() {
    common::init_logging();
    let harness = Harness::new();
    let view_model = open_loaded(&harness, 1).await;

    view_model.cancel();
    wait_until(|| !harness.navigator.calls().is_empty()).await;
    assert_eq!(harness.navigator.calls(), vec![Navigation::Back]);
}

#[tokio::test(start_paused = true)]
async fn progress_sources_surface_separately() {
    common::init_logging();
    let repository = StaticColorRepository::new(vec![red(), blue()])
        .with_steps(vec![0, 20, 40, 60, 80, 100])
        .with_step_delay(Duration::from_millis(50));
    let harness = Harness::with_repository(repository);
    let view_model = open_loaded(&harness, 1).await;
    let mut views = view_model.subscribe();

    view_model.save();
    // Raw ticks move the bar before the first sample window closes.
    let view = views
        .wait_for(|view| {
            view.content
                .as_success()
                .is_some_and(|state| state.save_progress_percentage == 40)
        })
        .await
        .expect("actor alive")
        .clone();
    let content = view.content.as_success().expect("loaded");
    assert_eq!(content.save_progress_percentage_message, "0%");
    assert!(content.show_save_progress_bar);
}
