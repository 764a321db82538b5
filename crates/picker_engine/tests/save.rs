use std::time::Duration;

use picker_core::Progress;
use picker_engine::{save_selection, RepositoryError, SaveError, StaticColorRepository};
use pretty_assertions::assert_eq;

mod common;
use common::{blue, red};

fn percentages(progress: &[Progress]) -> Vec<u8> {
    progress.iter().map(Progress::get_percentage).collect()
}

#[tokio::test(start_paused = true)]
async fn instant_sees_every_tick_and_sampled_sees_the_last() {
    common::init_logging();
    let repository = StaticColorRepository::new(vec![red(), blue()])
        .with_steps(vec![0, 10, 55, 100])
        .with_step_delay(Duration::from_millis(50));
    let mut instant = Vec::new();
    let mut sampled = Vec::new();

    let saved = save_selection(
        &repository,
        2,
        Duration::from_millis(200),
        |progress| instant.push(progress),
        |progress| sampled.push(progress),
    )
    .await
    .expect("save ok");

    assert_eq!(saved, blue());
    assert_eq!(percentages(&instant), vec![0, 10, 55, 100]);
    assert!(instant.iter().all(Progress::is_in_progress));
    assert_eq!(sampled, vec![Progress::percentage(100)]);
    assert_eq!(repository.persist_runs(), 1);
    assert_eq!(repository.saved(), vec![blue()]);
}

#[tokio::test(start_paused = true)]
async fn sampled_values_were_all_produced() {
    common::init_logging();
    let steps: Vec<u8> = (0..=100).step_by(5).collect();
    let repository = StaticColorRepository::new(vec![red()])
        .with_steps(steps.clone())
        .with_step_delay(Duration::from_millis(30));
    let mut sampled = Vec::new();

    save_selection(
        &repository,
        1,
        Duration::from_millis(200),
        |_| {},
        |progress| sampled.push(progress.get_percentage()),
    )
    .await
    .expect("save ok");

    assert!(sampled.len() < steps.len());
    assert!(sampled.iter().all(|value| steps.contains(value)));
    assert!(sampled.windows(2).all(|pair| pair[0] < pair[1]));
    assert_eq!(sampled.last(), Some(&100));
    assert_eq!(repository.persist_runs(), 1);
}

#[tokio::test(start_paused = true)]
async fn stream_error_fails_the_save() {
    common::init_logging();
    let repository = StaticColorRepository::new(vec![red()]);
    repository.set_persist_fail_after(Some(2));
    let mut instant = Vec::new();

    let err = save_selection(
        &repository,
        1,
        Duration::from_millis(200),
        |progress| instant.push(progress),
        |_| {},
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        SaveError::Repository(RepositoryError::PersistFailed(_))
    ));
    assert_eq!(percentages(&instant), vec![0, 25]);
    assert_eq!(repository.persist_runs(), 1);
    assert!(repository.saved().is_empty());
}

#[tokio::test(start_paused = true)]
async fn unknown_color_never_starts_persisting() {
    common::init_logging();
    let repository = StaticColorRepository::new(vec![red()]);

    let err = save_selection(&repository, 42, Duration::from_millis(200), |_| {}, |_| {})
        .await
        .unwrap_err();

    assert_eq!(err, SaveError::Repository(RepositoryError::NotFound(42)));
    assert_eq!(repository.persist_runs(), 0);
}
