use chrono::NaiveDate;

use crate::core::generator::JokeGenerator;
use crate::core::runtime::test_support::{FailingPublisher, RecordingPublisher, ScriptedSource};
use crate::core::runtime::Runtime;
use crate::store::JokeStore;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 9).expect("valid date")
}

#[tokio::test]
async fn successful_cycle_posts_and_marks_the_day() {
    let dir = tempfile::tempdir().expect("tempdir");
    let db_path = dir.path().join("jokes.db");
    let store = JokeStore::open(&db_path).expect("open store");

    let generator = JokeGenerator::new(ScriptedSource::new([
        "Why did the chicken cross the road?",
    ]));
    let runtime = Runtime::new(generator, RecordingPublisher::default(), store);

    runtime.run_guarded_cycle(today()).await;

    // Inspect through a second handle on the same database file.
    let inspect = JokeStore::open(&db_path).expect("reopen store");
    assert!(inspect
        .contains("Why did the chicken cross the road?")
        .unwrap());
    assert_eq!(inspect.last_posted_on().unwrap(), Some(today()));
    assert!(runtime.already_posted_on(today()));
}

#[tokio::test]
async fn publish_failure_is_swallowed_and_day_not_marked() {
    let dir = tempfile::tempdir().expect("tempdir");
    let db_path = dir.path().join("jokes.db");
    let store = JokeStore::open(&db_path).expect("open store");

    let generator = JokeGenerator::new(ScriptedSource::new(["a doomed joke"]));
    let runtime = Runtime::new(generator, FailingPublisher, store);

    // Must not propagate or panic.
    runtime.run_guarded_cycle(today()).await;

    let inspect = JokeStore::open(&db_path).expect("reopen store");
    // The joke was recorded by the generator before the publish failed.
    assert!(inspect.contains("a doomed joke").unwrap());
    // But the daily marker did not advance, so tomorrow's window retries.
    assert_eq!(inspect.last_posted_on().unwrap(), None);
    assert!(!runtime.already_posted_on(today()));
}

#[tokio::test]
async fn marker_for_another_day_does_not_suppress_posting() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = JokeStore::open(&dir.path().join("jokes.db")).expect("open store");
    store
        .mark_posted_on(NaiveDate::from_ymd_opt(2024, 3, 8).expect("valid date"))
        .unwrap();

    let generator = JokeGenerator::new(ScriptedSource::new(["unused"]));
    let runtime = Runtime::new(generator, RecordingPublisher::default(), store);

    assert!(!runtime.already_posted_on(today()));
}

#[tokio::test]
async fn recorded_publish_receives_the_generated_text() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = JokeStore::open(&dir.path().join("jokes.db")).expect("open store");

    let generator = JokeGenerator::new(ScriptedSource::new([
        "Parallel lines have so much in common...",
    ]));
    let poster = RecordingPublisher::default();
    let runtime = Runtime::new(generator, poster, store);

    runtime.run_guarded_cycle(today()).await;

    let published = runtime.poster().published.lock().expect("publisher lock");
    assert_eq!(
        published.as_slice(),
        ["Parallel lines have so much in common..."]
    );
}
