use crate::core::generator::{GenerateError, JokeGenerator};
use crate::core::runtime::test_support::ScriptedSource;
use crate::store::JokeStore;

fn open_temp_store() -> (tempfile::TempDir, JokeStore) {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = JokeStore::open(&dir.path().join("jokes.db")).expect("open store");
    (dir, store)
}

#[tokio::test]
async fn fresh_joke_is_accepted_and_recorded() {
    let (_dir, store) = open_temp_store();
    let source = ScriptedSource::new(["Why did the chicken cross the road?"]);
    let generator = JokeGenerator::new(source);

    let joke = generator.generate(&store).await.expect("generate");
    assert_eq!(joke, "Why did the chicken cross the road?");
    assert!(store.contains(&joke).unwrap());
}

#[tokio::test(start_paused = true)]
async fn duplicate_is_discarded_and_next_response_used() {
    let (_dir, store) = open_temp_store();
    store
        .insert("Why did the chicken cross the road?")
        .unwrap();

    let source = ScriptedSource::new([
        "Why did the chicken cross the road?",
        "Parallel lines have so much in common...",
    ]);
    let generator = JokeGenerator::new(source);

    let joke = generator.generate(&store).await.expect("generate");
    assert_eq!(joke, "Parallel lines have so much in common...");
    assert!(store.contains(&joke).unwrap());
}

#[tokio::test(start_paused = true)]
async fn retries_exhaust_with_distinct_error() {
    let (_dir, store) = open_temp_store();
    store.insert("the only joke").unwrap();

    let source = ScriptedSource::new(["the only joke", "the only joke", "the only joke"]);
    let generator = JokeGenerator::with_max_attempts(source, 3);

    match generator.generate(&store).await {
        Err(GenerateError::NoveltyExhausted { attempts }) => assert_eq!(attempts, 3),
        other => panic!("expected NoveltyExhausted, got {other:?}"),
    }
}

#[tokio::test]
async fn provider_failure_propagates() {
    let (_dir, store) = open_temp_store();
    // An empty script behaves like a provider error on the first request.
    let generator = JokeGenerator::new(ScriptedSource::new([]));

    assert!(matches!(
        generator.generate(&store).await,
        Err(GenerateError::Provider(_))
    ));
}
