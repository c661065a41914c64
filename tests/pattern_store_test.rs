// tests/pattern_store_test.rs

mod test_helpers;

use patter::ChatError;
use patter::identity::UserId;
use patter::training::{NewEntry, Source};

use test_helpers::create_default_test_app_state;

#[tokio::test]
async fn test_add_initializes_counters() {
    let state = create_default_test_app_state().await;
    let owner = UserId::new("alice").unwrap();

    let id = state
        .patterns
        .add(NewEntry::user("Hello World", "Hi!", owner))
        .await
        .unwrap()
        .expect("stored");

    let entry = state.patterns.get(id).await.unwrap();
    assert_eq!(entry.pattern, "hello world");
    assert_eq!(entry.uses, 0);
    assert_eq!(entry.rating, 0.0);
    assert_eq!(entry.source, Source::User);
    assert!(entry.origin_url.is_none());
}

#[tokio::test]
async fn test_add_rejects_empty_sides() {
    let state = create_default_test_app_state().await;

    let id = state
        .patterns
        .add(NewEntry::web("   ", "response text", "http://example.com"))
        .await
        .unwrap();
    assert!(id.is_none());
    assert!(state.patterns.all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_increment_uses_adds_exactly_n() {
    let state = create_default_test_app_state().await;
    let id = state
        .patterns
        .add(NewEntry::web("some pattern", "some response", "http://example.com"))
        .await
        .unwrap()
        .unwrap();

    for _ in 0..7 {
        state.patterns.increment_uses(id).await.unwrap();
    }
    assert_eq!(state.patterns.get(id).await.unwrap().uses, 7);
}

#[tokio::test]
async fn test_apply_rating_on_fresh_entry_halves() {
    let state = create_default_test_app_state().await;
    let id = state
        .patterns
        .add(NewEntry::web("rated pattern", "rated response", "http://example.com"))
        .await
        .unwrap()
        .unwrap();

    state.patterns.apply_rating(id, 3.0).await.unwrap();
    assert!((state.patterns.get(id).await.unwrap().rating - 1.5).abs() < 1e-12);
}

#[tokio::test]
async fn test_mutations_on_missing_ids_report_not_found() {
    let state = create_default_test_app_state().await;

    let err = state.patterns.increment_uses(42).await.unwrap_err();
    assert!(matches!(err, ChatError::NotFound(42)));

    let err = state.patterns.apply_rating(42, 1.0).await.unwrap_err();
    assert!(matches!(err, ChatError::NotFound(42)));

    let err = state.patterns.get(42).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_listing_orders() {
    let state = create_default_test_app_state().await;
    let mut ids = Vec::new();
    for i in 0..3 {
        let id = state
            .patterns
            .add(NewEntry::web(
                format!("pattern {i}"),
                format!("response {i}"),
                "http://example.com",
            ))
            .await
            .unwrap()
            .unwrap();
        ids.push(id);
    }

    let oldest_first: Vec<_> = state.patterns.all().await.unwrap().iter().map(|e| e.id).collect();
    assert_eq!(oldest_first, ids);

    let newest_first: Vec<_> = state
        .patterns
        .list_recent()
        .await
        .unwrap()
        .iter()
        .map(|e| e.id)
        .collect();
    let mut reversed = ids.clone();
    reversed.reverse();
    assert_eq!(newest_first, reversed);
}
