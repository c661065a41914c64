// tests/web_learning_test.rs

mod test_helpers;

use std::sync::Arc;

use tokio::sync::Notify;

use patter::ChatError;
use patter::chat::{LEARNING_ACK, ReplyKind};
use patter::identity::Caller;
use patter::training::Source;

use test_helpers::{GatedFetcher, StaticFetcher, count_rows, create_test_app_state, user};

const TWO_SENTENCE_PAGE: &str = r#"
<html>
  <head><title>Two sentences</title></head>
  <body>
    <nav>Home | About | Contact us today</nav>
    <p>Rust is a systems programming language. It guarantees memory safety without a garbage collector.</p>
  </body>
</html>
"#;

#[tokio::test]
async fn test_two_long_sentences_store_one_web_entry() {
    let url = "https://example.com/rust";
    let fetcher = StaticFetcher::new().with_page(url, TWO_SENTENCE_PAGE);
    let state = create_test_app_state(Arc::new(fetcher)).await;

    let report = state.chat.learn_now(&user("alice"), url).await.unwrap();
    assert!(report.success);
    assert_eq!(report.patterns_found, 1);
    assert_eq!(report.entries_stored, 1);
    assert!(report.error.is_none());

    let entries = state.patterns.all().await.unwrap();
    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    assert_eq!(entry.pattern, "rust is a systems programming language");
    assert_eq!(
        entry.response,
        "It guarantees memory safety without a garbage collector"
    );
    assert_eq!(entry.source, Source::Web);
    assert_eq!(entry.origin_url.as_deref(), Some(url));
    assert!(entry.owner.is_none());
}

#[tokio::test]
async fn test_short_first_sentence_is_discarded() {
    let url = "https://example.com/short";
    let fetcher = StaticFetcher::new().with_page(
        url,
        "<p>Hi. This is a test sentence that is long enough.</p>",
    );
    let state = create_test_app_state(Arc::new(fetcher)).await;

    let report = state.chat.learn_now(&user("alice"), url).await.unwrap();
    assert!(report.success);
    assert_eq!(report.patterns_found, 1);
    assert_eq!(report.entries_stored, 0);
    assert_eq!(count_rows(&state, "training_entries").await, 0);
}

#[tokio::test]
async fn test_fetch_failure_is_reported_not_raised() {
    let state = create_test_app_state(Arc::new(StaticFetcher::new())).await;

    let report = state
        .chat
        .learn_now(&user("alice"), "https://unreachable.example")
        .await
        .unwrap();
    assert!(!report.success);
    assert!(report.error.as_deref().unwrap().contains("connection refused"));
    assert_eq!(count_rows(&state, "training_entries").await, 0);
}

#[tokio::test]
async fn test_awaited_learning_requires_identity() {
    let state = create_test_app_state(Arc::new(StaticFetcher::new())).await;
    let err = state
        .chat
        .learn_now(&Caller::anonymous(), "https://example.com")
        .await
        .unwrap_err();
    assert!(matches!(err, ChatError::Unauthenticated));
}

#[tokio::test]
async fn test_learn_command_does_not_wait_for_ingestion() {
    let release = Arc::new(Notify::new());
    let fetcher = GatedFetcher {
        html: TWO_SENTENCE_PAGE.to_string(),
        release: release.clone(),
    };
    let state = create_test_app_state(Arc::new(fetcher)).await;
    let alice = user("alice");

    let reply = state
        .chat
        .send_message(&alice, "/learn http://example.com")
        .await
        .unwrap();
    assert_eq!(reply.reply, LEARNING_ACK);
    assert_eq!(reply.kind, ReplyKind::Learning);

    // The fetch is still parked, yet the turn is complete
    assert_eq!(state.chat.pending_jobs(), 1);
    assert_eq!(count_rows(&state, "training_entries").await, 0);
    let transcript = state.chat.list_messages(&alice).await.unwrap();
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[1].content, LEARNING_ACK);

    release.notify_one();
    state.chat.drain_jobs().await;

    assert_eq!(state.chat.pending_jobs(), 0);
    let entries = state.patterns.all().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].origin_url.as_deref(), Some("http://example.com"));

    // Learned text is now answerable, and only one ack was ever written
    let reply = state
        .chat
        .send_message(&alice, "is rust a systems language?")
        .await
        .unwrap();
    assert_eq!(
        reply.reply,
        "It guarantees memory safety without a garbage collector"
    );
    let acks = state
        .chat
        .list_messages(&alice)
        .await
        .unwrap()
        .iter()
        .filter(|m| m.content == LEARNING_ACK)
        .count();
    assert_eq!(acks, 1);
}

#[tokio::test]
async fn test_learn_without_http_url_falls_through() {
    let state = create_test_app_state(Arc::new(StaticFetcher::new())).await;

    let reply = state
        .chat
        .send_message(&user("alice"), "/learn example.com")
        .await
        .unwrap();
    assert_eq!(reply.kind, ReplyKind::Fallback);
    assert_eq!(state.chat.pending_jobs(), 0);
}
