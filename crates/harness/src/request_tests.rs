#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use crate::outcome::OutcomeCell;
use serde_json::json;

fn settled_request(outcome: Outcome) -> MockRequest {
    let completer = Completer::new(OutcomeCell::new(), None, None);
    completer.complete(outcome);
    MockRequest::new(completer, None, None, None)
}

#[test]
fn test_promise_accessor_returns_identical_promise() {
    let request = settled_request(Ok(json!(1)));
    let first = request.promise();
    let second = request.promise();
    assert!(first.same(&second));
}

#[tokio::test]
async fn test_promise_settles_with_frozen_outcome() {
    let request = settled_request(Ok(json!({"Body": "x"})));
    assert_eq!(request.promise().await, Ok(json!({"Body": "x"})));
    // Accessing again after settlement still observes the same outcome
    assert_eq!(request.promise().await, Ok(json!({"Body": "x"})));
}

#[tokio::test]
async fn test_promise_access_before_settlement() {
    let completer = Completer::new(OutcomeCell::new(), None, None);
    let request = MockRequest::new(completer.clone(), None, None, None);

    let promise = request.promise();
    completer.succeed(json!("later"));

    assert_eq!(promise.await, Ok(json!("later")));
}

#[tokio::test]
async fn test_promise_drives_pending_future() {
    let completer = Completer::new(OutcomeCell::new(), None, None);
    let pending = Box::pin(async { Ok(json!("adopted")) });
    let request = MockRequest::new(completer, None, Some(pending), None);

    assert!(!request.is_settled());
    assert_eq!(request.promise().await, Ok(json!("adopted")));
    assert!(request.is_settled());
}

#[tokio::test]
async fn test_read_stream_prefers_adopted_stream() {
    let completer = Completer::new(OutcomeCell::new(), None, None);
    completer.succeed(json!("resolved"));
    let request = MockRequest::new(
        completer,
        Some(ReadStream::once("from-stream")),
        None,
        Some(b"from-payload".to_vec()),
    );

    let bytes = request.create_read_stream().collect_bytes().await;
    assert_eq!(bytes, b"from-stream");
}

#[tokio::test]
async fn test_read_stream_adopted_stream_taken_once() {
    let completer = Completer::new(OutcomeCell::new(), None, None);
    let request = MockRequest::new(completer, Some(ReadStream::once("chunk")), None, None);

    assert_eq!(request.create_read_stream().collect_bytes().await, b"chunk");
    // Second access synthesizes from what is left: nothing
    assert_eq!(request.create_read_stream().collect_bytes().await, b"");
}

#[tokio::test]
async fn test_read_stream_from_payload() {
    let completer = Completer::new(OutcomeCell::new(), None, None);
    completer.succeed(json!("hello"));
    let request = MockRequest::new(completer, None, None, Some(b"hello".to_vec()));

    assert_eq!(request.create_read_stream().collect_bytes().await, b"hello");
}

#[tokio::test]
async fn test_read_stream_from_payload_like_outcome() {
    let request = settled_request(Ok(json!("resolved text")));
    assert_eq!(
        request.create_read_stream().collect_bytes().await,
        b"resolved text"
    );
}

#[tokio::test]
async fn test_read_stream_empty_for_non_payload_outcome() {
    let request = settled_request(Ok(json!({"Body": "hello"})));
    assert!(request.create_read_stream().collect_bytes().await.is_empty());

    let request = settled_request(Err(crate::outcome::MockFailure::Fake(json!("e"))));
    assert!(request.create_read_stream().collect_bytes().await.is_empty());
}

#[test]
fn test_on_and_send_are_chainable_noops() {
    let request = settled_request(Ok(json!(1)));
    request.on("complete").on("error").send();
    assert_eq!(request.outcome(), Some(Ok(json!(1))));
}
