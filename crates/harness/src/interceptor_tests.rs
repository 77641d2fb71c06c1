#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use crate::stream::StreamBody;
use crate::testkit;
use parking_lot::Mutex as PlMutex;
use serde_json::json;

fn fixture_client(options: Value) -> Arc<Client> {
    testkit::fixture_namespace().client("S3", options).unwrap()
}

fn intercept_with(
    client: &Client,
    fake: Fake,
    args: Vec<Value>,
) -> (MockRequest, Arc<PlMutex<Vec<crate::outcome::Outcome>>>) {
    let interceptor = MethodInterceptor::new("S3", "getObject", fake, CaptureLog::new());
    let seen = Arc::new(PlMutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let callback: Callback = Arc::new(move |outcome| sink.lock().push(outcome.clone()));
    let request = interceptor.intercept(client, args, Some(callback));
    (request, seen)
}

#[test]
fn test_literal_fake_settles_synchronously() {
    let client = fixture_client(json!({}));
    let (request, seen) = intercept_with(
        &client,
        Fake::literal(json!({"Body": "data"})),
        vec![json!({"Bucket": "b", "Key": "k"})],
    );

    assert_eq!(request.outcome(), Some(Ok(json!({"Body": "data"}))));
    assert_eq!(seen.lock().as_slice(), &[Ok(json!({"Body": "data"}))]);
}

#[tokio::test]
async fn test_payload_fake_resolves_text_and_feeds_stream() {
    let client = fixture_client(json!({}));
    let (request, _) = intercept_with(&client, Fake::payload("file body"), vec![json!({})]);

    assert_eq!(request.outcome(), Some(Ok(json!("file body"))));
    assert_eq!(
        request.create_read_stream().collect_bytes().await,
        b"file body"
    );
}

#[tokio::test]
async fn test_stream_fake_adopts_body() {
    let client = fixture_client(json!({}));
    let body = StreamBody::from_chunks(vec![b"ab".to_vec(), b"cd".to_vec()]);
    let (request, _) = intercept_with(&client, Fake::stream(body), vec![json!({})]);

    assert_eq!(request.outcome(), Some(Ok(Value::Null)));
    assert_eq!(request.create_read_stream().collect_bytes().await, b"abcd");
}

#[test]
fn test_handler_receives_forwarded_args() {
    let client = fixture_client(json!({}));
    let fake = Fake::handler(|call| {
        assert_eq!(call.args().len(), 2);
        assert_eq!(call.params()["Key"], "k");
        call.completer().succeed(json!("handled"));
        HandlerReturn::Done
    });

    let (request, seen) = intercept_with(&client, fake, vec![json!("extra"), json!({"Key": "k"})]);
    assert_eq!(request.outcome(), Some(Ok(json!("handled"))));
    assert_eq!(seen.lock().len(), 1);
}

#[test]
fn test_direct_completion_beats_adopted_future() {
    let client = fixture_client(json!({}));
    let fake = Fake::handler(|call| {
        call.completer().succeed(json!("direct"));
        HandlerReturn::Future(Box::pin(async { Ok(json!("late")) }))
    });

    let (request, _) = intercept_with(&client, fake, vec![json!({})]);
    assert_eq!(request.outcome(), Some(Ok(json!("direct"))));
}

#[tokio::test]
async fn test_adopted_future_settles_outcome() {
    let client = fixture_client(json!({}));
    let fake = Fake::handler(|_| HandlerReturn::Future(Box::pin(async { Ok(json!("async")) })));

    let (request, _) = intercept_with(&client, fake, vec![json!({})]);
    assert_eq!(request.promise().await, Ok(json!("async")));
}

#[test]
fn test_failed_completion_forwards_error() {
    let client = fixture_client(json!({}));
    let fake = Fake::handler(|call| {
        call.completer().fail(json!({"code": "NoSuchKey"}));
        HandlerReturn::Done
    });

    let (request, seen) = intercept_with(&client, fake, vec![json!({})]);
    assert_eq!(
        request.outcome(),
        Some(Err(MockFailure::Fake(json!({"code": "NoSuchKey"}))))
    );
    assert!(seen.lock()[0].is_err());
}

#[test]
fn test_validation_failure_short_circuits_fake() {
    let client = fixture_client(json!({"paramValidation": true}));
    let invoked = Arc::new(AtomicU64::new(0));
    let counter = Arc::clone(&invoked);
    let fake = Fake::handler(move |call| {
        counter.fetch_add(1, Ordering::Relaxed);
        call.completer().succeed(json!(1));
        HandlerReturn::Done
    });

    // Missing required Key
    let (request, seen) = intercept_with(&client, fake, vec![json!({"Bucket": "b"})]);

    assert!(matches!(
        request.outcome(),
        Some(Err(MockFailure::Validation(_)))
    ));
    assert_eq!(invoked.load(Ordering::Relaxed), 0);
    assert_eq!(seen.lock().len(), 1);
}

#[test]
fn test_validation_passes_well_formed_params() {
    let client = fixture_client(json!({"paramValidation": true}));
    let (request, _) = intercept_with(
        &client,
        Fake::literal(json!("ok")),
        vec![json!({"Bucket": "b", "Key": "k"})],
    );
    assert_eq!(request.outcome(), Some(Ok(json!("ok"))));
}

#[test]
fn test_validation_skipped_when_disabled() {
    let client = fixture_client(json!({}));
    let (request, _) = intercept_with(&client, Fake::literal(json!("ok")), vec![json!({})]);
    assert_eq!(request.outcome(), Some(Ok(json!("ok"))));
}

#[test]
fn test_interceptor_records_only_first_settlement() {
    let client = fixture_client(json!({}));
    let log = CaptureLog::new();
    let fake = Fake::handler(|call| {
        call.completer().succeed(json!("first"));
        // Later completion attempts do not reopen the frozen outcome
        call.completer().succeed(json!("second"));
        HandlerReturn::Done
    });
    let interceptor = MethodInterceptor::new("S3", "getObject", fake, log.clone());

    let request = interceptor.intercept(&client, vec![json!({})], None);
    assert_eq!(request.outcome(), Some(Ok(json!("first"))));

    assert_eq!(log.len(), 1);
    assert!(matches!(
        log.invocations()[0].outcome,
        cloudless_capture::CapturedOutcome::Success { ref value } if value == &json!("first")
    ));
}
