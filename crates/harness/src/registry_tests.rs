#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use crate::sdk::StaticLoader;
use crate::testkit;
use serde_json::json;

#[test]
fn test_mock_requires_a_configured_sdk() {
    let harness = Harness::new();
    let result = harness.mock("S3", "getObject", json!(1));
    assert!(matches!(result, Err(MockError::SdkNotConfigured)));
}

#[test]
fn test_mock_unknown_service_path_fails() {
    let harness = testkit::fixture_harness();
    let result = harness.mock("Nope", "anything", json!(1));
    assert!(matches!(result, Err(MockError::Path(_))));
}

#[test]
fn test_loader_resolves_package_lazily() {
    let harness = Harness::new();
    harness.set_loader(Arc::new(
        StaticLoader::new().package("cloud-sdk", testkit::fixture_namespace()),
    ));

    assert!(harness.sdk().is_none());
    harness.mock("S3", "getObject", json!("mocked")).unwrap();
    assert!(harness.sdk().is_some());
}

#[test]
fn test_set_sdk_switches_packages() {
    let harness = Harness::new();
    harness.set_loader(Arc::new(
        StaticLoader::new()
            .package("cloud-sdk", testkit::fixture_namespace())
            .package("other-sdk", testkit::fixture_namespace()),
    ));

    harness.mock("S3", "getObject", json!(1)).unwrap();
    let first = harness.sdk().unwrap();

    harness.set_sdk("other-sdk");
    assert!(harness.sdk().is_none());
    harness.mock("SNS", "publish", json!(2)).unwrap();
    assert!(!Arc::ptr_eq(&first, &harness.sdk().unwrap()));
}

#[test]
fn test_unknown_package_surfaces_loader_error() {
    let harness = Harness::new();
    harness.set_loader(Arc::new(StaticLoader::new()));
    harness.set_sdk("missing");
    let result = harness.mock("S3", "getObject", json!(1));
    assert!(matches!(result, Err(MockError::UnknownPackage(_))));
}

#[test]
fn test_mock_before_construction_applies_on_next_construction() {
    let harness = testkit::fixture_harness();
    let sdk = harness.sdk().unwrap();

    let registration = harness.mock("S3", "getObject", json!({"Body": "fake"})).unwrap();
    assert!(registration.handle().is_none());
    assert!(!harness.registration("S3").unwrap().invoked());

    let client = sdk.client("S3", json!({})).unwrap();
    assert!(harness.registration("S3").unwrap().invoked());
    assert!(client.is_intercepted("getObject"));

    let request = client.invoke("getObject", json!({"Bucket": "b", "Key": "k"}));
    assert_eq!(request.outcome(), Some(Ok(json!({"Body": "fake"}))));
    assert_eq!(registration.call_count(), 1);
}

#[test]
fn test_mock_after_construction_waits_for_reconstruction() {
    let harness = testkit::fixture_harness();
    let sdk = harness.sdk().unwrap();

    // Constructed before any mock: no interceptor seam was active
    let early = sdk.client("S3", json!({})).unwrap();
    harness.mock("S3", "getObject", json!("fake")).unwrap();
    assert!(!early.is_intercepted("getObject"));

    let fresh = sdk.client("S3", json!({})).unwrap();
    assert!(fresh.is_intercepted("getObject"));
}

#[test]
fn test_late_mock_applies_to_current_client() {
    let harness = testkit::fixture_harness();
    let sdk = harness.sdk().unwrap();

    harness.mock("S3", "getObject", json!(1)).unwrap();
    let client = sdk.client("S3", json!({})).unwrap();

    // Second method mocked after the constructor already fired
    harness.mock("S3", "putObject", json!("stored")).unwrap();
    assert!(client.is_intercepted("putObject"));
    let request = client.invoke("putObject", json!({"Bucket": "b", "Key": "k"}));
    assert_eq!(request.outcome(), Some(Ok(json!("stored"))));
}

#[test]
fn test_mock_is_idempotent_per_pair() {
    let harness = testkit::fixture_harness();
    let first = harness.mock("S3", "getObject", json!("first")).unwrap();
    let second = harness.mock("S3", "getObject", json!("second")).unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    let client = harness.sdk().unwrap().client("S3", json!({})).unwrap();
    let request = client.invoke("getObject", json!({}));
    assert_eq!(request.outcome(), Some(Ok(json!("first"))));
}

#[test]
fn test_remock_replaces_fake_on_live_client() {
    let harness = testkit::fixture_harness();
    harness.mock("S3", "getObject", json!("old")).unwrap();
    let client = harness.sdk().unwrap().client("S3", json!({})).unwrap();

    let fresh = harness.remock("S3", "getObject", json!("new")).unwrap();
    assert!(fresh.handle().is_some());

    let request = client.invoke("getObject", json!({}));
    assert_eq!(request.outcome(), Some(Ok(json!("new"))));
}

#[test]
fn test_remock_never_mocked_is_a_noop() {
    let harness = testkit::fixture_harness();
    assert!(harness.remock("S3", "getObject", json!(1)).is_none());

    harness.mock("S3", "getObject", json!(1)).unwrap();
    assert!(harness.remock("S3", "putObject", json!(2)).is_none());
}

#[test]
fn test_reconstruction_reapplies_fakes() {
    let harness = testkit::fixture_harness();
    let sdk = harness.sdk().unwrap();
    let registration = harness.mock("S3", "getObject", json!("fake")).unwrap();

    let first = sdk.client("S3", json!({})).unwrap();
    first.invoke("getObject", json!({}));
    first.invoke("getObject", json!({}));
    assert_eq!(registration.call_count(), 2);

    let second = sdk.client("S3", json!({})).unwrap();
    assert!(second.is_intercepted("getObject"));
    second.invoke("getObject", json!({}));

    // The interceptor counter resets per construction; the capture log
    // spans the registration's lifetime
    assert_eq!(registration.call_count(), 1);
    assert_eq!(registration.calls().len(), 3);
}

#[test]
fn test_restore_method_releases_one_stub() {
    let harness = testkit::fixture_harness();
    let sdk = harness.sdk().unwrap();
    harness.mock("S3", "getObject", json!(1)).unwrap();
    harness.mock("S3", "putObject", json!(2)).unwrap();
    let client = sdk.client("S3", json!({})).unwrap();

    harness.restore_method("S3", "getObject");
    assert!(!client.is_intercepted("getObject"));
    assert!(client.is_intercepted("putObject"));
    assert!(harness.registration("S3").unwrap().method("getObject").is_none());
}

#[test]
fn test_restore_service_releases_constructor_and_methods() {
    let harness = testkit::fixture_harness();
    let sdk = harness.sdk().unwrap();
    harness.mock("S3", "getObject", json!(1)).unwrap();
    let client = sdk.client("S3", json!({})).unwrap();
    let seam = crate::path::resolve(&sdk, "S3").unwrap();
    assert!(seam.is_intercepted());

    harness.restore_service("S3");
    assert!(!seam.is_intercepted());
    assert!(!client.is_intercepted("getObject"));
    assert!(harness.registration("S3").is_none());

    // Fresh constructions go straight to the real constructor
    let fresh = sdk.client("S3", json!({})).unwrap();
    assert!(!fresh.is_intercepted("getObject"));
}

#[test]
fn test_restore_releases_everything() {
    let harness = testkit::fixture_harness();
    let sdk = harness.sdk().unwrap();
    harness.mock("S3", "getObject", json!(1)).unwrap();
    harness.mock("SNS", "publish", json!(2)).unwrap();
    sdk.client("S3", json!({})).unwrap();

    harness.restore();
    assert!(harness.mocked_services().is_empty());
    assert!(!crate::path::resolve(&sdk, "S3").unwrap().is_intercepted());
    assert!(!crate::path::resolve(&sdk, "SNS").unwrap().is_intercepted());
}

#[test]
fn test_restore_never_mocked_entries_are_noops() {
    let harness = testkit::fixture_harness();
    harness.restore_service("S3");
    harness.restore_method("S3", "getObject");

    harness.mock("S3", "getObject", json!(1)).unwrap();
    harness.restore_method("S3", "putObject");
    assert!(harness.registration("S3").unwrap().method("getObject").is_some());
}

#[test]
fn test_nested_service_paths_register() {
    let harness = testkit::fixture_harness();
    let registration = harness
        .mock("DynamoDB.DocumentClient", "get", json!({"Item": {}}))
        .unwrap();
    assert_eq!(registration.service(), "DynamoDB.DocumentClient");

    let client = harness
        .sdk()
        .unwrap()
        .client("DynamoDB.DocumentClient", json!({}))
        .unwrap();
    let request = client.invoke("get", json!({"TableName": "t", "Key": {"id": 1}}));
    assert_eq!(request.outcome(), Some(Ok(json!({"Item": {}}))));
}

#[test]
fn test_constructor_stub_records_constructions() {
    let harness = testkit::fixture_harness();
    let sdk = harness.sdk().unwrap();
    harness.mock("SNS", "publish", json!(1)).unwrap();

    sdk.client("SNS", json!({"region": "us-east-1"})).unwrap();
    sdk.client("SNS", json!({})).unwrap();

    let registration = harness.registration("SNS").unwrap();
    let stub = registration.constructor_stub().unwrap();
    assert_eq!(stub.call_count(), 2);
    assert_eq!(stub.calls()[0].args, vec![json!({"region": "us-east-1"})]);
}
