// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Concrete in-memory SDK fixtures for tests.
//!
//! These are predictable, readable fakes rather than generated mocks: a
//! [`RecordingClient`] records every real dispatch so tests can verify that
//! un-mocked methods (and restored ones) reach real behavior, and the
//! fixture namespace mirrors the handful of services the test suite talks
//! about (`S3`, `SNS`, nested `DynamoDB.DocumentClient`).

use crate::namespace::SdkNamespace;
use crate::outcome::Outcome;
use crate::registry::Harness;
use crate::sdk::{ClientConfig, ServiceApi, ServiceClient, ServiceFactory};
use crate::validation::{InputSchema, MemberShape};
use cloudless_capture::{CaptureLog, CapturedOutcome};
use serde_json::{json, Value};
use std::sync::Arc;

/// A real-side client that records dispatches instead of calling a network.
pub struct RecordingClient {
    name: String,
    config: ClientConfig,
    api: ServiceApi,
    dispatches: CaptureLog,
}

impl ServiceClient for RecordingClient {
    fn service_name(&self) -> &str {
        &self.name
    }

    fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn api(&self) -> &ServiceApi {
        &self.api
    }

    fn dispatch(&self, method: &str, params: Value) -> Outcome {
        let value = json!({ "realCall": method, "service": self.name });
        self.dispatches.record(
            &self.name,
            method,
            vec![params],
            CapturedOutcome::Success {
                value: value.clone(),
            },
        );
        Ok(value)
    }
}

/// Factory for [`RecordingClient`]s. All constructions share one dispatch
/// log, so tests can keep a clone of it and observe real calls across
/// client instances.
pub struct RecordingFactory {
    name: String,
    api: ServiceApi,
    dispatches: CaptureLog,
}

impl RecordingFactory {
    /// A factory for a named service with the given API description
    pub fn new(name: &str, api: ServiceApi) -> Self {
        Self {
            name: name.to_string(),
            api,
            dispatches: CaptureLog::new(),
        }
    }

    /// The shared dispatch log
    pub fn dispatch_log(&self) -> &CaptureLog {
        &self.dispatches
    }
}

impl ServiceFactory for RecordingFactory {
    fn construct(&self, options: Value) -> Arc<dyn ServiceClient> {
        Arc::new(RecordingClient {
            name: self.name.clone(),
            config: ClientConfig::from_options(options),
            api: self.api.clone(),
            dispatches: self.dispatches.clone(),
        })
    }
}

/// API description for the fixture `S3` service (operation table)
pub fn s3_api() -> ServiceApi {
    ServiceApi::new()
        .operation(
            "getObject",
            Some(
                InputSchema::new()
                    .required("Bucket", MemberShape::String)
                    .required("Key", MemberShape::String),
            ),
        )
        .operation(
            "putObject",
            Some(
                InputSchema::new()
                    .required("Bucket", MemberShape::String)
                    .required("Key", MemberShape::String)
                    .optional("Body", MemberShape::Any),
            ),
        )
        .operation("listBuckets", None)
}

/// API description for the fixture `SNS` service
pub fn sns_api() -> ServiceApi {
    ServiceApi::new().operation(
        "publish",
        Some(
            InputSchema::new()
                .required("Message", MemberShape::String)
                .optional("TopicArn", MemberShape::String),
        ),
    )
}

/// API description for the fixture `DynamoDB.DocumentClient`, declared in
/// the direct method-keyed table to exercise the fallback lookup
pub fn document_client_api() -> ServiceApi {
    ServiceApi::new()
        .method_input(
            "get",
            InputSchema::new()
                .required("TableName", MemberShape::String)
                .required("Key", MemberShape::Any),
        )
        .method_input(
            "put",
            InputSchema::new()
                .required("TableName", MemberShape::String)
                .required("Item", MemberShape::Any),
        )
}

/// The fixture namespace the test suite mocks against
pub fn fixture_namespace() -> Arc<SdkNamespace> {
    SdkNamespace::builder()
        .service("S3", Arc::new(RecordingFactory::new("S3", s3_api())))
        .service("SNS", Arc::new(RecordingFactory::new("SNS", sns_api())))
        .service(
            "DynamoDB.DocumentClient",
            Arc::new(RecordingFactory::new(
                "DynamoDB.DocumentClient",
                document_client_api(),
            )),
        )
        .build()
}

/// A harness already pointed at [`fixture_namespace`]
pub fn fixture_harness() -> Harness {
    let harness = Harness::new();
    harness.set_sdk_instance(fixture_namespace());
    harness
}
