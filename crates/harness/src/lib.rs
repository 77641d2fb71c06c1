// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Cloud-SDK test-double harness.
//!
//! `cloudless` intercepts a cloud-SDK's service constructors and instance
//! methods, replacing real network-calling behavior with caller-supplied
//! fake behavior while preserving the SDK's call-shape contracts: the
//! completion callback, `promise()`, `create_read_stream()`, and the
//! chainable `on()`/`send()` request shape. Application code that talks to
//! the SDK normally runs in unit tests without performing network I/O.
//!
//! The entry point is [`Harness`]: point it at an [`SdkNamespace`] (or a
//! loader for one), register fakes with [`Harness::mock`], replace them
//! with [`Harness::remock`], and tear everything down with
//! [`Harness::restore`].
//!
//! ```
//! use cloudless::{Fake, testkit};
//! use serde_json::json;
//!
//! let harness = testkit::fixture_harness();
//! harness
//!     .mock("SNS", "publish", Fake::literal(json!({"MessageId": "123"})))
//!     .unwrap();
//!
//! let sdk = harness.sdk().unwrap();
//! let sns = sdk.client("SNS", json!({})).unwrap();
//! let request = sns.invoke_with("publish", json!({"Message": "hi"}), |outcome| {
//!     assert_eq!(outcome.as_ref().unwrap()["MessageId"], "123");
//! });
//! assert!(request.is_settled());
//!
//! harness.restore();
//! ```

pub mod client;
pub mod error;
pub mod fake;
pub mod interceptor;
pub mod namespace;
pub mod outcome;
pub mod path;
pub mod registry;
pub mod request;
pub mod sdk;
pub mod stream;
pub mod stub;
pub mod testkit;
pub mod validation;

/// Re-exported capture types from the cloudless-capture crate.
pub mod capture {
    pub use cloudless_capture::{CaptureLog, CapturedInvocation, CapturedOutcome};
}

pub use client::Client;
pub use error::MockError;
pub use fake::{Fake, FakeCall, HandlerReturn};
pub use namespace::{GlobalConfig, NamespaceBuilder, SdkNamespace};
pub use outcome::{Callback, Completer, MockFailure, Outcome, Promise};
pub use path::PathError;
pub use registry::{Harness, MethodRegistration, ServiceRegistration};
pub use request::MockRequest;
pub use sdk::{ClientConfig, SdkLoader, ServiceApi, ServiceClient, ServiceFactory, StaticLoader};
pub use stream::{ReadStream, StreamBody};
pub use stub::StubHandle;
pub use validation::{InputSchema, MemberShape, ValidationError};
