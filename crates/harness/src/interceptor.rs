// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Constructor and method interceptors.
//!
//! The constructor interceptor sits in a service seam: it calls the
//! captured original constructor, records the new client with the
//! registration, and re-applies every registered method fake to it. The
//! method interceptor is the multi-protocol adapter: one fake, observable
//! through callback, promise, and stream shapes, with a single frozen
//! outcome per invocation.

use crate::client::{Client, ClientConstructor};
use crate::fake::{Fake, FakeCall, HandlerReturn};
use crate::outcome::{Callback, Completer, MockFailure, OutcomeCell, Recorder};
use crate::registry::ServiceRegistration;
use crate::request::MockRequest;
use crate::stream::ReadStream;
use cloudless_capture::{CaptureLog, CapturedOutcome};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

/// Per-(client, method) adapter around one registered fake.
pub struct MethodInterceptor {
    service: String,
    method: String,
    fake: Fake,
    log: CaptureLog,
    calls: Arc<AtomicU64>,
}

impl MethodInterceptor {
    pub(crate) fn new(service: &str, method: &str, fake: Fake, log: CaptureLog) -> Self {
        Self {
            service: service.to_string(),
            method: method.to_string(),
            fake,
            log,
            calls: Arc::new(AtomicU64::new(0)),
        }
    }

    pub(crate) fn service(&self) -> &str {
        &self.service
    }

    pub(crate) fn log(&self) -> &CaptureLog {
        &self.log
    }

    pub(crate) fn calls_counter(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.calls)
    }

    /// Run one invocation through the adapter.
    ///
    /// Validation, when enabled and a schema is declared, short-circuits:
    /// the callback sees the validation error synchronously and the fake is
    /// never invoked. Otherwise the fake runs and whichever settlement
    /// happens first — direct completion or an adopted future — freezes the
    /// outcome for every protocol shape.
    pub(crate) fn intercept(
        &self,
        client: &Client,
        args: Vec<Value>,
        callback: Option<Callback>,
    ) -> MockRequest {
        self.calls.fetch_add(1, Ordering::Relaxed);

        let recorder = Recorder::new(self.log.clone(), &self.service, &self.method, args.clone());
        let completer = Completer::new(OutcomeCell::new(), callback, Some(recorder));

        if client.param_validation_enabled() {
            if let Some(schema) = client.api().input_for(&self.method) {
                let params = args.last().cloned().unwrap_or(Value::Null);
                if let Err(error) = schema.validate(&params) {
                    completer.complete(Err(MockFailure::Validation(error)));
                    return MockRequest::new(completer, None, None, None);
                }
            }
        }

        let mut adopted_stream = None;
        let mut pending = None;
        let mut fallback_payload = None;

        match &self.fake {
            Fake::Literal(value) => completer.succeed(value.clone()),
            Fake::Payload(bytes) => {
                fallback_payload = Some(bytes.clone());
                completer.succeed(payload_value(bytes));
            }
            Fake::Stream(body) => {
                adopted_stream = Some(ReadStream::from_body(body));
                completer.succeed(Value::Null);
            }
            Fake::Handler(handler) => {
                let call = FakeCall::new(args, completer.clone());
                match handler(call) {
                    HandlerReturn::Done => {}
                    HandlerReturn::Future(future) => {
                        // Adopt only if no direct completion froze the outcome
                        if !completer.cell().is_settled() {
                            match tokio::runtime::Handle::try_current() {
                                Ok(handle) => {
                                    let driver = completer.clone();
                                    handle.spawn(async move {
                                        let outcome = future.await;
                                        driver.complete(outcome);
                                    });
                                }
                                // No runtime: the promise accessor drives it
                                Err(_) => pending = Some(future),
                            }
                        }
                    }
                    HandlerReturn::Stream(stream) => {
                        adopted_stream = Some(stream);
                        if !completer.cell().is_settled() {
                            completer.succeed(Value::Null);
                        }
                    }
                }
            }
        }

        MockRequest::new(completer, adopted_stream, pending, fallback_payload)
    }
}

/// Success value for a payload fake: the text when the bytes are UTF-8,
/// null otherwise (the stream shape still carries the exact bytes).
fn payload_value(bytes: &[u8]) -> Value {
    match std::str::from_utf8(bytes) {
        Ok(text) => Value::String(text.to_string()),
        Err(_) => Value::Null,
    }
}

/// Replaces a service's constructor while it is registered.
pub(crate) struct InterceptingConstructor {
    registration: Weak<ServiceRegistration>,
    original: Arc<dyn ClientConstructor>,
    calls: Arc<AtomicU64>,
    log: CaptureLog,
}

impl InterceptingConstructor {
    pub(crate) fn new(
        registration: Weak<ServiceRegistration>,
        original: Arc<dyn ClientConstructor>,
        calls: Arc<AtomicU64>,
        log: CaptureLog,
    ) -> Self {
        Self {
            registration,
            original,
            calls,
            log,
        }
    }
}

impl ClientConstructor for InterceptingConstructor {
    fn construct(&self, options: Value) -> Arc<Client> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        let client = self.original.construct(options.clone());

        if let Some(registration) = self.registration.upgrade() {
            registration.adopt_client(&client);
            self.log.record(
                registration.path(),
                "new",
                vec![options],
                CapturedOutcome::Success { value: Value::Null },
            );
        }

        client
    }
}

#[cfg(test)]
#[path = "interceptor_tests.rs"]
mod tests;
