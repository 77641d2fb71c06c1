// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The request-like object returned by every intercepted invocation.
//!
//! One `MockRequest` exposes a single frozen outcome through all the call
//! shapes the real SDK request supports: the caller's completion callback
//! (already wired by the interceptor), `promise()`, `create_read_stream()`,
//! and the chainable `on()`/`send()` event-emitter stubs.

use crate::outcome::{Completer, Outcome, Promise};
use crate::stream::ReadStream;
use futures::future::BoxFuture;
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::{Arc, OnceLock};

/// Handle to one intercepted invocation.
pub struct MockRequest {
    completer: Completer,
    promise: OnceLock<Promise>,
    adopted_stream: Mutex<Option<ReadStream>>,
    pending: Arc<Mutex<Option<BoxFuture<'static, Outcome>>>>,
    fallback_payload: Option<Vec<u8>>,
}

impl MockRequest {
    pub(crate) fn new(
        completer: Completer,
        adopted_stream: Option<ReadStream>,
        pending: Option<BoxFuture<'static, Outcome>>,
        fallback_payload: Option<Vec<u8>>,
    ) -> Self {
        Self {
            completer,
            promise: OnceLock::new(),
            adopted_stream: Mutex::new(adopted_stream),
            pending: Arc::new(Mutex::new(pending)),
            fallback_payload,
        }
    }

    /// The promise shape of this invocation.
    ///
    /// Exactly one promise is constructed, on first access; every later
    /// access returns the identical promise (`Promise::same` holds). Its
    /// settlement matches the first completion regardless of access order.
    pub fn promise(&self) -> Promise {
        self.promise
            .get_or_init(|| {
                let completer = self.completer.clone();
                let pending = Arc::clone(&self.pending);
                Promise::new(Box::pin(async move {
                    let adopted = pending.lock().take();
                    if let Some(future) = adopted {
                        let outcome = future.await;
                        completer.complete(outcome);
                    }
                    completer.cell().wait().await
                }))
            })
            .clone()
    }

    /// The frozen outcome, if the invocation has settled
    pub fn outcome(&self) -> Option<Outcome> {
        self.completer.cell().get()
    }

    /// True once the outcome is frozen
    pub fn is_settled(&self) -> bool {
        self.completer.cell().is_settled()
    }

    /// The readable-stream shape of this invocation.
    ///
    /// Returns the stream the fake supplied when there is one (taken once;
    /// a stream cannot be re-read). Otherwise synthesizes a one-shot stream
    /// over the fake's payload, or over the resolved value when it is
    /// payload-like (a string); anything else yields an empty stream.
    pub fn create_read_stream(&self) -> ReadStream {
        if let Some(stream) = self.adopted_stream.lock().take() {
            return stream;
        }

        if let Some(payload) = &self.fallback_payload {
            return ReadStream::once(payload.clone());
        }

        match self.outcome() {
            Some(Ok(Value::String(text))) => ReadStream::once(text.into_bytes()),
            _ => ReadStream::empty(),
        }
    }

    /// Event-subscription stub: accepts and ignores the event name,
    /// preserving the chainable request shape
    pub fn on(&self, _event: &str) -> &Self {
        self
    }

    /// Send stub: accepted and ignored; the invocation was already made
    pub fn send(&self) -> &Self {
        self
    }
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
