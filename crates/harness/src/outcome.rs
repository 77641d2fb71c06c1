// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Invocation outcomes: first-settle-wins memoization, completion step,
//! and the promise shape.
//!
//! Every intercepted invocation has at most one terminal [`Outcome`]. The
//! first settlement — whether it came from the fake's direct completion call
//! or from an adopted future — is frozen and observed by every later
//! consumer of the callback, promise, or stream, regardless of the order in
//! which those are examined.

use crate::validation::ValidationError;
use cloudless_capture::{CaptureLog, CapturedOutcome};
use futures::future::{BoxFuture, FutureExt, Shared};
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use thiserror::Error;
use tokio::sync::watch;

/// Terminal result of one intercepted invocation
pub type Outcome = Result<Value, MockFailure>;

/// Completion callback supplied by the code under test
pub type Callback = Arc<dyn Fn(&Outcome) + Send + Sync>;

/// Failure side of an [`Outcome`].
///
/// A fake-supplied failure is a legitimate emulation of the SDK's failure
/// path, not a harness defect; it is forwarded unchanged through whichever
/// protocol shape the tested code consumes.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum MockFailure {
    /// Parameter validation rejected the call before the fake ran
    #[error("parameter validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The fake completed with this failure value
    #[error("mocked failure: {0}")]
    Fake(Value),

    /// The harness could not observe the fake's settlement
    #[error("outcome unavailable: {0}")]
    Unavailable(String),
}

impl MockFailure {
    /// The failure as a JSON value, for assertions
    pub fn to_value(&self) -> Value {
        match self {
            MockFailure::Validation(err) => Value::String(err.to_string()),
            MockFailure::Fake(value) => value.clone(),
            MockFailure::Unavailable(message) => Value::String(message.clone()),
        }
    }
}

/// Memoization cell for an invocation's single terminal outcome.
///
/// The first `settle` freezes the outcome; later settles are ignored for
/// freezing purposes. Clones share the same cell.
#[derive(Clone)]
pub struct OutcomeCell {
    tx: Arc<watch::Sender<Option<Outcome>>>,
}

impl OutcomeCell {
    /// Create an unsettled cell
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    /// Freeze the outcome if the cell is still unsettled.
    ///
    /// Returns `true` when this call froze the outcome.
    pub fn settle(&self, outcome: Outcome) -> bool {
        let mut frozen = false;
        self.tx.send_if_modified(|slot| {
            if slot.is_none() {
                *slot = Some(outcome.clone());
                frozen = true;
                true
            } else {
                false
            }
        });
        frozen
    }

    /// The frozen outcome, if any
    pub fn get(&self) -> Option<Outcome> {
        self.tx.borrow().clone()
    }

    /// True once an outcome is frozen
    pub fn is_settled(&self) -> bool {
        self.tx.borrow().is_some()
    }

    /// Wait until an outcome is frozen
    pub async fn wait(&self) -> Outcome {
        let mut rx = self.tx.subscribe();
        loop {
            if let Some(outcome) = rx.borrow_and_update().clone() {
                return outcome;
            }
            if rx.changed().await.is_err() {
                return Err(MockFailure::Unavailable(
                    "outcome channel closed before settlement".to_string(),
                ));
            }
        }
    }
}

impl Default for OutcomeCell {
    fn default() -> Self {
        Self::new()
    }
}

/// Records the frozen outcome into a stub's capture log.
#[derive(Clone)]
pub(crate) struct Recorder {
    log: CaptureLog,
    service: String,
    method: String,
    args: Vec<Value>,
}

impl Recorder {
    pub(crate) fn new(log: CaptureLog, service: &str, method: &str, args: Vec<Value>) -> Self {
        Self {
            log,
            service: service.to_string(),
            method: method.to_string(),
            args,
        }
    }

    fn record(&self, outcome: &Outcome) {
        let captured = match outcome {
            Ok(value) => CapturedOutcome::Success {
                value: value.clone(),
            },
            Err(MockFailure::Validation(err)) => CapturedOutcome::ValidationRejected {
                message: err.to_string(),
            },
            Err(failure) => CapturedOutcome::Failure {
                error: failure.to_value(),
            },
        };
        self.log
            .record(&self.service, &self.method, self.args.clone(), captured);
    }
}

/// The internal completion step handed to handler fakes.
///
/// The first completion freezes the invocation's outcome and is recorded;
/// every completion, including post-freeze ones, is forwarded to the
/// caller's own callback when one was supplied.
#[derive(Clone)]
pub struct Completer {
    cell: OutcomeCell,
    callback: Option<Callback>,
    recorder: Option<Recorder>,
}

impl Completer {
    pub(crate) fn new(cell: OutcomeCell, callback: Option<Callback>, recorder: Option<Recorder>) -> Self {
        Self {
            cell,
            callback,
            recorder,
        }
    }

    /// Complete with a success value
    pub fn succeed(&self, value: Value) {
        self.complete(Ok(value));
    }

    /// Complete with a failure value
    pub fn fail(&self, error: Value) {
        self.complete(Err(MockFailure::Fake(error)));
    }

    /// Complete with a full outcome
    pub fn complete(&self, outcome: Outcome) {
        let frozen = self.cell.settle(outcome.clone());
        if frozen {
            if let Some(recorder) = &self.recorder {
                recorder.record(&outcome);
            }
        }
        if let Some(callback) = &self.callback {
            callback(&outcome);
        }
    }

    pub(crate) fn cell(&self) -> &OutcomeCell {
        &self.cell
    }
}

/// The promise shape of an invocation.
///
/// Clones observe the identical underlying settlement; `.promise()` on a
/// request hands out clones of one shared instance, so every access sees
/// the same result no matter when it happens relative to settlement.
#[derive(Clone)]
pub struct Promise {
    inner: Shared<BoxFuture<'static, Outcome>>,
}

impl Promise {
    pub(crate) fn new(future: BoxFuture<'static, Outcome>) -> Self {
        Self {
            inner: future.shared(),
        }
    }

    /// True when `other` is a clone of the same underlying promise
    pub fn same(&self, other: &Promise) -> bool {
        self.inner.ptr_eq(&other.inner)
    }
}

impl Future for Promise {
    type Output = Outcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner.poll_unpin(cx)
    }
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod tests;
