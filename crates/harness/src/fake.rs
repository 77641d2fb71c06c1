// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Caller-supplied fake behavior, tagged by outcome kind.
//!
//! The original mocking surface inferred a fake's kind by probing its shape
//! at every access; here the kind is declared at registration time.

use crate::outcome::{Completer, Outcome};
use crate::stream::{ReadStream, StreamBody};
use futures::future::BoxFuture;
use serde_json::Value;
use std::sync::Arc;

/// Handler signature for callable fakes
pub type HandlerFn = dyn Fn(FakeCall) -> HandlerReturn + Send + Sync;

/// Stand-in behavior for one mocked method.
#[derive(Clone)]
pub enum Fake {
    /// A plain value delivered as the success outcome
    Literal(Value),

    /// A byte or string payload: the success value, and the stream source
    /// when the caller asks for the readable-stream shape
    Payload(Vec<u8>),

    /// A declared stream body; each invocation reads a fresh stream over it
    Stream(StreamBody),

    /// A callable invoked with the caller's arguments plus the completion
    /// step; may complete directly, return a future, or return a stream
    Handler(Arc<HandlerFn>),
}

impl Fake {
    /// A literal success value
    pub fn literal(value: impl Into<Value>) -> Self {
        Fake::Literal(value.into())
    }

    /// A byte or string payload
    pub fn payload(payload: impl Into<Vec<u8>>) -> Self {
        Fake::Payload(payload.into())
    }

    /// A declared stream body
    pub fn stream(body: StreamBody) -> Self {
        Fake::Stream(body)
    }

    /// A full handler receiving the [`FakeCall`]
    pub fn handler(f: impl Fn(FakeCall) -> HandlerReturn + Send + Sync + 'static) -> Self {
        Fake::Handler(Arc::new(f))
    }

    /// A handler over the common `(params, completion step)` shape.
    ///
    /// The closure must call `done.succeed(..)` or `done.fail(..)` (possibly
    /// later, from wherever it stashed the completer).
    pub fn from_fn(f: impl Fn(Value, Completer) + Send + Sync + 'static) -> Self {
        Self::handler(move |call| {
            let completer = call.completer().clone();
            f(call.params(), completer);
            HandlerReturn::Done
        })
    }

    /// The declared kind, for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Fake::Literal(_) => "literal",
            Fake::Payload(_) => "payload",
            Fake::Stream(_) => "stream",
            Fake::Handler(_) => "handler",
        }
    }
}

impl std::fmt::Debug for Fake {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Fake::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Fake::Payload(bytes) => f.debug_tuple("Payload").field(&bytes.len()).finish(),
            Fake::Stream(body) => f.debug_tuple("Stream").field(body).finish(),
            Fake::Handler(_) => f.debug_struct("Handler").finish_non_exhaustive(),
        }
    }
}

impl From<Value> for Fake {
    fn from(value: Value) -> Self {
        Fake::Literal(value)
    }
}

impl From<&str> for Fake {
    fn from(payload: &str) -> Self {
        Fake::Payload(payload.as_bytes().to_vec())
    }
}

impl From<String> for Fake {
    fn from(payload: String) -> Self {
        Fake::Payload(payload.into_bytes())
    }
}

impl From<Vec<u8>> for Fake {
    fn from(payload: Vec<u8>) -> Self {
        Fake::Payload(payload)
    }
}

impl From<StreamBody> for Fake {
    fn from(body: StreamBody) -> Self {
        Fake::Stream(body)
    }
}

/// One invocation as a handler fake sees it: the caller's positional
/// arguments (trailing callback already stripped) plus the completion step.
pub struct FakeCall {
    args: Vec<Value>,
    completer: Completer,
}

impl FakeCall {
    pub(crate) fn new(args: Vec<Value>, completer: Completer) -> Self {
        Self { args, completer }
    }

    /// All positional arguments
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// The request params (the last positional argument, or null)
    pub fn params(&self) -> Value {
        self.args.last().cloned().unwrap_or(Value::Null)
    }

    /// The completion step for this invocation
    pub fn completer(&self) -> &Completer {
        &self.completer
    }
}

/// What a handler fake chose to do.
pub enum HandlerReturn {
    /// The handler completed (or will complete) through the completion step
    Done,

    /// Adopt this future as the pending outcome source, unless a direct
    /// completion already froze the outcome
    Future(BoxFuture<'static, Outcome>),

    /// Adopt this stream as the readable-stream shape of the invocation
    Stream(ReadStream),
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
