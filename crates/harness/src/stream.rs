// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Readable-stream shape for intercepted invocations.

use futures::Stream;
use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Stream content declared at registration time.
///
/// A `StreamBody` is cloneable so one registration can serve many
/// invocations; each invocation gets a fresh [`ReadStream`] over the same
/// chunks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StreamBody {
    chunks: Vec<Vec<u8>>,
}

impl StreamBody {
    /// An empty body
    pub fn new() -> Self {
        Self::default()
    }

    /// A body with a single chunk
    pub fn once(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            chunks: vec![payload.into()],
        }
    }

    /// A body from explicit chunks
    pub fn from_chunks(chunks: Vec<Vec<u8>>) -> Self {
        Self { chunks }
    }

    /// Append a chunk
    pub fn chunk(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.chunks.push(payload.into());
        self
    }

    /// The declared chunks
    pub fn chunks(&self) -> &[Vec<u8>] {
        &self.chunks
    }
}

/// One-shot readable stream handed to the code under test.
///
/// Emits its chunks in order, then signals end-of-stream. Implements
/// [`futures::Stream`]; `next_chunk` and `collect_bytes` are conveniences
/// for test code that does not want to pull in stream combinators.
#[derive(Debug, Default)]
pub struct ReadStream {
    chunks: VecDeque<Vec<u8>>,
}

impl ReadStream {
    /// A stream that ends immediately
    pub fn empty() -> Self {
        Self::default()
    }

    /// A stream emitting one chunk
    pub fn once(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            chunks: VecDeque::from([payload.into()]),
        }
    }

    /// A fresh stream over a declared body
    pub fn from_body(body: &StreamBody) -> Self {
        Self {
            chunks: body.chunks().iter().cloned().collect(),
        }
    }

    /// Pull the next chunk, or `None` at end-of-stream
    pub async fn next_chunk(&mut self) -> Option<Vec<u8>> {
        self.chunks.pop_front()
    }

    /// Drain the stream into one buffer
    pub async fn collect_bytes(mut self) -> Vec<u8> {
        let mut buffer = Vec::new();
        while let Some(chunk) = self.next_chunk().await {
            buffer.extend_from_slice(&chunk);
        }
        buffer
    }

    /// True once every chunk has been emitted
    pub fn is_exhausted(&self) -> bool {
        self.chunks.is_empty()
    }
}

impl Stream for ReadStream {
    type Item = Vec<u8>;

    fn poll_next(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Poll::Ready(self.get_mut().chunks.pop_front())
    }
}

#[cfg(test)]
#[path = "stream_tests.rs"]
mod tests;
