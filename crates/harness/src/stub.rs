// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The stubbing collaborator: installs interceptors and hands back restore
//! handles.
//!
//! The engine only swaps seams and interceptor-table entries; what gets
//! installed (and with which fake behavior) is decided by the registry. A
//! [`StubHandle`] is the spy surface: call counter, capture log, and an
//! idempotent one-shot restore.

use crate::client::{Client, ClientConstructor};
use crate::interceptor::MethodInterceptor;
use crate::namespace::ServiceSeam;
use cloudless_capture::{CaptureLog, CapturedInvocation};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

type RestoreFn = Box<dyn FnOnce() + Send>;

/// Handle to one installed stub.
pub struct StubHandle {
    target: String,
    calls: Arc<AtomicU64>,
    log: CaptureLog,
    restore: Mutex<Option<RestoreFn>>,
}

impl StubHandle {
    fn new(target: String, calls: Arc<AtomicU64>, log: CaptureLog, restore: RestoreFn) -> Self {
        Self {
            target,
            calls,
            log,
            restore: Mutex::new(Some(restore)),
        }
    }

    /// The stubbed member, for diagnostics (e.g. `"S3.getObject"`)
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Number of times the interceptor was entered
    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }

    /// Settled invocations observed through this stub
    pub fn calls(&self) -> Vec<CapturedInvocation> {
        self.log.invocations()
    }

    /// The stub's capture log
    pub fn log(&self) -> &CaptureLog {
        &self.log
    }

    /// Put the original member back. Returns `false` when the stub was
    /// already restored; restoring twice is a logged no-op.
    pub fn restore(&self) -> bool {
        match self.restore.lock().take() {
            Some(restore) => {
                restore();
                true
            }
            None => {
                tracing::warn!(stub = %self.target, "stub already restored");
                false
            }
        }
    }

    /// True once `restore` has run
    pub fn is_restored(&self) -> bool {
        self.restore.lock().is_none()
    }
}

/// Installs interceptors behind restore handles.
pub struct StubEngine;

impl StubEngine {
    /// Swap a service seam's active constructor for `replacement`.
    pub(crate) fn stub_constructor(
        seam: &Arc<ServiceSeam>,
        replacement: Arc<dyn ClientConstructor>,
        calls: Arc<AtomicU64>,
        log: CaptureLog,
    ) -> StubHandle {
        let previous = seam.swap(replacement);
        let restore_seam = Arc::clone(seam);
        let target = format!("{}::new", seam.path());
        tracing::debug!(stub = %target, "constructor stub installed");
        StubHandle::new(
            target,
            calls,
            log,
            Box::new(move || restore_seam.reinstate(previous)),
        )
    }

    /// Install a method interceptor on a live client.
    pub(crate) fn stub_method(
        client: &Arc<Client>,
        method: &str,
        interceptor: Arc<MethodInterceptor>,
    ) -> StubHandle {
        let calls = interceptor.calls_counter();
        let log = interceptor.log().clone();
        let target = format!("{}.{}", interceptor.service(), method);
        let previous = client.install(method, interceptor);

        let restore_client = Arc::clone(client);
        let restore_method = method.to_string();
        tracing::debug!(stub = %target, "method stub installed");
        StubHandle::new(
            target,
            calls,
            log,
            Box::new(move || restore_client.reinstate(&restore_method, previous)),
        )
    }
}

#[cfg(test)]
#[path = "stub_tests.rs"]
mod tests;
