// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Capture log implementation.

use crate::invocation::{CapturedInvocation, CapturedOutcome};
use parking_lot::Mutex;
use serde_json::Value;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;
use std::time::{Instant, SystemTime};

/// Capture log for recording intercepted invocations
pub struct CaptureLog {
    start: Instant,
    invocations: Arc<Mutex<Vec<CapturedInvocation>>>,
    file_writer: Option<Arc<Mutex<BufWriter<File>>>>,
}

impl CaptureLog {
    /// Create a new in-memory capture log
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            invocations: Arc::new(Mutex::new(Vec::new())),
            file_writer: None,
        }
    }

    /// Create a capture log that writes to a file (JSONL format)
    pub fn with_file(path: &Path) -> std::io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            start: Instant::now(),
            invocations: Arc::new(Mutex::new(Vec::new())),
            file_writer: Some(Arc::new(Mutex::new(BufWriter::new(file)))),
        })
    }

    /// Record a settled invocation
    pub fn record(&self, service: &str, method: &str, args: Vec<Value>, outcome: CapturedOutcome) {
        let mut invocations = self.invocations.lock();
        let seq = invocations.len() as u64;
        let invocation = CapturedInvocation {
            seq,
            timestamp: SystemTime::now(),
            elapsed: self.start.elapsed(),
            service: service.to_string(),
            method: method.to_string(),
            args,
            outcome,
        };

        invocations.push(invocation.clone());

        // Write to file if configured
        if let Some(ref writer) = self.file_writer {
            use std::io::Write;
            let mut w = writer.lock();
            if let Ok(json) = serde_json::to_string(&invocation) {
                let _ = writeln!(w, "{}", json);
                let _ = w.flush();
            }
        }
    }

    /// Get all captured invocations
    pub fn invocations(&self) -> Vec<CapturedInvocation> {
        self.invocations.lock().clone()
    }

    /// Get the last N invocations
    pub fn last(&self, n: usize) -> Vec<CapturedInvocation> {
        let all = self.invocations.lock();
        all.iter().rev().take(n).rev().cloned().collect()
    }

    /// Count invocations matching a predicate
    pub fn count<F: Fn(&CapturedInvocation) -> bool>(&self, pred: F) -> usize {
        self.invocations.lock().iter().filter(|i| pred(i)).count()
    }

    /// Find invocations of a given method
    pub fn find_by_method(&self, method: &str) -> Vec<CapturedInvocation> {
        self.invocations
            .lock()
            .iter()
            .filter(|i| i.method == method)
            .cloned()
            .collect()
    }

    /// Find invocations that settled successfully
    pub fn find_successes(&self) -> Vec<CapturedInvocation> {
        self.invocations
            .lock()
            .iter()
            .filter(|i| i.outcome.is_success())
            .cloned()
            .collect()
    }

    /// Find invocations that settled with a failure or validation rejection
    pub fn find_failures(&self) -> Vec<CapturedInvocation> {
        self.invocations
            .lock()
            .iter()
            .filter(|i| i.outcome.is_failure())
            .cloned()
            .collect()
    }

    /// Get the total number of invocations
    pub fn len(&self) -> usize {
        self.invocations.lock().len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.invocations.lock().is_empty()
    }

    /// Clear all recorded invocations
    pub fn clear(&self) {
        self.invocations.lock().clear();
    }
}

impl Default for CaptureLog {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CaptureLog {
    fn clone(&self) -> Self {
        Self {
            start: self.start,
            invocations: Arc::clone(&self.invocations),
            file_writer: self.file_writer.as_ref().map(Arc::clone),
        }
    }
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
