// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Captured invocation types.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::{Duration, SystemTime};

/// One intercepted SDK invocation, as observed by a stub.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CapturedInvocation {
    /// Sequence number within the owning log (0-based)
    pub seq: u64,

    /// Wall-clock time the invocation settled
    pub timestamp: SystemTime,

    /// Time since the log was created, in milliseconds
    #[serde(with = "crate::duration_serde")]
    pub elapsed: Duration,

    /// Dotted service path (e.g. `"S3"` or `"DynamoDB.DocumentClient"`)
    pub service: String,

    /// Method name the caller invoked
    pub method: String,

    /// Positional arguments the caller supplied (trailing callback excluded)
    pub args: Vec<Value>,

    /// How the invocation settled
    pub outcome: CapturedOutcome,
}

/// Terminal result of a captured invocation.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CapturedOutcome {
    /// The fake completed with a success value
    Success { value: Value },
    /// The fake completed with a failure value
    Failure { error: Value },
    /// Parameter validation rejected the call before the fake ran
    ValidationRejected { message: String },
}

impl CapturedOutcome {
    /// True for [`CapturedOutcome::Success`]
    pub fn is_success(&self) -> bool {
        matches!(self, CapturedOutcome::Success { .. })
    }

    /// True for [`CapturedOutcome::Failure`] or [`CapturedOutcome::ValidationRejected`]
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }
}

#[cfg(test)]
#[path = "invocation_tests.rs"]
mod tests;
