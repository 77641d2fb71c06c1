// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Harness-level errors.
//!
//! These cover registration-time failures only. Failures that flow through
//! an intercepted invocation (validation rejections, fake-supplied errors)
//! are carried by [`crate::outcome::MockFailure`] instead, so the code under
//! test sees them through the same channel the real SDK would use.

use crate::path::PathError;
use thiserror::Error;

/// Errors that can occur when registering mocks.
#[derive(Debug, Error)]
pub enum MockError {
    /// No SDK namespace is available to intercept.
    #[error("no SDK configured: call set_sdk_instance, or set_loader and set_sdk, first")]
    SdkNotConfigured,

    /// The loader does not know the requested package.
    #[error("unknown SDK package '{0}'")]
    UnknownPackage(String),

    /// Dotted service path did not resolve to a service.
    #[error(transparent)]
    Path(#[from] PathError),
}
