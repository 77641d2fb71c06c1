// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Invocation capture and recording for test assertions.
//!
//! This crate provides utilities for capturing and recording intercepted
//! SDK invocations, useful for inspecting and debugging cloudless stubs.

mod duration_serde;
mod invocation;
mod log;

pub use invocation::{CapturedInvocation, CapturedOutcome};
pub use log::CaptureLog;
