// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Dotted-path resolution over the namespace tree.

use crate::namespace::{NamespaceEntry, SdkNamespace, ServiceSeam};
use std::sync::Arc;
use thiserror::Error;

/// Errors from resolving a dotted service path.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("empty service path")]
    Empty,

    #[error("service path '{path}' not found: no member named '{segment}'")]
    NotFound { path: String, segment: String },

    #[error("service path '{path}' names a group, not a service")]
    NotAService { path: String },
}

/// Resolve a dotted path (e.g. `"S3"` or `"DynamoDB.DocumentClient"`) to
/// the service seam it names.
pub fn resolve(namespace: &SdkNamespace, path: &str) -> Result<Arc<ServiceSeam>, PathError> {
    let segments: Vec<&str> = path.split('.').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        return Err(PathError::Empty);
    }

    let mut entries = namespace.entries();
    for (index, segment) in segments.iter().enumerate() {
        let entry = entries.get(*segment).ok_or_else(|| PathError::NotFound {
            path: path.to_string(),
            segment: segment.to_string(),
        })?;

        let last = index == segments.len() - 1;
        match entry {
            NamespaceEntry::Service(seam) if last => return Ok(Arc::clone(seam)),
            NamespaceEntry::Service(_) => {
                // Descending into a service: the remaining segment is not a member
                return Err(PathError::NotFound {
                    path: path.to_string(),
                    segment: segments[index + 1].to_string(),
                });
            }
            NamespaceEntry::Group(_) if last => {
                return Err(PathError::NotAService {
                    path: path.to_string(),
                });
            }
            NamespaceEntry::Group(children) => entries = children,
        }
    }

    Err(PathError::Empty)
}

#[cfg(test)]
#[path = "path_tests.rs"]
mod tests;
