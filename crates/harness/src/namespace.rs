// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SDK namespace: a typed tree of services with interceptable seams.
//!
//! Construction goes through a swappable constructor slot per service
//! instead of reassigning members on a live object; the slot is the seam
//! the stub engine controls.

use crate::client::{Client, ClientConstructor, RealConstructor};
use crate::path::{self, PathError};
use crate::sdk::ServiceFactory;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Namespace-wide configuration defaults.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlobalConfig {
    /// Enables parameter validation for every client that does not carry a
    /// per-client override
    pub param_validation: bool,
}

pub(crate) type SharedGlobalConfig = Arc<RwLock<GlobalConfig>>;

/// One member of the namespace tree.
pub enum NamespaceEntry {
    /// A nested group of members (e.g. `DynamoDB` holding `DocumentClient`)
    Group(HashMap<String, NamespaceEntry>),
    /// A service with an interceptable constructor seam
    Service(Arc<ServiceSeam>),
}

/// The interceptable construction seam for one service.
///
/// Holds the pristine original constructor and the currently active one.
/// Swapping the active constructor is how the harness intercepts
/// instantiation without touching the factory the SDK registered.
pub struct ServiceSeam {
    path: String,
    original: Arc<dyn ClientConstructor>,
    active: RwLock<Arc<dyn ClientConstructor>>,
}

impl std::fmt::Debug for ServiceSeam {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceSeam")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl ServiceSeam {
    fn new(path: String, factory: Arc<dyn ServiceFactory>, global: SharedGlobalConfig) -> Self {
        let original: Arc<dyn ClientConstructor> = Arc::new(RealConstructor::new(factory, global));
        Self {
            path,
            original: Arc::clone(&original),
            active: RwLock::new(original),
        }
    }

    /// The dotted path this seam was registered under
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The currently active constructor
    pub fn constructor(&self) -> Arc<dyn ClientConstructor> {
        Arc::clone(&self.active.read())
    }

    /// The pristine constructor captured at registration
    pub fn original(&self) -> Arc<dyn ClientConstructor> {
        Arc::clone(&self.original)
    }

    /// True while an interceptor is installed
    pub fn is_intercepted(&self) -> bool {
        !Arc::ptr_eq(&*self.active.read(), &self.original)
    }

    pub(crate) fn swap(&self, replacement: Arc<dyn ClientConstructor>) -> Arc<dyn ClientConstructor> {
        std::mem::replace(&mut *self.active.write(), replacement)
    }

    pub(crate) fn reinstate(&self, constructor: Arc<dyn ClientConstructor>) {
        *self.active.write() = constructor;
    }
}

/// A cloud-SDK namespace object: dotted-path-resolvable service seams plus
/// global configuration.
pub struct SdkNamespace {
    entries: HashMap<String, NamespaceEntry>,
    config: SharedGlobalConfig,
}

impl SdkNamespace {
    /// Start building a namespace
    pub fn builder() -> NamespaceBuilder {
        NamespaceBuilder::new()
    }

    /// Construct a client for the service at `path` through its currently
    /// active constructor.
    pub fn client(&self, service: &str, options: Value) -> Result<Arc<Client>, PathError> {
        let seam = path::resolve(self, service)?;
        Ok(seam.constructor().construct(options))
    }

    /// Snapshot of the namespace-wide configuration
    pub fn global_config(&self) -> GlobalConfig {
        *self.config.read()
    }

    /// Toggle the namespace-wide parameter-validation default
    pub fn set_param_validation(&self, on: bool) {
        self.config.write().param_validation = on;
    }

    pub(crate) fn entries(&self) -> &HashMap<String, NamespaceEntry> {
        &self.entries
    }
}

/// Builder for [`SdkNamespace`].
pub struct NamespaceBuilder {
    entries: HashMap<String, NamespaceEntry>,
    config: SharedGlobalConfig,
}

impl NamespaceBuilder {
    /// An empty namespace
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            config: Arc::new(RwLock::new(GlobalConfig::default())),
        }
    }

    /// Set the namespace-wide parameter-validation default
    pub fn param_validation(self, on: bool) -> Self {
        self.config.write().param_validation = on;
        self
    }

    /// Register a service under a dotted path (`"S3"`,
    /// `"DynamoDB.DocumentClient"`). Groups are created as needed; an
    /// existing entry at the full path is replaced.
    pub fn service(mut self, path: &str, factory: Arc<dyn ServiceFactory>) -> Self {
        let segments: Vec<&str> = path.split('.').filter(|s| !s.is_empty()).collect();
        if segments.is_empty() {
            return self;
        }
        let seam = Arc::new(ServiceSeam::new(
            path.to_string(),
            factory,
            Arc::clone(&self.config),
        ));
        insert(&mut self.entries, &segments, seam);
        self
    }

    /// Finish building
    pub fn build(self) -> Arc<SdkNamespace> {
        Arc::new(SdkNamespace {
            entries: self.entries,
            config: self.config,
        })
    }
}

impl Default for NamespaceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn insert(entries: &mut HashMap<String, NamespaceEntry>, segments: &[&str], seam: Arc<ServiceSeam>) {
    let Some((head, rest)) = segments.split_first() else {
        return;
    };

    if rest.is_empty() {
        entries.insert(head.to_string(), NamespaceEntry::Service(seam));
        return;
    }

    let entry = entries
        .entry(head.to_string())
        .or_insert_with(|| NamespaceEntry::Group(HashMap::new()));
    if !matches!(entry, NamespaceEntry::Group(_)) {
        *entry = NamespaceEntry::Group(HashMap::new());
    }
    if let NamespaceEntry::Group(children) = entry {
        insert(children, rest, seam);
    }
}

#[cfg(test)]
#[path = "namespace_tests.rs"]
mod tests;
