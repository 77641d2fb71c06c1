// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SDK collaborator surface.
//!
//! The real SDK is an opaque dependency: the harness only consumes the
//! traits here to construct clients, discover input-validation rules, and
//! delegate un-mocked methods to real behavior. Anything that implements
//! these traits can be intercepted.

use crate::error::MockError;
use crate::namespace::SdkNamespace;
use crate::outcome::Outcome;
use crate::validation::InputSchema;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Per-client configuration the harness observes.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    /// Per-client parameter-validation override; `None` falls back to the
    /// namespace's global setting
    pub param_validation: Option<bool>,

    /// Raw construction options, kept for inspection
    pub options: Value,
}

impl ClientConfig {
    /// Config with no overrides
    pub fn new() -> Self {
        Self::default()
    }

    /// Config derived from construction options.
    ///
    /// Reads a boolean `paramValidation` member when present, the way the
    /// real SDK's configuration object carries it.
    pub fn from_options(options: Value) -> Self {
        let param_validation = options.get("paramValidation").and_then(Value::as_bool);
        Self {
            param_validation,
            options,
        }
    }

    /// Set the per-client validation flag
    pub fn with_param_validation(mut self, on: bool) -> Self {
        self.param_validation = Some(on);
        self
    }
}

/// One operation in a service's API description.
#[derive(Clone, Debug, Default)]
pub struct Operation {
    /// Declared input schema, when the service publishes one
    pub input: Option<InputSchema>,
}

/// A service's API description: the structured per-operation table plus a
/// direct method-keyed fallback table.
#[derive(Clone, Debug, Default)]
pub struct ServiceApi {
    operations: HashMap<String, Operation>,
    method_inputs: HashMap<String, InputSchema>,
}

impl ServiceApi {
    /// An empty API description (no validation rules)
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an operation with an optional input schema
    pub fn operation(mut self, name: &str, input: Option<InputSchema>) -> Self {
        self.operations.insert(name.to_string(), Operation { input });
        self
    }

    /// Declare an input schema in the direct method-keyed table
    pub fn method_input(mut self, name: &str, schema: InputSchema) -> Self {
        self.method_inputs.insert(name.to_string(), schema);
        self
    }

    /// Look up the input schema for a method: the operation table first,
    /// then the direct method-keyed table.
    pub fn input_for(&self, method: &str) -> Option<&InputSchema> {
        self.operations
            .get(method)
            .and_then(|operation| operation.input.as_ref())
            .or_else(|| self.method_inputs.get(method))
    }
}

/// A constructed SDK client, as the real SDK exposes it.
pub trait ServiceClient: Send + Sync {
    /// The service's name for diagnostics
    fn service_name(&self) -> &str;

    /// The client's configuration object
    fn config(&self) -> &ClientConfig;

    /// The service's API description
    fn api(&self) -> &ServiceApi;

    /// Real (network-calling) behavior; un-mocked methods delegate here
    fn dispatch(&self, method: &str, params: Value) -> Outcome;
}

/// Constructs raw SDK clients. This is what a service registers with the
/// namespace; interception wraps it, never replaces it.
pub trait ServiceFactory: Send + Sync {
    /// Construct a client from options
    fn construct(&self, options: Value) -> Arc<dyn ServiceClient>;
}

/// Maps an installed SDK package path to its namespace object.
pub trait SdkLoader: Send + Sync {
    /// Load the namespace for a package path
    fn load(&self, package: &str) -> Result<Arc<SdkNamespace>, MockError>;
}

/// Loader over a fixed set of namespaces, for in-process use.
#[derive(Default)]
pub struct StaticLoader {
    packages: HashMap<String, Arc<SdkNamespace>>,
}

impl StaticLoader {
    /// An empty loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a namespace under a package path
    pub fn package(mut self, name: &str, namespace: Arc<SdkNamespace>) -> Self {
        self.packages.insert(name.to_string(), namespace);
        self
    }
}

impl SdkLoader for StaticLoader {
    fn load(&self, package: &str) -> Result<Arc<SdkNamespace>, MockError> {
        self.packages
            .get(package)
            .cloned()
            .ok_or_else(|| MockError::UnknownPackage(package.to_string()))
    }
}

#[cfg(test)]
#[path = "sdk_tests.rs"]
mod tests;
