// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Constructed client surface.
//!
//! A [`Client`] wraps the raw SDK client together with a per-instance
//! interceptor table. Mocked methods route through their interceptor;
//! everything else delegates to the SDK's real `dispatch`, so call shape is
//! uniform whether or not a method is mocked.

use crate::interceptor::MethodInterceptor;
use crate::namespace::SharedGlobalConfig;
use crate::outcome::{Callback, Completer, Outcome, OutcomeCell};
use crate::request::MockRequest;
use crate::sdk::{ClientConfig, ServiceApi, ServiceClient, ServiceFactory};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Constructs a [`Client`] for a service. The active constructor of a
/// service seam implements this; so does the harness's interceptor.
pub trait ClientConstructor: Send + Sync {
    /// Construct a client from options
    fn construct(&self, options: Value) -> Arc<Client>;
}

/// The pristine constructor: builds the raw SDK client and wraps it with an
/// empty interceptor table.
pub(crate) struct RealConstructor {
    factory: Arc<dyn ServiceFactory>,
    global: SharedGlobalConfig,
}

impl RealConstructor {
    pub(crate) fn new(factory: Arc<dyn ServiceFactory>, global: SharedGlobalConfig) -> Self {
        Self { factory, global }
    }
}

impl ClientConstructor for RealConstructor {
    fn construct(&self, options: Value) -> Arc<Client> {
        let inner = self.factory.construct(options);
        Arc::new(Client::new(inner, Arc::clone(&self.global)))
    }
}

/// A constructed service client, possibly carrying method interceptors.
pub struct Client {
    inner: Arc<dyn ServiceClient>,
    global: SharedGlobalConfig,
    interceptors: Mutex<HashMap<String, Arc<MethodInterceptor>>>,
}

impl Client {
    pub(crate) fn new(inner: Arc<dyn ServiceClient>, global: SharedGlobalConfig) -> Self {
        Self {
            inner,
            global,
            interceptors: Mutex::new(HashMap::new()),
        }
    }

    /// The service's name
    pub fn service_name(&self) -> &str {
        self.inner.service_name()
    }

    /// The client's configuration object
    pub fn config(&self) -> &ClientConfig {
        self.inner.config()
    }

    /// The service's API description
    pub fn api(&self) -> &ServiceApi {
        self.inner.api()
    }

    /// Invoke a method without a completion callback
    pub fn invoke(&self, method: &str, params: Value) -> MockRequest {
        self.invoke_args(method, vec![params], None)
    }

    /// Invoke a method with a completion callback
    pub fn invoke_with(
        &self,
        method: &str,
        params: Value,
        callback: impl Fn(&Outcome) + Send + Sync + 'static,
    ) -> MockRequest {
        self.invoke_args(method, vec![params], Some(Arc::new(callback)))
    }

    /// Invoke a method with explicit positional arguments and an optional
    /// completion callback. This is the normalized entry every other
    /// invocation shape reduces to.
    pub fn invoke_args(
        &self,
        method: &str,
        args: Vec<Value>,
        callback: Option<Callback>,
    ) -> MockRequest {
        let interceptor = self.interceptors.lock().get(method).map(Arc::clone);
        match interceptor {
            Some(interceptor) => interceptor.intercept(self, args, callback),
            None => {
                let params = args.last().cloned().unwrap_or(Value::Null);
                let outcome = self.inner.dispatch(method, params);
                let completer = Completer::new(OutcomeCell::new(), callback, None);
                completer.complete(outcome);
                MockRequest::new(completer, None, None, None)
            }
        }
    }

    /// True while an interceptor is installed for `method`
    pub fn is_intercepted(&self, method: &str) -> bool {
        self.interceptors.lock().contains_key(method)
    }

    pub(crate) fn param_validation_enabled(&self) -> bool {
        self.inner
            .config()
            .param_validation
            .unwrap_or_else(|| self.global.read().param_validation)
    }

    pub(crate) fn install(
        &self,
        method: &str,
        interceptor: Arc<MethodInterceptor>,
    ) -> Option<Arc<MethodInterceptor>> {
        self.interceptors
            .lock()
            .insert(method.to_string(), interceptor)
    }

    pub(crate) fn uninstall(&self, method: &str) -> Option<Arc<MethodInterceptor>> {
        self.interceptors.lock().remove(method)
    }

    pub(crate) fn reinstate(&self, method: &str, previous: Option<Arc<MethodInterceptor>>) {
        let mut interceptors = self.interceptors.lock();
        match previous {
            Some(interceptor) => {
                interceptors.insert(method.to_string(), interceptor);
            }
            None => {
                interceptors.remove(method);
            }
        }
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
