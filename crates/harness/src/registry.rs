// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The service registry and registration API.
//!
//! A [`Harness`] owns every piece of mutable mocking state: which SDK is
//! being intercepted, the per-service registrations, and their stub
//! handles. It is an explicit context object — create one per test (or
//! share one across a suite) and tear it down with `restore`. A suite that
//! forgets to restore leaks interceptors into later tests sharing the same
//! harness; the design documents, and does not prevent, this hazard.

use crate::client::{Client, ClientConstructor};
use crate::error::MockError;
use crate::fake::Fake;
use crate::interceptor::{InterceptingConstructor, MethodInterceptor};
use crate::namespace::{SdkNamespace, ServiceSeam};
use crate::path;
use crate::sdk::SdkLoader;
use crate::stub::{StubEngine, StubHandle};
use cloudless_capture::{CaptureLog, CapturedInvocation};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Package path assumed when `set_sdk` was never called
pub const DEFAULT_PACKAGE: &str = "cloud-sdk";

/// Registration record for one mocked (service, method) pair.
///
/// Exists only while its parent [`ServiceRegistration`] exists. The fake is
/// fixed for the registration's lifetime; `remock` replaces the whole
/// record, never mutates it.
pub struct MethodRegistration {
    service: String,
    method: String,
    fake: Fake,
    log: CaptureLog,
    handle: Mutex<Option<Arc<StubHandle>>>,
}

impl MethodRegistration {
    fn new(service: &str, method: &str, fake: Fake) -> Self {
        Self {
            service: service.to_string(),
            method: method.to_string(),
            fake,
            log: CaptureLog::new(),
            handle: Mutex::new(None),
        }
    }

    /// The dotted service path
    pub fn service(&self) -> &str {
        &self.service
    }

    /// The mocked method name
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The registered fake
    pub fn fake(&self) -> &Fake {
        &self.fake
    }

    /// Capture log shared by every interceptor installed for this
    /// registration (it survives re-construction of the client)
    pub fn log(&self) -> &CaptureLog {
        &self.log
    }

    /// The current stub handle; `None` until the service constructor has
    /// fired and an interceptor is installed
    pub fn handle(&self) -> Option<Arc<StubHandle>> {
        self.handle.lock().clone()
    }

    /// Times the current interceptor was entered
    pub fn call_count(&self) -> u64 {
        self.handle().map_or(0, |handle| handle.call_count())
    }

    /// Settled invocations across this registration's lifetime
    pub fn calls(&self) -> Vec<CapturedInvocation> {
        self.log.invocations()
    }

    fn take_handle(&self) -> Option<Arc<StubHandle>> {
        self.handle.lock().take()
    }
}

/// Registration record for one mocked service.
pub struct ServiceRegistration {
    path: String,
    seam: Arc<ServiceSeam>,
    original: Arc<dyn ClientConstructor>,
    invoked: AtomicBool,
    client: Mutex<Option<Arc<Client>>>,
    methods: Mutex<HashMap<String, Arc<MethodRegistration>>>,
    constructor_stub: Mutex<Option<Arc<StubHandle>>>,
}

impl ServiceRegistration {
    /// The dotted service path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// True once the service constructor has fired since registration
    pub fn invoked(&self) -> bool {
        self.invoked.load(Ordering::Relaxed)
    }

    /// The most recently constructed client, if any
    pub fn client(&self) -> Option<Arc<Client>> {
        self.client.lock().clone()
    }

    /// The constructor captured when the service was first mocked
    pub fn original_constructor(&self) -> Arc<dyn ClientConstructor> {
        Arc::clone(&self.original)
    }

    /// The constructor stub's handle
    pub fn constructor_stub(&self) -> Option<Arc<StubHandle>> {
        self.constructor_stub.lock().clone()
    }

    /// The registration for one of this service's methods
    pub fn method(&self, name: &str) -> Option<Arc<MethodRegistration>> {
        self.methods.lock().get(name).cloned()
    }

    /// Names of currently registered methods
    pub fn method_names(&self) -> Vec<String> {
        self.methods.lock().keys().cloned().collect()
    }

    /// Called by the constructor interceptor for each new client: marks the
    /// service invoked, replaces the current client, and re-applies every
    /// registered method fake to the new instance.
    pub(crate) fn adopt_client(&self, client: &Arc<Client>) {
        self.invoked.store(true, Ordering::Relaxed);
        *self.client.lock() = Some(Arc::clone(client));
        for registration in self.methods.lock().values() {
            install_method(client, registration);
        }
    }
}

fn install_method(client: &Arc<Client>, registration: &MethodRegistration) {
    let interceptor = MethodInterceptor::new(
        &registration.service,
        &registration.method,
        registration.fake.clone(),
        registration.log.clone(),
    );
    let handle = StubEngine::stub_method(client, &registration.method, Arc::new(interceptor));
    *registration.handle.lock() = Some(Arc::new(handle));
}

fn release_service(registration: &ServiceRegistration) {
    for (_, method) in registration.methods.lock().drain() {
        if let Some(handle) = method.take_handle() {
            handle.restore();
        }
    }
    if let Some(handle) = registration.constructor_stub.lock().take() {
        handle.restore();
    }
    *registration.client.lock() = None;
}

/// The mocking context: registry, registration API, and teardown.
pub struct Harness {
    sdk: Mutex<Option<Arc<SdkNamespace>>>,
    loader: Mutex<Option<Arc<dyn SdkLoader>>>,
    package: Mutex<String>,
    services: Mutex<HashMap<String, Arc<ServiceRegistration>>>,
}

impl Harness {
    /// A harness with no SDK configured
    pub fn new() -> Self {
        Self {
            sdk: Mutex::new(None),
            loader: Mutex::new(None),
            package: Mutex::new(DEFAULT_PACKAGE.to_string()),
            services: Mutex::new(HashMap::new()),
        }
    }

    /// Select which SDK package to intercept. Takes effect for subsequent
    /// `mock` calls; the namespace is loaded lazily through the loader.
    pub fn set_sdk(&self, package: &str) {
        *self.package.lock() = package.to_string();
        *self.sdk.lock() = None;
    }

    /// Supply an already-built SDK namespace instead of a package path
    pub fn set_sdk_instance(&self, namespace: Arc<SdkNamespace>) {
        *self.sdk.lock() = Some(namespace);
    }

    /// Install the loader collaborator `set_sdk` resolves through
    pub fn set_loader(&self, loader: Arc<dyn SdkLoader>) {
        *self.loader.lock() = Some(loader);
    }

    /// The namespace currently being intercepted, if resolved
    pub fn sdk(&self) -> Option<Arc<SdkNamespace>> {
        self.sdk.lock().clone()
    }

    /// Register a fake for (service, method).
    ///
    /// First registration of a service captures its constructor and
    /// installs the constructor interceptor. If the constructor has already
    /// fired, the method interceptor is installed on the current client
    /// immediately; otherwise installation happens inside the constructor
    /// interceptor on the next construction.
    ///
    /// Mocking an already-mocked pair keeps the existing fake and returns
    /// the existing registration; use [`Harness::remock`] to replace
    /// behavior.
    pub fn mock(
        &self,
        service: &str,
        method: &str,
        fake: impl Into<Fake>,
    ) -> Result<Arc<MethodRegistration>, MockError> {
        let fake = fake.into();
        let registration = self.service_registration(service)?;

        let method_registration = {
            let mut methods = registration.methods.lock();
            if let Some(existing) = methods.get(method) {
                tracing::debug!(
                    service,
                    method,
                    "already mocked; keeping existing fake (use remock to replace)"
                );
                return Ok(Arc::clone(existing));
            }
            let fresh = Arc::new(MethodRegistration::new(service, method, fake));
            methods.insert(method.to_string(), Arc::clone(&fresh));
            fresh
        };

        self.apply_if_constructed(&registration, &method_registration);
        Ok(method_registration)
    }

    /// Replace the fake for an already-mocked (service, method) pair.
    ///
    /// The old interceptor is fully restored before the new registration is
    /// installed. Remocking a pair that was never mocked is a logged no-op
    /// returning `None`.
    pub fn remock(
        &self,
        service: &str,
        method: &str,
        fake: impl Into<Fake>,
    ) -> Option<Arc<MethodRegistration>> {
        let fake = fake.into();
        let registration = self.services.lock().get(service).cloned();
        let Some(registration) = registration else {
            tracing::warn!(service, method, "remock: service was never mocked");
            return None;
        };

        let fresh = {
            let mut methods = registration.methods.lock();
            let Some(previous) = methods.get(method).cloned() else {
                tracing::warn!(service, method, "remock: method was never mocked");
                return None;
            };
            if let Some(handle) = previous.take_handle() {
                handle.restore();
            }
            let fresh = Arc::new(MethodRegistration::new(service, method, fake));
            methods.insert(method.to_string(), Arc::clone(&fresh));
            fresh
        };

        self.apply_if_constructed(&registration, &fresh);
        Some(fresh)
    }

    /// Release every method and constructor stub and clear the registry
    pub fn restore(&self) {
        let drained: Vec<_> = {
            let mut services = self.services.lock();
            services.drain().collect()
        };
        for (_, registration) in drained {
            release_service(&registration);
        }
    }

    /// Release all stubs under one service and delete its registration.
    /// Logged no-op when the service was never mocked.
    pub fn restore_service(&self, service: &str) {
        let removed = self.services.lock().remove(service);
        match removed {
            Some(registration) => release_service(&registration),
            None => tracing::warn!(service, "restore: service was never mocked"),
        }
    }

    /// Release one method's stub and delete its sub-registration. Logged
    /// no-op when the pair was never mocked.
    pub fn restore_method(&self, service: &str, method: &str) {
        let registration = self.services.lock().get(service).cloned();
        let Some(registration) = registration else {
            tracing::warn!(service, method, "restore: service was never mocked");
            return;
        };

        let removed = registration.methods.lock().remove(method);
        match removed {
            Some(method_registration) => {
                if let Some(handle) = method_registration.take_handle() {
                    handle.restore();
                }
            }
            None => tracing::warn!(service, method, "restore: method was never mocked"),
        }
    }

    /// The registration record for a mocked service
    pub fn registration(&self, service: &str) -> Option<Arc<ServiceRegistration>> {
        self.services.lock().get(service).cloned()
    }

    /// Dotted paths of currently mocked services
    pub fn mocked_services(&self) -> Vec<String> {
        self.services.lock().keys().cloned().collect()
    }

    fn apply_if_constructed(
        &self,
        registration: &ServiceRegistration,
        method_registration: &MethodRegistration,
    ) {
        if registration.invoked() {
            if let Some(client) = registration.client() {
                install_method(&client, method_registration);
            }
        }
    }

    fn service_registration(&self, service: &str) -> Result<Arc<ServiceRegistration>, MockError> {
        let mut services = self.services.lock();
        if let Some(existing) = services.get(service) {
            return Ok(Arc::clone(existing));
        }

        let sdk = self.current_sdk()?;
        let seam = path::resolve(&sdk, service)?;
        let original = seam.original();

        let registration = Arc::new(ServiceRegistration {
            path: service.to_string(),
            seam: Arc::clone(&seam),
            original: Arc::clone(&original),
            invoked: AtomicBool::new(false),
            client: Mutex::new(None),
            methods: Mutex::new(HashMap::new()),
            constructor_stub: Mutex::new(None),
        });

        let calls = Arc::new(AtomicU64::new(0));
        let log = CaptureLog::new();
        let interceptor = InterceptingConstructor::new(
            Arc::downgrade(&registration),
            original,
            Arc::clone(&calls),
            log.clone(),
        );
        let handle =
            StubEngine::stub_constructor(&registration.seam, Arc::new(interceptor), calls, log);
        *registration.constructor_stub.lock() = Some(Arc::new(handle));

        services.insert(service.to_string(), Arc::clone(&registration));
        Ok(registration)
    }

    fn current_sdk(&self) -> Result<Arc<SdkNamespace>, MockError> {
        if let Some(namespace) = self.sdk.lock().clone() {
            return Ok(namespace);
        }
        let package = self.package.lock().clone();
        let loader = self.loader.lock().clone().ok_or(MockError::SdkNotConfigured)?;
        let namespace = loader.load(&package)?;
        *self.sdk.lock() = Some(Arc::clone(&namespace));
        Ok(namespace)
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
