//! # Closure-backed service (`ServiceFn`)
//!
//! [`ServiceFn`] implements [`Service`] out of plain closures, producing a
//! fresh future per lifecycle call. Handy for demos, tests, and services
//! whose lifecycle logic doesn't warrant a dedicated type.
//!
//! Hooks left unset default to `Ok(())`, matching the trait defaults.
//!
//! ## Example
//! ```rust
//! use servisor::{ServiceError, ServiceFn, ServiceRef};
//!
//! let db: ServiceRef = ServiceFn::new("db")
//!     .on_init(|| async { Ok(()) })
//!     .arc();
//!
//! let cache: ServiceRef = ServiceFn::new("cache")
//!     .depends_on(&db)
//!     .on_init(|| async { Err(ServiceError::new("warmup failed")) })
//!     .arc();
//!
//! assert_eq!(cache.name(), "cache");
//! assert_eq!(cache.dependencies().len(), 1);
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;

use crate::error::ServiceError;
use crate::services::service::{Service, ServiceId, ServiceRef};

/// Lifecycle hook; creates a fresh future per invocation.
type LifecycleHook = Box<dyn Fn() -> BoxFuture<'static, Result<(), ServiceError>> + Send + Sync>;

/// Closure-backed service implementation.
///
/// Built with chained setters, finished with [`ServiceFn::arc`]. If shared
/// state is needed between hooks, move an `Arc<...>` into each closure
/// explicitly.
pub struct ServiceFn {
    uuid: ServiceId,
    name: Cow<'static, str>,
    dependencies: Vec<ServiceRef>,
    on_init: Option<LifecycleHook>,
    on_ready: Option<LifecycleHook>,
    on_destroy: Option<LifecycleHook>,
}

impl ServiceFn {
    /// Creates a new closure-backed service with a generated id.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            uuid: ServiceId::generate(),
            name: name.into(),
            dependencies: Vec::new(),
            on_init: None,
            on_ready: None,
            on_destroy: None,
        }
    }

    /// Declares a dependency on another service.
    ///
    /// May be called multiple times; declaration order is preserved.
    pub fn depends_on(mut self, dependency: &ServiceRef) -> Self {
        self.dependencies.push(Arc::clone(dependency));
        self
    }

    /// Sets the `init` hook.
    pub fn on_init<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), ServiceError>> + Send + 'static,
    {
        self.on_init = Some(Box::new(move || Box::pin(hook())));
        self
    }

    /// Sets the `ready` hook.
    pub fn on_ready<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), ServiceError>> + Send + 'static,
    {
        self.on_ready = Some(Box::new(move || Box::pin(hook())));
        self
    }

    /// Sets the `destroy` hook.
    pub fn on_destroy<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), ServiceError>> + Send + 'static,
    {
        self.on_destroy = Some(Box::new(move || Box::pin(hook())));
        self
    }

    /// Finishes the builder, returning a shared handle (`Arc<dyn Service>`).
    pub fn arc(self) -> ServiceRef {
        Arc::new(self)
    }
}

#[async_trait]
impl Service for ServiceFn {
    fn uuid(&self) -> ServiceId {
        self.uuid
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn dependencies(&self) -> Vec<ServiceRef> {
        self.dependencies.clone()
    }

    async fn init(&self) -> Result<(), ServiceError> {
        match &self.on_init {
            Some(hook) => hook().await,
            None => Ok(()),
        }
    }

    async fn ready(&self) -> Result<(), ServiceError> {
        match &self.on_ready {
            Some(hook) => hook().await,
            None => Ok(()),
        }
    }

    async fn destroy(&self) -> Result<(), ServiceError> {
        match &self.on_destroy {
            Some(hook) => hook().await,
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_identity_and_dependencies() {
        let dep = ServiceFn::new("storage").arc();
        let svc = ServiceFn::new("indexer").depends_on(&dep);

        assert_eq!(svc.name(), "indexer");
        assert_eq!(svc.dependencies().len(), 1);
        assert_eq!(svc.dependencies()[0].uuid(), dep.uuid());
        assert_ne!(svc.uuid(), dep.uuid());
    }

    #[tokio::test]
    async fn test_unset_hooks_default_to_ok() {
        let svc = ServiceFn::new("passive").arc();
        assert!(svc.init().await.is_ok());
        assert!(svc.ready().await.is_ok());
        assert!(svc.destroy().await.is_ok());
    }

    #[tokio::test]
    async fn test_hooks_run_and_report_errors() {
        let calls: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));
        let svc = {
            let init_calls = calls.clone();
            let destroy_calls = calls.clone();
            ServiceFn::new("recorder")
                .on_init(move || {
                    let calls = init_calls.clone();
                    async move {
                        calls.lock().unwrap().push("init");
                        Ok(())
                    }
                })
                .on_ready(|| async { Err(ServiceError::new("not yet")) })
                .on_destroy(move || {
                    let calls = destroy_calls.clone();
                    async move {
                        calls.lock().unwrap().push("destroy");
                        Ok(())
                    }
                })
                .arc()
        };

        assert!(svc.init().await.is_ok());
        assert!(svc.ready().await.is_err());
        assert!(svc.destroy().await.is_ok());
        assert_eq!(*calls.lock().unwrap(), vec!["init", "destroy"]);
    }
}
