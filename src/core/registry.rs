//! # Service registry - id-keyed store with registration order.
//!
//! [`Registry`] holds every service instance known to the process,
//! independent of initialization state. It preserves insertion order (used
//! for the readiness pass and as the enumeration order for startup roots)
//! alongside the id-keyed map used for lookups.
//!
//! ## Rules
//! - Registration happens before startup begins; the map is read-only during
//!   an active startup/shutdown pass (contract, not enforced).
//! - Duplicate ids are rejected with
//!   [`RuntimeError::AlreadyRegistered`](crate::RuntimeError::AlreadyRegistered).
//! - Lookups for unknown ids fail with
//!   [`RuntimeError::NotFound`](crate::RuntimeError::NotFound).

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::RuntimeError;
use crate::events::{Bus, Event, EventKind};
use crate::services::{ServiceId, ServiceRef};

struct Inner {
    /// Services in registration order.
    order: Vec<ServiceRef>,
    /// Id-keyed view of the same services.
    by_id: HashMap<ServiceId, ServiceRef>,
}

/// Id-keyed service store preserving registration order.
pub struct Registry {
    inner: RwLock<Inner>,
    bus: Bus,
}

impl Registry {
    /// Creates a new, empty registry publishing to the given bus.
    pub fn new(bus: Bus) -> Arc<Self> {
        Arc::new(Self {
            inner: RwLock::new(Inner {
                order: Vec::new(),
                by_id: HashMap::new(),
            }),
            bus,
        })
    }

    /// Adds a service under its own id.
    ///
    /// Returns the id it was stored under, or
    /// [`RuntimeError::AlreadyRegistered`] if that id is already present.
    pub async fn register(&self, service: ServiceRef) -> Result<ServiceId, RuntimeError> {
        let uuid = service.uuid();
        let name = service.name().to_string();

        let mut inner = self.inner.write().await;
        if inner.by_id.contains_key(&uuid) {
            return Err(RuntimeError::AlreadyRegistered { uuid, name });
        }
        inner.order.push(Arc::clone(&service));
        inner.by_id.insert(uuid, service);
        drop(inner);

        self.bus.publish(
            Event::now(EventKind::ServiceRegistered)
                .with_service(name)
                .with_uuid(uuid),
        );
        Ok(uuid)
    }

    /// Returns the service registered under `uuid`.
    pub async fn lookup(&self, uuid: ServiceId) -> Result<ServiceRef, RuntimeError> {
        let inner = self.inner.read().await;
        inner
            .by_id
            .get(&uuid)
            .map(Arc::clone)
            .ok_or(RuntimeError::NotFound { uuid })
    }

    /// Returns all registered services in registration order.
    pub async fn snapshot(&self) -> Vec<ServiceRef> {
        self.inner.read().await.order.clone()
    }

    /// Returns sorted list of registered service names.
    pub async fn list(&self) -> Vec<String> {
        let inner = self.inner.read().await;
        let mut names: Vec<String> = inner.order.iter().map(|s| s.name().to_string()).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered services.
    pub async fn len(&self) -> usize {
        self.inner.read().await.order.len()
    }

    /// True if nothing has been registered.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ServiceFn;

    fn test_bus() -> Bus {
        Bus::new(16)
    }

    #[tokio::test]
    async fn test_register_and_lookup() {
        let registry = Registry::new(test_bus());
        let svc = ServiceFn::new("db").arc();
        let uuid = registry.register(svc.clone()).await.expect("register");
        assert_eq!(uuid, svc.uuid());

        let found = registry.lookup(uuid).await.expect("lookup");
        assert_eq!(found.name(), "db");
    }

    #[tokio::test]
    async fn test_lookup_unknown_id_fails() {
        let registry = Registry::new(test_bus());
        let missing = ServiceId::generate();
        let err = registry.lookup(missing).await.err().expect("not found");
        assert_eq!(err.as_label(), "service_not_found");
        assert_eq!(err.service(), Some(missing));
    }

    #[tokio::test]
    async fn test_duplicate_registration_is_rejected() {
        let registry = Registry::new(test_bus());
        let svc = ServiceFn::new("db").arc();
        registry.register(svc.clone()).await.expect("first");
        let err = registry.register(svc).await.expect_err("duplicate");
        assert_eq!(err.as_label(), "service_already_registered");
    }

    #[tokio::test]
    async fn test_snapshot_preserves_registration_order() {
        let registry = Registry::new(test_bus());
        for name in ["db", "cache", "api"] {
            registry
                .register(ServiceFn::new(name).arc())
                .await
                .expect("register");
        }
        let names: Vec<String> = registry
            .snapshot()
            .await
            .iter()
            .map(|s| s.name().to_string())
            .collect();
        assert_eq!(names, vec!["db", "cache", "api"]);

        // list() is sorted, not insertion-ordered.
        assert_eq!(registry.list().await, vec!["api", "cache", "db"]);
        assert_eq!(registry.len().await, 3);
        assert!(!registry.is_empty().await);
    }

    #[tokio::test]
    async fn test_registration_publishes_event() {
        let bus = test_bus();
        let registry = Registry::new(bus.clone());
        let mut rx = bus.subscribe();
        registry
            .register(ServiceFn::new("db").arc())
            .await
            .expect("register");
        let ev = rx.recv().await.expect("event");
        assert_eq!(ev.kind, EventKind::ServiceRegistered);
        assert_eq!(ev.service.as_deref(), Some("db"));
    }
}
