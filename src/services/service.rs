//! # Service abstraction and identifier type.
//!
//! This module defines the [`Service`] trait (async lifecycle with declared
//! dependencies) and the [`ServiceId`] identifier. The common handle type is
//! [`ServiceRef`], an `Arc<dyn Service>` suitable for sharing across the
//! runtime and for declaring dependencies by reference.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ServiceError;

/// Unique identifier of a registered service.
///
/// Generated once per service instance; stable for the service's lifetime.
///
/// # Example
/// ```
/// use servisor::ServiceId;
///
/// let id = ServiceId::generate();
/// assert_ne!(id, ServiceId::generate());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServiceId(Uuid);

impl ServiceId {
    /// Generates a fresh unique id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Shared handle to a service.
pub type ServiceRef = Arc<dyn Service>;

/// # Long-lived unit with an orchestrated lifecycle.
///
/// A `Service` has a stable [`uuid`](Service::uuid), a human-readable
/// [`name`](Service::name), a declared dependency list, and three async
/// lifecycle operations driven by the orchestrator:
///
/// - [`init`](Service::init) — called once, after every declared dependency
///   has finished its own `init`;
/// - [`ready`](Service::ready) — called once all services are inited, in
///   registration order; safe to reach across services here;
/// - [`destroy`](Service::destroy) — called during shutdown, in reverse of
///   the realized initialization order.
///
/// All three default to `Ok(())` so passive services only implement what
/// they need.
///
/// The declared dependency list must not change once registration traversal
/// has begun; dependencies are held by reference ([`ServiceRef`]), not
/// resolved by name at call time.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use servisor::{Service, ServiceError, ServiceId, ServiceRef};
///
/// struct Database {
///     uuid: ServiceId,
/// }
///
/// #[async_trait]
/// impl Service for Database {
///     fn uuid(&self) -> ServiceId {
///         self.uuid
///     }
///
///     fn name(&self) -> &str {
///         "database"
///     }
///
///     async fn init(&self) -> Result<(), ServiceError> {
///         // open pools, run migrations...
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Service: Send + Sync + 'static {
    /// Returns the unique id of this service instance.
    fn uuid(&self) -> ServiceId;

    /// Returns a stable, human-readable service name.
    fn name(&self) -> &str;

    /// Returns the services this one must be initialized after.
    ///
    /// The list is treated as immutable once startup begins.
    fn dependencies(&self) -> Vec<ServiceRef> {
        Vec::new()
    }

    /// Brings the service up. Runs after all declared dependencies have
    /// completed their own `init`.
    async fn init(&self) -> Result<(), ServiceError> {
        Ok(())
    }

    /// Marks the service ready. Runs once every registered service has been
    /// inited; cross-service access is allowed here.
    async fn ready(&self) -> Result<(), ServiceError> {
        Ok(())
    }

    /// Tears the service down. Runs in reverse of the realized
    /// initialization order.
    async fn destroy(&self) -> Result<(), ServiceError> {
        Ok(())
    }
}
