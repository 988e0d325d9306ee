//! # Runtime events emitted by the orchestrator, registry and destroyer set.
//!
//! The [`EventKind`] enum classifies event types across four categories:
//! - **Registration events**: services entering the registry
//! - **Startup events**: per-service init results and the global inited mark
//! - **Readiness events**: per-service ready results and the global ready mark
//! - **Shutdown events**: teardown progress, destroyer failures, completion
//!
//! The [`Event`] struct carries additional metadata such as timestamps,
//! service name and id, owner labels and failure reasons.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore the exact order when events are
//! delivered out of order.
//!
//! ## Example
//! ```rust
//! use servisor::{Event, EventKind};
//!
//! let ev = Event::now(EventKind::InitFailed)
//!     .with_service("cache")
//!     .with_error("warmup failed");
//!
//! assert_eq!(ev.kind, EventKind::InitFailed);
//! assert_eq!(ev.service.as_deref(), Some("cache"));
//! assert_eq!(ev.error.as_deref(), Some("warmup failed"));
//! ```

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::SystemTime;

use crate::services::ServiceId;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Registration events ===
    /// A service was added to the registry.
    ///
    /// Sets:
    /// - `service`: service name
    /// - `uuid`: service id
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    ServiceRegistered,

    // === Startup events ===
    /// A service completed `init()` successfully.
    ///
    /// Sets:
    /// - `service`: service name
    /// - `uuid`: service id
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    ServiceInited,

    /// A service failed `init()`; startup was aborted.
    ///
    /// Sets:
    /// - `service`: service name (absent for resolution failures)
    /// - `uuid`: service id (absent for resolution failures)
    /// - `error`: failure message
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    InitFailed,

    /// Every registered service completed `init()`; the "inited" latch fired.
    ///
    /// Sets:
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    AllInited,

    // === Readiness events ===
    /// A service completed `ready()` successfully.
    ///
    /// Sets:
    /// - `service`: service name
    /// - `uuid`: service id
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    ServiceReady,

    /// A service failed `ready()`; the readiness pass was aborted.
    ///
    /// Sets:
    /// - `service`: service name
    /// - `uuid`: service id
    /// - `error`: failure message
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    ReadyFailed,

    /// Every registered service completed `ready()`; the "ready" latch fired.
    ///
    /// Sets:
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    AllReady,

    // === Shutdown events ===
    /// Shutdown was requested (explicit call or OS signal).
    ///
    /// Sets:
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    ShutdownRequested,

    /// A service completed `destroy()` successfully.
    ///
    /// Sets:
    /// - `service`: service name
    /// - `uuid`: service id
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    ServiceDestroyed,

    /// A service failed `destroy()`; remaining service teardown was aborted.
    ///
    /// Sets:
    /// - `service`: service name
    /// - `uuid`: service id
    /// - `error`: failure message
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    DestroyFailed,

    /// A registered destroyer failed (or panicked); siblings keep running.
    ///
    /// Sets:
    /// - `owner`: destroyer owner label
    /// - `error`: failure message
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    DestroyerFailed,

    /// Shutdown finished (possibly with collected destroyer errors).
    ///
    /// Sets:
    /// - `error`: summary of destroyer failures, if any
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    ShutdownComplete,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Name of the service (or subscriber), if applicable.
    pub service: Option<Arc<str>>,
    /// Id of the service, if applicable.
    pub uuid: Option<ServiceId>,
    /// Owner label of a destroyer, if applicable.
    pub owner: Option<Arc<str>>,
    /// Human-readable failure reason, if applicable.
    pub error: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next
    /// sequence number.
    pub fn now(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            service: None,
            uuid: None,
            owner: None,
            error: None,
        }
    }

    /// Attaches a service (or subscriber) name.
    #[inline]
    pub fn with_service(mut self, service: impl Into<Arc<str>>) -> Self {
        self.service = Some(service.into());
        self
    }

    /// Attaches a service id.
    #[inline]
    pub fn with_uuid(mut self, uuid: ServiceId) -> Self {
        self.uuid = Some(uuid);
        self
    }

    /// Attaches a destroyer owner label.
    #[inline]
    pub fn with_owner(mut self, owner: impl Into<Arc<str>>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Attaches a human-readable failure reason.
    #[inline]
    pub fn with_error(mut self, error: impl Into<Arc<str>>) -> Self {
        self.error = Some(error.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_is_monotonic() {
        let a = Event::now(EventKind::AllInited);
        let b = Event::now(EventKind::AllReady);
        assert!(b.seq > a.seq, "seq must grow: {} vs {}", a.seq, b.seq);
    }

    #[test]
    fn test_builders_attach_metadata() {
        let uuid = crate::services::ServiceId::generate();
        let ev = Event::now(EventKind::DestroyerFailed)
            .with_owner("session")
            .with_error("tmp dir busy")
            .with_uuid(uuid);
        assert_eq!(ev.owner.as_deref(), Some("session"));
        assert_eq!(ev.error.as_deref(), Some("tmp dir busy"));
        assert_eq!(ev.uuid, Some(uuid));
    }
}
