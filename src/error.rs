//! Error types used by the servisor runtime and services.
//!
//! This module defines the main error types:
//!
//! - [`RuntimeError`] — errors raised by the orchestration runtime itself
//!   (startup, readiness, teardown, resolution, lookup).
//! - [`ServiceError`] — the cause type services return from their own
//!   `init`/`ready`/`destroy` operations and destroyers return from teardown.
//! - [`DestroyerFailure`] — a non-fatal teardown failure; collected into the
//!   shutdown report, never escalated to abort sibling destroyers.
//!
//! [`RuntimeError`] provides helper methods (`as_label`, `as_message`) for
//! logging/metrics.

use thiserror::Error;

use crate::core::Lifecycle;
use crate::services::ServiceId;

/// # Error returned by a service's own lifecycle operations.
///
/// Carries the underlying cause as a message. Services are expected to do
/// their own retries (if any) before reporting failure; the runtime never
/// retries a failed lifecycle call.
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct ServiceError {
    /// Human-readable description of the failure.
    pub message: String,
}

impl ServiceError {
    /// Creates a new service error from any displayable cause.
    ///
    /// # Example
    /// ```
    /// use servisor::ServiceError;
    ///
    /// let err = ServiceError::new("connection refused");
    /// assert_eq!(err.to_string(), "connection refused");
    /// ```
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// # Errors produced by the servisor runtime.
///
/// These represent failures in the orchestration itself: a service failing a
/// lifecycle phase, a dependency cycle, a failed lookup, or a rejected state
/// transition. The first fatal failure aborts its phase and is returned as a
/// single error; no partial retry or rollback is attempted.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// A service failed its `init()` call; startup was aborted.
    #[error("failed to init service \"{name}\" ({uuid}): {source}")]
    InitFailure {
        /// Unique id of the failing service.
        uuid: ServiceId,
        /// Human-readable name of the failing service.
        name: String,
        /// The underlying cause reported by the service.
        #[source]
        source: ServiceError,
    },

    /// A service failed its `ready()` call; the readiness pass was aborted.
    #[error("failed to set \"ready\" state to service \"{name}\" ({uuid}): {source}")]
    ReadyFailure {
        /// Unique id of the failing service.
        uuid: ServiceId,
        /// Human-readable name of the failing service.
        name: String,
        /// The underlying cause reported by the service.
        #[source]
        source: ServiceError,
    },

    /// A service failed its `destroy()` call; remaining service teardown was
    /// aborted (registered destroyers still run).
    #[error("failed to destroy service \"{name}\" ({uuid}): {source}")]
    DestroyFailure {
        /// Unique id of the failing service.
        uuid: ServiceId,
        /// Human-readable name of the failing service.
        name: String,
        /// The underlying cause reported by the service.
        #[source]
        source: ServiceError,
    },

    /// The declared dependency graph contains a cycle.
    ///
    /// `ids` holds the ids on the active resolution path that form the cycle,
    /// in traversal order.
    #[error("cyclic dependency detected: [{}]", .ids.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(" -> "))]
    CyclicDependency {
        /// Ids forming the cycle.
        ids: Vec<ServiceId>,
    },

    /// A lookup by id found no registered service.
    #[error("requested service \"{uuid}\" has not been found")]
    NotFound {
        /// The id that was requested.
        uuid: ServiceId,
    },

    /// A service with this id is already present in the registry.
    #[error("service \"{name}\" ({uuid}) is already registered")]
    AlreadyRegistered {
        /// Unique id of the rejected service.
        uuid: ServiceId,
        /// Human-readable name of the rejected service.
        name: String,
    },

    /// `initialize_all()` was invoked while the orchestrator was not idle.
    #[error("startup can only run from the Idle state (current: {state:?})")]
    StartupRejected {
        /// The lifecycle state at the time of the call.
        state: Lifecycle,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use servisor::{RuntimeError, ServiceId};
    ///
    /// let err = RuntimeError::NotFound { uuid: ServiceId::generate() };
    /// assert_eq!(err.as_label(), "service_not_found");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::InitFailure { .. } => "service_init_failure",
            RuntimeError::ReadyFailure { .. } => "service_ready_failure",
            RuntimeError::DestroyFailure { .. } => "service_destroy_failure",
            RuntimeError::CyclicDependency { .. } => "cyclic_dependency",
            RuntimeError::NotFound { .. } => "service_not_found",
            RuntimeError::AlreadyRegistered { .. } => "service_already_registered",
            RuntimeError::StartupRejected { .. } => "startup_rejected",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RuntimeError::InitFailure { name, source, .. } => {
                format!("init of \"{name}\" failed: {source}")
            }
            RuntimeError::ReadyFailure { name, source, .. } => {
                format!("ready of \"{name}\" failed: {source}")
            }
            RuntimeError::DestroyFailure { name, source, .. } => {
                format!("destroy of \"{name}\" failed: {source}")
            }
            RuntimeError::CyclicDependency { ids } => {
                format!("cycle over {} service(s)", ids.len())
            }
            RuntimeError::NotFound { uuid } => format!("no service under id {uuid}"),
            RuntimeError::AlreadyRegistered { name, .. } => {
                format!("\"{name}\" registered twice")
            }
            RuntimeError::StartupRejected { state } => {
                format!("startup rejected in {state:?} state")
            }
        }
    }

    /// Id of the service this error points at, if the variant carries one.
    pub fn service(&self) -> Option<ServiceId> {
        match self {
            RuntimeError::InitFailure { uuid, .. }
            | RuntimeError::ReadyFailure { uuid, .. }
            | RuntimeError::DestroyFailure { uuid, .. }
            | RuntimeError::NotFound { uuid }
            | RuntimeError::AlreadyRegistered { uuid, .. } => Some(*uuid),
            RuntimeError::CyclicDependency { .. } | RuntimeError::StartupRejected { .. } => None,
        }
    }
}

/// # Non-fatal destroyer failure.
///
/// Produced when a registered teardown callback fails (or panics) during
/// shutdown. Collected into the shutdown report alongside the owner label;
/// does not prevent other destroyers from running.
#[derive(Error, Debug, Clone)]
#[error("destroyer of \"{owner}\" failed: {error}")]
pub struct DestroyerFailure {
    /// Label of the party that registered the teardown.
    pub owner: String,
    /// Human-readable description of the failure.
    pub error: String,
}
