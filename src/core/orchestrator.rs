//! # Orchestrator: drives the global service lifecycle.
//!
//! The [`Orchestrator`] owns the event bus, a [`SubscriberSet`], the service
//! [`Registry`], the destroyer set, and the two lifecycle latches. It brings
//! registered services up in dependency order, signals global readiness, and
//! tears everything down in reverse on shutdown.
//!
//! ## Key responsibilities
//! - resolve dependency order and run `init()` strictly sequentially
//! - fire the "inited" latch, defer one scheduling tick, then run `ready()`
//!   in registration order
//! - fire the "ready" latch once all services converged
//! - run `destroy()` in exact reverse of the realized initialization order
//! - drain registered destroyers concurrently with isolated failures
//! - subscribe to the [`Bus`] and fan out events via [`SubscriberSet`]
//!
//! ## Lifecycle
//! ```text
//! Idle ──initialize_all()──► Initializing ──all init() ok──► Inited
//!                                 │                            │ emit "inited"
//!                                 │ first failure              ▼
//!                                 ▼                       ReadyPending ── yield one tick
//!                          (stays Initializing,                │
//!                           error returned)          all ready() ok
//!                                                               ▼
//!                                                             Ready ── emit "ready"
//!
//! shutdown_all():
//!   destroy() last-initialized-first, fail-fast
//!       └─► drain destroyers (concurrent, failures isolated & collected)
//!             └─► Ok(ShutdownReport) | Err(DestroyFailure)
//! ```
//!
//! ## Rules
//! - `initialize_all()` is accepted only from `Idle`.
//! - A failed `init()` aborts startup before any later service is touched;
//!   the "inited" latch never fires.
//! - `ready()` runs in **registration** order, not dependency order.
//! - Re-invoking shutdown after a partial fatal destroy failure is
//!   undefined: the realized-initialization list is consumed by the first
//!   call. No rollback of partially-initialized services is attempted.
//!
//! ## Example
//! ```rust
//! use servisor::{Config, Orchestrator, ServiceFn};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let orchestrator = Orchestrator::builder(Config::default()).build();
//!
//!     let db = ServiceFn::new("db").on_init(|| async { Ok(()) }).arc();
//!     let cache = ServiceFn::new("cache").depends_on(&db).arc();
//!     orchestrator.register(db).await?;
//!     orchestrator.register(cache).await?;
//!
//!     orchestrator.initialize_all().await?;
//!     assert!(orchestrator.is_ready());
//!
//!     let report = orchestrator.shutdown_all().await?;
//!     assert!(report.is_clean());
//!     Ok(())
//! }
//! ```

use std::collections::HashSet;
use std::sync::{Arc, Mutex, RwLock};

use tokio::sync::broadcast::error::RecvError;

use crate::config::Config;
use crate::core::destroyers::DestroyerSet;
use crate::core::registry::Registry;
use crate::core::{resolver, shutdown};
use crate::error::{DestroyerFailure, RuntimeError, ServiceError};
use crate::events::{Bus, Event, EventKind, Latch};
use crate::services::{ServiceId, ServiceRef};
use crate::subscribers::SubscriberSet;

/// Process-wide lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Nothing started yet; registration is open.
    Idle,
    /// `init()` pass in progress (or aborted by a failure).
    Initializing,
    /// Every service inited; the "inited" latch has fired.
    Inited,
    /// Tick deferral between initialization and the readiness pass.
    ReadyPending,
    /// Every service ready; the "ready" latch has fired.
    Ready,
}

/// Outcome of a shutdown whose service teardown succeeded.
///
/// Destroyer failures are non-fatal by contract; a non-empty list means the
/// shutdown "completed with destroyer errors".
#[derive(Debug, Default)]
pub struct ShutdownReport {
    /// Collected non-fatal destroyer failures, with owner labels.
    pub destroyer_failures: Vec<DestroyerFailure>,
}

impl ShutdownReport {
    /// True when every destroyer also succeeded.
    pub fn is_clean(&self) -> bool {
        self.destroyer_failures.is_empty()
    }
}

/// Coordinates service startup, readiness signaling, and teardown.
pub struct Orchestrator {
    cfg: Config,
    bus: Bus,
    subs: Arc<SubscriberSet>,
    registry: Arc<Registry>,
    destroyers: DestroyerSet,
    inited: Latch,
    ready: Latch,
    state: RwLock<Lifecycle>,
    /// Services in realized initialization order; consumed by shutdown.
    initialized: Mutex<Vec<ServiceRef>>,
}

impl Orchestrator {
    /// Starts building an orchestrator with the given configuration.
    pub fn builder(cfg: Config) -> crate::core::OrchestratorBuilder {
        crate::core::OrchestratorBuilder::new(cfg)
    }

    pub(crate) fn new_internal(
        cfg: Config,
        bus: Bus,
        subs: Arc<SubscriberSet>,
        registry: Arc<Registry>,
    ) -> Self {
        let destroyers = DestroyerSet::new(bus.clone());
        Self {
            cfg,
            bus,
            subs,
            registry,
            destroyers,
            inited: Latch::new(),
            ready: Latch::new(),
            state: RwLock::new(Lifecycle::Idle),
            initialized: Mutex::new(Vec::new()),
        }
    }

    /// Subscribes to the bus and forwards events to the subscriber set
    /// (fire-and-forget). Called once by the builder.
    pub(crate) fn spawn_subscriber_listener(&self) {
        let mut rx = self.bus.subscribe();
        let subs = Arc::clone(&self.subs);
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(ev) => subs.emit(&ev),
                    Err(RecvError::Lagged(_)) => continue,
                    Err(RecvError::Closed) => break,
                }
            }
        });
    }

    /// The configuration this orchestrator was built with.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// The registry backing this orchestrator.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Registers a service. Allowed until startup begins.
    pub async fn register(&self, service: ServiceRef) -> Result<ServiceId, RuntimeError> {
        self.registry.register(service).await
    }

    /// Returns the service registered under `uuid`.
    pub async fn lookup(&self, uuid: ServiceId) -> Result<ServiceRef, RuntimeError> {
        self.registry.lookup(uuid).await
    }

    /// Registers an ad-hoc teardown callback run at shutdown, outside any
    /// service's own `destroy()`. Available at any time before shutdown
    /// begins; duplicate owners are permitted.
    pub fn register_destroyer<F, Fut>(&self, owner: impl Into<String>, teardown: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: std::future::Future<Output = Result<(), ServiceError>> + Send + 'static,
    {
        self.destroyers.register(owner, teardown);
    }

    /// Current lifecycle state.
    pub fn lifecycle(&self) -> Lifecycle {
        *self.state.read().expect("state lock poisoned")
    }

    /// Whether every registered service has completed `init()`.
    pub fn is_inited(&self) -> bool {
        self.inited.has_emitted()
    }

    /// Whether every registered service has completed `ready()`.
    ///
    /// False before startup; permanently true after a fully successful
    /// [`Orchestrator::initialize_all`].
    pub fn is_ready(&self) -> bool {
        self.ready.has_emitted()
    }

    /// Runs `callback` once all services are inited (immediately if they
    /// already are).
    pub fn subscribe_inited(&self, callback: impl FnOnce() + Send + 'static) {
        self.inited.subscribe(callback);
    }

    /// Runs `callback` once all services are ready (immediately if they
    /// already are).
    pub fn subscribe_ready(&self, callback: impl FnOnce() + Send + 'static) {
        self.ready.subscribe(callback);
    }

    /// Suspends until all services are inited.
    pub async fn wait_inited(&self) {
        self.inited.wait().await;
    }

    /// Suspends until all services are ready.
    pub async fn wait_ready(&self) {
        self.ready.wait().await;
    }

    /// Brings every registered service up.
    ///
    /// Per root in registration order, resolves the dependency order and
    /// runs `init()` strictly sequentially; then fires the "inited" latch,
    /// yields one scheduling tick, runs `ready()` on every service in
    /// registration order, and fires the "ready" latch.
    ///
    /// The first failure aborts the pass and is returned as the single
    /// error; no rollback of already-initialized services is attempted.
    pub async fn initialize_all(&self) -> Result<(), RuntimeError> {
        {
            let mut state = self.state.write().expect("state lock poisoned");
            if *state != Lifecycle::Idle {
                return Err(RuntimeError::StartupRejected { state: *state });
            }
            *state = Lifecycle::Initializing;
        }

        let services = self.registry.snapshot().await;

        let mut scheduled: HashSet<ServiceId> = HashSet::new();
        for root in &services {
            if scheduled.contains(&root.uuid()) {
                continue;
            }
            let order = match resolver::resolve(root, &mut scheduled) {
                Ok(order) => order,
                Err(err) => {
                    self.bus
                        .publish(Event::now(EventKind::InitFailed).with_error(err.to_string()));
                    return Err(err);
                }
            };
            for service in order {
                self.init_one(&service).await?;
            }
        }

        self.set_state(Lifecycle::Inited);
        self.inited.emit();
        self.bus.publish(Event::now(EventKind::AllInited));

        // Decouple the readiness pass from the tail of initialization:
        // ready() may reach across services and must not run reentrant
        // with init's caller.
        self.set_state(Lifecycle::ReadyPending);
        tokio::task::yield_now().await;

        for service in &services {
            self.ready_one(service).await?;
        }

        self.set_state(Lifecycle::Ready);
        self.ready.emit();
        self.bus.publish(Event::now(EventKind::AllReady));
        Ok(())
    }

    /// Tears every initialized service down, then drains the destroyers.
    ///
    /// Services are destroyed sequentially in exact reverse of the realized
    /// initialization order, fail-fast. Destroyers then run concurrently
    /// regardless of the teardown outcome; their failures are collected into
    /// the report, never escalated.
    pub async fn shutdown_all(&self) -> Result<ShutdownReport, RuntimeError> {
        self.bus.publish(Event::now(EventKind::ShutdownRequested));

        let initialized = {
            let mut list = self.initialized.lock().expect("initialized lock poisoned");
            std::mem::take(&mut *list)
        };

        let mut fatal: Option<RuntimeError> = None;
        for service in initialized.iter().rev() {
            let uuid = service.uuid();
            let name = service.name().to_string();
            match service.destroy().await {
                Ok(()) => {
                    self.bus.publish(
                        Event::now(EventKind::ServiceDestroyed)
                            .with_service(name)
                            .with_uuid(uuid),
                    );
                }
                Err(source) => {
                    self.bus.publish(
                        Event::now(EventKind::DestroyFailed)
                            .with_service(name.clone())
                            .with_uuid(uuid)
                            .with_error(source.to_string()),
                    );
                    fatal = Some(RuntimeError::DestroyFailure { uuid, name, source });
                    break;
                }
            }
        }

        let destroyer_failures = self.destroyers.drain_and_run_all().await;

        let complete = if destroyer_failures.is_empty() {
            Event::now(EventKind::ShutdownComplete)
        } else {
            Event::now(EventKind::ShutdownComplete)
                .with_error(format!("{} destroyer(s) failed", destroyer_failures.len()))
        };
        self.bus.publish(complete);

        match fatal {
            Some(err) => Err(err),
            None => Ok(ShutdownReport { destroyer_failures }),
        }
    }

    /// Convenience driver: initialize, wait for a termination signal, shut
    /// down.
    pub async fn run_until_shutdown(&self) -> Result<ShutdownReport, RuntimeError> {
        self.initialize_all().await?;
        if let Err(err) = shutdown::wait_for_signal().await {
            eprintln!("[servisor] signal listener failed: {err}; shutting down");
        }
        self.shutdown_all().await
    }

    async fn init_one(&self, service: &ServiceRef) -> Result<(), RuntimeError> {
        let uuid = service.uuid();
        let name = service.name().to_string();
        if let Err(source) = service.init().await {
            self.bus.publish(
                Event::now(EventKind::InitFailed)
                    .with_service(name.clone())
                    .with_uuid(uuid)
                    .with_error(source.to_string()),
            );
            return Err(RuntimeError::InitFailure { uuid, name, source });
        }
        self.initialized
            .lock()
            .expect("initialized lock poisoned")
            .push(Arc::clone(service));
        self.bus.publish(
            Event::now(EventKind::ServiceInited)
                .with_service(name)
                .with_uuid(uuid),
        );
        Ok(())
    }

    async fn ready_one(&self, service: &ServiceRef) -> Result<(), RuntimeError> {
        let uuid = service.uuid();
        let name = service.name().to_string();
        if let Err(source) = service.ready().await {
            self.bus.publish(
                Event::now(EventKind::ReadyFailed)
                    .with_service(name.clone())
                    .with_uuid(uuid)
                    .with_error(source.to_string()),
            );
            return Err(RuntimeError::ReadyFailure { uuid, name, source });
        }
        self.bus.publish(
            Event::now(EventKind::ServiceReady)
                .with_service(name)
                .with_uuid(uuid),
        );
        Ok(())
    }

    fn set_state(&self, next: Lifecycle) {
        *self.state.write().expect("state lock poisoned") = next;
    }
}
