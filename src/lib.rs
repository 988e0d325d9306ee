//! # servisor
//!
//! **Servisor** is a lightweight service lifecycle orchestration library for Rust.
//!
//! It registers a set of interdependent long-lived services, brings them up
//! in dependency order, signals global readiness once all services have
//! converged, and tears them down safely on shutdown — including ad-hoc
//! teardown callbacks ("destroyers") owned by services but not bound to
//! their own `destroy()`.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │   Service    │   │   Service    │   │   Service    │
//!     │    "db"      │◄──┤   "cache"    │◄──┤    "api"     │   (declared deps)
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Orchestrator (lifecycle runtime)                                 │
//! │  - Registry (id → service, registration order)                    │
//! │  - Resolver (dependency order, cycle detection)                   │
//! │  - Latches ("inited", "ready": fire-once, replay to late subs)    │
//! │  - DestroyerSet (ad-hoc teardown callbacks)                       │
//! │  - Bus (broadcast lifecycle events)                               │
//! └──────┬────────────────────────────────────────────────────┬───────┘
//!        │ publishes Events:                                  │
//!        │ - ServiceInited / AllInited                        │
//!        │ - ServiceReady / AllReady                          │
//!        │ - ServiceDestroyed / DestroyerFailed / ...         │
//!        ▼                                                    ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                        Bus (broadcast channel)                    │
//! │                 (capacity: Config::bus_capacity)                  │
//! └─────────────────────────────────┬─────────────────────────────────┘
//!                                   ▼
//!                       ┌────────────────────────┐
//!                       │  subscriber listener   │
//!                       │   (in Orchestrator)    │
//!                       └───────────┬────────────┘
//!                                   ▼
//!                             SubscriberSet
//!                          (per-sub queues, workers)
//! ```
//!
//! ### Lifecycle
//! ```text
//! register(service) ──► Registry (insertion order kept)
//!
//! initialize_all():
//!   ├─► state: Idle → Initializing
//!   ├─► for each root in registration order:
//!   │       resolve(root) ─► [deps..., root]     (cycle ⇒ CyclicDependency)
//!   │       init() each, strictly sequential     (failure ⇒ InitFailure, abort)
//!   ├─► state: Inited, emit "inited" latch, publish AllInited
//!   ├─► yield one scheduling tick
//!   ├─► ready() each in REGISTRATION order       (failure ⇒ ReadyFailure, abort)
//!   └─► state: Ready, emit "ready" latch, publish AllReady
//!
//! shutdown_all():
//!   ├─► destroy() in REVERSE initialization order, fail-fast
//!   ├─► drain destroyers, run concurrently, failures isolated & collected
//!   └─► Ok(ShutdownReport) | Err(DestroyFailure)
//! ```
//!
//! ## Features
//! | Area              | Description                                                             | Key types / traits                        |
//! |-------------------|-------------------------------------------------------------------------|-------------------------------------------|
//! | **Services**      | Define lifecycle units with declared dependencies.                      | [`Service`], [`ServiceFn`], [`ServiceRef`]|
//! | **Orchestration** | Dependency-ordered startup, readiness, reverse teardown.                | [`Orchestrator`], [`Lifecycle`]           |
//! | **Signaling**     | Fire-once latches with replay; async waits.                             | [`Latch`]                                 |
//! | **Destroyers**    | Ad-hoc teardown callbacks with isolated failures.                       | [`Orchestrator::register_destroyer`]      |
//! | **Subscriber API**| Hook into lifecycle events (logging, metrics, custom subscribers).      | [`Subscribe`]                             |
//! | **Errors**        | Typed errors identifying the failing service.                           | [`RuntimeError`], [`ServiceError`]        |
//! | **Configuration** | Centralize runtime settings.                                            | [`Config`]                                |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use servisor::{Config, Orchestrator, ServiceFn, ServiceRef};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let orchestrator = Orchestrator::builder(Config::default()).build();
//!
//!     let db: ServiceRef = ServiceFn::new("db")
//!         .on_init(|| async {
//!             // open pools, run migrations...
//!             Ok(())
//!         })
//!         .arc();
//!     let cache: ServiceRef = ServiceFn::new("cache").depends_on(&db).arc();
//!     let api: ServiceRef = ServiceFn::new("api").depends_on(&cache).arc();
//!
//!     orchestrator.register(db).await?;
//!     orchestrator.register(cache).await?;
//!     orchestrator.register(api).await?;
//!
//!     // db → cache → api, then "inited", one tick, ready() in
//!     // registration order, then "ready".
//!     orchestrator.initialize_all().await?;
//!     assert!(orchestrator.is_ready());
//!
//!     orchestrator.register_destroyer("session", || async {
//!         // remove temp dirs...
//!         Ok(())
//!     });
//!
//!     // api → cache → db, then the destroyer.
//!     let report = orchestrator.shutdown_all().await?;
//!     assert!(report.is_clean());
//!     Ok(())
//! }
//! ```

mod config;
mod core;
mod error;
mod events;
mod services;
mod subscribers;

// ---- Public re-exports ----

pub use config::Config;
pub use core::{Lifecycle, Orchestrator, OrchestratorBuilder, Registry, ShutdownReport};
pub use error::{DestroyerFailure, RuntimeError, ServiceError};
pub use events::{Bus, Event, EventKind, Latch};
pub use services::{Service, ServiceFn, ServiceId, ServiceRef};
pub use subscribers::{Subscribe, SubscriberSet};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
