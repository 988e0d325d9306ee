//! Lifecycle events: types, broadcast bus and the single-shot latch.
//!
//! This module groups the event **data model**, the **bus** used to
//! publish/subscribe to runtime events emitted by the orchestrator, registry
//! and destroyer set, and the **latch** primitive used for the "inited" and
//! "ready" marks.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] — event classification and payload metadata
//! - [`Bus`] — thin wrapper over `tokio::sync::broadcast`
//! - [`Latch`] — fire-once signal with replay to late subscribers
//!
//! ## Quick reference
//! - **Publishers**: `Orchestrator`, `Registry`, `DestroyerSet`.
//! - **Consumers**: the orchestrator's subscriber listener (fans out to
//!   `SubscriberSet`).

mod bus;
mod event;
mod latch;

pub use bus::Bus;
pub use event::{Event, EventKind};
pub use latch::Latch;
