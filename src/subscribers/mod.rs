//! Event subscribers for the servisor runtime.
//!
//! This module provides the [`Subscribe`] trait, the [`SubscriberSet`]
//! fan-out, and built-in subscribers for handling lifecycle events broadcast
//! through the [`Bus`](crate::events::Bus).
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   Orchestrator/Registry ── publish(Event) ──► Bus ──► orchestrator listener
//!                                                            │
//!                                                   SubscriberSet::emit(&Event)
//!                                                 ┌──────────┼──────────┐
//!                                                 ▼          ▼          ▼
//!                                            [queue S1] [queue S2] [queue SN]
//!                                                 │          │          │
//!                                            worker S1  worker S2  worker SN
//!                                                 │          │          │
//!                                          sub.on_event(&Event) (per subscriber)
//! ```
//!
//! ## Implementing custom subscribers
//! ```no_run
//! use async_trait::async_trait;
//! use servisor::{Event, EventKind, Subscribe};
//!
//! struct MetricsSubscriber;
//!
//! #[async_trait]
//! impl Subscribe for MetricsSubscriber {
//!     async fn on_event(&self, event: &Event) {
//!         match event.kind {
//!             EventKind::InitFailed => {
//!                 // increment failure counter
//!             }
//!             _ => {}
//!         }
//!     }
//! }
//! ```

mod embedded;
mod set;
mod subscribe;

pub use set::SubscriberSet;
pub use subscribe::Subscribe;

#[cfg(feature = "logging")]
pub use embedded::LogWriter;
