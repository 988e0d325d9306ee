//! # Builder wiring the orchestrator's runtime components together.

use std::sync::Arc;

use crate::config::Config;
use crate::core::orchestrator::Orchestrator;
use crate::core::registry::Registry;
use crate::events::Bus;
use crate::subscribers::{Subscribe, SubscriberSet};

/// Builder for constructing an [`Orchestrator`] with optional observers.
///
/// Must be finished inside a tokio runtime: building spawns the subscriber
/// workers and the bus listener.
pub struct OrchestratorBuilder {
    cfg: Config,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl OrchestratorBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            subscribers: Vec::new(),
        }
    }

    /// Sets event subscribers for observability.
    ///
    /// Subscribers receive lifecycle events (init/ready/destroy progress,
    /// failures, destroyer outcomes) through dedicated workers with bounded
    /// queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Builds and returns the orchestrator instance.
    ///
    /// This consumes the builder and initializes all runtime components:
    /// - Event bus for broadcasting
    /// - Registry for service storage
    /// - Subscriber workers and the bus listener
    pub fn build(self) -> Arc<Orchestrator> {
        let bus = Bus::new(self.cfg.bus_capacity_clamped());
        let subs = Arc::new(SubscriberSet::new(self.subscribers));
        let registry = Registry::new(bus.clone());

        let orchestrator = Arc::new(Orchestrator::new_internal(self.cfg, bus, subs, registry));
        orchestrator.spawn_subscriber_listener();
        orchestrator
    }
}
