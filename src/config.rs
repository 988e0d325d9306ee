//! # Global runtime configuration.
//!
//! [`Config`] defines the orchestrator's ambient behavior: the capacity of
//! the lifecycle event bus. Lifecycle ordering itself is contractual and not
//! configurable.
//!
//! # Example
//! ```
//! use servisor::Config;
//!
//! let mut cfg = Config::default();
//! cfg.bus_capacity = 256;
//!
//! assert_eq!(cfg.bus_capacity_clamped(), 256);
//! ```

/// Global configuration for the orchestrator runtime.
#[derive(Clone, Debug)]
pub struct Config {
    /// Capacity of the lifecycle event bus channel.
    pub bus_capacity: usize,
}

impl Default for Config {
    /// Provides a default configuration:
    /// - `bus_capacity = 1024`
    fn default() -> Self {
        Self { bus_capacity: 1024 }
    }
}

impl Config {
    /// Bus capacity with the lower bound applied (the broadcast channel
    /// requires at least 1).
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}
