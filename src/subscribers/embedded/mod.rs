//! Built-in subscribers shipped with the crate.
//!
//! Currently only [`LogWriter`] (feature `logging`), a stdout event printer
//! for demos and tests.

#[cfg(feature = "logging")]
mod log;

#[cfg(feature = "logging")]
pub use log::LogWriter;
