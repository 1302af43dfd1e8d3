//! Simulated runtime core.
//!
//! This module provides the [`SimulatedRuntime`] facade and the registry,
//! event broadcaster and fault switch it is built from.

mod config;
pub mod events;
mod fault;
mod registry;
mod simulated;

pub use config::RuntimeConfig;
pub use events::{ContainerEvent, Delivery, EventBroadcaster, EventStatus};
pub use fault::FaultSwitch;
pub use registry::ContainerRegistry;
pub use simulated::SimulatedRuntime;
