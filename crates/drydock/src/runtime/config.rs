//! Runtime configuration.

/// Simulated runtime configuration options.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Buffer size of channels created by [`SimulatedRuntime::subscribe`](super::SimulatedRuntime::subscribe).
    pub listener_capacity: usize,
    /// Whether the runtime starts in failure mode.
    pub failure_mode: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            listener_capacity: Self::DEFAULT_LISTENER_CAPACITY,
            failure_mode: false,
        }
    }
}

impl RuntimeConfig {
    /// Default subscriber channel capacity.
    pub const DEFAULT_LISTENER_CAPACITY: usize = 64;

    /// Set the subscriber channel capacity. Zero is raised to one.
    #[must_use]
    pub fn with_listener_capacity(mut self, capacity: usize) -> Self {
        self.listener_capacity = capacity.max(1);
        self
    }

    /// Start the runtime in failure mode.
    #[must_use]
    pub const fn with_failure_mode(mut self, enabled: bool) -> Self {
        self.failure_mode = enabled;
        self
    }
}
