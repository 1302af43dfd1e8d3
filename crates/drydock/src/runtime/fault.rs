//! Fault injection.

use std::sync::atomic::{AtomicBool, Ordering};

use drydock_common::{ClientError, ClientResult};

/// Switch that forces every runtime operation to fail with a server error.
#[derive(Debug, Default)]
pub struct FaultSwitch {
    enabled: AtomicBool,
}

impl FaultSwitch {
    /// Create a switch with the given initial setting.
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
        }
    }

    /// Enable or disable failure mode. Returns the previous setting.
    pub fn set(&self, enabled: bool) -> bool {
        self.enabled.swap(enabled, Ordering::SeqCst)
    }

    /// Returns true if failure mode is enabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Fail with [`ClientError::ServerError`] if failure mode is enabled.
    ///
    /// # Errors
    ///
    /// Returns a server error while the switch is on.
    pub fn check(&self) -> ClientResult<()> {
        if self.is_enabled() {
            return Err(ClientError::ServerError);
        }
        Ok(())
    }
}
