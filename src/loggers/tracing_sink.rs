//! # TracingLogger - bridge to `tracing`.
//!
//! Forwards every message as a `tracing` event with target `retryvisor` at the
//! configured level. Installing a subscriber is up to the application.

use std::fmt;

use tracing::Level;

use super::Logger;

/// Sink emitting `tracing` events.
#[derive(Clone, Copy, Debug)]
pub struct TracingLogger {
    level: Level,
}

impl TracingLogger {
    /// Creates a sink emitting at `level`.
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    /// Level the events are emitted at.
    pub fn level(&self) -> Level {
        self.level
    }
}

impl Default for TracingLogger {
    /// Emits at [`Level::INFO`].
    fn default() -> Self {
        Self::new(Level::INFO)
    }
}

impl Logger for TracingLogger {
    fn write(&self, args: fmt::Arguments<'_>) {
        if self.level == Level::ERROR {
            tracing::error!(target: "retryvisor", "{}", args);
        } else if self.level == Level::WARN {
            tracing::warn!(target: "retryvisor", "{}", args);
        } else if self.level == Level::INFO {
            tracing::info!(target: "retryvisor", "{}", args);
        } else if self.level == Level::DEBUG {
            tracing::debug!(target: "retryvisor", "{}", args);
        } else {
            tracing::trace!(target: "retryvisor", "{}", args);
        }
    }
}
