//! # Diagnostic sinks.
//!
//! This module provides the [`Logger`] trait, a write-only sink the retry driver
//! writes to, and its built-in implementations.
//!
//! ## Architecture
//! ```text
//! retry_with_logger(.., logger, ..)
//!        │
//!        └──► Logger::write(args)
//!                  │
//!          ┌───────┴────────┬──────────────┬────────────┐
//!          ▼                ▼              ▼            ▼
//!        Quiet         MultiLogger    TracingLogger   LogFn / StdoutLogger
//!                    (fans out in order)
//! ```

mod logger;
mod multi;
#[cfg(feature = "logging")]
mod stdout;
mod tracing_sink;

pub use logger::{LogFn, Logger, Quiet};
pub use multi::MultiLogger;
#[cfg(feature = "logging")]
pub use stdout::StdoutLogger;
pub use tracing_sink::TracingLogger;
