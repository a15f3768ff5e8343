//! # StdoutLogger - simple message printer
//!
//! A minimal sink that prints every message to stdout, one per line.
//! Use it for tests or demos.
//!
//! ## Example output
//! ```text
//! [retry] attempt=1 not done, retrying
//! [retry] attempt=2 giving up: max sleep count
//! ```

use std::fmt;

use super::Logger;

/// Stdout printer sink.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdoutLogger;

impl StdoutLogger {
    /// Construct a new [`StdoutLogger`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Logger for StdoutLogger {
    fn write(&self, args: fmt::Arguments<'_>) {
        println!("{args}");
    }
}
