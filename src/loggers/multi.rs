//! # MultiLogger: forward one message to many sinks.
//!
//! [`MultiLogger`] writes each message to every sink it holds, in insertion
//! order, inline with the caller.
//!
//! ## Diagram
//! ```text
//!    write(args)
//!        ├────► sink 1
//!        ├────► sink 2
//!        └────► sink N
//! ```

use std::fmt;
use std::sync::Arc;

use super::Logger;

/// Composite sink forwarding to a list of sinks in order.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use retryvisor::{Logger, MultiLogger, Quiet, TracingLogger};
///
/// let sinks: Vec<Arc<dyn Logger>> = vec![Arc::new(Quiet), Arc::new(TracingLogger::default())];
/// let log = MultiLogger::new(sinks);
/// assert_eq!(log.len(), 2);
/// log.write(format_args!("hello"));
/// ```
#[derive(Clone, Default)]
pub struct MultiLogger {
    sinks: Vec<Arc<dyn Logger>>,
}

impl MultiLogger {
    /// Creates a composite over `sinks`.
    #[must_use]
    pub fn new(sinks: Vec<Arc<dyn Logger>>) -> Self {
        Self { sinks }
    }

    /// Appends one more sink.
    #[must_use]
    pub fn with(mut self, sink: Arc<dyn Logger>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// True if there are no sinks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Number of sinks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sinks.len()
    }
}

impl Logger for MultiLogger {
    fn write(&self, args: fmt::Arguments<'_>) {
        for sink in &self.sinks {
            sink.write(args);
        }
    }
}

impl fmt::Debug for MultiLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiLogger")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}
