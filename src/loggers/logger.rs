//! # Logger trait.
//!
//! Provides [`Logger`] a write-only diagnostic sink, plus the two trivial sinks:
//! - [`Quiet`] drops everything (silent operation, the default);
//! - [`LogFn`] adapts a closure.
//!
//! ## Rules
//! - `write` must not block for long; it runs inline with the caller.
//! - Sinks handle their own I/O errors and never panic.

use std::fmt;
use std::sync::Arc;

/// Write-only diagnostic sink.
///
/// # Example
/// ```
/// use std::fmt;
/// use retryvisor::Logger;
///
/// struct Stderr;
///
/// impl Logger for Stderr {
///     fn write(&self, args: fmt::Arguments<'_>) {
///         eprintln!("{args}");
///     }
/// }
///
/// Stderr.write(format_args!("attempt {} failed", 3));
/// ```
pub trait Logger: Send + Sync {
    /// Writes one message.
    fn write(&self, args: fmt::Arguments<'_>);
}

impl<L: Logger + ?Sized> Logger for &L {
    fn write(&self, args: fmt::Arguments<'_>) {
        (**self).write(args);
    }
}

impl<L: Logger + ?Sized> Logger for Box<L> {
    fn write(&self, args: fmt::Arguments<'_>) {
        (**self).write(args);
    }
}

impl<L: Logger + ?Sized> Logger for Arc<L> {
    fn write(&self, args: fmt::Arguments<'_>) {
        (**self).write(args);
    }
}

/// Sink that does nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct Quiet;

impl Logger for Quiet {
    fn write(&self, _args: fmt::Arguments<'_>) {}
}

/// Closure-backed sink.
#[derive(Clone)]
pub struct LogFn<F> {
    f: F,
}

impl<F> LogFn<F>
where
    F: Fn(fmt::Arguments<'_>) + Send + Sync,
{
    /// Wraps `f` as a [`Logger`].
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Logger for LogFn<F>
where
    F: Fn(fmt::Arguments<'_>) + Send + Sync,
{
    fn write(&self, args: fmt::Arguments<'_>) {
        (self.f)(args);
    }
}

impl<F> fmt::Debug for LogFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LogFn")
    }
}
