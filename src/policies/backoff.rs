//! # Backoff algorithms for growing wait intervals.
//!
//! A [`BackoffAlgorithm`] maps the current interval to the next one. It is a pure
//! step function: it carries no state between calls and does **not** clamp its
//! output. Clamping to a maximum is the caller's job
//! ([`BackoffSleeper`](crate::BackoffSleeper) does it after every step).
//!
//! Built-in algorithms:
//! - [`DefaultBackoff`] - `next = interval × random[1.9, 2.1)`;
//! - [`Linear`] - `next = interval + step`;
//! - [`Exponential`] - `next = interval × factor`, then jitter.
//!
//! Any `Fn(Duration) -> Duration` is an algorithm too, which keeps tests deterministic.
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use retryvisor::{BackoffAlgorithm, Exponential, JitterPolicy};
//!
//! let double = Exponential { factor: 2.0, jitter: JitterPolicy::None };
//! assert_eq!(double.next(Duration::from_millis(100)), Duration::from_millis(200));
//!
//! let plus_one = |d: Duration| d + Duration::from_secs(1);
//! assert_eq!(plus_one.next(Duration::ZERO), Duration::from_secs(1));
//! ```

use rand::Rng;
use std::time::Duration;

use crate::policies::jitter::JitterPolicy;

/// Lower bound (inclusive) of the [`DefaultBackoff`] multiplier.
pub const DEFAULT_SCALE_MIN: f64 = 1.9;
/// Upper bound (exclusive) of the [`DefaultBackoff`] multiplier.
pub const DEFAULT_SCALE_MAX: f64 = 2.1;

/// Step function growing a wait interval.
pub trait BackoffAlgorithm: Send + Sync {
    /// Returns the interval that follows `interval`.
    fn next(&self, interval: Duration) -> Duration;
}

impl<F> BackoffAlgorithm for F
where
    F: Fn(Duration) -> Duration + Send + Sync,
{
    fn next(&self, interval: Duration) -> Duration {
        self(interval)
    }
}

/// Default growth: `A(n) = A(n-1) × random[1.9, 2.1)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultBackoff;

impl BackoffAlgorithm for DefaultBackoff {
    fn next(&self, interval: Duration) -> Duration {
        let scale = rand::rng().random_range(DEFAULT_SCALE_MIN..DEFAULT_SCALE_MAX);
        scale_saturating(interval, scale)
    }
}

/// Linear growth: `A(n) = A(n-1) + step`.
#[derive(Clone, Copy, Debug)]
pub struct Linear {
    /// Amount added on every step.
    pub step: Duration,
}

impl BackoffAlgorithm for Linear {
    fn next(&self, interval: Duration) -> Duration {
        interval.saturating_add(self.step)
    }
}

/// Exponential growth with optional jitter: `A(n) = jitter(A(n-1) × factor)`.
#[derive(Clone, Copy, Debug)]
pub struct Exponential {
    /// Multiplicative growth factor (`>= 1.0` recommended).
    pub factor: f64,
    /// Jitter applied after scaling.
    pub jitter: JitterPolicy,
}

impl Default for Exponential {
    /// Returns `factor = 2.0` with [`JitterPolicy::Equal`].
    fn default() -> Self {
        Self {
            factor: 2.0,
            jitter: JitterPolicy::Equal,
        }
    }
}

impl BackoffAlgorithm for Exponential {
    fn next(&self, interval: Duration) -> Duration {
        self.jitter.apply(scale_saturating(interval, self.factor))
    }
}

/// Multiplies `d` by `scale`, saturating at `Duration::MAX` on overflow.
fn scale_saturating(d: Duration, scale: f64) -> Duration {
    let secs = d.as_secs_f64() * scale;
    if secs.is_nan() || secs <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
}
