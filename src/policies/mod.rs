//! Backoff policies.
//!
//! This module groups the knobs that control **how long** a sleeper waits
//! between attempts.
//!
//! ## Contents
//! - [`BackoffAlgorithm`] step function `interval -> next interval`
//! - [`DefaultBackoff`], [`Linear`], [`Exponential`] built-in algorithms
//! - [`JitterPolicy`] randomization strategy to avoid thundering herd
//!
//! ## Quick wiring
//! ```text
//! BackoffSleeper { initial, max, current, algorithm }
//!      └─► on every sleep:
//!           interval = clamp(algorithm.next(current), current, max)
//! ```
//!
//! ## Defaults
//! - [`DefaultBackoff`] multiplies by a random scale in `[1.9, 2.1)`.
//! - `JitterPolicy::None` by default; consider `Equal` for balanced randomness.

mod backoff;
mod jitter;

pub use backoff::{
    BackoffAlgorithm, DEFAULT_SCALE_MAX, DEFAULT_SCALE_MIN, DefaultBackoff, Exponential, Linear,
};
pub use jitter::JitterPolicy;
