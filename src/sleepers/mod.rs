//! # Sleepers: what to do between retry attempts.
//!
//! This module provides the [`Sleeper`] capability and its built-in variants:
//! - [`CountSleeper`] - wakes immediately, stops after `max` wake-ups
//! - [`BackoffSleeper`] - waits a growing interval capped at `max`
//! - [`SleeperFn`] - custom sleeper from a closure
//! - [`Chain`] - two sleepers in sequence ([`SleeperExt::then`])
//!
//! and one-shot cancellable waits ([`sleep`], [`sleep_secs`], [`pause`]).
//!
//! ## Architecture
//! ```text
//! retry(ctx, sleeper, action)
//!   loop {
//!     action() ── Stop ──► return
//!        │
//!        └─ Retry ──► sleeper.sleep(ctx) ── Err ──► return Err(Sleep(..))
//!                            │
//!                            └─ Ok ──► next attempt
//!   }
//! ```

mod backoff;
mod count;
mod sleeper;
mod sleeper_fn;
mod timer;

pub use backoff::BackoffSleeper;
pub use count::CountSleeper;
pub use sleeper::{Chain, Sleeper, SleeperExt};
pub use sleeper_fn::SleeperFn;
pub use timer::{pause, sleep, sleep_secs};
