//! # Retry session configuration.
//!
//! Provides [`Config`] centralized defaults for building a session's sleeper
//! and idle counter.
//!
//! ## Sentinel values
//! - `max_sleeps = 0` → unbounded (no count limit, backoff only)
//! - `max_interval = 0s` → no waiting at all (sleeper wakes immediately)

use std::time::Duration;

use crate::{
    core::IdleCounter,
    sleepers::{BackoffSleeper, Sleeper, SleeperExt},
};

/// Defaults for a retry session.
///
/// ## Field semantics
/// - `initial_interval`: Interval the backoff grows from
/// - `max_interval`: Backoff cap (`0s` = wake immediately)
/// - `max_sleeps`: Wake-up budget (`0` = unbounded)
/// - `quiet`: Idle window for [`IdleCounter`]
///
/// ## Notes
/// All fields are public for flexibility. Prefer the helper accessors to avoid
/// sprinkling sentinel checks (`0`) across the codebase.
#[derive(Clone, Debug)]
pub struct Config {
    /// Interval the backoff starts growing from.
    pub initial_interval: Duration,

    /// Maximum wait between attempts.
    ///
    /// - `Duration::ZERO` = never wait (combine with `max_sleeps` for a tight,
    ///   bounded loop)
    pub max_interval: Duration,

    /// Maximum number of wake-ups before the sleeper gives up.
    ///
    /// - `0` = unbounded
    /// - `n > 0` = the `n + 1`-th sleep returns `SleepError::Exhausted`
    pub max_sleeps: usize,

    /// How long an [`IdleCounter`] must stay at zero before waiters resolve.
    pub quiet: Duration,
}

impl Config {
    /// Returns the wake-up budget as an `Option`.
    ///
    /// - `None` → unbounded
    /// - `Some(n)` → at most `n` wake-ups
    #[inline]
    pub fn sleep_limit(&self) -> Option<usize> {
        if self.max_sleeps == 0 {
            None
        } else {
            Some(self.max_sleeps)
        }
    }

    /// True if sleepers built from this config never wait.
    #[inline]
    pub fn is_immediate(&self) -> bool {
        self.max_interval.is_zero()
    }

    /// Builds a fresh sleeper for one retry session.
    ///
    /// Backoff with the wake-up budget applied. The budget is spent only by
    /// completed waits, and an immediate sleeper still stops once `ctx` fires.
    ///
    /// # Example
    /// ```
    /// use retryvisor::Config;
    ///
    /// let cfg = Config { max_sleeps: 3, ..Config::default() };
    /// let _sleeper = cfg.sleeper();
    /// ```
    pub fn sleeper(&self) -> Box<dyn Sleeper> {
        let backoff = BackoffSleeper::new(self.initial_interval, self.max_interval);
        match (self.sleep_limit(), self.is_immediate()) {
            (Some(max), _) => backoff.with_max_sleeps(max).boxed(),
            // no timer to race; the budget check is what observes cancellation
            (None, true) => backoff.with_max_sleeps(usize::MAX).boxed(),
            (None, false) => backoff.boxed(),
        }
    }

    /// Builds an idle counter with this config's quiet window.
    pub fn idle_counter(&self) -> IdleCounter {
        IdleCounter::new(self.quiet)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `initial_interval = 100ms`
    /// - `max_interval = 1s`
    /// - `max_sleeps = 0` (unbounded)
    /// - `quiet = 300ms`
    fn default() -> Self {
        Self {
            initial_interval: Duration::from_millis(100),
            max_interval: Duration::from_secs(1),
            max_sleeps: 0,
            quiet: Duration::from_millis(300),
        }
    }
}
