//! # Backoff-bounded sleeper.
//!
//! [`BackoffSleeper`] waits a growing interval on every call. The interval starts
//! from `initial`, is stepped by a [`BackoffAlgorithm`] and is capped at `max`.
//!
//! ## Flow
//! ```text
//! sleep(ctx)
//!   ├─ budget set?       ─► Err(Canceled) if ctx fired, Err(Exhausted) if spent
//!   ├─ max == 0          ─► yield, count += 1, Ok(()) (no wait)
//!   ├─ interval = clamp(algorithm.next(current), current, max)
//!   └─ select! {
//!        ctx.cancelled()  ─► Err(Canceled), current untouched
//!        timer(interval)  ─► current = interval, count += 1, Ok(())
//!      }
//! ```
//!
//! ## Rules
//! - `current` never decreases and never exceeds `max`.
//! - `initial >= max` gives a constant sleeper waiting `max` every time.
//! - The algorithm's output is clamped after every step, custom ones included.
//! - The timer is dropped on both branches; nothing stays armed after return.
//! - The wake-up budget ([`with_max_sleeps`](BackoffSleeper::with_max_sleeps)) is
//!   spent only by completed waits; a cancelled wait leaves `count` untouched.

use std::time::Duration;

use async_trait::async_trait;
use tokio::{select, task, time};
use tokio_util::sync::CancellationToken;

use crate::error::SleepError;
use crate::policies::{BackoffAlgorithm, DefaultBackoff};
use crate::sleepers::Sleeper;

/// Sleeps a growing interval on each call.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use retryvisor::BackoffSleeper;
///
/// let double = |d: Duration| d * 2;
/// let s = BackoffSleeper::with_algorithm(Duration::from_millis(100), Duration::from_millis(300), double);
/// assert_eq!(s.next_interval(), Duration::from_millis(200));
/// ```
#[derive(Clone, Debug)]
pub struct BackoffSleeper<A = DefaultBackoff> {
    initial: Duration,
    max: Duration,
    current: Duration,
    algorithm: A,
    limit: Option<usize>,
    count: usize,
}

impl BackoffSleeper<DefaultBackoff> {
    /// Creates a sleeper growing with [`DefaultBackoff`].
    pub fn new(initial: Duration, max: Duration) -> Self {
        Self::with_algorithm(initial, max, DefaultBackoff)
    }

    /// Creates a sleeper that always waits `interval`.
    pub fn constant(interval: Duration) -> Self {
        Self::new(interval, interval)
    }
}

impl<A: BackoffAlgorithm> BackoffSleeper<A> {
    /// Creates a sleeper growing with a custom algorithm.
    pub fn with_algorithm(initial: Duration, max: Duration, algorithm: A) -> Self {
        Self {
            initial,
            max,
            current: initial,
            algorithm,
            limit: None,
            count: 0,
        }
    }

    /// Refuses with [`SleepError::Exhausted`] after `max` completed waits.
    ///
    /// A sleeper with a budget also observes an already cancelled token before
    /// anything else, including when the cap is zero.
    #[must_use]
    pub fn with_max_sleeps(mut self, max: usize) -> Self {
        self.limit = Some(max);
        self
    }

    /// Wake-up budget, if any.
    pub fn max_sleeps(&self) -> Option<usize> {
        self.limit
    }

    /// Number of completed waits.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Interval the last completed wait used (`initial` before the first one).
    pub fn current(&self) -> Duration {
        self.current
    }

    /// Configured starting interval.
    pub fn initial(&self) -> Duration {
        self.initial
    }

    /// Configured cap.
    pub fn max(&self) -> Duration {
        self.max
    }

    /// Restarts growth from `initial` and refills the budget.
    pub fn reset(&mut self) {
        self.current = self.initial;
        self.count = 0;
    }

    /// Interval the next call would wait.
    ///
    /// Randomized algorithms return a different value on every call.
    pub fn next_interval(&self) -> Duration {
        if self.current >= self.max {
            return self.max;
        }
        self.algorithm
            .next(self.current)
            .clamp(self.current, self.max)
    }
}

#[async_trait]
impl<A: BackoffAlgorithm> Sleeper for BackoffSleeper<A> {
    async fn sleep(&mut self, ctx: &CancellationToken) -> Result<(), SleepError> {
        if let Some(max) = self.limit {
            if ctx.is_cancelled() {
                return Err(SleepError::Canceled);
            }
            if self.count == max {
                return Err(SleepError::Exhausted { max });
            }
        }

        if self.max.is_zero() {
            // keeps a tight retry loop from starving the task that would cancel it
            task::yield_now().await;
            self.count = self.count.saturating_add(1);
            return Ok(());
        }

        let interval = self.next_interval();
        let timer = time::sleep(interval);
        tokio::pin!(timer);

        select! {
            biased;
            _ = ctx.cancelled() => {
                tracing::trace!(?interval, "backoff sleep cancelled");
                Err(SleepError::Canceled)
            }
            _ = &mut timer => {
                self.current = interval;
                self.count = self.count.saturating_add(1);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    fn doubling(initial: u64, max: u64) -> BackoffSleeper<impl BackoffAlgorithm> {
        BackoffSleeper::with_algorithm(
            Duration::from_millis(initial),
            Duration::from_millis(max),
            |d: Duration| d * 2,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_grows_then_stays_at_max() {
        let ctx = CancellationToken::new();
        let mut s = doubling(100, 1000);

        let mut seen = Vec::new();
        for _ in 0..6 {
            s.sleep(&ctx).await.unwrap();
            seen.push(s.current().as_millis());
        }
        assert_eq!(seen, vec![200, 400, 800, 1000, 1000, 1000]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_actually_waits_interval() {
        let ctx = CancellationToken::new();
        let mut s = doubling(100, 1000);

        let start = Instant::now();
        s.sleep(&ctx).await.unwrap();
        let waited = start.elapsed();
        assert!(waited >= Duration::from_millis(200), "{waited:?}");
        assert!(waited < Duration::from_millis(210), "{waited:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_backoff_non_decreasing_and_capped() {
        let ctx = CancellationToken::new();
        let max = Duration::from_secs(2);
        let mut s = BackoffSleeper::new(Duration::from_millis(50), max);

        let mut prev = s.current();
        for _ in 0..12 {
            s.sleep(&ctx).await.unwrap();
            assert!(s.current() >= prev);
            assert!(s.current() <= max);
            prev = s.current();
        }
        assert_eq!(s.current(), max);
    }

    #[tokio::test(start_paused = true)]
    async fn test_constant_when_initial_equals_max() {
        let ctx = CancellationToken::new();
        let mut s = BackoffSleeper::constant(Duration::from_millis(300));
        for _ in 0..3 {
            let start = Instant::now();
            s.sleep(&ctx).await.unwrap();
            assert!(start.elapsed() >= Duration::from_millis(300));
            assert_eq!(s.current(), Duration::from_millis(300));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_above_max_uses_max() {
        let s = doubling(5000, 1000);
        assert_eq!(s.next_interval(), Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_algorithm_is_clamped() {
        let huge = BackoffSleeper::with_algorithm(
            Duration::from_millis(10),
            Duration::from_millis(500),
            |_d: Duration| Duration::from_secs(3600),
        );
        assert_eq!(huge.next_interval(), Duration::from_millis(500));

        let shrinking = BackoffSleeper::with_algorithm(
            Duration::from_millis(100),
            Duration::from_millis(500),
            |_d: Duration| Duration::ZERO,
        );
        assert_eq!(shrinking.next_interval(), Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_zero_max_returns_immediately() {
        let ctx = CancellationToken::new();
        let mut s = BackoffSleeper::new(Duration::from_secs(10), Duration::ZERO);
        for _ in 0..100 {
            assert!(s.sleep(&ctx).await.is_ok());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_before_call() {
        let ctx = CancellationToken::new();
        ctx.cancel();
        let mut s = doubling(100, 1000);
        assert_eq!(s.sleep(&ctx).await, Err(SleepError::Canceled));
        assert_eq!(s.current(), Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_mid_wait_keeps_state() {
        let ctx = CancellationToken::new();
        let mut s = doubling(1000, 10_000);

        let canceller = ctx.clone();
        tokio::spawn(async move {
            time::sleep(Duration::from_millis(50)).await;
            canceller.cancel();
        });

        let start = Instant::now();
        assert_eq!(s.sleep(&ctx).await, Err(SleepError::Canceled));
        assert!(start.elapsed() < Duration::from_millis(2000));
        assert_eq!(s.current(), Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_restarts_growth() {
        let ctx = CancellationToken::new();
        let mut s = doubling(100, 1000);
        s.sleep(&ctx).await.unwrap();
        s.sleep(&ctx).await.unwrap();
        assert_eq!(s.current(), Duration::from_millis(400));
        s.reset();
        assert_eq!(s.current(), s.initial());
        assert_eq!(s.count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_budget_not_spent_by_cancelled_wait() {
        let ctx = CancellationToken::new();
        let mut s = BackoffSleeper::constant(Duration::from_secs(10)).with_max_sleeps(2);

        let canceller = ctx.clone();
        tokio::spawn(async move {
            time::sleep(Duration::from_secs(1)).await;
            canceller.cancel();
        });
        assert_eq!(s.sleep(&ctx).await, Err(SleepError::Canceled));
        assert_eq!(s.count(), 0);

        let fresh = CancellationToken::new();
        s.sleep(&fresh).await.unwrap();
        s.sleep(&fresh).await.unwrap();
        assert_eq!(s.count(), 2);
        assert_eq!(s.sleep(&fresh).await, Err(SleepError::Exhausted { max: 2 }));
    }

    #[tokio::test]
    async fn test_budget_checks_cancel_first() {
        let ctx = CancellationToken::new();
        ctx.cancel();

        let mut s = BackoffSleeper::new(Duration::ZERO, Duration::ZERO).with_max_sleeps(0);
        assert_eq!(s.sleep(&ctx).await, Err(SleepError::Canceled));

        let mut unbounded = BackoffSleeper::new(Duration::ZERO, Duration::ZERO);
        assert!(unbounded.sleep(&ctx).await.is_ok());
    }
}
