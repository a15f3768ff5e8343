//! # Idle counter: wait until a batch of jobs has been quiet for a while.
//!
//! [`IdleCounter`] is similar to a wait group, but [`IdleCounter::wait`] only
//! resolves after the job count has stayed at zero for the whole `quiet` window.
//! A transient zero crossing is not enough: any [`add`](IdleCounter::add) during
//! the window disarms the timer and the window restarts at the next zero.
//!
//! ## Timeline
//! ```text
//! jobs:   0 ─ add ─ 1 ─ done ─ 0 ─ add ─ 1 ─ done ─ 0 ────────────── quiet ──► wait() resolves
//! timer:    disarmed     armed  disarmed     armed (restarted)
//! ```
//!
//! ## Rules
//! - `add` / `done` / `wait` are serialized by one lock around the count and deadline.
//! - The deadline is armed exactly when the count returns to zero (or `wait`
//!   starts while it is zero); `add` always disarms it.
//! - `done` without a matching `add` is a programming error and panics.
//! - A cancelled `wait` returns [`SleepError::Canceled`]; the last waiter to
//!   leave disarms the deadline, so nothing stays armed.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::{select, sync::Notify, time, time::Instant};
use tokio_util::sync::CancellationToken;

use crate::error::SleepError;

/// Count and timer state guarded by the counter's lock.
#[derive(Debug, Default)]
struct State {
    /// Jobs in flight.
    jobs: usize,
    /// When the quiet window ends; `None` = disarmed.
    deadline: Option<Instant>,
    /// Tasks currently inside `wait`.
    waiters: usize,
}

/// Tracks in-flight jobs and resolves waiters once they have been idle for `quiet`.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
/// use tokio_util::sync::CancellationToken;
/// use retryvisor::IdleCounter;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let idle = Arc::new(IdleCounter::new(Duration::from_millis(20)));
/// let ctx = CancellationToken::new();
///
/// let job = idle.track();
/// tokio::spawn(async move {
///     tokio::time::sleep(Duration::from_millis(10)).await;
///     drop(job);
/// });
///
/// idle.wait(&ctx).await.unwrap();
/// assert_eq!(idle.jobs(), 0);
/// # }
/// ```
#[derive(Debug)]
pub struct IdleCounter {
    quiet: Duration,
    state: Mutex<State>,
    changed: Notify,
}

impl IdleCounter {
    /// Creates an idle counter with no jobs and a disarmed timer.
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            state: Mutex::new(State::default()),
            changed: Notify::new(),
        }
    }

    /// Length of the quiet window.
    pub fn quiet(&self) -> Duration {
        self.quiet
    }

    /// Current number of jobs in flight.
    pub fn jobs(&self) -> usize {
        self.lock().jobs
    }

    /// Registers a job and disarms the quiet timer.
    pub fn add(&self) {
        {
            let mut st = self.lock();
            st.jobs += 1;
            st.deadline = None;
        }
        self.changed.notify_waiters();
    }

    /// Completes a job; arms the quiet timer when the count returns to zero.
    ///
    /// # Panics
    /// Panics if there is no outstanding job (unbalanced `done`).
    pub fn done(&self) {
        {
            let mut st = self.lock();
            if st.jobs == 0 {
                drop(st);
                panic!("all jobs are already done");
            }
            st.jobs -= 1;
            if st.jobs != 0 {
                return;
            }
            st.deadline = Some(Instant::now() + self.quiet);
        }
        tracing::trace!(quiet = ?self.quiet, "idle counter drained, quiet timer armed");
        self.changed.notify_waiters();
    }

    /// Registers a job that completes when the returned guard is dropped.
    pub fn track(self: &Arc<Self>) -> JobGuard {
        self.add();
        JobGuard {
            counter: Arc::clone(self),
        }
    }

    /// Waits until the count has been zero for the full quiet window.
    ///
    /// If the count is zero on entry the window starts now. Returns
    /// [`SleepError::Canceled`] if `ctx` fires first.
    pub async fn wait(&self, ctx: &CancellationToken) -> Result<(), SleepError> {
        {
            let mut st = self.lock();
            st.waiters += 1;
            if st.jobs == 0 {
                st.deadline = Some(Instant::now() + self.quiet);
            }
        }
        let _waiter = WaiterGuard { counter: self };

        loop {
            let notified = self.changed.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            let deadline = self.lock().deadline;
            match deadline {
                Some(deadline) => {
                    select! {
                        biased;
                        _ = ctx.cancelled() => return Err(SleepError::Canceled),
                        _ = &mut notified => continue,
                        _ = time::sleep_until(deadline) => {
                            let st = self.lock();
                            if st.jobs == 0 && st.deadline == Some(deadline) {
                                return Ok(());
                            }
                        }
                    }
                }
                None => {
                    select! {
                        biased;
                        _ = ctx.cancelled() => return Err(SleepError::Canceled),
                        _ = &mut notified => continue,
                    }
                }
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Leaves `wait`; the last waiter out disarms the deadline.
struct WaiterGuard<'a> {
    counter: &'a IdleCounter,
}

impl Drop for WaiterGuard<'_> {
    fn drop(&mut self) {
        let mut st = self.counter.lock();
        st.waiters -= 1;
        if st.waiters == 0 {
            st.deadline = None;
        }
    }
}

/// A job registered with [`IdleCounter::track`]; calls `done` on drop.
#[derive(Debug)]
#[must_use = "dropping the guard completes the job immediately"]
pub struct JobGuard {
    counter: Arc<IdleCounter>,
}

impl Drop for JobGuard {
    fn drop(&mut self) {
        self.counter.done();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(100);

    fn counter() -> Arc<IdleCounter> {
        Arc::new(IdleCounter::new(QUIET))
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_from_zero_takes_quiet() {
        let idle = counter();
        let ctx = CancellationToken::new();

        let start = Instant::now();
        idle.wait(&ctx).await.unwrap();
        let waited = start.elapsed();
        assert!(waited >= QUIET, "{waited:?}");
        assert!(waited < QUIET + Duration::from_millis(10), "{waited:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_add_during_window_restarts_it() {
        let idle = counter();
        let ctx = CancellationToken::new();
        let start = Instant::now();

        let driver = Arc::clone(&idle);
        tokio::spawn(async move {
            time::sleep(Duration::from_millis(50)).await;
            driver.add();
            time::sleep(Duration::from_millis(200)).await;
            driver.done();
        });

        idle.wait(&ctx).await.unwrap();
        let waited = start.elapsed();
        assert!(waited >= Duration::from_millis(350), "{waited:?}");
        assert!(waited < Duration::from_millis(360), "{waited:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_zero_does_not_resolve() {
        let idle = counter();
        let ctx = CancellationToken::new();
        let start = Instant::now();

        idle.add();
        let driver = Arc::clone(&idle);
        tokio::spawn(async move {
            time::sleep(Duration::from_millis(10)).await;
            driver.done();
            time::sleep(Duration::from_millis(40)).await;
            driver.add();
            time::sleep(Duration::from_millis(30)).await;
            driver.done();
        });

        idle.wait(&ctx).await.unwrap();
        // second done at t=80, plus the quiet window
        let waited = start.elapsed();
        assert!(waited >= Duration::from_millis(180), "{waited:?}");
        assert!(waited < Duration::from_millis(190), "{waited:?}");
        assert_eq!(idle.jobs(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_returns_error_and_disarms() {
        let idle = counter();
        let ctx = CancellationToken::new();

        idle.add();
        let canceller = ctx.clone();
        tokio::spawn(async move {
            time::sleep(Duration::from_millis(30)).await;
            canceller.cancel();
        });

        assert_eq!(idle.wait(&ctx).await, Err(SleepError::Canceled));
        let st = idle.lock();
        assert_eq!(st.waiters, 0);
        assert_eq!(st.deadline, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_before_wait() {
        let idle = counter();
        let ctx = CancellationToken::new();
        ctx.cancel();

        assert_eq!(idle.wait(&ctx).await, Err(SleepError::Canceled));
        assert_eq!(idle.lock().deadline, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_many_waiters_resolve_together() {
        let idle = counter();
        let ctx = CancellationToken::new();
        let job = idle.track();

        let mut waiters = Vec::new();
        for _ in 0..4 {
            let idle = Arc::clone(&idle);
            let ctx = ctx.clone();
            waiters.push(tokio::spawn(async move { idle.wait(&ctx).await }));
        }

        time::sleep(Duration::from_millis(20)).await;
        drop(job);

        for w in waiters {
            assert_eq!(w.await.unwrap(), Ok(()));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_job_guard_balances() {
        let idle = counter();
        {
            let _a = idle.track();
            let _b = idle.track();
            assert_eq!(idle.jobs(), 2);
        }
        assert_eq!(idle.jobs(), 0);
    }

    #[test]
    #[should_panic(expected = "all jobs are already done")]
    fn test_unbalanced_done_panics() {
        let idle = IdleCounter::new(QUIET);
        idle.done();
    }

    #[test]
    #[should_panic(expected = "all jobs are already done")]
    fn test_extra_done_after_balance_panics() {
        let idle = IdleCounter::new(QUIET);
        idle.add();
        idle.done();
        idle.done();
    }
}
