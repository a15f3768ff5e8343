//! # Retry driver.
//!
//! Runs an action until it decides to stop, consulting a [`Sleeper`] between
//! attempts.
//!
//! ## Flow
//! ```text
//! loop {
//!   ├─► attempt += 1
//!   ├─► action().await
//!   │       ├─ Attempt::Stop(Ok(v))  ─► return Ok(v)
//!   │       ├─ Attempt::Stop(Err(e)) ─► return Err(Action(e))
//!   │       └─ Attempt::Retry
//!   └─► sleeper.sleep(ctx).await
//!           ├─ Err(s) ─► return Err(Sleep(s))   (exhausted / cancelled / custom)
//!           └─ Ok     ─► continue
//! }
//! ```
//!
//! ## Rules
//! - Action and sleeper strictly alternate in the calling task (never concurrent).
//! - The driver has no attempt limit of its own; all stopping policy lives in
//!   the sleeper or in the action's own decision.
//! - The action's error is returned untouched; the driver never classifies it.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::{
    error::RetryError,
    loggers::{Logger, Quiet},
    sleepers::Sleeper,
};

/// Outcome of a single attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attempt<T, E> {
    /// End the session with this result (success or an error not worth retrying).
    Stop(Result<T, E>),
    /// Ask the sleeper for another attempt.
    Retry,
}

impl<T, E> Attempt<T, E> {
    /// Stops with a successful value.
    pub fn done(value: T) -> Self {
        Attempt::Stop(Ok(value))
    }

    /// Stops with an error.
    pub fn fail(err: E) -> Self {
        Attempt::Stop(Err(err))
    }

    /// Stops on `Ok`, retries on `Err`.
    ///
    /// Handy for actions whose every failure is transient; the error is dropped.
    pub fn retry_on_err(res: Result<T, E>) -> Self {
        match res {
            Ok(v) => Attempt::Stop(Ok(v)),
            Err(_) => Attempt::Retry,
        }
    }
}

/// Runs `action` until it stops or `sleeper` refuses to wait again.
///
/// # Example
/// ```
/// use tokio_util::sync::CancellationToken;
/// use retryvisor::{retry, Attempt, CountSleeper};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let ctx = CancellationToken::new();
/// let mut sleeper = CountSleeper::new(5);
/// let mut calls = 0;
///
/// let res: Result<u32, _> = retry(&ctx, &mut sleeper, || {
///     calls += 1;
///     let n = calls;
///     async move {
///         if n < 3 { Attempt::<u32, String>::Retry } else { Attempt::done(n) }
///     }
/// })
/// .await;
///
/// assert_eq!(res.unwrap(), 3);
/// assert_eq!(sleeper.count(), 2);
/// # }
/// ```
pub async fn retry<S, F, Fut, T, E>(
    ctx: &CancellationToken,
    sleeper: &mut S,
    action: F,
) -> Result<T, RetryError<E>>
where
    S: Sleeper + ?Sized,
    F: FnMut() -> Fut,
    Fut: Future<Output = Attempt<T, E>>,
{
    retry_with_logger(ctx, sleeper, &Quiet, action).await
}

/// Same as [`retry`], writing one line per unsuccessful attempt to `logger`.
pub async fn retry_with_logger<S, F, Fut, T, E>(
    ctx: &CancellationToken,
    sleeper: &mut S,
    logger: &dyn Logger,
    mut action: F,
) -> Result<T, RetryError<E>>
where
    S: Sleeper + ?Sized,
    F: FnMut() -> Fut,
    Fut: Future<Output = Attempt<T, E>>,
{
    let mut attempt: u64 = 0;

    loop {
        attempt += 1;

        if let Attempt::Stop(res) = action().await {
            tracing::debug!(attempt, ok = res.is_ok(), "retry stopped by action");
            return res.map_err(RetryError::Action);
        }

        if let Err(e) = sleeper.sleep(ctx).await {
            tracing::debug!(attempt, reason = e.as_label(), "retry stopped by sleeper");
            logger.write(format_args!("[retry] attempt={attempt} giving up: {e}"));
            return Err(RetryError::Sleep(e));
        }

        logger.write(format_args!("[retry] attempt={attempt} not done, retrying"));
    }
}
