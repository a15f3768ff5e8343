//! # Sleeper trait.
//!
//! Provides [`Sleeper`] the capability consulted by [`retry`](crate::retry) between
//! failed attempts: either wait and return `Ok(())`, or return a [`SleepError`]
//! meaning "stop retrying".
//!
//! ## Rules
//! - A sleeper must return promptly once the cancellation token fires.
//! - A cancelled wait leaves the sleeper's state untouched.
//! - Any timer armed by a wait is released on every exit path.
//! - Sleepers carry session-local state and are not synchronized; build one per
//!   retry session and do not share it across concurrent sessions.
//!
//! ## Combining sleepers
//! ```text
//! CountSleeper(3).then(BackoffSleeper(100ms, 1s))
//!   sleep() ──► count.sleep()?   (stop after 3 wake-ups)
//!          └──► backoff.sleep()  (grow the delay up to 1s)
//! ```

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::SleepError;

/// Waits between retry attempts, or refuses to wait again.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use tokio_util::sync::CancellationToken;
/// use retryvisor::{Sleeper, SleepError};
///
/// /// Lets the loop spin exactly once.
/// struct Once(bool);
///
/// #[async_trait]
/// impl Sleeper for Once {
///     async fn sleep(&mut self, _ctx: &CancellationToken) -> Result<(), SleepError> {
///         if std::mem::replace(&mut self.0, true) {
///             return Err(SleepError::Stopped { reason: "already slept".into() });
///         }
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Sleeper: Send {
    /// Waits once.
    ///
    /// Returns `Ok(())` to allow another attempt, or a [`SleepError`] to stop.
    /// Cancellation of `ctx` must surface as [`SleepError::Canceled`].
    async fn sleep(&mut self, ctx: &CancellationToken) -> Result<(), SleepError>;
}

#[async_trait]
impl<S: Sleeper + ?Sized> Sleeper for Box<S> {
    async fn sleep(&mut self, ctx: &CancellationToken) -> Result<(), SleepError> {
        (**self).sleep(ctx).await
    }
}

#[async_trait]
impl<S: Sleeper + ?Sized> Sleeper for &mut S {
    async fn sleep(&mut self, ctx: &CancellationToken) -> Result<(), SleepError> {
        (**self).sleep(ctx).await
    }
}

/// Combinators available on every [`Sleeper`].
pub trait SleeperExt: Sleeper + Sized {
    /// Runs `self` then `next` on every call; the first error stops the chain.
    fn then<B: Sleeper>(self, next: B) -> Chain<Self, B> {
        Chain {
            first: self,
            second: next,
        }
    }

    /// Erases the concrete type.
    fn boxed(self) -> Box<dyn Sleeper>
    where
        Self: 'static,
    {
        Box::new(self)
    }
}

impl<S: Sleeper> SleeperExt for S {}

/// Two sleepers run one after the other on each call.
///
/// Built by [`SleeperExt::then`]. The first stage has already committed when the
/// second one runs, so a cancelled second stage still spends a `CountSleeper`
/// wake-up; [`BackoffSleeper::with_max_sleeps`](crate::BackoffSleeper::with_max_sleeps)
/// only counts completed waits.
#[derive(Debug)]
pub struct Chain<A, B> {
    first: A,
    second: B,
}

impl<A, B> Chain<A, B> {
    /// Returns the inner sleepers.
    pub fn into_inner(self) -> (A, B) {
        (self.first, self.second)
    }
}

#[async_trait]
impl<A: Sleeper, B: Sleeper> Sleeper for Chain<A, B> {
    async fn sleep(&mut self, ctx: &CancellationToken) -> Result<(), SleepError> {
        self.first.sleep(ctx).await?;
        self.second.sleep(ctx).await
    }
}
