//! # Count-bounded sleeper.
//!
//! [`CountSleeper`] wakes immediately up to `max` times and refuses on the
//! `max + 1`-th call with [`SleepError::Exhausted`].

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::SleepError;
use crate::sleepers::Sleeper;

/// Wakes immediately; stops after `max` wake-ups.
///
/// # Example
/// ```
/// use tokio_util::sync::CancellationToken;
/// use retryvisor::{CountSleeper, Sleeper, SleepError};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let ctx = CancellationToken::new();
/// let mut s = CountSleeper::new(2);
/// assert!(s.sleep(&ctx).await.is_ok());
/// assert!(s.sleep(&ctx).await.is_ok());
/// assert_eq!(s.sleep(&ctx).await, Err(SleepError::Exhausted { max: 2 }));
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct CountSleeper {
    max: usize,
    count: usize,
}

impl CountSleeper {
    /// Creates a sleeper that allows `max` wake-ups.
    pub fn new(max: usize) -> Self {
        Self { max, count: 0 }
    }

    /// Number of successful wake-ups so far.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Wake-ups left before the budget is exhausted.
    pub fn remaining(&self) -> usize {
        self.max - self.count
    }
}

#[async_trait]
impl Sleeper for CountSleeper {
    async fn sleep(&mut self, ctx: &CancellationToken) -> Result<(), SleepError> {
        if ctx.is_cancelled() {
            return Err(SleepError::Canceled);
        }
        if self.count == self.max {
            return Err(SleepError::Exhausted { max: self.max });
        }
        self.count += 1;
        Ok(())
    }
}
