//! # Function-backed sleeper (`SleeperFn`)
//!
//! [`SleeperFn`] wraps a closure `F: FnMut(CancellationToken) -> Fut`, producing a
//! fresh future per wait. The closure may keep its own state between calls
//! (it is `FnMut`), which is enough for most ad-hoc stopping policies.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//! use retryvisor::{SleeperFn, SleepError};
//!
//! let mut deadline_hits = 0;
//! let s = SleeperFn::new(move |ctx: CancellationToken| {
//!     deadline_hits += 1;
//!     let give_up = deadline_hits > 3;
//!     async move {
//!         if give_up {
//!             return Err(SleepError::Stopped { reason: "three strikes".into() });
//!         }
//!         retryvisor::sleep(&ctx, Duration::from_millis(10)).await
//!     }
//! });
//! # let _ = s;
//! ```

use std::future::Future;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::SleepError;
use crate::sleepers::Sleeper;

/// Function-backed sleeper implementation.
///
/// Wraps a closure that *creates* a new wait future per call.
#[derive(Debug)]
pub struct SleeperFn<F> {
    f: F,
}

impl<F> SleeperFn<F> {
    /// Creates a new function-backed sleeper.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F, Fut> Sleeper for SleeperFn<F>
where
    F: FnMut(CancellationToken) -> Fut + Send,
    Fut: Future<Output = Result<(), SleepError>> + Send,
{
    async fn sleep(&mut self, ctx: &CancellationToken) -> Result<(), SleepError> {
        (self.f)(ctx.clone()).await
    }
}
