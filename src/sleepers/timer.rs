//! # One-shot cancellable waits.
//!
//! - [`sleep`] waits a fixed duration or until cancelled;
//! - [`sleep_secs`] same, with the duration given in fractional seconds;
//! - [`pause`] parks the current task until cancelled.

use std::time::Duration;

use tokio::{select, time};
use tokio_util::sync::CancellationToken;

use crate::error::SleepError;

/// Waits `duration`, or returns [`SleepError::Canceled`] as soon as `ctx` fires.
pub async fn sleep(ctx: &CancellationToken, duration: Duration) -> Result<(), SleepError> {
    let timer = time::sleep(duration);
    tokio::pin!(timer);

    select! {
        biased;
        _ = ctx.cancelled() => Err(SleepError::Canceled),
        _ = &mut timer => Ok(()),
    }
}

/// Waits `seconds` (e.g. `2.3`); negative or non-finite values wait zero.
pub async fn sleep_secs(ctx: &CancellationToken, seconds: f64) -> Result<(), SleepError> {
    let duration = Duration::try_from_secs_f64(seconds).unwrap_or(Duration::ZERO);
    sleep(ctx, duration).await
}

/// Parks the current task until `ctx` is cancelled.
///
/// Nothing else ever wakes it; a task that must run until shutdown awaits this
/// with the shutdown token.
pub async fn pause(ctx: &CancellationToken) {
    ctx.cancelled().await;
    tracing::trace!("pause released");
}
