//! # retryvisor
//!
//! **Retryvisor** is a small toolkit of coordination primitives for long-running
//! or flaky async operations: polling a remote process, waiting on an external
//! resource, draining a burst of concurrent jobs.
//!
//! It provides composable pieces rather than a runtime: a [`Sleeper`] decides
//! what happens between attempts, [`retry`] drives the loop, [`IdleCounter`]
//! tells when a batch of jobs has gone quiet, and [`all`] fans work out and
//! joins it back.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   caller
//!     │  builds
//!     ▼
//! ┌──────────────────────────────┐        ┌─────────────────────────────┐
//! │ Sleeper                      │        │ BackoffAlgorithm            │
//! │  - CountSleeper   (budget)   │◄───────│  - DefaultBackoff ×[1.9,2.1)│
//! │  - BackoffSleeper (interval) │ steps  │  - Linear / Exponential     │
//! │  - SleeperFn      (custom)   │        │  - any Fn(Duration)         │
//! └──────────────┬───────────────┘        └─────────────────────────────┘
//!                │ &mut
//!                ▼
//! ┌──────────────────────────────┐        ┌─────────────────────────────┐
//! │ retry(ctx, sleeper, action)  │───────►│ Logger (optional sink)      │
//! │  action ⇄ sleeper.sleep(ctx) │ writes │  Quiet / Multi / Tracing    │
//! └──────────────────────────────┘        └─────────────────────────────┘
//!
//! independent primitives:
//! ┌──────────────────────────────┐        ┌─────────────────────────────┐
//! │ IdleCounter                  │        │ all / all_blocking          │
//! │  add / done / wait(ctx)      │        │  spawn N ─► AllHandle::join │
//! └──────────────────────────────┘        └─────────────────────────────┘
//! ```
//!
//! ### Retry lifecycle
//! ```text
//! loop {
//!   ├─► action().await
//!   │       ├─ Stop(Ok(v))  ─► return Ok(v)
//!   │       ├─ Stop(Err(e)) ─► return Err(RetryError::Action(e))
//!   │       └─ Retry
//!   └─► sleeper.sleep(ctx).await
//!           ├─ Err(Exhausted / Canceled / Stopped) ─► return Err(RetryError::Sleep(..))
//!           └─ Ok ─► continue
//! }
//! ```
//!
//! ## Features
//! | Area              | Description                                                        | Key types / functions                          |
//! |-------------------|--------------------------------------------------------------------|------------------------------------------------|
//! | **Sleepers**      | What to do between attempts: wait, grow the wait, or give up.      | [`Sleeper`], [`CountSleeper`], [`BackoffSleeper`] |
//! | **Backoff**       | How intervals grow.                                                | [`BackoffAlgorithm`], [`DefaultBackoff`]       |
//! | **Retry**         | Alternate an action with a sleeper until one of them stops.        | [`retry`], [`Attempt`]                         |
//! | **Idle tracking** | Resolve once a batch of jobs stayed at zero for a quiet window.    | [`IdleCounter`], [`JobGuard`]                  |
//! | **Fan-out**       | Start N actions concurrently, join them all.                       | [`all`], [`all_blocking`], [`AllHandle`]       |
//! | **Errors**        | Typed stop signals; cancellation is never wrapped.                 | [`SleepError`], [`RetryError`]                 |
//! | **Logging**       | Write-only diagnostic sinks.                                       | [`Logger`], [`MultiLogger`], [`TracingLogger`] |
//! | **Configuration** | Defaults for building session sleepers and idle counters.          | [`Config`]                                     |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`StdoutLogger`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//! use retryvisor::{retry, Attempt, BackoffSleeper, CountSleeper, SleeperExt};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ctx = CancellationToken::new();
//!
//!     // At most 5 waits, growing from 10ms up to 50ms.
//!     let mut sleeper = CountSleeper::new(5)
//!         .then(BackoffSleeper::new(Duration::from_millis(10), Duration::from_millis(50)));
//!
//!     let mut polls = 0;
//!     let ready = retry(&ctx, &mut sleeper, || {
//!         polls += 1;
//!         let n = polls;
//!         async move {
//!             if n < 3 {
//!                 Attempt::Retry
//!             } else {
//!                 Attempt::<_, std::io::Error>::done(n)
//!             }
//!         }
//!     })
//!     .await?;
//!
//!     assert_eq!(ready, 3);
//!     Ok(())
//! }
//! ```
mod config;
mod core;
mod error;
mod loggers;
mod policies;
mod sleepers;

// ---- Public re-exports ----

pub use config::Config;
pub use self::core::{
    AllHandle, Attempt, IdleCounter, JobGuard, all, all_blocking, retry, retry_with_logger,
};
pub use error::{RetryError, SleepError};
pub use loggers::{LogFn, Logger, MultiLogger, Quiet, TracingLogger};
pub use policies::{
    BackoffAlgorithm, DEFAULT_SCALE_MAX, DEFAULT_SCALE_MIN, DefaultBackoff, Exponential,
    JitterPolicy, Linear,
};
pub use sleepers::{
    BackoffSleeper, Chain, CountSleeper, Sleeper, SleeperExt, SleeperFn, pause, sleep, sleep_secs,
};

// Optional: expose a simple built-in stdout logger (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use loggers::StdoutLogger;
