//! # Example: poll_with_backoff
//!
//! Polls a flaky "remote job" until it reports ready, backing off between polls,
//! then fans out a batch of follow-up jobs and waits until they have gone idle.
//!
//! ## Flow
//! ```text
//! retry(ctx, CountSleeper(8).then(BackoffSleeper(50ms, 400ms)), poll)
//!   ├─► poll #1 → not ready → sleep ≈100ms
//!   ├─► poll #2 → not ready → sleep ≈200ms
//!   ├─► poll #3 → not ready → sleep ≈400ms
//!   └─► poll #4 → ready
//!
//! all([job1..job5])  each job: idle.track() … work … drop(guard)
//! idle.wait(ctx)     resolves 300ms after the last job finished
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example poll_with_backoff --features logging
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use retryvisor::{
    Attempt, BackoffSleeper, Config, CountSleeper, Logger, MultiLogger, SleeperExt, StdoutLogger,
    TracingLogger, all, retry_with_logger,
};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

static POLLS: AtomicU32 = AtomicU32::new(0);

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let ctx = CancellationToken::new();
    let sinks: Vec<Arc<dyn Logger>> = vec![Arc::new(StdoutLogger), Arc::new(TracingLogger::default())];
    let log = MultiLogger::new(sinks);

    // 1. Poll until ready, at most 8 waits, growing from 50ms up to 400ms.
    let mut sleeper = CountSleeper::new(8).then(BackoffSleeper::new(
        Duration::from_millis(50),
        Duration::from_millis(400),
    ));
    let status = retry_with_logger(&ctx, &mut sleeper, &log, || async {
        let n = POLLS.fetch_add(1, Ordering::SeqCst) + 1;
        if n < 4 {
            Attempt::Retry
        } else {
            Attempt::<_, std::io::Error>::done(format!("ready after {n} polls"))
        }
    })
    .await?;
    println!("[poll] {status}");

    // 2. Fan out follow-up jobs and wait until they have been idle for `quiet`.
    let cfg = Config::default();
    let idle = Arc::new(cfg.idle_counter());
    let jobs = (1..=5u64).map(|i| {
        let guard = idle.track();
        async move {
            tokio::time::sleep(Duration::from_millis(20 * i)).await;
            println!("[job] #{i} finished");
            drop(guard);
        }
    });
    let handle = all(jobs);

    idle.wait(&ctx).await?;
    handle.join().await;
    println!("[idle] quiet for {:?}", idle.quiet());
    Ok(())
}
