//! # Fan-out: run many actions concurrently, join them all.
//!
//! [`all`] spawns every future onto the tokio runtime; [`all_blocking`] runs
//! every closure on the blocking pool. Both return an [`AllHandle`] whose
//! [`join`](AllHandle::join) resolves once every action has returned.
//!
//! ## Diagram
//! ```text
//!    all([a1, a2, .., aN])
//!        ├──► spawn a1 ─┐
//!        ├──► spawn a2 ─┤
//!        └──► spawn aN ─┴──► AllHandle::join() resolves when all N are done
//! ```
//!
//! ## Rules
//! - No ordering among actions; they run independently of each other and the caller.
//! - Actions report nothing back: errors are the action's own business.
//! - A panicking action counts as finished; the panic is logged, not propagated.
//! - Dropping the handle detaches the actions; they keep running.
//! - Must be called from within a tokio runtime.

use std::future::Future;

use futures::future::join_all;
use tokio::task::{self, JoinHandle};

/// Join token for a batch of concurrently started actions.
#[derive(Debug)]
#[must_use = "call `join().await` to wait for the actions"]
pub struct AllHandle {
    workers: Vec<JoinHandle<()>>,
}

impl AllHandle {
    /// Waits until every action has finished (returned or panicked).
    pub async fn join(self) {
        let total = self.workers.len();
        for res in join_all(self.workers).await {
            if let Err(e) = res {
                if e.is_panic() {
                    tracing::warn!(total, "fan-out action panicked: {e}");
                } else {
                    tracing::debug!(total, "fan-out action cancelled: {e}");
                }
            }
        }
    }

    /// Number of actions in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.workers.len()
    }

    /// True if the batch is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }
}

/// Starts every future concurrently on the current runtime.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let hits = Arc::new(AtomicUsize::new(0));
/// let actions = (0..5).map(|_| {
///     let hits = Arc::clone(&hits);
///     async move {
///         hits.fetch_add(1, Ordering::SeqCst);
///     }
/// });
///
/// retryvisor::all(actions).join().await;
/// assert_eq!(hits.load(Ordering::SeqCst), 5);
/// # }
/// ```
pub fn all<I, Fut>(actions: I) -> AllHandle
where
    I: IntoIterator<Item = Fut>,
    Fut: Future<Output = ()> + Send + 'static,
{
    AllHandle {
        workers: actions.into_iter().map(tokio::spawn).collect(),
    }
}

/// Starts every closure concurrently on the blocking thread pool.
pub fn all_blocking<I, F>(actions: I) -> AllHandle
where
    I: IntoIterator<Item = F>,
    F: FnOnce() + Send + 'static,
{
    AllHandle {
        workers: actions.into_iter().map(task::spawn_blocking).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_five_increments_every_run() {
        for _ in 0..50 {
            let counter = Arc::new(AtomicUsize::new(0));
            let actions = (0..5).map(|i| {
                let counter = Arc::clone(&counter);
                async move {
                    tokio::time::sleep(Duration::from_millis(5 - i)).await;
                    counter.fetch_add(1, Ordering::SeqCst);
                }
            });

            let handle = all(actions);
            assert_eq!(handle.len(), 5);
            handle.join().await;
            assert_eq!(counter.load(Ordering::SeqCst), 5);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_blocking_closures() {
        let counter = Arc::new(AtomicUsize::new(0));
        let actions: Vec<_> = (0..5)
            .map(|_| {
                let counter = Arc::clone(&counter);
                move || {
                    std::thread::sleep(Duration::from_millis(5));
                    counter.fetch_add(1, Ordering::SeqCst);
                }
            })
            .collect();

        all_blocking(actions).join().await;
        assert_eq!(counter.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_panic_counts_as_finished() {
        let counter = Arc::new(AtomicUsize::new(0));
        let ok = {
            let counter = Arc::clone(&counter);
            Box::pin(async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }) as std::pin::Pin<Box<dyn Future<Output = ()> + Send>>
        };
        let boom = Box::pin(explode()) as std::pin::Pin<Box<dyn Future<Output = ()> + Send>>;

        all(vec![boom, ok]).join().await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    async fn explode() {
        panic!("action failed")
    }

    #[tokio::test]
    async fn test_empty_batch_joins_immediately() {
        let handle = all(Vec::<std::future::Ready<()>>::new());
        assert!(handle.is_empty());
        handle.join().await;
    }
}
