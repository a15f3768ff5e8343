//! Coordination core: retry loop, idle tracking and fan-out.
//!
//! - [`retry`]: alternates an action with a sleeper until one of them stops;
//! - [`idle`]: job counter that resolves waiters after a quiet window;
//! - [`fanout`]: starts a batch of actions concurrently and joins them.
//!
//! The idle counter and fan-out runner are independent of sleepers and retry.

mod fanout;
mod idle;
mod retry;

pub use fanout::{AllHandle, all, all_blocking};
pub use idle::{IdleCounter, JobGuard};
pub use retry::{Attempt, retry, retry_with_logger};
