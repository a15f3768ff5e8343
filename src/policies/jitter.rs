//! # Jitter policy for backoff intervals.
//!
//! [`JitterPolicy`] adds randomness to a grown interval so that many retry sessions
//! started at the same moment do not wake up in lockstep.
//!
//! - [`JitterPolicy::None`] - no randomization, predictable intervals
//! - [`JitterPolicy::Full`] - random interval in [0, interval] (most aggressive)
//! - [`JitterPolicy::Equal`] - interval/2 + random[0, interval/2] (balanced)

use rand::Rng;
use std::time::Duration;

/// Policy controlling randomization of backoff intervals.
///
/// ## Trade-offs
/// - **None**: Predictable, but risks thundering herd
/// - **Full**: Maximum randomness, may shrink the wait considerably
/// - **Equal**: Keeps at least half of the interval
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JitterPolicy {
    /// No jitter: use the exact interval.
    #[default]
    None,

    /// Full jitter: random interval in [0, interval].
    Full,

    /// Equal jitter: interval/2 + random[0, interval/2].
    Equal,
}

impl JitterPolicy {
    /// Applies jitter to the given interval.
    pub fn apply(&self, interval: Duration) -> Duration {
        match self {
            JitterPolicy::None => interval,
            JitterPolicy::Full => full_jitter(interval),
            JitterPolicy::Equal => equal_jitter(interval),
        }
    }
}

// Jitter works in nanoseconds so sub-millisecond intervals keep their size.
fn nanos(d: Duration) -> u64 {
    u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)
}

fn full_jitter(interval: Duration) -> Duration {
    let ns = nanos(interval);
    Duration::from_nanos(rand::rng().random_range(0..=ns))
}

fn equal_jitter(interval: Duration) -> Duration {
    let half = nanos(interval) / 2;
    Duration::from_nanos(half + rand::rng().random_range(0..=half))
}
