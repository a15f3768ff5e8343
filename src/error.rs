//! Error types used by sleepers, the retry driver and the idle counter.
//!
//! This module defines two error enums:
//!
//! - [`SleepError`] - the stop signal returned by a [`Sleeper`](crate::Sleeper)
//!   when it refuses to wait again (budget exhausted, cancelled, custom reason).
//! - [`RetryError`] - the overall failure of [`retry`](crate::retry): either the
//!   action's own error or the sleeper's stop signal.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging/metrics.
//! Cancellation is never wrapped into another reason, so callers can always tell
//! "gave up" apart from "asked to stop" via `is_canceled`.

use thiserror::Error;

/// # Stop signal produced by a sleeper.
///
/// Any `Err` returned from [`Sleeper::sleep`](crate::Sleeper::sleep) means
/// "do not wait again" and terminates the retry loop.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SleepError {
    /// The sleeper has already woken up `max` times.
    #[error("max sleep count")]
    Exhausted {
        /// The configured wake-up budget.
        max: usize,
    },

    /// The caller's cancellation token fired before or during the wait.
    #[error("context cancelled")]
    Canceled,

    /// A custom sleeper decided to stop.
    #[error("sleeper stopped: {reason}")]
    Stopped {
        /// Human-readable reason supplied by the sleeper.
        reason: String,
    },
}

impl SleepError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use retryvisor::SleepError;
    ///
    /// let err = SleepError::Exhausted { max: 3 };
    /// assert_eq!(err.as_label(), "sleep_exhausted");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            SleepError::Exhausted { .. } => "sleep_exhausted",
            SleepError::Canceled => "sleep_canceled",
            SleepError::Stopped { .. } => "sleep_stopped",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            SleepError::Exhausted { max } => format!("max sleep count reached: {max}"),
            SleepError::Canceled => "context cancelled".to_string(),
            SleepError::Stopped { reason } => format!("stopped: {reason}"),
        }
    }

    /// True if the stop was caused by the caller's cancellation token.
    pub fn is_canceled(&self) -> bool {
        matches!(self, SleepError::Canceled)
    }
}

/// # Overall failure of a retry session.
///
/// The action's error is carried untouched in [`RetryError::Action`];
/// the retry driver never inspects or classifies it.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RetryError<E> {
    /// The action stopped the loop with its own error.
    #[error("{0}")]
    Action(E),

    /// The sleeper refused to wait again.
    #[error(transparent)]
    Sleep(#[from] SleepError),
}

impl<E> RetryError<E> {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use retryvisor::{RetryError, SleepError};
    ///
    /// let err: RetryError<std::io::Error> = SleepError::Canceled.into();
    /// assert_eq!(err.as_label(), "sleep_canceled");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RetryError::Action(_) => "retry_action_failed",
            RetryError::Sleep(e) => e.as_label(),
        }
    }

    /// True if the session ended because the caller cancelled it.
    pub fn is_canceled(&self) -> bool {
        matches!(self, RetryError::Sleep(e) if e.is_canceled())
    }

    /// Returns the action's own error, if that is what stopped the loop.
    pub fn into_action(self) -> Option<E> {
        match self {
            RetryError::Action(e) => Some(e),
            RetryError::Sleep(_) => None,
        }
    }

    /// Returns the sleeper's stop signal, if that is what stopped the loop.
    pub fn as_sleep(&self) -> Option<&SleepError> {
        match self {
            RetryError::Sleep(e) => Some(e),
            RetryError::Action(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhausted_display_matches_budget_message() {
        let err = SleepError::Exhausted { max: 5 };
        assert_eq!(err.to_string(), "max sleep count");
        assert_eq!(err.as_message(), "max sleep count reached: 5");
        assert!(!err.is_canceled());
    }

    #[test]
    fn test_canceled_is_not_wrapped() {
        let err: RetryError<String> = SleepError::Canceled.into();
        assert!(err.is_canceled());
        assert_eq!(err.as_sleep(), Some(&SleepError::Canceled));
        assert_eq!(err.to_string(), "context cancelled");
    }

    #[test]
    fn test_action_error_passes_through() {
        let err: RetryError<String> = RetryError::Action("boom".to_string());
        assert!(!err.is_canceled());
        assert_eq!(err.as_label(), "retry_action_failed");
        assert_eq!(err.to_string(), "boom");
        assert_eq!(err.into_action().as_deref(), Some("boom"));
    }
}
