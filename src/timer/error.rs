//! Errors raised by the timer core

use thiserror::Error;

/// Failures of [`TimerSession`](super::TimerSession) operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("timer '{name}' has invalid duration {duration}s, it must be between 1 and {max}", max = super::MAX_DURATION_SECS)]
    InvalidDuration { name: String, duration: i64 },

    #[error("no timer session has been started")]
    NotStarted,
}

/// Failures of [`ReminderScheduler`](super::ReminderScheduler) operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReminderError {
    #[error("timer session has not elapsed yet")]
    NotElapsed,

    #[error("a reminder cycle is already active")]
    AlreadyActive,
}
