//! Timer definition record

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Longest countdown accepted: one year
pub const MAX_DURATION_SECS: i64 = 365 * 24 * 60 * 60;

/// A named countdown length, as stored in the entry list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerDefinition {
    pub name: String,
    /// Length of the countdown in whole seconds
    pub duration: i64,
}

impl TimerDefinition {
    pub fn new(name: impl Into<String>, duration: i64) -> Self {
        Self {
            name: name.into(),
            duration,
        }
    }

    /// A definition can only be started when its duration is positive and
    /// at most [`MAX_DURATION_SECS`]
    pub fn is_valid(&self) -> bool {
        (1..=MAX_DURATION_SECS).contains(&self.duration)
    }

    /// Countdown length, clamped to `0..=MAX_DURATION_SECS`
    pub fn duration(&self) -> Duration {
        Duration::seconds(self.duration.clamp(0, MAX_DURATION_SECS))
    }
}
