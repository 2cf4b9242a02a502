//! Timer status snapshot

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::LauncherState;

/// Phase of the single timer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerStatus {
    #[default]
    Empty,
    Running,
    /// Finished and waiting to be acknowledged
    Elapsed,
}

/// Point-in-time view of the timer, published to observers after every change
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimerState {
    pub status: TimerStatus,
    pub name: Option<String>,
    pub progress: Option<f64>,
    pub remaining_seconds: Option<i64>,
    pub started_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub reminders_emitted: u32,
    pub launcher: LauncherState,
}

impl TimerState {
    /// Create an empty timer state
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a countdown or reminder cycle is in progress
    pub fn is_active(&self) -> bool {
        self.status != TimerStatus::Empty
    }
}
