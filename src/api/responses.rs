//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{state::TimerState, timer::TimerDefinition};

/// API response structure for timer control endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerState,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, timer: TimerState) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            timer,
        }
    }

    /// Create a running response
    pub fn running(message: String, timer: TimerState) -> Self {
        Self::new("running".to_string(), message, timer)
    }

    /// Create a response for a request that changed nothing
    pub fn ignored(message: String, timer: TimerState) -> Self {
        Self::new("ignored".to_string(), message, timer)
    }

    /// Create a stopped response
    pub fn stopped(message: String, timer: TimerState) -> Self {
        Self::new("stopped".to_string(), message, timer)
    }
}

/// One row of the timer list, with its position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryResponse {
    pub index: usize,
    pub name: String,
    pub duration: i64,
}

impl EntryResponse {
    pub fn new(index: usize, definition: TimerDefinition) -> Self {
        Self {
            index,
            name: definition.name,
            duration: definition.duration,
        }
    }
}

/// Body of `POST /entries`
#[derive(Debug, Clone, Deserialize)]
pub struct NewEntry {
    pub name: String,
    pub duration: i64,
}

/// Status response with timer and server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerState,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
