//! Shared state handed to the HTTP handlers

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, oneshot, watch};

use super::TimerState;
use crate::tasks::DriverCommand;

/// Handle the control surface uses to reach the timer driver
#[derive(Debug)]
pub struct AppState {
    /// Commands for the driver task
    pub commands: mpsc::Sender<DriverCommand>,
    /// Latest snapshot published by the driver
    pub timer_rx: watch::Receiver<TimerState>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    pub fn new(
        commands: mpsc::Sender<DriverCommand>,
        timer_rx: watch::Receiver<TimerState>,
        port: u16,
        host: String,
    ) -> Self {
        Self {
            commands,
            timer_rx,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        }
    }

    /// Send a command to the driver and wait for its reply
    ///
    /// The driver publishes its new state before replying, so
    /// [`get_timer_state`](Self::get_timer_state) reflects the command afterwards.
    pub async fn request<R>(
        &self,
        action: &str,
        build: impl FnOnce(oneshot::Sender<R>) -> DriverCommand,
    ) -> Result<R, String> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.commands
            .send(build(reply_tx))
            .await
            .map_err(|_| "Timer driver is not running".to_string())?;

        let reply = reply_rx
            .await
            .map_err(|_| format!("Timer driver dropped the {} request", action))?;

        self.record_action(action);
        Ok(reply)
    }

    /// Current timer snapshot
    pub fn get_timer_state(&self) -> TimerState {
        self.timer_rx.borrow().clone()
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
