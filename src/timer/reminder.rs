//! Repeating reminders for a finished, unacknowledged timer

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::{debug, info};

use super::{
    format::{format_finished_ago, ready_title},
    ReminderError, TimerSession,
};
use crate::{
    clock::Clock,
    tasks::{ScheduledTasks, Task, TaskHandle},
};

/// Side effects of a reminder emission
///
/// Implementations must not block: the notification and sound are expected to
/// be handed off to the desktop and forgotten.
pub trait Notifier: Send {
    fn emit(&mut self, title: &str, body: &str);
    fn play_sound(&mut self);
}

/// State of one escalation after a timer finished
#[derive(Debug, Clone, Serialize)]
pub struct ReminderCycle {
    pub name: String,
    pub completed_at: DateTime<Utc>,
    pub acknowledged: bool,
    pub last_fired_at: Option<DateTime<Utc>>,
    pub emitted: u32,
}

/// Emits "still waiting" reminders until someone acknowledges them
pub struct ReminderScheduler {
    clock: Arc<dyn Clock>,
    interval: Duration,
    cycle: Option<ReminderCycle>,
    handle: TaskHandle,
}

impl ReminderScheduler {
    pub fn new(clock: Arc<dyn Clock>, interval: Duration) -> Self {
        Self {
            clock,
            interval,
            cycle: None,
            handle: TaskHandle::empty(),
        }
    }

    /// Open a reminder cycle for an elapsed session
    ///
    /// Emits the first reminder right away, then schedules one per interval.
    pub fn begin(
        &mut self,
        session: &TimerSession,
        tasks: &mut ScheduledTasks,
        notifier: &mut dyn Notifier,
    ) -> Result<(), ReminderError> {
        if self.cycle.is_some() {
            return Err(ReminderError::AlreadyActive);
        }
        if !session.is_elapsed() {
            return Err(ReminderError::NotElapsed);
        }
        let (Some(definition), Some(completed_at)) = (session.definition(), session.ends_at())
        else {
            return Err(ReminderError::NotElapsed);
        };

        info!("Timer '{}' finished, starting reminders", definition.name);
        self.cycle = Some(ReminderCycle {
            name: definition.name.clone(),
            completed_at,
            acknowledged: false,
            last_fired_at: None,
            emitted: 0,
        });
        self.emit(notifier);
        self.handle = tasks.schedule(self.interval, Task::Reminder);
        Ok(())
    }

    /// Handle a due [`Task::Reminder`]; returns whether anything was emitted
    pub fn fire(&mut self, notifier: &mut dyn Notifier) -> bool {
        match &self.cycle {
            Some(cycle) if !cycle.acknowledged => {
                self.emit(notifier);
                true
            }
            _ => false,
        }
    }

    /// Acknowledge and tear down the cycle; returns whether one was active
    pub fn acknowledge(&mut self, tasks: &mut ScheduledTasks) -> bool {
        tasks.cancel(&mut self.handle);

        match self.cycle.take() {
            Some(mut cycle) => {
                cycle.acknowledged = true;
                info!(
                    "Reminders for '{}' acknowledged after {} emission(s)",
                    cycle.name, cycle.emitted
                );
                true
            }
            None => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.cycle.is_some()
    }

    pub fn cycle(&self) -> Option<&ReminderCycle> {
        self.cycle.as_ref()
    }

    fn emit(&mut self, notifier: &mut dyn Notifier) {
        let now = self.clock.now();
        let Some(cycle) = self.cycle.as_mut() else {
            return;
        };

        let title = ready_title(&cycle.name);
        let body = format_finished_ago(now - cycle.completed_at);
        debug!("Reminder #{}: {} ({})", cycle.emitted + 1, title, body);

        notifier.emit(&title, &body);
        notifier.play_sound();

        cycle.last_fired_at = Some(now);
        cycle.emitted += 1;
    }
}
