//! Timer controller
//!
//! Owns the session, the reminder scheduler and the task table, and is the
//! only thing that mutates them. The driver task calls into it for every UI
//! event and every due task, so all changes are serialized.

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, info, warn};

use crate::{
    clock::Clock,
    entries::{EntryError, EntryStore, RowEdit},
    events::{StartOutcome, UiEvents},
    state::{LauncherState, TimerState, TimerStatus},
    tasks::{ScheduledTasks, Task, TaskHandle},
    timer::{
        format::{format_remaining, ready_title},
        Notifier, ReminderScheduler, SessionError, TimerDefinition, TimerSession,
    },
};

/// Cadence of the progress poll and the reminder re-emission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub tick_interval: Duration,
    pub reminder_interval: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            tick_interval: Duration::seconds(1),
            reminder_interval: Duration::seconds(30),
        }
    }
}

pub struct Controller {
    entries: EntryStore,
    session: TimerSession,
    reminders: ReminderScheduler,
    tasks: ScheduledTasks,
    tick: TaskHandle,
    tick_interval: Duration,
    notifier: Box<dyn Notifier>,
    launcher: LauncherState,
}

impl Controller {
    pub fn new(
        clock: Arc<dyn Clock>,
        entries: EntryStore,
        notifier: Box<dyn Notifier>,
        timing: Timing,
    ) -> Self {
        Self {
            entries,
            session: TimerSession::new(Arc::clone(&clock)),
            reminders: ReminderScheduler::new(Arc::clone(&clock), timing.reminder_interval),
            tasks: ScheduledTasks::new(clock),
            tick: TaskHandle::empty(),
            tick_interval: timing.tick_interval,
            notifier,
            launcher: LauncherState::new(),
        }
    }

    /// Start counting down `definition`, replacing whatever ran before
    ///
    /// An invalid definition is rejected without touching the current timer.
    pub fn start(&mut self, definition: &TimerDefinition) -> Result<(), SessionError> {
        if definition.is_valid() && self.is_active() {
            debug!("Replacing the current timer with '{}'", definition.name);
            self.stop();
        }
        self.session.start(definition)?;

        self.tick = self.tasks.schedule(self.tick_interval, Task::Tick);
        self.launcher.show(format_remaining(definition.duration()));
        info!(
            "Started timer '{}' for {}",
            definition.name,
            format_remaining(definition.duration())
        );
        Ok(())
    }

    /// Start the entry at `index`; a duration that cannot be started is silently ignored
    pub fn start_entry(&mut self, index: usize) -> Result<StartOutcome, EntryError> {
        let definition = self.entries.get(index)?.clone();

        match self.start(&definition) {
            Ok(()) => Ok(StartOutcome::Started),
            Err(e) => {
                warn!("Not starting timer: {}", e);
                Ok(StartOutcome::Ignored)
            }
        }
    }

    /// Tear down the countdown and any reminders; returns whether anything was active
    pub fn stop(&mut self) -> bool {
        let was_active = self.is_active();

        self.tasks.cancel(&mut self.tick);
        self.reminders.acknowledge(&mut self.tasks);
        self.session.stop();
        self.launcher.clear();

        if was_active {
            info!("Timer stopped");
        }
        was_active
    }

    /// Acknowledge a finished timer; a running countdown is left alone
    pub fn acknowledge(&mut self) -> bool {
        if !self.reminders.is_active() {
            return false;
        }
        self.stop()
    }

    /// Progress poll, fired by [`Task::Tick`]
    pub fn tick(&mut self) {
        let progress = match self.session.progress() {
            Ok(progress) => progress,
            Err(e) => {
                debug!("Tick without a session ({}), cancelling", e);
                self.tasks.cancel(&mut self.tick);
                return;
            }
        };

        if progress < 1.0 {
            let remaining = self.session.remaining().unwrap_or_else(|_| Duration::zero());
            self.launcher.update(progress, format_remaining(remaining));
            return;
        }

        self.tasks.cancel(&mut self.tick);
        let name = self
            .session
            .definition()
            .map(|definition| definition.name.clone())
            .unwrap_or_default();
        self.launcher.mark_urgent(ready_title(&name));

        if let Err(e) = self
            .reminders
            .begin(&self.session, &mut self.tasks, self.notifier.as_mut())
        {
            warn!("Could not start reminders for '{}': {}", name, e);
        }
    }

    /// Dispatch every task whose deadline has passed; returns how many ran
    pub fn run_due(&mut self) -> usize {
        let mut ran = 0;
        while let Some(task) = self.tasks.pop_due() {
            match task {
                Task::Tick => self.tick(),
                Task::Reminder => {
                    self.reminders.fire(self.notifier.as_mut());
                }
            }
            ran += 1;
        }
        ran
    }

    /// When the driver next needs to call [`run_due`](Self::run_due)
    pub fn next_deadline(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.tasks.next_deadline()
    }

    pub fn is_active(&self) -> bool {
        !self.session.is_empty() || self.reminders.is_active()
    }

    pub fn status(&self) -> TimerStatus {
        if self.session.is_empty() {
            TimerStatus::Empty
        } else if self.reminders.is_active() || self.session.is_elapsed() {
            TimerStatus::Elapsed
        } else {
            TimerStatus::Running
        }
    }

    pub fn snapshot(&self) -> TimerState {
        TimerState {
            status: self.status(),
            name: self.session.definition().map(|d| d.name.clone()),
            progress: self.session.progress().ok().map(|p| p.clamp(0.0, 1.0)),
            remaining_seconds: self
                .session
                .remaining()
                .ok()
                .map(|d| (d.num_milliseconds() + 999) / 1000),
            started_at: self.session.started_at(),
            ends_at: self.session.ends_at(),
            reminders_emitted: self.reminders.cycle().map_or(0, |cycle| cycle.emitted),
            launcher: self.launcher.clone(),
        }
    }

    pub fn launcher(&self) -> &LauncherState {
        &self.launcher
    }

    pub fn entries(&self) -> &EntryStore {
        &self.entries
    }
}

impl UiEvents for Controller {
    fn on_row_activated(&mut self, index: usize) -> Result<StartOutcome, EntryError> {
        self.start_entry(index)
    }

    fn on_row_edited(&mut self, index: usize, edit: RowEdit) -> Result<TimerDefinition, EntryError> {
        let updated = self.entries.update(index, edit)?;
        info!("Timer #{} is now '{}' ({}s)", index, updated.name, updated.duration);
        Ok(updated)
    }

    fn on_row_added(&mut self, definition: TimerDefinition) -> Result<usize, EntryError> {
        let index = self.entries.add(definition)?;
        info!("Added timer #{}", index);
        Ok(index)
    }

    fn on_delete_key(&mut self, index: usize) -> Result<TimerDefinition, EntryError> {
        let removed = self.entries.remove(index)?;
        info!("Deleted timer #{} '{}'", index, removed.name);
        Ok(removed)
    }

    fn on_window_focused(&mut self) -> bool {
        self.acknowledge()
    }

    fn on_stop(&mut self) -> bool {
        self.stop()
    }
}
