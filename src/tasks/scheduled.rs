//! Cancelable repeating tasks
//!
//! Tasks are plain values kept in a deadline table owned by the driver. Nothing
//! fires on its own: the driver asks for due tasks and dispatches them, so a
//! task cancelled before its deadline is gone from the table and can never fire.

use std::{collections::BTreeMap, sync::Arc};

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::clock::Clock;

/// The kinds of periodic work the timer schedules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Progress poll while a countdown is running
    Tick,
    /// Re-emission of an unacknowledged reminder
    Reminder,
}

/// Handle returned by [`ScheduledTasks::schedule`]
///
/// An empty handle means nothing is scheduled.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TaskHandle(Option<u64>);

impl TaskHandle {
    pub fn empty() -> Self {
        Self(None)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

#[derive(Debug)]
struct Entry {
    task: Task,
    interval: Duration,
    next_due: DateTime<Utc>,
}

/// Deadline table of repeating tasks
pub struct ScheduledTasks {
    clock: Arc<dyn Clock>,
    next_id: u64,
    entries: BTreeMap<u64, Entry>,
}

impl ScheduledTasks {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            next_id: 1,
            entries: BTreeMap::new(),
        }
    }

    /// Schedule `task` to fire every `interval`, first one `interval` from now
    pub fn schedule(&mut self, interval: Duration, task: Task) -> TaskHandle {
        let id = self.next_id;
        self.next_id += 1;

        let next_due = self.clock.now() + interval;
        debug!("Scheduled {:?} #{} every {}s", task, id, interval.num_seconds());
        self.entries.insert(
            id,
            Entry {
                task,
                interval,
                next_due,
            },
        );
        TaskHandle(Some(id))
    }

    /// Cancel the task behind `handle` and empty the handle
    ///
    /// Cancelling an empty or already removed handle is a no-op.
    pub fn cancel(&mut self, handle: &mut TaskHandle) {
        if let Some(id) = handle.0.take() {
            if let Some(entry) = self.entries.remove(&id) {
                debug!("Cancelled {:?} #{}", entry.task, id);
            }
        }
    }

    /// Earliest pending deadline, if any task is scheduled
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.entries.values().map(|entry| entry.next_due).min()
    }

    /// Take the most overdue task whose deadline has passed
    ///
    /// The task is rescheduled one interval later before being returned. A task
    /// that fell behind by more than one interval (missed polls, system sleep)
    /// fires once and resumes its cadence from now instead of catching up.
    pub fn pop_due(&mut self) -> Option<Task> {
        let now = self.clock.now();
        let (&id, _) = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.next_due <= now)
            .min_by_key(|(id, entry)| (entry.next_due, **id))?;

        let entry = self.entries.get_mut(&id)?;
        entry.next_due += entry.interval;
        if entry.next_due <= now {
            debug!("{:?} #{} fell behind, resuming cadence from now", entry.task, id);
            entry.next_due = now + entry.interval;
        }
        Some(entry.task)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
