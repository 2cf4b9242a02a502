//! Driver task
//!
//! The single task that owns the [`Controller`]. It waits for either a command
//! from the control surface or the next scheduled deadline, handles it, and
//! publishes a fresh [`TimerState`] afterwards.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::{
    sync::{mpsc, oneshot, watch},
    time::sleep,
};
use tracing::{debug, info};

use crate::{
    clock::Clock,
    controller::Controller,
    entries::{EntryError, RowEdit},
    events::{StartOutcome, UiEvents},
    state::TimerState,
    timer::TimerDefinition,
};

/// Requests the control surface can make of the driver
#[derive(Debug)]
pub enum DriverCommand {
    Start {
        index: usize,
        reply: oneshot::Sender<Result<StartOutcome, EntryError>>,
    },
    Stop {
        reply: oneshot::Sender<bool>,
    },
    Focus {
        reply: oneshot::Sender<bool>,
    },
    ListEntries {
        reply: oneshot::Sender<Vec<TimerDefinition>>,
    },
    AddEntry {
        definition: TimerDefinition,
        reply: oneshot::Sender<Result<usize, EntryError>>,
    },
    EditEntry {
        index: usize,
        edit: RowEdit,
        reply: oneshot::Sender<Result<TimerDefinition, EntryError>>,
    },
    DeleteEntry {
        index: usize,
        reply: oneshot::Sender<Result<TimerDefinition, EntryError>>,
    },
}

impl DriverCommand {
    fn name(&self) -> &'static str {
        match self {
            Self::Start { .. } => "start",
            Self::Stop { .. } => "stop",
            Self::Focus { .. } => "focus",
            Self::ListEntries { .. } => "list-entries",
            Self::AddEntry { .. } => "add-entry",
            Self::EditEntry { .. } => "edit-entry",
            Self::DeleteEntry { .. } => "delete-entry",
        }
    }
}

/// Publish the new state, then answer the caller
///
/// Publishing first means a caller that reads the watch channel after its
/// reply always sees the effect of its own command. A caller that went away
/// is simply ignored.
fn respond<R>(
    controller: &Controller,
    timer_tx: &watch::Sender<TimerState>,
    reply: oneshot::Sender<R>,
    result: R,
) {
    timer_tx.send_replace(controller.snapshot());
    let _ = reply.send(result);
}

/// Apply one command to the controller
pub fn dispatch(
    controller: &mut Controller,
    command: DriverCommand,
    timer_tx: &watch::Sender<TimerState>,
) {
    debug!("Driver handling {}", command.name());

    match command {
        DriverCommand::Start { index, reply } => {
            let result = controller.on_row_activated(index);
            respond(controller, timer_tx, reply, result);
        }
        DriverCommand::Stop { reply } => {
            let result = controller.on_stop();
            respond(controller, timer_tx, reply, result);
        }
        DriverCommand::Focus { reply } => {
            let result = controller.on_window_focused();
            respond(controller, timer_tx, reply, result);
        }
        DriverCommand::ListEntries { reply } => {
            let result = controller.entries().list().to_vec();
            respond(controller, timer_tx, reply, result);
        }
        DriverCommand::AddEntry { definition, reply } => {
            let result = controller.on_row_added(definition);
            respond(controller, timer_tx, reply, result);
        }
        DriverCommand::EditEntry { index, edit, reply } => {
            let result = controller.on_row_edited(index, edit);
            respond(controller, timer_tx, reply, result);
        }
        DriverCommand::DeleteEntry { index, reply } => {
            let result = controller.on_delete_key(index);
            respond(controller, timer_tx, reply, result);
        }
    }
}

/// Sleep until `deadline`, or forever when nothing is scheduled
async fn wait_for(clock: &dyn Clock, deadline: Option<DateTime<Utc>>) {
    match deadline {
        Some(deadline) => {
            let delay = (deadline - clock.now()).to_std().unwrap_or_default();
            sleep(delay).await;
        }
        None => std::future::pending().await,
    }
}

/// Run the controller until the command channel closes
pub async fn driver_task(
    mut controller: Controller,
    clock: Arc<dyn Clock>,
    mut commands: mpsc::Receiver<DriverCommand>,
    timer_tx: watch::Sender<TimerState>,
) {
    info!("Starting timer driver task");

    loop {
        let deadline = controller.next_deadline();

        tokio::select! {
            command = commands.recv() => match command {
                Some(command) => dispatch(&mut controller, command, &timer_tx),
                None => {
                    info!("Command channel closed, stopping timer driver");
                    controller.stop();
                    break;
                }
            },
            _ = wait_for(clock.as_ref(), deadline) => {
                let ran = controller.run_due();
                debug!("Driver ran {} due task(s)", ran);
                // Keep the snapshot current even when nobody is watching
                timer_tx.send_replace(controller.snapshot());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        clock::ManualClock, controller::Timing, entries::EntryStore, services::RecordingNotifier,
        state::TimerStatus,
    };

    fn controller() -> Controller {
        Controller::new(
            Arc::new(ManualClock::default()),
            EntryStore::in_memory(vec![TimerDefinition::new("Earl Grey", 210)]),
            Box::new(RecordingNotifier::default()),
            Timing::default(),
        )
    }

    #[tokio::test]
    async fn test_state_is_published_before_reply() {
        let mut controller = controller();
        let (timer_tx, timer_rx) = watch::channel(controller.snapshot());

        let (reply, reply_rx) = oneshot::channel();
        dispatch(&mut controller, DriverCommand::Start { index: 0, reply }, &timer_tx);

        assert_eq!(reply_rx.await.unwrap().unwrap(), StartOutcome::Started);
        assert_eq!(timer_rx.borrow().status, TimerStatus::Running);
    }

    #[tokio::test]
    async fn test_dropped_caller_is_ignored() {
        let mut controller = controller();
        let (timer_tx, _timer_rx) = watch::channel(controller.snapshot());

        let (reply, reply_rx) = oneshot::channel();
        drop(reply_rx);
        dispatch(&mut controller, DriverCommand::Stop { reply }, &timer_tx);
        assert_eq!(controller.status(), TimerStatus::Empty);
    }

    #[tokio::test]
    async fn test_driver_exits_when_commands_close() {
        let clock: Arc<dyn Clock> = Arc::new(ManualClock::default());
        let (command_tx, command_rx) = mpsc::channel(1);
        let (timer_tx, _timer_rx) = watch::channel(TimerState::new());

        let driver = tokio::spawn(driver_task(controller(), clock, command_rx, timer_tx));
        drop(command_tx);
        driver.await.unwrap();
    }
}
