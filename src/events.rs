//! UI events understood by the timer controller
//!
//! A window toolkit (or the local control API standing in for one) translates
//! its signals into these calls. The timer core itself never sees this trait.

use crate::{
    entries::{EntryError, RowEdit},
    timer::TimerDefinition,
};

/// Result of asking for a timer to start
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StartOutcome {
    Started,
    /// The entry cannot run (non-positive duration); nothing changed
    Ignored,
}

pub trait UiEvents {
    /// A row was chosen to run
    fn on_row_activated(&mut self, index: usize) -> Result<StartOutcome, EntryError>;

    /// A row was edited in place
    fn on_row_edited(&mut self, index: usize, edit: RowEdit)
        -> Result<TimerDefinition, EntryError>;

    /// A new row was appended
    fn on_row_added(&mut self, definition: TimerDefinition) -> Result<usize, EntryError>;

    /// The delete key was pressed on a row
    fn on_delete_key(&mut self, index: usize) -> Result<TimerDefinition, EntryError>;

    /// The window came to the foreground; acknowledges a finished timer
    fn on_window_focused(&mut self) -> bool;

    /// Explicit stop from the user
    fn on_stop(&mut self) -> bool;
}
