//! Tea Time - an egg timer with repeating reminders
//!
//! A single countdown reports its progress to a launcher badge and, once it
//! finishes, keeps notifying until the user acknowledges it. The timer list is
//! kept in a JSON file; a local HTTP API stands in for the timer window.

pub mod api;
pub mod clock;
pub mod config;
pub mod controller;
pub mod entries;
pub mod events;
pub mod services;
pub mod state;
pub mod tasks;
pub mod timer;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use controller::{Controller, Timing};
pub use entries::EntryStore;
pub use events::{StartOutcome, UiEvents};
pub use state::AppState;
pub use timer::{ReminderScheduler, TimerDefinition, TimerSession};
pub use utils::signals::shutdown_signal;
