//! Timer core
//!
//! The countdown lifecycle ([`TimerSession`]) and the reminder escalation that
//! follows it ([`ReminderScheduler`]). Neither knows about the UI or the
//! desktop; they read time from a [`Clock`](crate::clock::Clock) and emit
//! through a [`Notifier`].

pub mod definition;
pub mod error;
pub mod format;
pub mod reminder;
pub mod session;

// Re-export main types
pub use definition::{TimerDefinition, MAX_DURATION_SECS};
pub use error::{ReminderError, SessionError};
pub use reminder::{Notifier, ReminderCycle, ReminderScheduler};
pub use session::TimerSession;
