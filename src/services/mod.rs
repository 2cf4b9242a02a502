//! Desktop side effects
//!
//! Notification and sound delivery, and the process helpers they are built on.

pub mod notify;
pub mod system;

// Re-export main types
pub use notify::{DesktopNotifier, Notification, RecordingNotifier, SoundConfig, NOTIFY_COMMAND};
pub use system::*;
