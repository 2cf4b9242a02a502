//! State management module
//!
//! Snapshots published by the driver and the shared state handed to HTTP handlers.

pub mod app_state;
pub mod launcher_state;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use launcher_state::LauncherState;
pub use timer_state::{TimerState, TimerStatus};
