//! Background tasks module
//!
//! The cancelable task table used by the timer core, and the driver task that
//! owns the controller and fires due tasks.

pub mod driver;
pub mod scheduled;

// Re-export main types
pub use driver::{dispatch, driver_task, DriverCommand};
pub use scheduled::{ScheduledTasks, Task, TaskHandle};
