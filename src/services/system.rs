//! External process helpers

use std::{ffi::OsStr, process::Stdio};

use tokio::process::Command;
use tracing::{debug, info};

/// Launch a program and forget about it
///
/// The child is never awaited; the runtime reaps it in the background. Only a
/// failure to launch is reported.
pub fn spawn_detached<I, S>(program: &str, args: I) -> Result<(), String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(false)
        .spawn()
        .map(|_child| debug!("Spawned {}", program))
        .map_err(|e| format!("Failed to execute {}: {}", program, e))
}

/// Check if `program` can be executed on this system
pub async fn check_command_available(program: &str) -> Result<(), String> {
    Command::new(program)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map_err(|_| format!("{} is not available, its alerts will be skipped", program))?;

    info!("{} is available", program);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::NOTIFY_COMMAND;

    #[tokio::test]
    async fn test_missing_command_is_reported() {
        let err = check_command_available("/nonexistent/teatime-player")
            .await
            .unwrap_err();
        assert!(err.contains("teatime-player"));
        assert_eq!(NOTIFY_COMMAND, "notify-send");
    }
}
