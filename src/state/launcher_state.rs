//! Launcher badge state

use serde::{Deserialize, Serialize};

/// What the launcher entry should show for the current timer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LauncherState {
    /// Countdown progress, clamped to `0.0..=1.0`
    pub progress: f64,
    pub progress_visible: bool,
    /// Set while a finished timer waits to be acknowledged
    pub urgent: bool,
    /// Remaining time, or the ready message once finished
    pub label: Option<String>,
}

impl LauncherState {
    /// Create a hidden launcher state
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the progress bar for a freshly started timer
    pub fn show(&mut self, label: String) {
        self.progress = 0.0;
        self.progress_visible = true;
        self.urgent = false;
        self.label = Some(label);
    }

    /// Update progress and label after a tick
    pub fn update(&mut self, progress: f64, label: String) {
        self.progress = progress.clamp(0.0, 1.0);
        self.label = Some(label);
    }

    /// Request attention for a finished timer
    pub fn mark_urgent(&mut self, label: String) {
        self.progress = 1.0;
        self.urgent = true;
        self.label = Some(label);
    }

    /// Hide everything again
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_is_clamped() {
        let mut launcher = LauncherState::new();
        launcher.show("03:30".to_string());

        launcher.update(1.7, "00:00".to_string());
        assert_eq!(launcher.progress, 1.0);
        launcher.update(-0.2, "03:30".to_string());
        assert_eq!(launcher.progress, 0.0);
        assert!(launcher.progress_visible);
        assert!(!launcher.urgent);
    }

    #[test]
    fn test_clear_hides_and_drops_urgency() {
        let mut launcher = LauncherState::new();
        launcher.show("00:05".to_string());
        launcher.mark_urgent("Tea is ready".to_string());
        assert!(launcher.urgent);

        launcher.clear();
        assert_eq!(launcher, LauncherState::new());
    }
}
