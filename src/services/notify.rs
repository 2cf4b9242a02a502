//! Desktop notification and sound alerts

use std::{
    path::PathBuf,
    sync::{Arc, Mutex, PoisonError},
};

use tracing::{info, warn};

use super::system::spawn_detached;
use crate::timer::Notifier;

/// Program used to show desktop notifications
pub const NOTIFY_COMMAND: &str = "notify-send";

/// Lets notification daemons that support it replace the previous bubble
/// instead of stacking a new one per reminder.
const REPLACE_HINT: &str = "string:x-canonical-private-synchronous:teatime";

/// How to play the alert sound
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundConfig {
    pub command: String,
    pub file: PathBuf,
}

/// Notifier that talks to the desktop through `notify-send` and a sound player
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    app_name: String,
    sound: Option<SoundConfig>,
}

impl DesktopNotifier {
    pub fn new(app_name: impl Into<String>, sound: Option<SoundConfig>) -> Self {
        Self {
            app_name: app_name.into(),
            sound,
        }
    }
}

impl Notifier for DesktopNotifier {
    fn emit(&mut self, title: &str, body: &str) {
        let args = [
            "--app-name",
            self.app_name.as_str(),
            "--urgency",
            "low",
            "--hint",
            REPLACE_HINT,
            title,
            body,
        ];

        if let Err(e) = spawn_detached(NOTIFY_COMMAND, args) {
            warn!("Notification failed: {}", e);
            info!("[REMINDER] {}: {}", title, body);
        }
    }

    fn play_sound(&mut self) {
        let Some(sound) = &self.sound else {
            return;
        };

        if let Err(e) = spawn_detached(&sound.command, [&sound.file]) {
            warn!("Alert sound failed: {}", e);
        }
    }
}

/// One notification as seen by a [`RecordingNotifier`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Default)]
struct Recorded {
    notifications: Vec<Notification>,
    sounds: usize,
}

/// Notifier that only records what it was asked to do
///
/// Clones share the same record, so one handle can be given away and the
/// other inspected afterwards.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    recorded: Arc<Mutex<Recorded>>,
}

impl RecordingNotifier {
    pub fn notifications(&self) -> Vec<Notification> {
        self.recorded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .notifications
            .clone()
    }

    pub fn sounds(&self) -> usize {
        self.recorded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .sounds
    }
}

impl Notifier for RecordingNotifier {
    fn emit(&mut self, title: &str, body: &str) {
        self.recorded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .notifications
            .push(Notification {
                title: title.to_string(),
                body: body.to_string(),
            });
    }

    fn play_sound(&mut self) {
        self.recorded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .sounds += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_programs_do_not_panic() {
        let mut notifier = DesktopNotifier::new(
            "teatime-test",
            Some(SoundConfig {
                command: "/nonexistent/teatime-player".to_string(),
                file: PathBuf::from("/nonexistent/alert.oga"),
            }),
        );
        notifier.emit("Tea is ready", "finished just now");
        notifier.play_sound();

        let mut silent = DesktopNotifier::new("teatime-test", None);
        silent.play_sound();
    }

    #[test]
    fn test_recording_notifier_shares_record() {
        let recorder = RecordingNotifier::default();
        let mut handle = recorder.clone();

        handle.emit("Tea is ready", "finished just now");
        handle.play_sound();

        assert_eq!(
            recorder.notifications(),
            vec![Notification {
                title: "Tea is ready".to_string(),
                body: "finished just now".to_string(),
            }]
        );
        assert_eq!(recorder.sounds(), 1);
    }
}
