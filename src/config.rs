//! Configuration and CLI argument handling

use std::path::PathBuf;

use chrono::Duration;
use clap::Parser;

use crate::{controller::Timing, entries::default_data_file, services::SoundConfig};

/// Sound played with every reminder unless overridden
pub const DEFAULT_SOUND_FILE: &str = "/usr/share/sounds/freedesktop/stereo/complete.oga";

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "teatime")]
#[command(about = "An egg timer with launcher progress and repeating reminders")]
#[command(version)]
pub struct Config {
    /// Port of the local control API
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address of the local control API
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// JSON file holding the timer list
    #[arg(long, env = "TEATIME_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Seconds between reminders once a timer has finished
    #[arg(short, long, default_value = "30", value_parser = clap::value_parser!(u32).range(1..))]
    pub reminder_interval: u32,

    /// Seconds between progress updates
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub tick_interval: u32,

    /// Program used to play the alert sound
    #[arg(long, default_value = "paplay")]
    pub sound_command: String,

    /// Sound file passed to the sound command
    #[arg(long, default_value = DEFAULT_SOUND_FILE)]
    pub sound_file: PathBuf,

    /// Only show notifications, never play a sound
    #[arg(long)]
    pub no_sound: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Timer list location: the explicit flag, or the per-user data directory
    pub fn data_file(&self) -> Option<PathBuf> {
        self.data_file.clone().or_else(default_data_file)
    }

    pub fn timing(&self) -> Timing {
        Timing {
            tick_interval: Duration::seconds(i64::from(self.tick_interval)),
            reminder_interval: Duration::seconds(i64::from(self.reminder_interval)),
        }
    }

    pub fn sound(&self) -> Option<SoundConfig> {
        if self.no_sound {
            return None;
        }
        Some(SoundConfig {
            command: self.sound_command.clone(),
            file: self.sound_file.clone(),
        })
    }
}
