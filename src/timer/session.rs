//! Single countdown lifecycle

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use super::{SessionError, TimerDefinition};
use crate::clock::Clock;

/// The one live countdown
///
/// A session is either empty or holds a started definition. Once the end
/// instant has passed the session is elapsed but keeps its data until
/// [`stop`](Self::stop) clears it.
pub struct TimerSession {
    clock: Arc<dyn Clock>,
    definition: Option<TimerDefinition>,
    started_at: Option<DateTime<Utc>>,
    ends_at: Option<DateTime<Utc>>,
}

impl TimerSession {
    /// Create an empty session
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            definition: None,
            started_at: None,
            ends_at: None,
        }
    }

    /// Start counting down `definition` from now
    ///
    /// A duration outside `1..=MAX_DURATION_SECS` is rejected and leaves the
    /// session untouched.
    pub fn start(&mut self, definition: &TimerDefinition) -> Result<(), SessionError> {
        let invalid = || SessionError::InvalidDuration {
            name: definition.name.clone(),
            duration: definition.duration,
        };
        if !definition.is_valid() {
            return Err(invalid());
        }

        let started_at = self.clock.now();
        let ends_at = started_at
            .checked_add_signed(definition.duration())
            .ok_or_else(invalid)?;
        debug!(
            "Session '{}' started at {}, ends at {}",
            definition.name, started_at, ends_at
        );

        self.definition = Some(definition.clone());
        self.started_at = Some(started_at);
        self.ends_at = Some(ends_at);
        Ok(())
    }

    /// Fraction of the duration that has passed; reaches 1.0 exactly at the end instant
    ///
    /// Values above 1.0 mean the session elapsed a while ago. A clock that moved
    /// behind the start instant yields 0.0.
    pub fn progress(&self) -> Result<f64, SessionError> {
        let (Some(definition), Some(started_at)) = (&self.definition, self.started_at) else {
            return Err(SessionError::NotStarted);
        };

        let elapsed_ms = (self.clock.now() - started_at).num_milliseconds().max(0);
        let total_ms = definition.duration().num_milliseconds();
        Ok(elapsed_ms as f64 / total_ms as f64)
    }

    /// Time left until the end instant, never negative
    pub fn remaining(&self) -> Result<Duration, SessionError> {
        let ends_at = self.ends_at.ok_or(SessionError::NotStarted)?;
        Ok((ends_at - self.clock.now()).max(Duration::zero()))
    }

    /// Clear the session; calling it on an empty session does nothing
    pub fn stop(&mut self) {
        if let Some(definition) = self.definition.take() {
            debug!("Session '{}' cleared", definition.name);
        }
        self.started_at = None;
        self.ends_at = None;
    }

    pub fn is_empty(&self) -> bool {
        self.started_at.is_none()
    }

    /// Started and the end instant is still in the future
    pub fn is_running(&self) -> bool {
        self.ends_at.is_some_and(|ends_at| self.clock.now() < ends_at)
    }

    /// Started and the end instant has been reached
    pub fn is_elapsed(&self) -> bool {
        self.ends_at.is_some_and(|ends_at| self.clock.now() >= ends_at)
    }

    pub fn definition(&self) -> Option<&TimerDefinition> {
        self.definition.as_ref()
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn ends_at(&self) -> Option<DateTime<Utc>> {
        self.ends_at
    }
}
