//! Log event structure

use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One leveled, timestamped message.
///
/// Built once at the call site and never mutated afterwards; handlers only
/// ever see it by shared reference for the duration of a single render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEvent {
    time: DateTime<Utc>,
    level: LogLevel,
    message: String,
}

impl LogEvent {
    /// Stamp a new event with the current wall-clock time
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self::at(Utc::now(), level, message)
    }

    /// Build an event with an explicit timestamp
    pub fn at(time: DateTime<Utc>, level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            time,
            level,
            message: message.into(),
        }
    }

    #[inline]
    pub fn time(&self) -> &DateTime<Utc> {
        &self.time
    }

    #[inline]
    pub fn level(&self) -> LogLevel {
        self.level
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}
