//! Logger configuration
//!
//! Plain data that can be embedded in a host application's own settings
//! (it implements serde's traits); reading it from a file is up to the host.

use super::{
    error::{LoggerError, Result},
    log_level::LogLevel,
    mode::LoggerMode,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default safety-net wait of the async worker between wakeups
pub const DEFAULT_IDLE_POLL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Mode the logger starts in
    pub mode: LoggerMode,
    /// Events below this level are never built
    pub min_level: LogLevel,
    /// Longest the async worker sleeps without a wakeup
    pub idle_poll: Duration,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            mode: LoggerMode::Sync,
            min_level: LogLevel::Trace,
            idle_poll: DEFAULT_IDLE_POLL,
        }
    }
}

impl LoggerConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<()> {
        if self.idle_poll.is_zero() {
            return Err(LoggerError::config(
                "LoggerConfig",
                "idle_poll must be greater than zero",
            ));
        }
        Ok(())
    }
}
