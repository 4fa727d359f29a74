//! Delivery modes of the logger

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How [`Logger::log`](crate::Logger::log) delivers an event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoggerMode {
    /// Events are dropped; logging still reports success
    Disabled = 0,
    /// Events are dispatched inline on the calling thread
    #[default]
    Sync = 1,
    /// Events are queued and dispatched by a background worker
    Async = 2,
}

impl LoggerMode {
    pub fn to_str(&self) -> &'static str {
        match self {
            LoggerMode::Disabled => "disabled",
            LoggerMode::Sync => "sync",
            LoggerMode::Async => "async",
        }
    }

    /// Inverse of `mode as u8`; unknown values map to `Sync`
    pub(crate) fn from_u8(value: u8) -> Self {
        match value {
            0 => LoggerMode::Disabled,
            2 => LoggerMode::Async,
            _ => LoggerMode::Sync,
        }
    }
}

impl fmt::Display for LoggerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.to_str())
    }
}

impl FromStr for LoggerMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "disabled" | "off" => Ok(LoggerMode::Disabled),
            "sync" | "synchronous" => Ok(LoggerMode::Sync),
            "async" | "asynchronous" => Ok(LoggerMode::Async),
            _ => Err(format!("Invalid logger mode: '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_sync() {
        assert_eq!(LoggerMode::default(), LoggerMode::Sync);
    }

    #[test]
    fn test_parse_and_display() {
        for mode in [LoggerMode::Disabled, LoggerMode::Sync, LoggerMode::Async] {
            assert_eq!(mode.to_string().parse::<LoggerMode>(), Ok(mode));
        }
        assert_eq!("OFF".parse::<LoggerMode>(), Ok(LoggerMode::Disabled));
        assert!("parallel".parse::<LoggerMode>().is_err());
    }

    #[test]
    fn test_u8_roundtrip() {
        for mode in [LoggerMode::Disabled, LoggerMode::Sync, LoggerMode::Async] {
            assert_eq!(LoggerMode::from_u8(mode as u8), mode);
        }
    }
}
