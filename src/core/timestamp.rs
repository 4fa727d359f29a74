//! Timestamp formatting utilities
//!
//! Pure helpers that render an instant with a strftime pattern. Nothing here
//! depends on logger state, so any handler can use them.

use super::error::{LoggerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Write};

/// Pattern used by the bundled handlers: `2025-01-08 10:30:45`
pub const DEFAULT_TIMESTAMP_PATTERN: &str = "%Y-%m-%d %H:%M:%S";

/// Render `instant` with a strftime-compatible `pattern`.
///
/// The pattern is validated up front; chrono would otherwise panic while
/// displaying an unknown specifier.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use dispatch_logger::core::format_timestamp;
///
/// let instant = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(format_timestamp("%Y/%m/%d", &instant).unwrap(), "2025/01/08");
/// ```
pub fn format_timestamp<Tz>(pattern: &str, instant: &DateTime<Tz>) -> Result<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let items = StrftimeItems::new(pattern);
    if items.clone().any(|item| matches!(item, Item::Error)) {
        return Err(LoggerError::invalid_timestamp(pattern));
    }

    let mut rendered = String::with_capacity(pattern.len() * 2);
    write!(rendered, "{}", instant.format_with_items(items))
        .map_err(|_| LoggerError::invalid_timestamp(pattern))?;
    Ok(rendered)
}

/// Timestamp format options for handler output
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// Local wall-clock time: `2025-01-08 10:30:45`
    #[default]
    LocalDateTime,

    /// ISO 8601 in UTC with milliseconds: `2025-01-08T10:30:45.123Z`
    Iso8601,

    /// RFC 3339 in UTC: `2025-01-08T10:30:45+00:00`
    Rfc3339,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Custom strftime pattern, rendered in local time
    Custom(String),
}

impl TimestampFormat {
    /// Format a UTC instant according to this format
    ///
    /// An invalid custom pattern falls back to the default pattern so a
    /// misconfigured handler still produces a usable line.
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::LocalDateTime => datetime
                .with_timezone(&Local)
                .format(DEFAULT_TIMESTAMP_PATTERN)
                .to_string(),
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::Custom(pattern) => {
                let local = datetime.with_timezone(&Local);
                format_timestamp(pattern, &local)
                    .unwrap_or_else(|_| local.format(DEFAULT_TIMESTAMP_PATTERN).to_string())
            }
        }
    }

    /// Build a custom format, rejecting patterns chrono cannot render
    pub fn custom(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
            return Err(LoggerError::invalid_timestamp(pattern));
        }
        Ok(TimestampFormat::Custom(pattern))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_datetime() -> DateTime<Utc> {
        // 2025-01-08 10:30:45.123456 UTC
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::microseconds(123456)
    }

    #[test]
    fn test_format_timestamp_default_pattern() {
        let result = format_timestamp(DEFAULT_TIMESTAMP_PATTERN, &fixed_datetime()).unwrap();
        assert_eq!(result, "2025-01-08 10:30:45");
    }

    #[test]
    fn test_format_timestamp_long_output() {
        // Output far longer than any fixed scratch buffer
        let pattern = "%Y-%m-%d ".repeat(200);
        let result = format_timestamp(&pattern, &fixed_datetime()).unwrap();
        assert_eq!(result.len(), "2025-01-08 ".len() * 200);
    }

    #[test]
    fn test_format_timestamp_rejects_bad_pattern() {
        let err = format_timestamp("%Y-%Q", &fixed_datetime()).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidTimestampFormat { .. }));
    }

    #[test]
    fn test_iso8601_format() {
        assert_eq!(
            TimestampFormat::Iso8601.format(&fixed_datetime()),
            "2025-01-08T10:30:45.123Z"
        );
    }

    #[test]
    fn test_rfc3339_format() {
        let result = TimestampFormat::Rfc3339.format(&fixed_datetime());
        assert!(result.starts_with("2025-01-08T10:30:45"));
        assert!(result.contains("+00:00"));
    }

    #[test]
    fn test_unix_format() {
        assert_eq!(TimestampFormat::Unix.format(&fixed_datetime()), "1736332245");
    }

    #[test]
    fn test_local_format_shape() {
        let result = TimestampFormat::LocalDateTime.format(&fixed_datetime());
        // Offset depends on the host timezone; the shape does not
        assert_eq!(result.len(), 19);
        assert_eq!(&result[4..5], "-");
        assert_eq!(&result[10..11], " ");
    }

    #[test]
    fn test_custom_constructor() {
        assert!(TimestampFormat::custom("%H:%M").is_ok());
        assert!(TimestampFormat::custom("%H:%").is_err());
    }

    #[test]
    fn test_deserialization() {
        let format: TimestampFormat =
            serde_json::from_str(r#"{"Custom":"%Y-%m-%d"}"#).expect("deserialize Custom");
        assert_eq!(format, TimestampFormat::Custom("%Y-%m-%d".to_string()));
        let format: TimestampFormat =
            serde_json::from_str("\"LocalDateTime\"").expect("deserialize default");
        assert_eq!(format, TimestampFormat::default());
    }
}
