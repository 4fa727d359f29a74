//! Message and line formatting helpers shared by handler implementations

use super::log_event::LogEvent;
use super::timestamp::TimestampFormat;
use std::fmt;

/// Render printf-style arguments into an owned message.
///
/// `String` grows as needed, so arbitrarily long output is never truncated.
///
/// # Examples
///
/// ```
/// use dispatch_logger::core::format_data;
///
/// assert_eq!(format_data(format_args!("{} items in {}ms", 3, 12)), "3 items in 12ms");
/// ```
#[must_use]
pub fn format_data(args: fmt::Arguments<'_>) -> String {
    match args.as_str() {
        Some(literal) => literal.to_owned(),
        None => fmt::format(args),
    }
}

/// Render the conventional handler line: `<timestamp> <LEVEL> : <message>`
///
/// The level is padded to five columns. No trailing newline is added.
#[must_use]
pub fn format_line(event: &LogEvent, timestamp_format: &TimestampFormat) -> String {
    format!(
        "{} {:<5} : {}",
        timestamp_format.format(event.time()),
        event.level(),
        event.message()
    )
}
