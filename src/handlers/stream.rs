//! Stream handler implementation
//!
//! Writes one line per event to any `io::Write` sink: stdout, stderr, an
//! in-memory buffer, a socket the caller already owns.

use crate::core::{
    format_line, Handler, HandlerState, LogEvent, LogLevel, LoggerError, Result, TimestampFormat,
};
#[cfg(feature = "console")]
use colored::Colorize;
use parking_lot::Mutex;
use std::io::{self, Write};

pub struct StreamHandler<W: Write + Send> {
    writer: Mutex<W>,
    state: HandlerState,
    timestamp_format: TimestampFormat,
    #[cfg_attr(not(feature = "console"), allow(dead_code))]
    use_colors: bool,
    name: String,
}

impl StreamHandler<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout()).with_name("stdout")
    }
}

impl StreamHandler<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr()).with_name("stderr")
    }
}

impl<W: Write + Send> StreamHandler<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            state: HandlerState::default(),
            timestamp_format: TimestampFormat::default(),
            use_colors: false,
            name: "stream".to_string(),
        }
    }

    #[must_use]
    pub fn with_level(self, level: LogLevel) -> Self {
        self.state.set_level(level);
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the timestamp format for this handler
    ///
    /// # Examples
    ///
    /// ```
    /// use dispatch_logger::handlers::StreamHandler;
    /// use dispatch_logger::TimestampFormat;
    ///
    /// let handler = StreamHandler::stdout()
    ///     .with_timestamp_format(TimestampFormat::Iso8601);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Colorize the level column (requires the `console` feature)
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors && cfg!(feature = "console");
        self
    }

    /// Run `f` with exclusive access to the underlying writer
    pub fn with_writer<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        f(&mut self.writer.lock())
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn format_event(&self, event: &LogEvent) -> String {
        #[cfg(feature = "console")]
        {
            if self.use_colors {
                let level = format!("{:<5}", event.level()).color(event.level().color_code());
                return format!(
                    "{} {} : {}",
                    self.timestamp_format.format(event.time()),
                    level,
                    event.message()
                );
            }
        }

        format_line(event, &self.timestamp_format)
    }
}

impl<W: Write + Send> Handler for StreamHandler<W> {
    fn render(&self, event: &LogEvent) -> Result<()> {
        let mut line = self.format_event(event);
        line.push('\n');

        let mut writer = self.writer.lock();
        writer
            .write_all(line.as_bytes())
            .and_then(|()| writer.flush())
            .map_err(|e| LoggerError::io_operation("writing log line", self.name.clone(), e))
    }

    fn state(&self) -> &HandlerState {
        &self.state
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn event(level: LogLevel, message: &str) -> LogEvent {
        let time = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
        LogEvent::at(time, level, message)
    }

    #[test]
    fn test_writes_one_line_per_event() {
        let handler =
            StreamHandler::new(Vec::new()).with_timestamp_format(TimestampFormat::Unix);

        handler.handle_event(&event(LogLevel::Info, "first")).unwrap();
        handler.handle_event(&event(LogLevel::Fatal, "second")).unwrap();

        let output = String::from_utf8(handler.into_inner()).unwrap();
        assert_eq!(
            output,
            "1736332245 INFO  : first\n1736332245 FATAL : second\n"
        );
    }

    #[test]
    fn test_threshold_applies() {
        let handler = StreamHandler::new(Vec::new()).with_level(LogLevel::Error);
        handler.handle_event(&event(LogLevel::Warn, "quiet")).unwrap();
        assert!(handler.with_writer(|buf| buf.is_empty()));
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_is_reported() {
        let handler = StreamHandler::new(BrokenPipe).with_name("pipe");
        let err = handler
            .handle_event(&event(LogLevel::Error, "lost"))
            .unwrap_err();
        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("pipe"));
    }

    #[cfg(feature = "console")]
    #[test]
    fn test_colored_output_keeps_message() {
        let handler = StreamHandler::new(Vec::new()).with_colors(true);
        handler.handle_event(&event(LogLevel::Warn, "colored")).unwrap();

        let output = String::from_utf8(handler.into_inner()).unwrap();
        assert!(output.contains("WARN"));
        assert!(output.ends_with(" : colored\n"));
    }
}
