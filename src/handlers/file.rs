//! File handler implementation

use crate::core::{
    format_line, Handler, HandlerState, LogEvent, LogLevel, LoggerError, Result, TimestampFormat,
};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{LineWriter, Write};
use std::path::{Path, PathBuf};

/// Appends one line per event to a file it owns.
///
/// Output is line-buffered, so every rendered event reaches the file before
/// `render` returns. After [`close`](FileHandler::close) renders fail with
/// [`LoggerError::HandlerClosed`].
pub struct FileHandler {
    path: PathBuf,
    writer: Mutex<Option<LineWriter<File>>>,
    state: HandlerState,
    timestamp_format: TimestampFormat,
}

impl FileHandler {
    /// Open `path` for appending, creating it if needed
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::io_operation("opening log file", path.display().to_string(), e)
            })?;
        Ok(Self::from_file(path, file))
    }

    /// Open `path`, discarding any previous contents
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = File::create(&path).map_err(|e| {
            LoggerError::io_operation("creating log file", path.display().to_string(), e)
        })?;
        Ok(Self::from_file(path, file))
    }

    fn from_file(path: PathBuf, file: File) -> Self {
        Self {
            path,
            writer: Mutex::new(Some(LineWriter::new(file))),
            state: HandlerState::default(),
            timestamp_format: TimestampFormat::default(),
        }
    }

    #[must_use]
    pub fn with_level(self, level: LogLevel) -> Self {
        self.state.set_level(level);
        self
    }

    /// Set the timestamp format for this handler
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dispatch_logger::handlers::FileHandler;
    /// use dispatch_logger::TimestampFormat;
    ///
    /// let handler = FileHandler::new("/var/log/app.log")
    ///     .unwrap()
    ///     .with_timestamp_format(TimestampFormat::Rfc3339);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.writer.lock().is_some()
    }

    /// Flush and release the file. Closing twice is harmless.
    pub fn close(&self) -> Result<()> {
        if let Some(mut writer) = self.writer.lock().take() {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Handler for FileHandler {
    fn render(&self, event: &LogEvent) -> Result<()> {
        let mut guard = self.writer.lock();
        let writer = guard
            .as_mut()
            .ok_or_else(|| LoggerError::handler_closed(self.path.display().to_string()))?;

        let mut line = format_line(event, &self.timestamp_format);
        line.push('\n');
        writer.write_all(line.as_bytes())?;
        Ok(())
    }

    fn state(&self) -> &HandlerState {
        &self.state
    }

    fn flush(&self) -> Result<()> {
        if let Some(writer) = self.writer.lock().as_mut() {
            writer.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileHandler {
    fn drop(&mut self) {
        if let Some(writer) = self.writer.get_mut().as_mut() {
            let _ = writer.flush();
        }
    }
}
