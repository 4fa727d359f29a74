//! Raw file descriptor handler (unix)

use crate::core::{
    format_line, Handler, HandlerState, LogEvent, LogLevel, LoggerError, Result, TimestampFormat,
};
use parking_lot::Mutex;
use std::fs::File;
use std::io::{self, Write};
use std::os::fd::{AsFd, AsRawFd, OwnedFd, RawFd};

/// Writes one line per event straight to a file descriptor.
///
/// The handler works on its own duplicate of the descriptor, so the
/// caller's descriptor stays valid and open after the handler is dropped
/// or closed. Each line goes out in a single unbuffered `write_all`.
pub struct DescriptorHandler {
    file: Mutex<Option<File>>,
    state: HandlerState,
    timestamp_format: TimestampFormat,
}

impl DescriptorHandler {
    /// Duplicate `fd` and write to the duplicate
    pub fn new(fd: impl AsFd) -> Result<Self> {
        let owned = fd
            .as_fd()
            .try_clone_to_owned()
            .map_err(|e| LoggerError::io_operation("duplicating descriptor", "dup failed", e))?;
        Ok(Self::from_owned(owned))
    }

    /// Take ownership of `fd`; it is closed with the handler
    pub fn from_owned(fd: OwnedFd) -> Self {
        Self {
            file: Mutex::new(Some(File::from(fd))),
            state: HandlerState::default(),
            timestamp_format: TimestampFormat::default(),
        }
    }

    pub fn stdout() -> Result<Self> {
        Self::new(io::stdout())
    }

    pub fn stderr() -> Result<Self> {
        Self::new(io::stderr())
    }

    #[must_use]
    pub fn with_level(self, level: LogLevel) -> Self {
        self.state.set_level(level);
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// The descriptor being written to, if still open
    pub fn raw_fd(&self) -> Option<RawFd> {
        self.file.lock().as_ref().map(AsRawFd::as_raw_fd)
    }

    pub fn close(&self) {
        self.file.lock().take();
    }
}

impl Handler for DescriptorHandler {
    fn render(&self, event: &LogEvent) -> Result<()> {
        let mut guard = self.file.lock();
        let file = guard
            .as_mut()
            .ok_or_else(|| LoggerError::handler_closed(self.name()))?;

        let mut line = format_line(event, &self.timestamp_format);
        line.push('\n');
        file.write_all(line.as_bytes())?;
        Ok(())
    }

    fn state(&self) -> &HandlerState {
        &self.state
    }

    fn name(&self) -> &str {
        "descriptor"
    }
}
