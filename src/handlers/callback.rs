//! Closure-backed handler for user-defined sinks

use crate::core::{Handler, HandlerState, LogEvent, LogLevel, Result};
use std::fmt;

type RenderFn = dyn Fn(&LogEvent) -> Result<()> + Send + Sync;

/// Handler that forwards every accepted event to a closure.
///
/// # Example
///
/// ```
/// use dispatch_logger::prelude::*;
/// use std::sync::{Arc, Mutex};
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&seen);
///
/// let logger = Logger::new();
/// logger
///     .register(
///         CallbackHandler::new(move |event| {
///             sink.lock().unwrap().push(event.message().to_string());
///             Ok(())
///         })
///         .with_level(LogLevel::Warn),
///     )
///     .unwrap();
///
/// logger.info("ignored");
/// logger.error("kept");
/// assert_eq!(*seen.lock().unwrap(), vec!["kept"]);
/// ```
pub struct CallbackHandler {
    state: HandlerState,
    name: String,
    callback: Box<RenderFn>,
}

impl CallbackHandler {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&LogEvent) -> Result<()> + Send + Sync + 'static,
    {
        Self {
            state: HandlerState::default(),
            name: "callback".to_string(),
            callback: Box::new(callback),
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
}

impl Handler for CallbackHandler {
    fn render(&self, event: &LogEvent) -> Result<()> {
        (self.callback)(event)
    }

    fn state(&self) -> &HandlerState {
        &self.state
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for CallbackHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackHandler")
            .field("name", &self.name)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
