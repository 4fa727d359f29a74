//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// The same handler instance is already registered
    #[error("Handler '{name}' is already registered")]
    NotUnique { name: String },

    /// Removal by reference found no matching handler
    #[error("Handler '{name}' is not registered")]
    HandlerNotFound { name: String },

    /// Removal or lookup by index past the end of the registry
    #[error("Handler index {index} out of range ({count} registered)")]
    IndexOutOfRange { index: usize, count: usize },

    /// The handler's sink has been closed
    #[error("Handler '{name}' is closed")]
    HandlerClosed { name: String },

    /// At least one handler failed during a synchronous dispatch
    #[error("Dispatch failed for {failed} of {total} handlers")]
    Dispatch { failed: usize, total: usize },

    /// A handler panicked while rendering
    #[error("Handler '{name}' panicked: {message}")]
    HandlerPanicked { name: String, message: String },

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Strftime pattern that chrono cannot render
    #[error("Invalid timestamp format: '{pattern}'")]
    InvalidTimestampFormat { pattern: String },

    /// The background worker thread could not be started
    #[error("Failed to spawn async worker: {source}")]
    WorkerSpawn {
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Writer error (generic)
    #[error("Writer error: {0}")]
    WriterError(String),
}

impl LoggerError {
    pub fn not_unique(name: impl Into<String>) -> Self {
        LoggerError::NotUnique { name: name.into() }
    }

    pub fn handler_not_found(name: impl Into<String>) -> Self {
        LoggerError::HandlerNotFound { name: name.into() }
    }

    pub fn index_out_of_range(index: usize, count: usize) -> Self {
        LoggerError::IndexOutOfRange { index, count }
    }

    pub fn handler_closed(name: impl Into<String>) -> Self {
        LoggerError::HandlerClosed { name: name.into() }
    }

    pub fn handler_panicked(name: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::HandlerPanicked {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    pub fn invalid_timestamp(pattern: impl Into<String>) -> Self {
        LoggerError::InvalidTimestampFormat {
            pattern: pattern.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a writer error (generic)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        LoggerError::WriterError(msg.into())
    }

    /// True for the "not found" outcomes of the removal operations
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LoggerError::HandlerNotFound { .. } | LoggerError::IndexOutOfRange { .. }
        )
    }
}
