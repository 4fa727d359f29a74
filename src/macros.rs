//! Logging macros for ergonomic log message formatting.
//!
//! These macros render their arguments with `format_args!` and hand them to
//! [`Logger::log_fmt`](crate::Logger::log_fmt), so a message below the
//! logger's minimum level is never formatted. Each expands to the call's
//! `Result`.
//!
//! # Examples
//!
//! ```
//! use dispatch_logger::prelude::*;
//! use dispatch_logger::info;
//!
//! let logger = Logger::new();
//!
//! // Basic logging
//! info!(logger, "Server started").unwrap();
//!
//! // With format arguments
//! let port = 8080;
//! let _ = info!(logger, "Server listening on port {}", port);
//! ```

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use dispatch_logger::prelude::*;
/// # let logger = Logger::new();
/// use dispatch_logger::log;
/// log!(logger, LogLevel::Info, "Simple message").unwrap();
/// log!(logger, LogLevel::Error, "Error code: {}", 500).unwrap();
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log_fmt($level, ::std::format_args!($($arg)+))
    };
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use dispatch_logger::prelude::*;
/// # let logger = Logger::new();
/// use dispatch_logger::info;
/// info!(logger, "Processing {} items", 100).unwrap();
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
///
/// # Examples
///
/// ```
/// # use dispatch_logger::prelude::*;
/// # let logger = Logger::new();
/// use dispatch_logger::fatal;
/// fatal!(logger, "Unable to recover from error: {}", "disk full").unwrap();
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{LogEvent, LogLevel, Logger};
    use crate::handlers::CallbackHandler;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn capturing_logger() -> (Logger, Arc<Mutex<Vec<(LogLevel, String)>>>) {
        let logger = Logger::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        logger
            .register(CallbackHandler::new(move |event: &LogEvent| {
                sink.lock().push((event.level(), event.message().to_string()));
                Ok(())
            }))
            .unwrap();
        (logger, seen)
    }

    #[test]
    fn test_log_macro() {
        let (logger, seen) = capturing_logger();
        log!(logger, LogLevel::Info, "Test message").unwrap();
        log!(logger, LogLevel::Info, "Formatted: {}", 42).unwrap();

        let seen = seen.lock();
        assert_eq!(seen[0].1, "Test message");
        assert_eq!(seen[1].1, "Formatted: 42");
    }

    #[test]
    fn test_level_macros() {
        let (logger, seen) = capturing_logger();
        trace!(logger, "t {}", 1).unwrap();
        debug!(logger, "d {}", 2).unwrap();
        info!(logger, "i {}", 3).unwrap();
        warn!(logger, "w {}", 4).unwrap();
        error!(logger, "e {}", 5).unwrap();
        fatal!(logger, "f {}", 6).unwrap();

        let levels: Vec<LogLevel> = seen.lock().iter().map(|(level, _)| *level).collect();
        assert_eq!(levels, LogLevel::ALL.to_vec());
    }

    #[test]
    fn test_macro_respects_min_level() {
        let (logger, seen) = capturing_logger();
        logger.set_min_level(LogLevel::Error);
        info!(logger, "skipped {}", 1).unwrap();
        assert!(seen.lock().is_empty());
    }
}
