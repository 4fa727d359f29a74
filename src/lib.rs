//! # Dispatch Logger
//!
//! An embeddable event logging facility. Callers submit leveled,
//! timestamped messages to a [`Logger`]; registered handlers (file, stream,
//! raw descriptor, or user-defined) render the ones they are interested in.
//!
//! ## Features
//!
//! - **Switchable delivery**: disabled, synchronous on the caller's thread,
//!   or asynchronous through a single background worker
//! - **Lossless transitions**: leaving async mode drains every queued event
//!   in order before returning
//! - **Per-handler filtering**: each handler has its own threshold and
//!   enable flag
//! - **Failure isolation**: a failing or panicking handler never stops the
//!   others from receiving an event
//!
//! ## Example
//!
//! ```
//! use dispatch_logger::prelude::*;
//!
//! let logger = Logger::builder()
//!     .handler(StreamHandler::stdout().with_level(LogLevel::Info))
//!     .build()
//!     .unwrap();
//!
//! logger.info("starting up");
//! logger.set_mode(LoggerMode::Async).unwrap();
//! logger.warn("queued for the worker");
//! logger.set_mode(LoggerMode::Sync).unwrap(); // drains the queue
//! ```

pub mod core;
pub mod handlers;
pub mod macros;

pub mod prelude {
    #[cfg(unix)]
    pub use crate::handlers::DescriptorHandler;
    pub use crate::handlers::{CallbackHandler, FileHandler, StreamHandler};
    pub use crate::core::{
        Handler, HandlerRef, HandlerState, LogEvent, LogLevel, Logger, LoggerBuilder,
        LoggerConfig, LoggerError, LoggerMetrics, LoggerMode, Result, TimestampFormat,
    };
}

#[cfg(unix)]
pub use handlers::DescriptorHandler;
pub use handlers::{CallbackHandler, FileHandler, StreamHandler};
pub use core::{
    format_data, format_line, format_timestamp, DispatchReport, Handler, HandlerFailure,
    HandlerRef, HandlerRegistry, HandlerState, LogEvent, LogLevel, Logger, LoggerBuilder,
    LoggerConfig, LoggerError, LoggerMetrics, LoggerMode, Result, TimestampFormat,
    DEFAULT_IDLE_POLL, DEFAULT_TIMESTAMP_PATTERN,
};
