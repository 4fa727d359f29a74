//! Core logger types and traits

pub mod config;
pub mod error;
pub mod format;
pub mod handler;
pub mod log_event;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod mode;
pub mod registry;
pub mod timestamp;
mod worker;

pub use config::{LoggerConfig, DEFAULT_IDLE_POLL};
pub use error::{LoggerError, Result};
pub use format::{format_data, format_line};
pub use handler::{Handler, HandlerRef, HandlerState};
pub use log_event::LogEvent;
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use mode::LoggerMode;
pub use registry::{DispatchReport, HandlerFailure, HandlerRegistry};
pub use timestamp::{format_timestamp, TimestampFormat, DEFAULT_TIMESTAMP_PATTERN};
