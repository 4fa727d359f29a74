//! Basic logger usage example
//!
//! Demonstrates synchronous logging to the console, per-handler thresholds
//! and the logging macros.
//!
//! Run with: cargo run --example basic_usage

use dispatch_logger::prelude::*;
use dispatch_logger::{info, warn};

fn main() -> Result<()> {
    println!("=== Dispatch Logger - Basic Usage Example ===\n");

    // Synchronous logger writing colored lines to stdout
    let logger = Logger::new();
    let console = logger.register(StreamHandler::stdout().with_colors(true))?;

    println!("1. Logging at different levels:");
    logger.trace("This is a trace message");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.warn("This is a warning message");
    logger.error("This is an error message");
    logger.fatal("This is a fatal message");

    println!("\n2. Raising the handler threshold to WARN:");
    console.set_level(LogLevel::Warn);
    logger.info("Info message (hidden)");
    logger.warn("Warning message (visible)");

    println!("\n3. Disabling the handler:");
    console.disable();
    logger.error("Error message (hidden)");
    console.enable();

    println!("\n4. Formatting with macros:");
    console.set_level(LogLevel::Trace);
    let port = 8080;
    info!(logger, "Server listening on port {}", port)?;
    warn!(logger, "{} of {} workers busy", 7, 8)?;

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
