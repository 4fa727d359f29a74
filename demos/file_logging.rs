//! File logging example
//!
//! Demonstrates writing to a log file, custom timestamp formats and
//! closing a handler while the logger keeps running.
//!
//! Run with: cargo run --example file_logging

use dispatch_logger::prelude::*;
use std::fs;

fn main() -> Result<()> {
    println!("=== Dispatch Logger - File Logging Example ===\n");

    let log_dir = std::env::temp_dir().join("dispatch_logger_demo");
    fs::create_dir_all(&log_dir)?;
    let log_path = log_dir.join("application.log");

    let logger = Logger::new();
    let file = logger.register(
        FileHandler::create(&log_path)?.with_timestamp_format(TimestampFormat::Rfc3339),
    )?;
    logger.register(
        StreamHandler::stdout().with_timestamp_format(TimestampFormat::custom("%H:%M:%S%.3f")?),
    )?;

    println!("Writing to {}\n", file.path().display());
    logger.info("Application started");
    logger.debug("Loading configuration");
    logger.warn("Cache directory missing, creating it");
    logger.error("Failed to reach metrics endpoint");

    // The file closes; the console keeps receiving events
    file.close()?;
    if let Err(e) = logger.log(LogLevel::Info, "Console only") {
        println!("\nReported after close: {}", e);
    }

    println!("\nFile contents:");
    print!("{}", fs::read_to_string(&log_path)?);

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
