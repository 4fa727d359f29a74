//! Mode switching example
//!
//! Demonstrates moving a logger between disabled, synchronous and
//! asynchronous delivery, and the drain performed when leaving async mode.
//!
//! Run with: cargo run --example async_mode

use dispatch_logger::prelude::*;
use std::sync::Arc;
use std::thread;

fn main() -> Result<()> {
    println!("=== Dispatch Logger - Mode Switching Example ===\n");

    let logger = Arc::new(
        Logger::builder()
            .mode(LoggerMode::Disabled)
            .handler(StreamHandler::stderr().with_level(LogLevel::Info))
            .build()?,
    );

    println!("1. Disabled: nothing is delivered");
    logger.info("You will never see this");

    println!("\n2. Sync: delivered before each call returns");
    logger.set_mode(LoggerMode::Sync)?;
    logger.info("Delivered inline");

    println!("\n3. Async: four threads queue events for the worker");
    logger.set_mode(LoggerMode::Async)?;
    let handles: Vec<_> = (0..4)
        .map(|id| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..5 {
                    logger.info(format!("Thread {} - message {}", id, i));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("Thread panicked");
    }
    println!("   Still queued: {}", logger.pending());

    println!("\n4. Back to sync: the queue is drained before set_mode returns");
    logger.set_mode(LoggerMode::Sync)?;
    println!("   Still queued: {}", logger.pending());

    let metrics = logger.metrics();
    println!(
        "\nDelivered: {}, queued: {}, drained: {}, discarded: {}",
        metrics.delivered(),
        metrics.queued(),
        metrics.drained(),
        metrics.discarded()
    );

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
