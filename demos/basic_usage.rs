//! Basic logger usage example
//!
//! Demonstrates the console logger, severity thresholds, header flags and
//! the process-wide default.
//!
//! Run with: cargo run --example basic_usage

use rust_fanout_logger::prelude::*;
use rust_fanout_logger::{global, warning};

fn main() -> Result<()> {
    println!("=== Rust Fanout Logger - Basic Usage Example ===\n");

    // Lines written before any logger exists go to stderr with a notice
    println!("1. Logging before initialization:");
    global::info("nobody configured me yet");

    // The first logger built becomes the process-wide default
    let logger = Logger::builder()
        .name("basic_usage")
        .level(LogLevel::Debug)
        .flags(OutputFlags::STD | OutputFlags::SHORT_FILE)
        .build();

    println!("\n2. Logging at different levels:");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.warning("This is a warning message");
    logger.error("This is an error message");

    println!("\n3. Raising the threshold to Warning:");
    logger.set_level(LogLevel::Warning);
    logger.debug("Debug message (hidden)");
    logger.info("Info message (hidden)");
    warning!(logger, "Disk usage at {}%", 91);

    println!("\n4. Only Error and Debug through a level mask:");
    logger.set_level_mask(LevelMask::NONE | LogLevel::Error | LogLevel::Debug);
    logger.warning("Warning message (hidden)");
    logger.debug("Debug message (visible)");

    println!("\n5. Free functions use the default logger:");
    logger.set_level(LogLevel::Info);
    logger.set_flags(OutputFlags::TIME | OutputFlags::MSG_PREFIX);
    global::info("routed through the default");

    logger.close();
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
