//! Basic logger usage example
//!
//! Demonstrates plain template output, level filtering and extra arguments.
//!
//! Run with: cargo run --example basic_usage

use dslogger::prelude::*;
use dslogger::info;

fn main() -> Result<()> {
    println!("=== dslogger - Basic Usage Example ===\n");

    let logger = Logger::new();

    println!("1. Logging at different levels:");
    logger.debug("This is a debug message")?;
    logger.info("This is an info message")?;
    logger.warn("This is a warning message")?;
    logger.error("This is an error message")?;

    println!("\n2. Logging with a higher threshold:");
    logger.set_level(LogLevel::Warn);
    logger.debug("Debug message (hidden)")?;
    logger.info("Info message (hidden)")?;
    logger.warn("Warning message (visible)")?;

    println!("\n3. Extra arguments and a custom template:");
    logger.set_level(LogLevel::Debug);
    logger.set_template("%t %l %f:%line:%c (pid %pid on %hostname) %msg");
    info!(logger, "Processed", 42, "requests in", 1.5, "seconds")?;

    println!("\n4. The process-wide default logger:");
    dslogger::logger().info("Hello from the default logger")?;

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
