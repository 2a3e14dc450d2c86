//! File sink example
//!
//! Everything goes to the console; warnings and errors are also appended to
//! a file.
//!
//! Run with: cargo run --example file_logging

use dslogger::prelude::*;

fn main() -> Result<()> {
    println!("=== dslogger - File Sink Example ===\n");

    let path = std::env::temp_dir().join("dslogger_demo.log");
    let logger = Logger::builder()
        .sink(LogLevel::Warn, FileAppender::new(&path)?)
        .build();

    logger.info("Console only")?;
    logger.warn("Console and file")?;
    logger.error("Console and file")?;
    logger.flush()?;

    println!("\nFile contents of {}:", path.display());
    print!("{}", std::fs::read_to_string(&path)?);

    Ok(())
}
