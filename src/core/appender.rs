//! Appender trait for log output destinations

use super::{error::Result, log_level::LogLevel};

/// Write primitive for one destination.
///
/// `line` is fully rendered and carries no line separator; the appender
/// terminates it.
pub trait Appender: Send {
    fn append(&mut self, level: LogLevel, line: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
