//! Console appender implementation

use crate::core::{Appender, LogLevel, LoggerError, Result};
#[cfg(feature = "console")]
use colored::Colorize;
use std::io::Write;

/// Writes `debug`/`info` lines to stdout and `warn`/`error` lines to stderr
pub struct ConsoleAppender {
    use_colors: bool,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self { use_colors: false }
    }

    /// Color whole lines by level.
    ///
    /// Leave this off for structured output that is parsed downstream.
    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn decorate(&self, level: LogLevel, line: &str) -> String {
        if self.use_colors {
            return colorize(level, line);
        }
        line.to_string()
    }
}

#[cfg(feature = "console")]
fn colorize(level: LogLevel, line: &str) -> String {
    line.color(level.color_code()).to_string()
}

#[cfg(not(feature = "console"))]
fn colorize(_level: LogLevel, line: &str) -> String {
    line.to_string()
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, level: LogLevel, line: &str) -> Result<()> {
        let output = self.decorate(level, line);
        let result = match level {
            LogLevel::Warn | LogLevel::Error => writeln!(std::io::stderr().lock(), "{}", output),
            LogLevel::Debug | LogLevel::Info => writeln!(std::io::stdout().lock(), "{}", output),
        };
        result.map_err(|e| LoggerError::io_operation("writing log line", "console write failed", e))
    }

    fn flush(&mut self) -> Result<()> {
        // Flush both stdout and stderr since we write to both
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
