//! Closure-backed appender

use crate::core::{Appender, LogLevel, Result};

/// Hands every line to a closure.
///
/// Lets callers redirect output without touching formatting.
///
/// # Example
///
/// ```
/// use dslogger::{FnAppender, Logger};
/// use std::sync::{Arc, Mutex};
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&seen);
/// let logger = Logger::builder()
///     .writer(FnAppender::new(move |_, line| {
///         sink.lock().unwrap().push(line.to_string());
///         Ok(())
///     }))
///     .build();
///
/// logger.info("captured").unwrap();
/// assert_eq!(seen.lock().unwrap().len(), 1);
/// ```
pub struct FnAppender<F>
where
    F: FnMut(LogLevel, &str) -> Result<()> + Send,
{
    write: F,
}

impl<F> FnAppender<F>
where
    F: FnMut(LogLevel, &str) -> Result<()> + Send,
{
    pub fn new(write: F) -> Self {
        Self { write }
    }
}

impl<F> Appender for FnAppender<F>
where
    F: FnMut(LogLevel, &str) -> Result<()> + Send,
{
    fn append(&mut self, level: LogLevel, line: &str) -> Result<()> {
        (self.write)(level, line)
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "fn"
    }
}
