//! Appenders over arbitrary writers and in-memory buffers

use crate::core::{Appender, LogLevel, Result};
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;

/// Appends lines to any `Write` destination
pub struct WriterAppender<W: Write + Send> {
    writer: W,
}

impl<W: Write + Send> WriterAppender<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> Appender for WriterAppender<W> {
    fn append(&mut self, _level: LogLevel, line: &str) -> Result<()> {
        writeln!(self.writer, "{}", line)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "writer"
    }
}

/// Shared in-memory buffer; clones see the same contents
///
/// # Example
///
/// ```
/// use dslogger::{Appender, LogLevel, MemoryAppender};
///
/// let buffer = MemoryAppender::new();
/// let mut handle = buffer.clone();
/// handle.append(LogLevel::Info, "hello").unwrap();
/// assert_eq!(buffer.contents(), "hello\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryAppender {
    buffer: Arc<Mutex<String>>,
}

impl MemoryAppender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        self.buffer.lock().clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.buffer.lock().lines().map(str::to_string).collect()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

impl Appender for MemoryAppender {
    fn append(&mut self, _level: LogLevel, line: &str) -> Result<()> {
        let mut buffer = self.buffer.lock();
        buffer.push_str(line);
        buffer.push('\n');
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
