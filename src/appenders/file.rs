//! File appender implementation

use crate::core::{Appender, LogLevel, LoggerError, Result};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Appends lines to a file, creating it if needed
pub struct FileAppender {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl FileAppender {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LoggerError::file_appender(path.display().to_string(), e.to_string()))?;

        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    fn write_error(&self, operation: &str, source: std::io::Error) -> LoggerError {
        LoggerError::io_operation(operation, self.path.display().to_string(), source)
    }
}

impl Appender for FileAppender {
    fn append(&mut self, _level: LogLevel, line: &str) -> Result<()> {
        let result = self
            .writer
            .write_all(line.as_bytes())
            .and_then(|()| self.writer.write_all(b"\n"));
        result.map_err(|e| self.write_error("writing log line", e))
    }

    fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| self.write_error("flushing log file", e))
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileAppender {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.flush();
    }
}
