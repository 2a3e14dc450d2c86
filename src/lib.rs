//! # dslogger
//!
//! A dead simple leveled logger.
//!
//! ## Features
//!
//! - **Level filtering**: `debug < info < warn < error`, per logger and per sink
//! - **Two output modes**: `%token` templates or single-line JSON records
//! - **Call-site enrichment**: file, line and column of the logging call
//! - **Fan-out**: secondary sinks gated by their own thresholds
//!
//! ```
//! use dslogger::{info, Logger, LogLevel, MemoryAppender, OutputFormat};
//!
//! let out = MemoryAppender::new();
//! let logger = Logger::builder().writer(out.clone()).build();
//!
//! info!(logger, "plain text", "lala la").unwrap();
//! assert!(out.contents().contains("plain text lala la"));
//!
//! logger.set_type(OutputFormat::structured());
//! logger.error("json message").unwrap();
//!
//! logger.set_level(LogLevel::Warn);
//! logger.info("dropped").unwrap();
//! assert!(!out.contents().contains("dropped"));
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, FileAppender, FnAppender, MemoryAppender, WriterAppender};
    pub use crate::core::{
        logger, Appender, Arg, CallMetadata, CallSite, EnvLevelStore, ErrorInfo, LevelStore,
        LogLevel, LoggableError, Logger, LoggerBuilder, LoggerError, LoggerMetrics,
        MemoryLevelStore, Message, OutputFormat, Record, Result, TimestampFormat,
    };
}

pub use appenders::{ConsoleAppender, FileAppender, FnAppender, MemoryAppender, WriterAppender};
pub use crate::core::{
    inspect, logger, Appender, Arg, CallMetadata, CallSite, EnvLevelStore, ErrorInfo, Formatter,
    HostInfo, LevelStore, LogLevel, LoggableError, Logger, LoggerBuilder, LoggerError,
    LoggerMetrics, MemoryLevelStore, Message, OutputFormat, Record, Result, SinkBinding,
    TimestampFormat, DEFAULT_TEMPLATE, SHARED_LEVEL_KEY,
};
