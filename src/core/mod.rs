//! Core logger types and traits

pub mod appender;
pub mod call_site;
pub mod error;
pub mod level_store;
pub mod log_level;
pub mod logger;
pub mod message;
pub mod metrics;
pub mod output_format;
pub mod record;
pub mod timestamp;

pub use appender::Appender;
pub use call_site::{CallMetadata, CallSite, HostInfo};
pub use error::{LoggerError, Result};
pub use level_store::{EnvLevelStore, LevelStore, MemoryLevelStore, SHARED_LEVEL_KEY};
pub use log_level::LogLevel;
pub use logger::{logger, Logger, LoggerBuilder, SinkBinding};
pub use message::{inspect, Arg, ErrorInfo, LoggableError, Message};
pub use metrics::LoggerMetrics;
pub use output_format::{Formatter, OutputFormat, DEFAULT_TEMPLATE};
pub use record::Record;
pub use timestamp::TimestampFormat;
