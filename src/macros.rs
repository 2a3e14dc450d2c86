//! Logging macros taking a message plus any number of extra arguments.
//!
//! Extra arguments are converted with [`Arg::from`](crate::Arg): strings are
//! appended verbatim, other values as single-line JSON. The recorded call
//! site is the macro invocation.
//!
//! # Examples
//!
//! ```
//! use dslogger::prelude::*;
//! use dslogger::info;
//!
//! let logger = Logger::builder().writer(MemoryAppender::new()).build();
//!
//! // Basic logging
//! info!(logger, "Server started").unwrap();
//!
//! // With extra arguments
//! let port = 8080;
//! info!(logger, "Server listening on port", port).unwrap();
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use dslogger::prelude::*;
/// # let logger = Logger::builder().writer(MemoryAppender::new()).build();
/// use dslogger::log;
/// log!(logger, LogLevel::Info, "Simple message").unwrap();
/// log!(logger, LogLevel::Error, "Error code:", 500).unwrap();
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $msg:expr $(, $arg:expr)* $(,)?) => {
        $logger.emit($level, $msg, &[$($crate::Arg::from($arg)),*])
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use dslogger::prelude::*;
/// # let logger = Logger::builder().writer(MemoryAppender::new()).build();
/// use dslogger::debug;
/// debug!(logger, "Debug information").unwrap();
/// debug!(logger, "Counter value:", 10).unwrap();
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use dslogger::prelude::*;
/// # let logger = Logger::builder().writer(MemoryAppender::new()).build();
/// use dslogger::info;
/// info!(logger, "Application started").unwrap();
/// info!(logger, "Processing", 100, "items").unwrap();
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use dslogger::prelude::*;
/// # let logger = Logger::builder().writer(MemoryAppender::new()).build();
/// use dslogger::warn;
/// warn!(logger, "Low disk space").unwrap();
/// warn!(logger, "Retry attempt", 3).unwrap();
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use dslogger::prelude::*;
/// # let logger = Logger::builder().writer(MemoryAppender::new()).build();
/// use dslogger::error;
/// let err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
/// error!(logger, Message::error(&err), "while saving").unwrap();
/// ```
///
/// Errors implementing [`LoggableError`](crate::LoggableError) are passed by
/// reference so their name and extra fields are kept: `error!(logger, &err)`.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}
