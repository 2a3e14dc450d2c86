//! Main logger implementation

use super::{
    appender::Appender,
    call_site::{CallMetadata, CallSite},
    error::{LoggerError, Result},
    level_store::{EnvLevelStore, LevelStore, SHARED_LEVEL_KEY},
    log_level::LogLevel,
    message::{Arg, Message},
    metrics::LoggerMetrics,
    output_format::OutputFormat,
    record::Record,
    timestamp::TimestampFormat,
};
use crate::appenders::ConsoleAppender;
use once_cell::sync::Lazy;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

/// A secondary destination with its own threshold
pub struct SinkBinding {
    pub threshold: LogLevel,
    pub appender: Box<dyn Appender>,
}

impl SinkBinding {
    pub fn new(threshold: LogLevel, appender: Box<dyn Appender>) -> Self {
        Self { threshold, appender }
    }
}

/// Leveled logger writing to a primary appender and any number of sinks.
///
/// Emission is synchronous: a call returns once every admitting destination
/// has been written. Sinks are written in registration order and the first
/// failing write aborts the emission with its error.
pub struct Logger {
    level: RwLock<LogLevel>,
    level_store: Option<Arc<dyn LevelStore>>,
    format: RwLock<OutputFormat>,
    timestamp_format: RwLock<TimestampFormat>,
    primary: Mutex<Box<dyn Appender>>,
    sinks: Mutex<Vec<SinkBinding>>,
    metrics: LoggerMetrics,
}

static DEFAULT_LOGGER: Lazy<Logger> = Lazy::new(|| {
    Logger::builder()
        .level_store(Arc::new(EnvLevelStore))
        .build()
});

/// Process-wide default logger.
///
/// Its threshold lives in the environment under `DSLOGGER_LEVEL`, so it can
/// be preset before start-up and is shared with other loggers bound to the
/// same store.
pub fn logger() -> &'static Logger {
    &DEFAULT_LOGGER
}

impl Logger {
    /// Logger at `debug` writing plain lines to the console
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Set the threshold, writing it through to the shared store if bound
    pub fn set_level(&self, level: LogLevel) {
        *self.level.write() = level;
        if let Some(store) = &self.level_store {
            store.set(SHARED_LEVEL_KEY, level.to_str());
        }
    }

    /// Parse and set the threshold; fails on unknown level names
    pub fn set_level_str(&self, level: &str) -> Result<()> {
        let level = level
            .parse::<LogLevel>()
            .map_err(|message| LoggerError::config("LogLevel", message))?;
        self.set_level(level);
        Ok(())
    }

    /// Effective threshold.
    ///
    /// With a shared store the stored value wins; an absent or unparseable
    /// value falls back to the instance's own level.
    pub fn level(&self) -> LogLevel {
        self.level_store
            .as_ref()
            .and_then(|store| store.get(SHARED_LEVEL_KEY))
            .and_then(|value| value.parse().ok())
            .unwrap_or_else(|| *self.level.read())
    }

    pub fn uses_shared_level(&self) -> bool {
        self.level_store.is_some()
    }

    /// Switch the output format
    pub fn set_type(&self, format: OutputFormat) {
        *self.format.write() = format;
    }

    /// Switch the output format by name, see [`OutputFormat::from_kind`]
    pub fn set_type_named(&self, kind: &str, template: Option<&str>) -> Result<()> {
        let format = OutputFormat::from_kind(kind, template)?;
        self.set_type(format);
        Ok(())
    }

    /// Plain output using `template`
    pub fn set_template(&self, template: impl Into<String>) {
        self.set_type(OutputFormat::template(template));
    }

    /// Render lines with a custom function
    pub fn set_formatter<F>(&self, formatter: F)
    where
        F: Fn(LogLevel, &Record, &CallMetadata) -> String + Send + Sync + 'static,
    {
        self.set_type(OutputFormat::custom(formatter));
    }

    pub fn output_format(&self) -> OutputFormat {
        self.format.read().clone()
    }

    pub fn set_timestamp_format(&self, format: TimestampFormat) {
        *self.timestamp_format.write() = format;
    }

    /// Replace the primary write primitive
    pub fn set_writer(&self, appender: Box<dyn Appender>) {
        *self.primary.lock() = appender;
    }

    /// Register a secondary sink gated by `threshold`
    pub fn add_sink(&self, threshold: LogLevel, appender: Box<dyn Appender>) {
        self.sinks.lock().push(SinkBinding::new(threshold, appender));
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.lock().len()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Log `message` followed by `args` at `level`.
    ///
    /// The call site recorded is the caller of this method.
    #[track_caller]
    pub fn emit(&self, level: LogLevel, message: impl Into<Message>, args: &[Arg]) -> Result<()> {
        self.emit_at(CallSite::caller(), level, message.into(), args)
    }

    /// Like [`Logger::emit`] with a level name; unknown names are dropped
    #[track_caller]
    pub fn emit_str(&self, level: &str, message: impl Into<Message>, args: &[Arg]) -> Result<()> {
        match level.parse::<LogLevel>() {
            Ok(level) => self.emit_at(CallSite::caller(), level, message.into(), args),
            Err(_) => {
                self.metrics.record_filtered();
                Ok(())
            }
        }
    }

    /// Log with an explicit call site
    pub fn emit_at(&self, site: CallSite, level: LogLevel, message: Message, args: &[Arg]) -> Result<()> {
        if !level.admits(self.level()) {
            self.metrics.record_filtered();
            return Ok(());
        }

        let meta = CallMetadata::capture(site, &self.timestamp_format.read());
        let record = Record::normalize(message, args);
        let line = self.format.read().render(level, &record, &meta);

        match self.dispatch(level, &line) {
            Ok(()) => {
                self.metrics.record_logged();
                Ok(())
            }
            Err(e) => {
                self.metrics.record_failed_write();
                Err(e)
            }
        }
    }

    fn dispatch(&self, level: LogLevel, line: &str) -> Result<()> {
        self.primary.lock().append(level, line)?;

        let mut sinks = self.sinks.lock();
        for binding in sinks.iter_mut() {
            if level.admits(binding.threshold) {
                binding.appender.append(level, line)?;
            }
        }
        Ok(())
    }

    /// Flush the primary appender and every sink
    pub fn flush(&self) -> Result<()> {
        self.primary.lock().flush()?;
        for binding in self.sinks.lock().iter_mut() {
            binding.appender.flush()?;
        }
        Ok(())
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, message: impl Into<Message>) -> Result<()> {
        self.emit(LogLevel::Debug, message, &[])
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, message: impl Into<Message>) -> Result<()> {
        self.emit(LogLevel::Info, message, &[])
    }

    /// Alias of [`Logger::info`]
    #[inline]
    #[track_caller]
    pub fn log(&self, message: impl Into<Message>) -> Result<()> {
        self.emit(LogLevel::Info, message, &[])
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, message: impl Into<Message>) -> Result<()> {
        self.emit(LogLevel::Warn, message, &[])
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, message: impl Into<Message>) -> Result<()> {
        self.emit(LogLevel::Error, message, &[])
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for configuring a [`Logger`]
///
/// # Example
///
/// ```
/// use dslogger::{Logger, LogLevel, MemoryAppender, OutputFormat};
///
/// let out = MemoryAppender::new();
/// let logger = Logger::builder()
///     .min_level(LogLevel::Info)
///     .output_format(OutputFormat::structured())
///     .writer(out.clone())
///     .build();
///
/// logger.info("ready").unwrap();
/// assert!(out.contents().contains("\"msg\":\"ready\""));
/// ```
pub struct LoggerBuilder {
    min_level: LogLevel,
    format: OutputFormat,
    timestamp_format: TimestampFormat,
    primary: Option<Box<dyn Appender>>,
    sinks: Vec<SinkBinding>,
    level_store: Option<Arc<dyn LevelStore>>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Debug,
            format: OutputFormat::default(),
            timestamp_format: TimestampFormat::default(),
            primary: None,
            sinks: Vec::new(),
            level_store: None,
        }
    }

    #[must_use]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    #[must_use]
    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Primary destination; defaults to [`ConsoleAppender`]
    #[must_use]
    pub fn writer<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.primary = Some(Box::new(appender));
        self
    }

    #[must_use]
    pub fn sink<A: Appender + 'static>(mut self, threshold: LogLevel, appender: A) -> Self {
        self.sinks.push(SinkBinding::new(threshold, Box::new(appender)));
        self
    }

    /// Keep the threshold in a shared store
    #[must_use]
    pub fn level_store(mut self, store: Arc<dyn LevelStore>) -> Self {
        self.level_store = Some(store);
        self
    }

    pub fn build(self) -> Logger {
        Logger {
            level: RwLock::new(self.min_level),
            level_store: self.level_store,
            format: RwLock::new(self.format),
            timestamp_format: RwLock::new(self.timestamp_format),
            primary: Mutex::new(
                self.primary
                    .unwrap_or_else(|| Box::new(ConsoleAppender::new())),
            ),
            sinks: Mutex::new(self.sinks),
            metrics: LoggerMetrics::new(),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
