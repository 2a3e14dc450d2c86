//! Integration tests for the logger
//!
//! These tests verify:
//! - Plain template output and extra arguments
//! - Structured output with errors and wrapped errors
//! - Level-gated secondary sinks
//! - Shared level coordination and the default logger
//! - Concurrent logging through one instance

use dslogger::appenders::{FileAppender, MemoryAppender};
use dslogger::{
    error, info, logger, ErrorInfo, LevelStore, LogLevel, LoggableError, Logger, LoggerError,
    MemoryLevelStore, Message, OutputFormat, SHARED_LEVEL_KEY,
};
use serde_json::{json, Map, Value};
use std::fmt;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

#[derive(Debug)]
struct CustomError {
    code: &'static str,
}

impl fmt::Display for CustomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("custom error")
    }
}

impl std::error::Error for CustomError {}

impl LoggableError for CustomError {
    fn error_name(&self) -> String {
        "Error".to_string()
    }

    fn error_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("code".to_string(), Value::from(self.code));
        fields
    }
}

fn memory_logger() -> (Logger, MemoryAppender) {
    let out = MemoryAppender::new();
    let logger = Logger::builder().writer(out.clone()).build();
    (logger, out)
}

fn parse_last(out: &MemoryAppender) -> Value {
    let lines = out.lines();
    let last = lines.last().expect("at least one line");
    serde_json::from_str(last).expect("line is JSON")
}

#[test]
fn test_plain_message_is_written() {
    let (logger, out) = memory_logger();
    logger.log("plain text").unwrap();
    assert!(out.contents().contains("plain text"));
}

#[test]
fn test_plain_default_template_shape() {
    let (logger, out) = memory_logger();
    logger.info("plain text").unwrap();

    let line = out.lines().remove(0);
    // [YYYY-MM-DD HH:mm:ss][info][tests/integration_tests.rs N]: plain text
    assert!(line.starts_with('['));
    assert_eq!(&line[20..27], "][info]");
    assert!(line.contains("[tests/integration_tests.rs "));
    assert!(line.ends_with("]: plain text"));
}

#[test]
fn test_extra_string_args_are_joined() {
    let (logger, out) = memory_logger();
    info!(logger, "plain text", "lala la").unwrap();
    assert!(out.contents().contains("plain text lala la"));
}

#[test]
fn test_structured_plain_string() {
    let (logger, out) = memory_logger();
    logger.set_type_named("json", None).unwrap();

    logger.error("json message").unwrap();

    let log = parse_last(&out);
    assert_eq!(log["msg"], "json message");
    assert_eq!(log["pid"], std::process::id());
    assert_eq!(log["level"], "error");
}

#[test]
fn test_structured_error_with_extra() {
    let (logger, out) = memory_logger();
    logger.set_type(OutputFormat::structured());

    let err = CustomError { code: "ERR_CODE" };
    error!(logger, ErrorInfo::from(&err), "extra").unwrap();

    let log = parse_last(&out);
    assert_eq!(log["msg"], "custom error extra");
    assert_eq!(log["err"]["code"], err.code);
    assert_eq!(log["err"]["name"], "Error");
    assert_eq!(log["err"]["message"], "custom error");
}

#[test]
fn test_structured_wrapped_error_matches_direct() {
    let (logger, out) = memory_logger();
    logger.set_type(OutputFormat::structured());
    let err = CustomError { code: "ERR_CODE" };

    error!(logger, ErrorInfo::from(&err), "extra").unwrap();
    let direct = parse_last(&out);

    error!(logger, Message::with_error(Map::new(), ErrorInfo::from(&err)), "extra").unwrap();
    let wrapped = parse_last(&out);

    assert_eq!(wrapped["msg"], "custom error extra");
    assert_eq!(wrapped["err"]["code"], err.code);
    assert_eq!(direct["msg"], wrapped["msg"]);
    assert_eq!(direct["err"], wrapped["err"]);
}

#[test]
fn test_loggable_error_by_reference_keeps_fields() {
    let (logger, out) = memory_logger();
    logger.set_type(OutputFormat::structured());

    let err = CustomError { code: "E1" };
    error!(logger, &err, "extra").unwrap();

    let log = parse_last(&out);
    assert_eq!(log["msg"], "custom error extra");
    assert_eq!(log["err"]["code"], "E1");
    assert_eq!(log["err"]["name"], "Error");
}

#[test]
fn test_wrapped_unnamed_error_matches_direct() {
    let (logger, out) = memory_logger();
    logger.set_type(OutputFormat::structured());

    error!(logger, ErrorInfo::new("disk full"), "extra").unwrap();
    let direct = parse_last(&out);

    error!(logger, Message::with_error(Map::new(), ErrorInfo::new("disk full")), "extra").unwrap();
    let wrapped = parse_last(&out);

    assert_eq!(direct["msg"], "disk full extra");
    assert_eq!(wrapped["msg"], "disk full extra");
    assert_eq!(direct["err"], wrapped["err"]);
}

#[test]
fn test_structured_wrapper_from_json_value() {
    let (logger, out) = memory_logger();
    logger.set_type(OutputFormat::structured());

    let payload = json!({
        "err": {"message": "custom error", "name": "Error", "code": "ERR_CODE"},
        "request_id": "r-1"
    });
    error!(logger, payload, "extra").unwrap();

    let log = parse_last(&out);
    assert_eq!(log["msg"], "custom error extra");
    assert_eq!(log["err"]["code"], "ERR_CODE");
    assert_eq!(log["request_id"], "r-1");
}

#[test]
fn test_secondary_sink_threshold() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("warn.log");

    let (logger, out) = memory_logger();
    logger.set_type(OutputFormat::structured());
    let appender = FileAppender::new(&log_file).expect("Failed to create appender");
    logger.add_sink(LogLevel::Warn, Box::new(appender));

    logger.info("info only on primary").unwrap();
    logger.warn("warn everywhere").unwrap();
    logger.error("error everywhere").unwrap();
    logger.flush().expect("Failed to flush");

    assert_eq!(out.lines().len(), 3);

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(!content.contains("info only on primary"));
    let first: Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(first["msg"], "warn everywhere");
}

#[test]
fn test_sink_threshold_independent_of_logger_threshold() {
    let sink = MemoryAppender::new();
    let logger = Logger::builder()
        .min_level(LogLevel::Error)
        .writer(MemoryAppender::new())
        .sink(LogLevel::Debug, sink.clone())
        .build();

    logger.warn("filtered by the logger").unwrap();
    logger.error("passes both").unwrap();

    assert_eq!(sink.lines().len(), 1);
    assert!(sink.contents().contains("passes both"));
}

#[test]
fn test_below_threshold_writes_nothing() {
    let sink = MemoryAppender::new();
    let (logger, out) = memory_logger();
    logger.add_sink(LogLevel::Debug, Box::new(sink.clone()));
    logger.set_level(LogLevel::Error);

    logger.debug("no").unwrap();
    logger.info("no").unwrap();
    logger.warn("no").unwrap();

    assert!(out.contents().is_empty());
    assert!(sink.contents().is_empty());
}

#[test]
fn test_set_type_idempotent() {
    let (logger, out) = memory_logger();
    logger.set_template("%level|%msg");

    logger.set_type_named("plain", Some("%level|%msg")).unwrap();
    logger.info("same").unwrap();
    logger.set_type_named("plain", Some("%level|%msg")).unwrap();
    logger.info("same").unwrap();

    let lines = out.lines();
    assert_eq!(lines[0], lines[1]);
    assert_eq!(lines[0], "info|same");
}

#[test]
fn test_invalid_type_fails_at_setup() {
    let (logger, _) = memory_logger();
    let result = logger.set_type_named("json", Some("\"not an object\""));
    assert!(matches!(result, Err(LoggerError::InvalidConfiguration { .. })));
}

#[test]
fn test_shared_store_coordinates_loggers() {
    let store = Arc::new(MemoryLevelStore::new());
    let (first_out, second_out) = (MemoryAppender::new(), MemoryAppender::new());
    let first = Logger::builder()
        .writer(first_out.clone())
        .level_store(store.clone())
        .build();
    let second = Logger::builder()
        .writer(second_out.clone())
        .level_store(store.clone())
        .build();

    second.set_level(LogLevel::Warn);
    first.info("hidden").unwrap();
    first.warn("shown").unwrap();

    assert_eq!(first.level(), LogLevel::Warn);
    assert_eq!(store.get(SHARED_LEVEL_KEY).as_deref(), Some("warn"));
    assert_eq!(first_out.lines().len(), 1);
    assert!(second_out.lines().is_empty());
}

#[test]
fn test_default_logger_uses_environment() {
    let default = logger();
    assert!(std::ptr::eq(default, logger()));
    assert!(default.uses_shared_level());

    default.set_level(LogLevel::Error);
    assert_eq!(std::env::var(SHARED_LEVEL_KEY).ok().as_deref(), Some("error"));
    assert_eq!(default.level(), LogLevel::Error);

    std::env::set_var(SHARED_LEVEL_KEY, "info");
    assert_eq!(default.level(), LogLevel::Info);
}

#[test]
fn test_concurrent_logging() {
    let (logger, out) = memory_logger();
    logger.set_template("%msg");
    let logger = Arc::new(logger);

    let mut handles = vec![];
    for thread_id in 0..5 {
        let logger_clone = Arc::clone(&logger);
        let handle = std::thread::spawn(move || {
            for i in 0..10 {
                logger_clone
                    .info(format!("Thread {} - Message {}", thread_id, i))
                    .expect("memory writes succeed");
            }
        });
        handles.push(handle);
    }

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    let lines = out.lines();
    assert_eq!(lines.len(), 50, "Should have 50 log entries from 5 threads * 10 messages");
    assert!(lines.iter().all(|line| line.starts_with("Thread ")));
    assert_eq!(logger.metrics().total_logged(), 50);
}
