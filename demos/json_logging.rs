//! Structured output example
//!
//! Run with: cargo run --example json_logging

use dslogger::prelude::*;
use dslogger::error;
use serde_json::{json, Map, Value};
use std::fmt;

#[derive(Debug)]
struct QuotaExceeded {
    limit: u64,
}

impl fmt::Display for QuotaExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "quota of {} requests exceeded", self.limit)
    }
}

impl std::error::Error for QuotaExceeded {}

impl LoggableError for QuotaExceeded {
    fn error_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("code".to_string(), json!("E_QUOTA"));
        fields.insert("limit".to_string(), json!(self.limit));
        fields
    }
}

fn main() -> Result<()> {
    println!("=== dslogger - JSON Output Example ===\n");

    let logger = Logger::new();
    logger.set_type_named("json", None)?;

    logger.info("json message")?;
    logger.info(json!({"user": "alice", "action": "login"}))?;

    let err = std::io::Error::new(std::io::ErrorKind::NotFound, "config.toml missing");
    error!(logger, Message::error(&err), "while starting")?;

    // Loggable errors keep their code and name
    error!(logger, &QuotaExceeded { limit: 100 }, "for tenant", "acme")?;

    let info = ErrorInfo::new("custom error").with_name("Error").with_field("code", "ERR_CODE");
    error!(logger, Message::with_error(Default::default(), info), "extra")?;

    Ok(())
}
