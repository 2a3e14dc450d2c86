//! Output formats for rendered log lines
//!
//! - Plain: `%token` template substitution
//! - Structured: one JSON object per line
//! - Custom: a user supplied formatter closure

use super::call_site::CallMetadata;
use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::record::Record;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Default plain template
pub const DEFAULT_TEMPLATE: &str = "[%time][%level][%file %line]: %msg";

static TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"%(msg|level|line|l|time|t|file|f|column|c|pid|hostname)\b")
        .expect("token pattern is valid")
});

/// User supplied rendering function
pub type Formatter = Arc<dyn Fn(LogLevel, &Record, &CallMetadata) -> String + Send + Sync>;

/// Output format for log lines
#[derive(Clone)]
pub enum OutputFormat {
    /// Token-substituted text
    ///
    /// Example: `[2025-01-08 10:30:45][info][src/main.rs 12]: Request processed`
    Plain { template: String },

    /// Single-line JSON; record fields are merged over the skeleton
    ///
    /// Example: `{"time":"2025-01-08 10:30:45","level":"info","pid":4242,"msg":"Request processed"}`
    Structured { skeleton: Map<String, Value> },

    Custom(Formatter),
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::plain()
    }
}

impl fmt::Debug for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Plain { template } => {
                f.debug_struct("Plain").field("template", template).finish()
            }
            OutputFormat::Structured { skeleton } => {
                f.debug_struct("Structured").field("skeleton", skeleton).finish()
            }
            OutputFormat::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl OutputFormat {
    /// Plain output with [`DEFAULT_TEMPLATE`]
    pub fn plain() -> Self {
        OutputFormat::Plain {
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }

    pub fn template(template: impl Into<String>) -> Self {
        OutputFormat::Plain {
            template: template.into(),
        }
    }

    /// Structured output with the default skeleton
    pub fn structured() -> Self {
        OutputFormat::Structured {
            skeleton: Self::default_skeleton(),
        }
    }

    /// Structured output with a caller supplied skeleton.
    ///
    /// Fails unless `skeleton` is a JSON object.
    pub fn structured_with(skeleton: Value) -> Result<Self> {
        match skeleton {
            Value::Object(skeleton) => Ok(OutputFormat::Structured { skeleton }),
            other => Err(LoggerError::config(
                "OutputFormat",
                format!("structured skeleton must be a JSON object, got {}", other),
            )),
        }
    }

    pub fn custom<F>(formatter: F) -> Self
    where
        F: Fn(LogLevel, &Record, &CallMetadata) -> String + Send + Sync + 'static,
    {
        OutputFormat::Custom(Arc::new(formatter))
    }

    /// Build a format from its configured name.
    ///
    /// `plain`/`text` take an optional template; `json`/`structured` take an
    /// optional skeleton given as JSON text.
    ///
    /// ```
    /// use dslogger::OutputFormat;
    ///
    /// let format = OutputFormat::from_kind("json", None).unwrap();
    /// assert!(matches!(format, OutputFormat::Structured { .. }));
    /// assert!(OutputFormat::from_kind("xml", None).is_err());
    /// ```
    pub fn from_kind(kind: &str, template: Option<&str>) -> Result<Self> {
        match kind.to_lowercase().as_str() {
            "plain" | "text" => Ok(template.map_or_else(Self::plain, |t| Self::template(t))),
            "json" | "structured" => match template {
                Some(skeleton) => Self::structured_with(serde_json::from_str(skeleton)?),
                None => Ok(Self::structured()),
            },
            _ => Err(LoggerError::config(
                "OutputFormat",
                format!("unknown output format '{}'", kind),
            )),
        }
    }

    /// `time`, `fileline`, `level`, `pid` and `hostname`
    pub fn default_skeleton() -> Map<String, Value> {
        let mut skeleton = Map::new();
        for (key, token) in [
            ("time", "%time"),
            ("fileline", "%file %line"),
            ("level", "%level"),
            ("pid", "%pid"),
            ("hostname", "%hostname"),
        ] {
            skeleton.insert(key.to_string(), Value::String(token.to_string()));
        }
        skeleton
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, OutputFormat::Structured { .. })
    }

    /// Render one record into its final line (no trailing newline)
    pub fn render(&self, level: LogLevel, record: &Record, meta: &CallMetadata) -> String {
        match self {
            OutputFormat::Plain { template } => render_plain(template, level, record, meta),
            OutputFormat::Structured { skeleton } => {
                render_structured(skeleton, level, record, meta)
            }
            OutputFormat::Custom(formatter) => formatter(level, record, meta),
        }
    }
}

fn render_plain(template: &str, level: LogLevel, record: &Record, meta: &CallMetadata) -> String {
    let message = record.message();
    if !TOKEN.captures_iter(template).any(|caps| &caps[1] == "msg") {
        // Templates without `%msg` act as a prefix.
        let mut line = substitute(template, level, meta, None);
        line.push_str(&message);
        return line;
    }
    substitute(template, level, meta, Some(&message))
}

/// Replace tokens in a single left-to-right pass.
///
/// Replacement text is never scanned again, so a message containing `%level`
/// comes out verbatim. Only the first `%msg` is replaced.
fn substitute(template: &str, level: LogLevel, meta: &CallMetadata, message: Option<&str>) -> String {
    let mut message = message;
    TOKEN
        .replace_all(template, |caps: &Captures<'_>| match &caps[1] {
            "msg" => match message.take() {
                Some(message) => message.to_string(),
                None => caps[0].to_string(),
            },
            "level" | "l" => level.to_string(),
            "time" | "t" => meta.timestamp.clone(),
            "file" | "f" => meta.file.clone(),
            "line" => meta.line.to_string(),
            "column" | "c" => meta.column.to_string(),
            "pid" => meta.pid.to_string(),
            "hostname" => meta.hostname.clone(),
            _ => caps[0].to_string(),
        })
        .into_owned()
}

fn skeleton_value(value: &Value, level: LogLevel, meta: &CallMetadata) -> Value {
    match value {
        Value::String(template) => match template.as_str() {
            "%pid" => Value::from(meta.pid),
            "%line" => Value::from(meta.line),
            "%column" | "%c" => Value::from(meta.column),
            _ => Value::String(substitute(template, level, meta, None)),
        },
        other => other.clone(),
    }
}

fn render_structured(
    skeleton: &Map<String, Value>,
    level: LogLevel,
    record: &Record,
    meta: &CallMetadata,
) -> String {
    let mut object: Map<String, Value> = skeleton
        .iter()
        .map(|(key, value)| (key.clone(), skeleton_value(value, level, meta)))
        .collect();
    for (key, value) in record.structured_fields() {
        object.insert(key, value);
    }
    Value::Object(object).to_string()
}
