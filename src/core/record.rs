//! Normalized representation of one log call

use super::message::{inspect, Arg, ErrorInfo, Message};
use serde_json::{Map, Value};

/// A log call after its message and arguments have been resolved
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    /// Message text used by plain output
    pub text: Option<String>,
    /// Fields used by structured output
    pub fields: Option<Map<String, Value>>,
    pub error: Option<ErrorInfo>,
    /// Extra arguments joined by single spaces
    pub extra_tail: String,
}

impl Record {
    pub fn normalize(message: Message, args: &[Arg]) -> Self {
        let extra_tail = args.iter().map(Arg::render).collect::<Vec<_>>().join(" ");

        match message {
            Message::Text(text) => Self {
                text: Some(text),
                fields: None,
                error: None,
                extra_tail,
            },
            Message::Error(info) => Self::with_error(Map::new(), info, extra_tail),
            Message::WrappedError { fields, error } => Self::with_error(fields, error, extra_tail),
            Message::Fields(fields) => {
                let nested = fields.get("err").and_then(ErrorInfo::from_value);
                match nested {
                    Some(info) => Self::with_error(fields, info, extra_tail),
                    None => Self {
                        text: Some(inspect(&Value::Object(fields.clone()))),
                        fields: Some(fields),
                        error: None,
                        extra_tail,
                    },
                }
            }
            Message::Sequence(items) => {
                let text = inspect(&Value::Array(items));
                let mut fields = Map::new();
                fields.insert("msg".to_string(), Value::String(text.clone()));
                Self {
                    text: Some(text),
                    fields: Some(fields),
                    error: None,
                    extra_tail,
                }
            }
        }
    }

    /// Error message becomes `msg`; the flattened error sits under `err`
    fn with_error(mut fields: Map<String, Value>, info: ErrorInfo, extra_tail: String) -> Self {
        if let Some(message) = &info.message {
            fields.insert("msg".to_string(), Value::String(message.clone()));
        }
        fields.insert("err".to_string(), info.to_value());
        Self {
            text: info.message.clone(),
            fields: Some(fields),
            error: Some(info),
            extra_tail,
        }
    }

    /// Plain message text with the extra tail appended
    pub fn message(&self) -> String {
        let text = self.text.as_deref().unwrap_or("");
        append_tail(text, &self.extra_tail)
    }

    /// Structured fields with the extra tail merged into `msg`
    pub fn structured_fields(&self) -> Map<String, Value> {
        let mut fields = match &self.fields {
            Some(fields) => fields.clone(),
            None => {
                let mut fields = Map::new();
                if let Some(text) = &self.text {
                    fields.insert("msg".to_string(), Value::String(text.clone()));
                }
                fields
            }
        };

        if !self.extra_tail.is_empty() {
            let msg = match fields.get("msg") {
                Some(Value::String(msg)) => append_tail(msg, &self.extra_tail),
                Some(other) => append_tail(&inspect(other), &self.extra_tail),
                None => self.extra_tail.clone(),
            };
            fields.insert("msg".to_string(), Value::String(msg));
        }
        fields
    }
}

fn append_tail(text: &str, tail: &str) -> String {
    match (text.is_empty(), tail.is_empty()) {
        (_, true) => text.to_string(),
        (true, false) => tail.to_string(),
        (false, false) => format!("{} {}", text, tail),
    }
}
