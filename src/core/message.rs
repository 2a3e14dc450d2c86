//! Message and argument types accepted by the logger
//!
//! A log call takes one primary [`Message`] plus any number of extra
//! [`Arg`]s. The message is a tagged variant resolved once, so every later
//! stage only sees one of five shapes:
//! - `Text`: a plain string
//! - `Error`: a flattened error value ([`ErrorInfo`])
//! - `WrappedError`: structured fields carrying an error under `err`
//! - `Fields`: a JSON object of structured fields
//! - `Sequence`: a JSON array

use serde_json::{Map, Value};
use std::error::Error as StdError;

/// Render a value as one line of text, never truncated or wrapped
pub fn inspect(value: &Value) -> String {
    value.to_string()
}

/// Errors that know how to attach extra fields to their log record
///
/// # Example
///
/// ```
/// use dslogger::{ErrorInfo, LoggableError};
/// use serde_json::{json, Map, Value};
///
/// #[derive(Debug)]
/// struct NotFound;
///
/// impl std::fmt::Display for NotFound {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         f.write_str("not found")
///     }
/// }
///
/// impl std::error::Error for NotFound {}
///
/// impl LoggableError for NotFound {
///     fn error_fields(&self) -> Map<String, Value> {
///         let mut fields = Map::new();
///         fields.insert("code".into(), json!("ENOENT"));
///         fields
///     }
/// }
///
/// let info = ErrorInfo::from(&NotFound);
/// assert_eq!(info.extra["code"], "ENOENT");
/// ```
pub trait LoggableError: StdError {
    /// Name reported in the `name` field
    fn error_name(&self) -> String {
        short_type_name(std::any::type_name::<Self>())
    }

    /// Caller-attached properties such as error codes
    fn error_fields(&self) -> Map<String, Value> {
        Map::new()
    }
}

fn short_type_name(full: &str) -> String {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}

/// Flattened view of an error value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorInfo {
    pub message: Option<String>,
    pub name: Option<String>,
    pub stack: Option<String>,
    pub extra: Map<String, Value>,
}

impl ErrorInfo {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Flatten any standard error.
    ///
    /// `name` is the short static type name and `stack` renders the `source()`
    /// chain. Trait objects have no concrete type to report, so a
    /// `&dyn Error` is named `Error`. Implement [`LoggableError`] and use
    /// `ErrorInfo::from(&e)` to report a specific name and extra fields.
    pub fn from_error<E: StdError + ?Sized>(error: &E) -> Self {
        Self::build(error, short_type_name(std::any::type_name::<E>()), Map::new())
    }

    fn build<E: StdError + ?Sized>(error: &E, name: String, extra: Map<String, Value>) -> Self {
        let message = error.to_string();
        let mut stack = format!("{}: {}", name, message);
        let mut source = error.source();
        while let Some(cause) = source {
            stack.push_str("\n    caused by: ");
            stack.push_str(&cause.to_string());
            source = cause.source();
        }
        Self {
            message: Some(message),
            name: Some(name),
            stack: Some(stack),
            extra,
        }
    }

    /// Recognize an error-like JSON object.
    ///
    /// Any object with a string `message`, `name` or `stack` qualifies.
    /// Missing ones stay absent, and non-string values under those keys are
    /// kept as extra fields.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let text = |key: &str| object.get(key).and_then(Value::as_str).map(str::to_string);
        let message = text("message");
        let name = text("name");
        let stack = text("stack");
        if message.is_none() && name.is_none() && stack.is_none() {
            return None;
        }
        let extra = object
            .iter()
            .filter(|(key, value)| {
                !(matches!(key.as_str(), "message" | "name" | "stack") && value.is_string())
            })
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        Some(Self {
            message,
            name,
            stack,
            extra,
        })
    }

    /// JSON object form; absent fields are omitted
    pub fn to_value(&self) -> Value {
        let mut object = self.extra.clone();
        if let Some(message) = &self.message {
            object.insert("message".to_string(), Value::String(message.clone()));
        }
        if let Some(name) = &self.name {
            object.insert("name".to_string(), Value::String(name.clone()));
        }
        if let Some(stack) = &self.stack {
            object.insert("stack".to_string(), Value::String(stack.clone()));
        }
        Value::Object(object)
    }
}

impl<E: LoggableError> From<&E> for ErrorInfo {
    fn from(error: &E) -> Self {
        Self::build(error, error.error_name(), error.error_fields())
    }
}

/// Primary message of a log call
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Text(String),
    Error(ErrorInfo),
    WrappedError {
        fields: Map<String, Value>,
        error: ErrorInfo,
    },
    Fields(Map<String, Value>),
    Sequence(Vec<Value>),
}

impl Message {
    /// Message for a plain standard error, including `&dyn Error`.
    ///
    /// This never sees [`LoggableError`] fields; pass `&e` directly (or
    /// `ErrorInfo::from(&e)`) for errors that implement it.
    pub fn error<E: StdError + ?Sized>(error: &E) -> Self {
        Message::Error(ErrorInfo::from_error(error))
    }

    /// Structured fields carrying an error under `err`
    pub fn with_error(fields: Map<String, Value>, error: ErrorInfo) -> Self {
        Message::WrappedError { fields, error }
    }
}

impl<E: LoggableError> From<&E> for Message {
    fn from(error: &E) -> Self {
        Message::Error(ErrorInfo::from(error))
    }
}

impl From<&str> for Message {
    fn from(s: &str) -> Self {
        Message::Text(s.to_string())
    }
}

impl From<String> for Message {
    fn from(s: String) -> Self {
        Message::Text(s)
    }
}

impl From<&String> for Message {
    fn from(s: &String) -> Self {
        Message::Text(s.clone())
    }
}

impl From<ErrorInfo> for Message {
    fn from(info: ErrorInfo) -> Self {
        Message::Error(info)
    }
}

impl From<Map<String, Value>> for Message {
    fn from(fields: Map<String, Value>) -> Self {
        Message::Fields(fields)
    }
}

impl From<Vec<Value>> for Message {
    fn from(items: Vec<Value>) -> Self {
        Message::Sequence(items)
    }
}

impl From<Value> for Message {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Message::Text(s),
            Value::Object(fields) => Message::Fields(fields),
            Value::Array(items) => Message::Sequence(items),
            other => Message::Text(inspect(&other)),
        }
    }
}

/// Extra positional argument of a log call
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Text(String),
    Value(Value),
}

impl Arg {
    /// Strings pass through verbatim, everything else is inspected
    pub fn render(&self) -> String {
        match self {
            Arg::Text(s) => s.clone(),
            Arg::Value(value) => inspect(value),
        }
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Text(s.to_string())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Text(s)
    }
}

impl From<&String> for Arg {
    fn from(s: &String) -> Self {
        Arg::Text(s.clone())
    }
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Arg::Text(s),
            other => Arg::Value(other),
        }
    }
}

impl From<ErrorInfo> for Arg {
    fn from(info: ErrorInfo) -> Self {
        Arg::Value(info.to_value())
    }
}

macro_rules! arg_from_scalar {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Arg {
                fn from(value: $ty) -> Self {
                    Arg::Value(Value::from(value))
                }
            }
        )*
    };
}

arg_from_scalar!(bool, i32, i64, u32, u64, usize, f64);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fmt;

    #[derive(Debug)]
    struct Inner;

    impl fmt::Display for Inner {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("connection reset")
        }
    }

    impl StdError for Inner {}

    #[derive(Debug)]
    struct FetchFailed(Inner);

    impl fmt::Display for FetchFailed {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("fetch failed")
        }
    }

    impl StdError for FetchFailed {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    impl LoggableError for FetchFailed {
        fn error_fields(&self) -> Map<String, Value> {
            let mut fields = Map::new();
            fields.insert("code".to_string(), json!("ERR_FETCH"));
            fields
        }
    }

    #[test]
    fn test_from_error_renders_source_chain() {
        let info = ErrorInfo::from_error(&FetchFailed(Inner));
        assert_eq!(info.message.as_deref(), Some("fetch failed"));
        assert_eq!(info.name.as_deref(), Some("FetchFailed"));
        let stack = info.stack.unwrap();
        assert!(stack.starts_with("FetchFailed: fetch failed"));
        assert!(stack.contains("caused by: connection reset"));
        assert!(info.extra.is_empty());
    }

    #[test]
    fn test_loggable_error_fields() {
        let info = ErrorInfo::from(&FetchFailed(Inner));
        assert_eq!(info.extra["code"], "ERR_FETCH");
        assert_eq!(info.to_value()["code"], "ERR_FETCH");
    }

    #[test]
    fn test_io_error_name() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let info = ErrorInfo::from_error(&err);
        assert_eq!(info.name.as_deref(), Some("Error"));
        assert_eq!(info.message.as_deref(), Some("missing"));
    }

    #[test]
    fn test_to_value_omits_absent_fields() {
        let value = ErrorInfo::new("boom").to_value();
        assert_eq!(value, json!({"message": "boom"}));
    }

    #[test]
    fn test_from_value_detects_error_like_objects() {
        let info = ErrorInfo::from_value(&json!({"message": "boom", "name": "Error", "code": 7}))
            .expect("error-like");
        assert_eq!(info.message.as_deref(), Some("boom"));
        assert_eq!(info.extra["code"], 7);

        let info = ErrorInfo::from_value(&json!({"message": "only a message"})).expect("error-like");
        assert_eq!(info.message.as_deref(), Some("only a message"));
        assert!(info.name.is_none());
        assert!(info.stack.is_none());

        let info = ErrorInfo::from_value(&json!({"message": 3, "name": "Error"})).expect("error-like");
        assert!(info.message.is_none());
        assert_eq!(info.extra["message"], 3);

        assert!(ErrorInfo::from_value(&json!({"code": 7})).is_none());
        assert!(ErrorInfo::from_value(&json!({"message": 3})).is_none());
        assert!(ErrorInfo::from_value(&json!("boom")).is_none());
    }

    #[test]
    fn test_loggable_error_reaches_message_with_fields() {
        let err = FetchFailed(Inner);
        match Message::from(&err) {
            Message::Error(info) => {
                assert_eq!(info.name.as_deref(), Some("FetchFailed"));
                assert_eq!(info.extra["code"], "ERR_FETCH");
            }
            other => panic!("expected an error message, got {:?}", other),
        }
    }

    #[test]
    fn test_trait_object_is_named_error() {
        let boxed: Box<dyn StdError> = Box::new(FetchFailed(Inner));
        let info = ErrorInfo::from_error(boxed.as_ref());
        assert_eq!(info.name.as_deref(), Some("Error"));
        assert_eq!(info.message.as_deref(), Some("fetch failed"));
        assert!(info.stack.unwrap().contains("caused by: connection reset"));
    }

    #[test]
    fn test_with_error_keeps_typed_error() {
        let message = Message::with_error(Map::new(), ErrorInfo::new("disk full"));
        assert_eq!(
            message,
            Message::WrappedError {
                fields: Map::new(),
                error: ErrorInfo::new("disk full"),
            }
        );
    }

    #[test]
    fn test_message_from_value() {
        assert_eq!(Message::from(json!("hi")), Message::Text("hi".to_string()));
        assert_eq!(Message::from(json!(42)), Message::Text("42".to_string()));
        assert!(matches!(Message::from(json!({"a": 1})), Message::Fields(_)));
        assert!(matches!(Message::from(json!([1, 2])), Message::Sequence(_)));
    }

    #[test]
    fn test_arg_render() {
        assert_eq!(Arg::from("lala la").render(), "lala la");
        assert_eq!(Arg::from(json!("quoted?")).render(), "quoted?");
        assert_eq!(Arg::from(3_i32).render(), "3");
        assert_eq!(Arg::from(json!({"k": [1, 2]})).render(), r#"{"k":[1,2]}"#);
    }

    #[test]
    fn test_inspect_never_wraps() {
        let long: Vec<Value> = (0..500).map(Value::from).collect();
        let text = inspect(&Value::Array(long));
        assert!(!text.contains('\n'));
        assert!(text.ends_with("499]"));
    }
}
