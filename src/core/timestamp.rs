//! Timestamp formatting utilities
//!
//! Log lines carry a fixed `YYYY-MM-DD HH:mm:ss` layout in local time, not
//! ISO 8601. Every field is zero padded and the field order never changes.

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp layout used for the `%time` token and the `time` field
///
/// # Examples
///
/// ```
/// use dslogger::TimestampFormat;
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc.with_ymd_and_hms(2024, 1, 1, 1, 2, 3).unwrap();
/// assert_eq!(TimestampFormat::Seconds.format(&at), "2024-01-01 01:02:03");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// `2024-01-08 10:30:45`
    #[default]
    Seconds,

    /// `2024-01-08 10:30:45.123`
    Millis,

    /// Custom strftime format
    ///
    /// ```
    /// use dslogger::TimestampFormat;
    ///
    /// let format = TimestampFormat::Custom("%d/%b/%Y:%H:%M:%S".to_string());
    /// ```
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format<Tz>(&self, datetime: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        match self {
            TimestampFormat::Seconds => datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
            TimestampFormat::Millis => datetime.format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }

    /// Format the current local wall-clock time
    #[must_use]
    pub fn now(&self) -> String {
        self.format(&Local::now())
    }
}
