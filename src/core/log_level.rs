//! Log level definitions and threshold filtering

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a log call, ordered from most verbose to most severe.
///
/// A call is admitted by a threshold when its level ranks at or above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    #[default]
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl LogLevel {
    /// All levels in ascending order of severity
    pub const ALL: [LogLevel; 4] = [LogLevel::Debug, LogLevel::Info, LogLevel::Warn, LogLevel::Error];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// Position of this level in the fixed order
    #[inline]
    pub fn rank(&self) -> usize {
        *self as usize
    }

    /// Whether a call at this level passes `threshold`
    #[inline]
    pub fn admits(self, threshold: LogLevel) -> bool {
        self.rank() >= threshold.rank()
    }

    /// String-level variant of [`LogLevel::admits`].
    ///
    /// A level name outside the fixed order is never admitted.
    pub fn admitted(level: &str, threshold: LogLevel) -> bool {
        level
            .parse::<LogLevel>()
            .map(|level| level.admits(threshold))
            .unwrap_or(false)
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Debug => Blue,
            LogLevel::Info => Green,
            LogLevel::Warn => Yellow,
            LogLevel::Error => Red,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}
