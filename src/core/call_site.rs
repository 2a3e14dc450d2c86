//! Call-site and host metadata captured for each emitted line

use super::timestamp::TimestampFormat;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::panic::Location;
use std::path::Path;

/// Source location of a logging call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallSite {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl CallSite {
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }

    /// Location of the nearest caller outside `#[track_caller]` frames.
    ///
    /// Every public emission method of the logger is `#[track_caller]`, so
    /// this resolves to the user's call and never to logger internals.
    #[track_caller]
    pub fn caller() -> Self {
        Self::from_location(Location::caller())
    }

    pub fn from_location(location: &Location<'_>) -> Self {
        Self::new(relative_to_cwd(location.file()), location.line(), location.column())
    }
}

/// Rewrite absolute paths under the working directory as relative ones
fn relative_to_cwd(file: &str) -> String {
    let path = Path::new(file);
    if !path.is_absolute() {
        return file.to_string();
    }
    std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(&cwd).ok().map(|p| p.display().to_string()))
        .unwrap_or_else(|| file.to_string())
}

/// Process-wide identity copied into every line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostInfo {
    pub pid: u32,
    pub hostname: String,
}

static HOST_INFO: Lazy<HostInfo> = Lazy::new(|| HostInfo {
    pid: std::process::id(),
    hostname: lookup_hostname(),
});

impl HostInfo {
    /// Resolved once per process
    pub fn current() -> &'static HostInfo {
        &HOST_INFO
    }
}

fn lookup_hostname() -> String {
    gethostname::gethostname().to_string_lossy().into_owned()
}

/// Metadata for one emission; never outlives the formatting pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallMetadata {
    pub timestamp: String,
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub pid: u32,
    pub hostname: String,
}

impl CallMetadata {
    pub fn capture(site: CallSite, timestamp_format: &TimestampFormat) -> Self {
        let host = HostInfo::current();
        Self {
            timestamp: timestamp_format.now(),
            file: site.file,
            line: site.line,
            column: site.column,
            pid: host.pid,
            hostname: host.hostname.clone(),
        }
    }
}
