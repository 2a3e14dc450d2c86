//! Logger metrics for observability
//!
//! Counters for lines written, lines filtered out by the threshold and
//! emissions that failed on a sink.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use dslogger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_filtered();
/// metrics.record_logged();
///
/// assert_eq!(metrics.filtered_count(), 1);
/// assert_eq!(metrics.total_logged(), 1);
/// ```
#[derive(Debug, Default)]
pub struct LoggerMetrics {
    /// Lines delivered to every admitting sink
    total_logged: AtomicU64,

    /// Calls rejected by the threshold, including unknown levels
    filtered_count: AtomicU64,

    /// Emissions aborted by a sink error
    failed_writes: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            total_logged: AtomicU64::new(0),
            filtered_count: AtomicU64::new(0),
            failed_writes: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn total_logged(&self) -> u64 {
        self.total_logged.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered_count(&self) -> u64 {
        self.filtered_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed_writes(&self) -> u64 {
        self.failed_writes.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_logged(&self) -> u64 {
        self.total_logged.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered_count.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_failed_write(&self) -> u64 {
        self.failed_writes.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of calls that were filtered, as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if no calls have been made.
    pub fn filter_rate(&self) -> f64 {
        let filtered = self.filtered_count() as f64;
        let total = filtered + self.total_logged() as f64 + self.failed_writes() as f64;
        if total == 0.0 {
            0.0
        } else {
            (filtered / total) * 100.0
        }
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.total_logged.store(0, Ordering::Relaxed);
        self.filtered_count.store(0, Ordering::Relaxed);
        self.failed_writes.store(0, Ordering::Relaxed);
    }
}
