//! Logger metrics for observability
//!
//! Counts records that reached the handler successfully and records the
//! handler rejected with an error.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use flarelog::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_dropped();
/// metrics.record_logged();
///
/// assert_eq!(metrics.dropped_count(), 1);
/// assert_eq!(metrics.total_logged(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Number of records the handler failed to write
    dropped_count: AtomicU64,

    /// Number of records written by the handler
    total_logged: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            dropped_count: AtomicU64::new(0),
            total_logged: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn dropped_count(&self) -> u64 {
        self.dropped_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn total_logged(&self) -> u64 {
        self.total_logged.load(Ordering::Relaxed)
    }

    /// Record a dropped record, returning the previous count
    #[inline]
    pub fn record_dropped(&self) -> u64 {
        self.dropped_count.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_logged(&self) {
        self.total_logged.fetch_add(1, Ordering::Relaxed);
    }

    /// Percentage of handled records that were dropped (0.0 to 100.0)
    pub fn drop_rate(&self) -> f64 {
        let dropped = self.dropped_count() as f64;
        let total = dropped + self.total_logged() as f64;
        if total == 0.0 {
            0.0
        } else {
            dropped / total * 100.0
        }
    }

    pub fn reset(&self) {
        self.dropped_count.store(0, Ordering::Relaxed);
        self.total_logged.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}
