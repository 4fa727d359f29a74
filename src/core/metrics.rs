//! Logger metrics for observability
//!
//! Counters describing what happened to the events handed to a logger:
//! how many reached the handlers cleanly, how many hit a failing handler,
//! how many were discarded while disabled, and how many went through the
//! async queue.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use dispatch_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_delivered();
/// metrics.record_failed();
///
/// assert_eq!(metrics.delivered(), 1);
/// assert_eq!(metrics.failed(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Events every handler accepted without error
    delivered: AtomicU64,

    /// Events where at least one handler failed
    failed: AtomicU64,

    /// Events dropped because the logger was disabled
    discarded: AtomicU64,

    /// Events pushed onto the async queue
    queued: AtomicU64,

    /// Queued events processed on the caller's thread during a mode exit
    drained: AtomicU64,

    /// Handler calls that panicked
    handler_panics: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            delivered: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            discarded: AtomicU64::new(0),
            queued: AtomicU64::new(0),
            drained: AtomicU64::new(0),
            handler_panics: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn discarded(&self) -> u64 {
        self.discarded.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn queued(&self) -> u64 {
        self.queued.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn drained(&self) -> u64 {
        self.drained.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn handler_panics(&self) -> u64 {
        self.handler_panics.load(Ordering::Relaxed)
    }

    /// Events that reached the dispatch stage, whatever the outcome
    pub fn processed(&self) -> u64 {
        self.delivered() + self.failed()
    }

    #[inline]
    pub fn record_delivered(&self) -> u64 {
        self.delivered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_failed(&self) -> u64 {
        self.failed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_discarded(&self) -> u64 {
        self.discarded.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_queued(&self) -> u64 {
        self.queued.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_drained(&self, count: u64) -> u64 {
        self.drained.fetch_add(count, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_handler_panics(&self, count: u64) -> u64 {
        self.handler_panics.fetch_add(count, Ordering::Relaxed)
    }

    /// Share of processed events that hit a failing handler (0.0 - 100.0)
    pub fn failure_rate(&self) -> f64 {
        let failed = self.failed() as f64;
        let total = self.processed() as f64;
        if total == 0.0 {
            0.0
        } else {
            (failed / total) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.delivered.store(0, Ordering::Relaxed);
        self.failed.store(0, Ordering::Relaxed);
        self.discarded.store(0, Ordering::Relaxed);
        self.queued.store(0, Ordering::Relaxed);
        self.drained.store(0, Ordering::Relaxed);
        self.handler_panics.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            delivered: AtomicU64::new(self.delivered()),
            failed: AtomicU64::new(self.failed()),
            discarded: AtomicU64::new(self.discarded()),
            queued: AtomicU64::new(self.queued()),
            drained: AtomicU64::new(self.drained()),
            handler_panics: AtomicU64::new(self.handler_panics()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.delivered(), 0);
        assert_eq!(metrics.failed(), 0);
        assert_eq!(metrics.discarded(), 0);
        assert_eq!(metrics.queued(), 0);
        assert_eq!(metrics.drained(), 0);
        assert_eq!(metrics.handler_panics(), 0);
    }

    #[test]
    fn test_record_returns_previous() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.record_delivered(), 0);
        assert_eq!(metrics.record_delivered(), 1);
        assert_eq!(metrics.delivered(), 2);

        metrics.record_drained(5);
        assert_eq!(metrics.record_drained(2), 5);
        assert_eq!(metrics.drained(), 7);
    }

    #[test]
    fn test_failure_rate() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.failure_rate(), 0.0);

        for _ in 0..90 {
            metrics.record_delivered();
        }
        for _ in 0..10 {
            metrics.record_failed();
        }

        let rate = metrics.failure_rate();
        assert!((9.9..=10.1).contains(&rate), "Failure rate was {}", rate);
    }

    #[test]
    fn test_reset_and_snapshot() {
        let metrics = LoggerMetrics::new();
        metrics.record_queued();
        metrics.record_discarded();

        let snapshot = metrics.clone();
        metrics.reset();

        assert_eq!(metrics.queued(), 0);
        assert_eq!(snapshot.queued(), 1);
        assert_eq!(snapshot.discarded(), 1);
    }
}
