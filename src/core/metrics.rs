//! Channel metrics for observability
//!
//! Counters describing what a channel did with the messages it was handed:
//! how many were delivered, suppressed by the masks, truncated, or hit a
//! failing sink.

use std::sync::atomic::{AtomicU64, Ordering};

/// Per-channel counters
///
/// # Example
///
/// ```
/// use rust_spew_system::ChannelMetrics;
///
/// let metrics = ChannelMetrics::new();
/// metrics.record_delivered();
/// metrics.record_suppressed();
///
/// assert_eq!(metrics.delivered(), 1);
/// assert_eq!(metrics.suppressed(), 1);
/// ```
#[derive(Debug)]
pub struct ChannelMetrics {
    /// Messages that passed the masks and were accepted by at least one sink
    delivered: AtomicU64,

    /// Messages rejected by the category filter or level selection
    suppressed: AtomicU64,

    /// Messages cut to the channel's maximum length
    truncated: AtomicU64,

    /// Individual sink writes that failed
    sink_failures: AtomicU64,
}

impl ChannelMetrics {
    pub const fn new() -> Self {
        Self {
            delivered: AtomicU64::new(0),
            suppressed: AtomicU64::new(0),
            truncated: AtomicU64::new(0),
            sink_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn suppressed(&self) -> u64 {
        self.suppressed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn truncated(&self) -> u64 {
        self.truncated.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sink_failures(&self) -> u64 {
        self.sink_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_delivered(&self) -> u64 {
        self.delivered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_suppressed(&self) -> u64 {
        self.suppressed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_truncated(&self) -> u64 {
        self.truncated.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_sink_failures(&self, count: usize) -> u64 {
        self.sink_failures.fetch_add(count as u64, Ordering::Relaxed)
    }

    /// Share of messages suppressed, as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if the channel has seen no messages.
    pub fn suppression_rate(&self) -> f64 {
        let suppressed = self.suppressed() as f64;
        let total = self.delivered() as f64 + suppressed;
        if total == 0.0 {
            0.0
        } else {
            (suppressed / total) * 100.0
        }
    }

    pub fn reset(&self) {
        self.delivered.store(0, Ordering::Relaxed);
        self.suppressed.store(0, Ordering::Relaxed);
        self.truncated.store(0, Ordering::Relaxed);
        self.sink_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for ChannelMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ChannelMetrics {
    /// Snapshot of the current values
    fn clone(&self) -> Self {
        Self {
            delivered: AtomicU64::new(self.delivered()),
            suppressed: AtomicU64::new(self.suppressed()),
            truncated: AtomicU64::new(self.truncated()),
            sink_failures: AtomicU64::new(self.sink_failures()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = ChannelMetrics::new();
        assert_eq!(metrics.delivered(), 0);
        assert_eq!(metrics.suppressed(), 0);
        assert_eq!(metrics.truncated(), 0);
        assert_eq!(metrics.sink_failures(), 0);
    }

    #[test]
    fn test_record_returns_previous() {
        let metrics = ChannelMetrics::new();
        assert_eq!(metrics.record_delivered(), 0);
        assert_eq!(metrics.record_delivered(), 1);
        assert_eq!(metrics.record_sink_failures(3), 0);
        assert_eq!(metrics.sink_failures(), 3);
    }

    #[test]
    fn test_suppression_rate() {
        let metrics = ChannelMetrics::new();
        assert_eq!(metrics.suppression_rate(), 0.0);

        for _ in 0..75 {
            metrics.record_delivered();
        }
        for _ in 0..25 {
            metrics.record_suppressed();
        }
        let rate = metrics.suppression_rate();
        assert!((24.9..=25.1).contains(&rate), "Suppression rate was {}", rate);
    }

    #[test]
    fn test_reset_and_snapshot() {
        let metrics = ChannelMetrics::new();
        metrics.record_truncated();
        metrics.record_suppressed();

        let snapshot = metrics.clone();
        metrics.reset();

        assert_eq!(metrics.truncated(), 0);
        assert_eq!(snapshot.truncated(), 1);
        assert_eq!(snapshot.suppressed(), 1);
    }
}
