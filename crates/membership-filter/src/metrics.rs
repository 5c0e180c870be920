//! Metrics hooks for filter operations
//!
//! ## Usage
//!
//! ```
//! use membership_filter::{Metrics, SharedFilter};
//! use std::sync::Arc;
//!
//! let metrics = Arc::new(Metrics::new());
//! let filter = SharedFilter::new(1000, 0.01)
//!     .unwrap()
//!     .with_metrics(metrics.clone());
//!
//! filter.add("apple");
//! assert!(filter.check("apple"));
//! assert_eq!(metrics.snapshot().checks_positive, 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Thread-safe counters for filter activity
#[derive(Default)]
pub struct Metrics {
    /// Total filters created
    pub filters_created: AtomicU64,
    /// Total `add` calls across all filters
    pub items_added: AtomicU64,
    /// Total `check` calls
    pub checks_performed: AtomicU64,
    /// `check` calls that returned true (true or false positives)
    pub checks_positive: AtomicU64,
    /// Total filter merges
    pub filters_merged: AtomicU64,
    /// Bytes held by filter bit arrays
    pub bytes_allocated: AtomicU64,
    /// Largest hash count (k) of any filter created
    pub max_hash_count: AtomicU64,
    /// Cumulative check time in nanoseconds
    pub check_time_ns: AtomicU64,
    /// Cumulative add time in nanoseconds
    pub add_time_ns: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record filter creation with its size in bits and hash count
    pub fn record_filter_created(&self, size_bits: usize, hash_count: usize) {
        self.filters_created.fetch_add(1, Ordering::Relaxed);
        self.bytes_allocated
            .fetch_add(size_bits.div_ceil(8) as u64, Ordering::Relaxed);
        self.max_hash_count
            .fetch_max(hash_count as u64, Ordering::Relaxed);
    }

    pub fn record_add(&self, duration: Duration) {
        self.items_added.fetch_add(1, Ordering::Relaxed);
        self.add_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
    }

    /// Record a check and whether it reported the item present
    pub fn record_check(&self, duration: Duration, found: bool) {
        self.checks_performed.fetch_add(1, Ordering::Relaxed);
        self.check_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
        if found {
            self.checks_positive.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_merge(&self) {
        self.filters_merged.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            filters_created: self.filters_created.load(Ordering::Relaxed),
            items_added: self.items_added.load(Ordering::Relaxed),
            checks_performed: self.checks_performed.load(Ordering::Relaxed),
            checks_positive: self.checks_positive.load(Ordering::Relaxed),
            filters_merged: self.filters_merged.load(Ordering::Relaxed),
            bytes_allocated: self.bytes_allocated.load(Ordering::Relaxed),
            max_hash_count: self.max_hash_count.load(Ordering::Relaxed),
            avg_check_ns: average(&self.check_time_ns, &self.checks_performed),
            avg_add_ns: average(&self.add_time_ns, &self.items_added),
        }
    }

    /// Ratio of positive checks to all checks
    ///
    /// Includes true positives, so this is an upper bound on the false
    /// positive rate only when checks are made for absent items.
    pub fn observed_positive_rate(&self) -> f64 {
        let total = self.checks_performed.load(Ordering::Relaxed);
        let positive = self.checks_positive.load(Ordering::Relaxed);
        if total > 0 {
            positive as f64 / total as f64
        } else {
            0.0
        }
    }

    /// Reset all counters
    pub fn reset(&self) {
        for counter in [
            &self.filters_created,
            &self.items_added,
            &self.checks_performed,
            &self.checks_positive,
            &self.filters_merged,
            &self.bytes_allocated,
            &self.max_hash_count,
            &self.check_time_ns,
            &self.add_time_ns,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

fn average(total: &AtomicU64, count: &AtomicU64) -> u64 {
    let total = total.load(Ordering::Relaxed);
    let count = count.load(Ordering::Relaxed);
    if count > 0 {
        total / count
    } else {
        0
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MetricsSnapshot {
    pub filters_created: u64,
    pub items_added: u64,
    pub checks_performed: u64,
    pub checks_positive: u64,
    pub filters_merged: u64,
    pub bytes_allocated: u64,
    pub max_hash_count: u64,
    pub avg_check_ns: u64,
    pub avg_add_ns: u64,
}

/// Sink for filter metrics
///
/// Implement this to forward counts to an external metrics system.
pub trait MetricsRecorder: Send + Sync {
    fn record_filter_created(&self, size_bits: usize, hash_count: usize);
    fn record_add(&self, duration: Duration);
    fn record_check(&self, duration: Duration, found: bool);
    fn record_merge(&self);
}

/// Recorder that discards everything
#[derive(Default)]
pub struct NoOpMetrics;

impl MetricsRecorder for NoOpMetrics {
    fn record_filter_created(&self, _: usize, _: usize) {}
    fn record_add(&self, _: Duration) {}
    fn record_check(&self, _: Duration, _: bool) {}
    fn record_merge(&self) {}
}

impl MetricsRecorder for Metrics {
    fn record_filter_created(&self, size_bits: usize, hash_count: usize) {
        Metrics::record_filter_created(self, size_bits, hash_count);
    }

    fn record_add(&self, duration: Duration) {
        Metrics::record_add(self, duration);
    }

    fn record_check(&self, duration: Duration, found: bool) {
        Metrics::record_check(self, duration, found);
    }

    fn record_merge(&self) {
        Metrics::record_merge(self);
    }
}
