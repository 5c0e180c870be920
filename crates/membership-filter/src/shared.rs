//! Concurrent host for a [`MembershipFilter`]
//!
//! Setting k bits is not atomic on its own, so writers take an exclusive
//! lock for the whole `add`. Readers share a read lock and never block one
//! another. Any `add` that happens-before a `check` of the same item makes
//! that `check` return true.

use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;
use tracing::debug;

use crate::domain::MembershipFilter;
use crate::error::FilterError;
use crate::metrics::{MetricsRecorder, NoOpMetrics};

/// Cloneable, lock-guarded handle to one filter
#[derive(Clone)]
pub struct SharedFilter {
    inner: Arc<RwLock<MembershipFilter>>,
    metrics: Arc<dyn MetricsRecorder>,
}

impl SharedFilter {
    /// Create a shared filter; fails like [`MembershipFilter::new`]
    pub fn new(expected_items: usize, false_positive_rate: f64) -> Result<Self, FilterError> {
        Ok(Self::from_filter(MembershipFilter::new(
            expected_items,
            false_positive_rate,
        )?))
    }

    /// Wrap an existing filter
    pub fn from_filter(filter: MembershipFilter) -> Self {
        Self {
            inner: Arc::new(RwLock::new(filter)),
            metrics: Arc::new(NoOpMetrics),
        }
    }

    /// Attach a metrics recorder; the wrapped filter is reported as created
    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsRecorder>) -> Self {
        {
            let filter = self.inner.read();
            metrics.record_filter_created(filter.size_bits(), filter.hash_count());
        }
        self.metrics = metrics;
        self
    }

    /// Add an item under the write lock
    pub fn add(&self, item: &str) {
        let start = Instant::now();
        self.inner.write().add(item);
        self.metrics.record_add(start.elapsed());
    }

    /// Add many items under a single write lock
    pub fn add_all<I, S>(&self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = self.inner.write();
        for item in items {
            let start = Instant::now();
            filter.add(item.as_ref());
            self.metrics.record_add(start.elapsed());
        }
    }

    /// Check an item under the read lock
    pub fn check(&self, item: &str) -> bool {
        let start = Instant::now();
        let found = self.inner.read().check(item);
        self.metrics.record_check(start.elapsed(), found);
        found
    }

    /// Merge a plain filter into the shared one
    pub fn merge(&self, other: &MembershipFilter) -> Result<(), FilterError> {
        self.inner.write().merge(other)?;
        self.metrics.record_merge();
        Ok(())
    }

    /// Merge another shared filter into this one
    ///
    /// The other filter is snapshotted first so that merging a handle into
    /// itself, or two handles into each other concurrently, cannot deadlock.
    pub fn merge_shared(&self, other: &SharedFilter) -> Result<(), FilterError> {
        let other = other.snapshot();
        self.merge(&other)
    }

    /// Clone the current filter state
    pub fn snapshot(&self) -> MembershipFilter {
        self.inner.read().clone()
    }

    /// Run a read-only closure against the filter
    pub fn read<R>(&self, f: impl FnOnce(&MembershipFilter) -> R) -> R {
        f(&self.inner.read())
    }

    /// Consume the handle, returning the filter if this was the last clone
    pub fn into_inner(self) -> Result<MembershipFilter, SharedFilter> {
        let metrics = self.metrics;
        match Arc::try_unwrap(self.inner) {
            Ok(lock) => {
                debug!("Unwrapped shared membership filter");
                Ok(lock.into_inner())
            }
            Err(inner) => Err(SharedFilter { inner, metrics }),
        }
    }

    pub fn items_added(&self) -> usize {
        self.read(MembershipFilter::items_added)
    }

    pub fn bits_set(&self) -> usize {
        self.read(MembershipFilter::bits_set)
    }
}
