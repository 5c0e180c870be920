//! Core membership filter implementation
//!
//! INVARIANTS:
//! - m = ceil(-(n * ln p) / (ln 2)^2) >= 1 and k = ceil((m / n) * ln 2) >= 1
//! - Bits only ever go from 0 to 1
//! - No false negatives: after `add(x)`, `check(x)` MUST return true

use bitvec::prelude::*;
use rayon::prelude::*;
use tracing::{debug, trace};

use super::config::FilterConfig;
use super::hash_functions::{compute_hash_positions, hash_position};
use super::parameters::{calculate_fpr, calculate_optimal_parameters, FilterParams};
use crate::error::FilterError;

/// Items handled by one rayon task in [`MembershipFilter::from_items_parallel`]
const PARALLEL_CHUNK_SIZE: usize = 4096;

/// Fixed-capacity probabilistic set over string keys
///
/// `check` may report an item that was never added (a false positive, at
/// roughly the configured rate once `expected_items` have been added), but
/// never misses one that was.
#[derive(Clone, Debug)]
pub struct MembershipFilter {
    /// Bit array storing the filter state
    bits: BitVec<u8, Lsb0>,
    /// Number of hash functions (k)
    k: usize,
    /// Size in bits (m)
    m: usize,
    /// Construction parameter n
    expected_items: usize,
    /// Construction parameter p
    false_positive_rate: f64,
    /// Number of `add` calls, duplicates included
    items_added: usize,
}

impl MembershipFilter {
    /// Create an empty filter sized for `expected_items` at `false_positive_rate`
    ///
    /// # Errors
    /// `InvalidExpectedItems` if `expected_items == 0`,
    /// `InvalidFalsePositiveRate` if the rate is not strictly inside (0, 1).
    pub fn new(expected_items: usize, false_positive_rate: f64) -> Result<Self, FilterError> {
        let params = calculate_optimal_parameters(expected_items, false_positive_rate)?;
        Ok(Self::from_params(&params, expected_items, false_positive_rate))
    }

    /// Create an empty filter from a validated [`FilterConfig`]
    pub fn with_config(config: &FilterConfig) -> Result<Self, FilterError> {
        let params = config.params()?;
        Ok(Self::from_params(
            &params,
            config.expected_items,
            config.false_positive_rate,
        ))
    }

    fn from_params(params: &FilterParams, expected_items: usize, false_positive_rate: f64) -> Self {
        debug!(
            m = params.size_bits,
            k = params.hash_count,
            n = expected_items,
            p = false_positive_rate,
            "Created membership filter"
        );

        Self {
            bits: bitvec![u8, Lsb0; 0; params.size_bits],
            k: params.hash_count,
            m: params.size_bits,
            expected_items,
            false_positive_rate,
            items_added: 0,
        }
    }

    /// Build a filter and add every item in order
    pub fn from_items<I, S>(
        expected_items: usize,
        false_positive_rate: f64,
        items: I,
    ) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = Self::new(expected_items, false_positive_rate)?;
        for item in items {
            filter.add(item.as_ref());
        }
        Ok(filter)
    }

    /// Build a filter from a slice of items using rayon
    ///
    /// Each chunk fills its own shard, and shards are OR-ed together. The
    /// resulting bit state equals that of [`MembershipFilter::from_items`].
    pub fn from_items_parallel<S>(
        expected_items: usize,
        false_positive_rate: f64,
        items: &[S],
    ) -> Result<Self, FilterError>
    where
        S: AsRef<str> + Sync,
    {
        let empty = Self::new(expected_items, false_positive_rate)?;

        let filter = items
            .par_chunks(PARALLEL_CHUNK_SIZE)
            .map(|chunk| {
                let mut shard = empty.clone();
                for item in chunk {
                    shard.add(item.as_ref());
                }
                shard
            })
            .reduce(
                || empty.clone(),
                |mut acc, shard| {
                    acc.union_in_place(&shard);
                    acc
                },
            );

        debug!(
            items = items.len(),
            bits_set = filter.bits_set(),
            "Built membership filter in parallel"
        );
        Ok(filter)
    }

    /// Add a string item
    ///
    /// Idempotent on the bit state: adding the same item twice leaves the
    /// same bits set as adding it once.
    pub fn add(&mut self, item: &str) {
        self.add_bytes(item.as_bytes());
    }

    /// Add a raw byte item
    pub fn add_bytes(&mut self, item: &[u8]) {
        for seed in 0..self.k as u32 {
            let pos = hash_position(item, seed, self.m);
            self.bits.set(pos, true);
        }
        self.items_added = self.items_added.saturating_add(1);
        trace!(len = item.len(), "Added item");
    }

    /// Test whether a string item might be in the set
    ///
    /// Returns:
    /// - `false` if the item is definitely NOT in the set
    /// - `true` if the item is probably in the set
    pub fn check(&self, item: &str) -> bool {
        self.check_bytes(item.as_bytes())
    }

    /// Test whether a raw byte item might be in the set
    pub fn check_bytes(&self, item: &[u8]) -> bool {
        (0..self.k as u32).all(|seed| self.bits[hash_position(item, seed, self.m)])
    }

    /// The `k` bit positions `add` would set for `item`
    pub fn positions(&self, item: &str) -> Vec<usize> {
        compute_hash_positions(item.as_bytes(), self.k, self.m)
    }

    /// Merge another filter into this one (bitwise OR)
    ///
    /// After merging, this filter reports every item either filter reported.
    ///
    /// # Errors
    /// `IncompatibleFilters` if the filters differ in `m` or `k`.
    pub fn merge(&mut self, other: &MembershipFilter) -> Result<(), FilterError> {
        if self.m != other.m || self.k != other.k {
            return Err(FilterError::IncompatibleFilters {
                left_bits: self.m,
                left_hashes: self.k,
                right_bits: other.m,
                right_hashes: other.k,
            });
        }

        self.union_in_place(other);
        debug!(m = self.m, bits_set = self.bits_set(), "Merged membership filters");
        Ok(())
    }

    /// OR the raw storage of a same-shaped filter into this one
    fn union_in_place(&mut self, other: &MembershipFilter) {
        debug_assert_eq!(self.m, other.m);
        debug_assert_eq!(self.k, other.k);

        let self_raw = self.bits.as_raw_mut_slice();
        let other_raw = other.bits.as_raw_slice();
        for (s, o) in self_raw.iter_mut().zip(other_raw.iter()) {
            *s |= *o;
        }
        self.items_added = self.items_added.saturating_add(other.items_added);
    }

    /// Estimated false positive rate given the items added so far
    ///
    /// Formula: FPR = (1 - e^(-k*n/m))^k
    pub fn estimated_false_positive_rate(&self) -> f64 {
        calculate_fpr(self.m, self.items_added, self.k)
    }

    /// Number of bits currently set
    pub fn bits_set(&self) -> usize {
        self.bits.count_ones()
    }

    /// True when no bit is set
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Filter size in bits (m)
    pub fn size_bits(&self) -> usize {
        self.m
    }

    /// Number of hash functions (k)
    pub fn hash_count(&self) -> usize {
        self.k
    }

    pub fn expected_items(&self) -> usize {
        self.expected_items
    }

    pub fn target_false_positive_rate(&self) -> f64 {
        self.false_positive_rate
    }

    /// Number of `add` calls so far, duplicates included
    pub fn items_added(&self) -> usize {
        self.items_added
    }

    /// Whether bit `index` is set; `None` when out of range
    pub fn bit(&self, index: usize) -> Option<bool> {
        self.bits.get(index).map(|bit| *bit)
    }

    /// Indices of all set bits, ascending
    pub fn set_bits(&self) -> Vec<usize> {
        self.bits.iter_ones().collect()
    }
}

/// Two filters are equal when they have the same shape and bit state.
impl PartialEq for MembershipFilter {
    fn eq(&self, other: &Self) -> bool {
        self.m == other.m && self.k == other.k && self.bits == other.bits
    }
}

impl Eq for MembershipFilter {}
