//! Optimal filter parameter calculation
//!
//! Formulas:
//! - m = ceil(-n*ln(p) / (ln(2)^2))  -- bits, at least 1
//! - k = ceil((m/n) * ln(2))         -- hash functions, at least 1
//! - FPR = (1 - e^(-kn/m))^k         -- estimate after n insertions

use std::f64::consts::LN_2;

use bitvec::prelude::*;
use tracing::warn;

use crate::error::FilterError;

/// Sizing derived from `(expected_items, false_positive_rate)`
#[derive(Clone, Debug, PartialEq)]
pub struct FilterParams {
    /// Number of bits in the filter (m)
    pub size_bits: usize,
    /// Number of hash functions (k)
    pub hash_count: usize,
    /// False positive rate once `expected_items` have been added
    pub expected_fpr: f64,
}

/// Reject arguments outside `n > 0` and `0 < p < 1`.
pub fn validate_arguments(expected_items: usize, false_positive_rate: f64) -> Result<(), FilterError> {
    if expected_items == 0 {
        warn!(expected_items, "Rejected filter parameters");
        return Err(FilterError::InvalidExpectedItems { expected_items });
    }

    // Written as a negated range test so NaN is rejected too.
    if !(false_positive_rate > 0.0 && false_positive_rate < 1.0) {
        warn!(rate = false_positive_rate, "Rejected filter parameters");
        return Err(FilterError::InvalidFalsePositiveRate {
            rate: false_positive_rate,
        });
    }

    Ok(())
}

/// Calculate filter parameters for `n` expected items at target rate `p`
pub fn calculate_optimal_parameters(
    expected_items: usize,
    false_positive_rate: f64,
) -> Result<FilterParams, FilterError> {
    validate_arguments(expected_items, false_positive_rate)?;

    let size_bits = optimal_bits(expected_items, false_positive_rate)?;
    let hash_count = optimal_hash_count(size_bits, expected_items);
    let expected_fpr = calculate_fpr(size_bits, expected_items, hash_count);

    Ok(FilterParams {
        size_bits,
        hash_count,
        expected_fpr,
    })
}

/// Minimum number of bits for `n` items at rate `p`
///
/// Arguments are assumed valid; an `m` larger than a byte-backed bit vector
/// can address is an error.
pub fn optimal_bits(expected_items: usize, false_positive_rate: f64) -> Result<usize, FilterError> {
    let n = expected_items as f64;
    let m = (-(n * false_positive_rate.ln()) / (LN_2 * LN_2)).ceil().max(1.0);

    let max = BitSlice::<u8, Lsb0>::MAX_BITS;
    if !m.is_finite() || m > max as f64 {
        warn!(size_bits = m, max, "Rejected filter size");
        return Err(FilterError::FilterTooLarge { size_bits: m, max });
    }

    Ok(m as usize)
}

/// Optimal k for `m` bits and `n` items
pub fn optimal_hash_count(size_bits: usize, expected_items: usize) -> usize {
    if expected_items == 0 {
        return 1;
    }
    let k = ((size_bits as f64 / expected_items as f64) * LN_2).ceil();
    (k as usize).max(1)
}

/// Estimated false positive rate for `m` bits, `n` items and `k` hashes
pub fn calculate_fpr(size_bits: usize, items: usize, hash_count: usize) -> f64 {
    if size_bits == 0 {
        return 1.0;
    }
    let exponent = -(hash_count as f64) * (items as f64) / (size_bits as f64);
    (1.0 - exponent.exp()).powi(hash_count as i32)
}
