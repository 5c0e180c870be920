//! Error types for the membership filter
//!
//! Every failure is an invalid argument detected at construction or
//! combination time. `add` and `check` never fail.

use thiserror::Error;

/// Errors raised while building or combining filters
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    #[error("Invalid argument: expected_items must be positive, got {expected_items}")]
    InvalidExpectedItems { expected_items: usize },

    #[error("Invalid argument: false positive rate {rate} must be in (0, 1)")]
    InvalidFalsePositiveRate { rate: f64 },

    #[error("Invalid argument: filter size {size_bits} bits exceeds maximum {max}")]
    FilterTooLarge { size_bits: f64, max: usize },

    #[error(
        "Invalid argument: cannot merge filters with m={left_bits}, k={left_hashes} \
         and m={right_bits}, k={right_hashes}"
    )]
    IncompatibleFilters {
        left_bits: usize,
        left_hashes: usize,
        right_bits: usize,
        right_hashes: usize,
    },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl FilterError {
    /// All variants describe a caller-supplied value that was out of range.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            FilterError::InvalidExpectedItems { .. }
                | FilterError::InvalidFalsePositiveRate { .. }
                | FilterError::FilterTooLarge { .. }
                | FilterError::IncompatibleFilters { .. }
                | FilterError::InvalidConfig(_)
        )
    }
}

impl From<serde_json::Error> for FilterError {
    fn from(err: serde_json::Error) -> Self {
        FilterError::InvalidConfig(err.to_string())
    }
}
