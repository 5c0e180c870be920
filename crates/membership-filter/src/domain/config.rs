//! Filter configuration and validation
//!
//! # Example
//!
//! ```
//! use membership_filter::FilterConfigBuilder;
//!
//! let config = FilterConfigBuilder::new()
//!     .expected_items(500)
//!     .false_positive_rate(0.001)
//!     .build()
//!     .expect("valid config");
//! assert_eq!(config.expected_items, 500);
//! ```

use serde::{Deserialize, Serialize};

use super::parameters::{calculate_optimal_parameters, FilterParams};
use crate::error::FilterError;

/// Upper bound on filter size unless configured otherwise (~512 MiB of bits)
pub const DEFAULT_MAX_SIZE_BITS: usize = u32::MAX as usize;

/// Construction parameters for a [`MembershipFilter`](super::MembershipFilter)
///
/// Missing fields fall back to [`FilterConfig::default`] when deserialized.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Expected number of distinct items (n)
    pub expected_items: usize,
    /// Target false positive rate (p), strictly between 0 and 1
    pub false_positive_rate: f64,
    /// Largest bit array this config may produce
    pub max_size_bits: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            expected_items: 1000,
            false_positive_rate: 0.01,
            max_size_bits: DEFAULT_MAX_SIZE_BITS,
        }
    }
}

impl FilterConfig {
    /// Create a new configuration with validation
    pub fn new(expected_items: usize, false_positive_rate: f64) -> Result<Self, FilterError> {
        let config = Self {
            expected_items,
            false_positive_rate,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON document such as `{"expected_items": 100, "false_positive_rate": 0.05}`
    pub fn from_json(json: &str) -> Result<Self, FilterError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a JSON document
    pub fn to_json(&self) -> Result<String, FilterError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Derived sizing, checked against `max_size_bits`
    pub fn params(&self) -> Result<FilterParams, FilterError> {
        if self.max_size_bits == 0 {
            return Err(FilterError::InvalidConfig(
                "max_size_bits cannot be 0".to_string(),
            ));
        }

        let params = calculate_optimal_parameters(self.expected_items, self.false_positive_rate)?;

        if params.size_bits > self.max_size_bits {
            return Err(FilterError::FilterTooLarge {
                size_bits: params.size_bits as f64,
                max: self.max_size_bits,
            });
        }

        Ok(params)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), FilterError> {
        self.params().map(|_| ())
    }

    /// Builder-style method to set expected items
    pub fn with_expected_items(mut self, expected_items: usize) -> Self {
        self.expected_items = expected_items;
        self
    }

    /// Builder-style method to set the false positive rate
    pub fn with_false_positive_rate(mut self, rate: f64) -> Self {
        self.false_positive_rate = rate;
        self
    }
}

/// Fluent builder for [`FilterConfig`]
#[derive(Default)]
pub struct FilterConfigBuilder {
    expected_items: Option<usize>,
    false_positive_rate: Option<f64>,
    max_size_bits: Option<usize>,
}

impl FilterConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the expected number of items (must be positive)
    pub fn expected_items(mut self, items: usize) -> Self {
        self.expected_items = Some(items);
        self
    }

    /// Set the target false positive rate (must be in (0, 1))
    pub fn false_positive_rate(mut self, rate: f64) -> Self {
        self.false_positive_rate = Some(rate);
        self
    }

    /// Cap the size of the bit array
    pub fn max_size_bits(mut self, bits: usize) -> Self {
        self.max_size_bits = Some(bits);
        self
    }

    /// Build the config, validating all parameters
    pub fn build(self) -> Result<FilterConfig, FilterError> {
        let defaults = FilterConfig::default();

        let config = FilterConfig {
            expected_items: self.expected_items.unwrap_or(defaults.expected_items),
            false_positive_rate: self
                .false_positive_rate
                .unwrap_or(defaults.false_positive_rate),
            max_size_bits: self.max_size_bits.unwrap_or(defaults.max_size_bits),
        };

        config.validate()?;
        Ok(config)
    }
}
