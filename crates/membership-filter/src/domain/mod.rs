//! Domain Layer - Pure filter logic
//!
//! This layer contains:
//! - The membership filter itself
//! - Seeded hash functions
//! - Parameter calculations
//! - Configuration
//!
//! RULES:
//! - No I/O operations
//! - No async code
//! - No locking (see `crate::shared` for concurrent hosts)

pub mod config;
pub mod hash_functions;
pub mod membership_filter;
pub mod parameters;

pub use config::{FilterConfig, FilterConfigBuilder, DEFAULT_MAX_SIZE_BITS};
pub use membership_filter::MembershipFilter;
pub use parameters::{calculate_optimal_parameters, FilterParams};
