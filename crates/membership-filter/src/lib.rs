//! # Membership Filter
//!
//! Probabilistic set membership over string keys (a Bloom filter).
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): Pure filter logic, no I/O
//!   - `MembershipFilter`: bit array + `k` seeded MurmurHash3 positions
//!   - `FilterConfig` / `FilterConfigBuilder`: validated construction parameters
//!   - `parameters`: sizing formulas for `m` and `k`
//!
//! - **Shared Layer** (`shared`): `SharedFilter`, a `RwLock`-guarded handle
//!   for concurrent hosts
//!
//! - **Metrics** (`metrics`): atomic counters behind the `MetricsRecorder` trait
//!
//! - **Telemetry** (`telemetry`): `tracing-subscriber` setup
//!
//! ## Invariants
//!
//! - m = ceil(-(n * ln p) / (ln 2)^2) >= 1
//! - k = ceil((m / n) * ln 2) >= 1
//! - Bits are monotonic: no operation clears a bit
//! - No false negatives: if added, `check()` MUST return true
//!
//! ## Usage Example
//!
//! ```
//! use membership_filter::MembershipFilter;
//!
//! let mut filter = MembershipFilter::new(1000, 0.01)?;
//! filter.add("apple");
//! filter.add("banana");
//!
//! assert!(filter.check("apple"));
//! assert!(!filter.check("grape"));
//! # Ok::<(), membership_filter::FilterError>(())
//! ```

pub mod domain;
pub mod error;
pub mod metrics;
pub mod shared;
pub mod telemetry;

// Re-exports for convenience
pub use domain::{FilterConfig, FilterConfigBuilder, FilterParams, MembershipFilter};
pub use error::FilterError;
pub use metrics::{Metrics, MetricsRecorder, MetricsSnapshot, NoOpMetrics};
pub use shared::SharedFilter;
pub use telemetry::{init_tracing, LogConfig, TelemetryError};
