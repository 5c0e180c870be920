//! # Brutal Modular Benchmarks
//!
//! These are NOT polite benchmarks: large filters, adversarial key shapes
//! and contended shared handles.
//!
//! - `membership_filter` - add/check O(k), merge O(m/8), parallel build, FPR validation

pub mod membership_filter;
