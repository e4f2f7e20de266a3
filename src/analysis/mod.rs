//! Aggregate computations over loaded BLAST hits.
//!
//! - [`StatisticsRow`]: Mean and sample standard deviation of percent identity,
//!   e-value and bit score, rounded to 4 decimal places
//! - [`SetOverlap`]: Three-part partition of two subject-id sets
//!
//! Both are pure functions of their inputs and independent of each other.
//!
//! ## Missing Values
//!
//! Float columns may carry missing markers (`NA`, `nan`, empty), loaded as NaN.
//! Statistics skip them. With fewer than two remaining values the standard
//! deviation is undefined and reported as NaN; with none the mean is NaN too.
//!
//! [`StatisticsRow`]: stats::StatisticsRow
//! [`SetOverlap`]: overlap::SetOverlap

pub mod overlap;
pub mod stats;
