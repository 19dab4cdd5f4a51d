//! # Apex Analytics Engine
//!
//! This crate turns a snapshot of journaled trades into performance
//! statistics: win rates, profit factor, expectancy, drawdown, streaks,
//! equity curves, rolling trend series, and categorical segmentation.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   external systems. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** Every entry point is a synchronous function
//!   of an immutable trade snapshot. Re-invoking with the same input always
//!   yields the same output, and input order never matters (collections are
//!   re-sorted internally where chronology is relevant).
//! - **Soft Errors:** Malformed domain data never aborts a batch. Records
//!   are tagged (`TradeValidity`) and skipped per-metric; only programmer
//!   errors such as a zero rolling window return an `Err`.
//!
//! ## Public API
//!
//! - `normalize`: derives direction, outcome, R-multiple, duration, and
//!   cost of discretion on a `TradeRecord`.
//! - `AnalyticsEngine`: reduces a trade set to a `PerformanceMetrics`.
//! - `build_curve`: produces the chronological equity curve.
//! - `rolling_metric`: sliding-window trend series over any metric.
//! - `segment_by` and friends: categorical performance breakdowns.

pub mod calendar;
pub mod duration;
pub mod engine;
pub mod equity;
pub mod error;
pub mod normalize;
pub mod report;
pub mod rolling;
pub mod segment;
pub mod streak;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export the key components to create a clean, public-facing API.
pub use engine::AnalyticsEngine;
pub use equity::{EquityMode, EquityPoint, build_curve};
pub use error::AnalyticsError;
pub use report::{MetricValue, PerformanceMetrics};
pub use rolling::{RollingPoint, rolling_metric};
pub use segment::{SegmentBucket, SegmentSort};
