use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A metric value that may be undefined in the unbounded direction.
///
/// A profit factor over a window with zero gross loss and positive gross
/// profit has no finite value. The core carries that case as an explicit
/// tag instead of a floating-point infinity, so each presentation consumer
/// can choose its own display or clamping policy at the boundary.
///
/// The derived ordering ranks `Unbounded` above every finite value, which
/// is what descending metric sorts want.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum MetricValue {
    Finite(Decimal),
    Unbounded,
}

impl MetricValue {
    pub const ZERO: MetricValue = MetricValue::Finite(Decimal::ZERO);

    /// Collapses to a plain number, substituting `cap` for `Unbounded`.
    pub fn finite_or(self, cap: Decimal) -> Decimal {
        match self {
            MetricValue::Finite(value) => value,
            MetricValue::Unbounded => cap,
        }
    }

    pub fn is_unbounded(self) -> bool {
        matches!(self, MetricValue::Unbounded)
    }
}

impl From<Decimal> for MetricValue {
    fn from(value: Decimal) -> Self {
        MetricValue::Finite(value)
    }
}

impl std::fmt::Display for MetricValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricValue::Finite(value) => write!(f, "{}", value.round_dp(2)),
            MetricValue::Unbounded => f.write_str("N/A"),
        }
    }
}

/// A comprehensive, standardized report of trading performance.
///
/// This struct is the final output of the `AnalyticsEngine` and serves as
/// the data transfer object for performance results throughout the system.
/// It is a pure value object: no identity, no lifecycle, recomputed on
/// demand from any trade collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    // I. Trade Counts and Rates
    pub total_trades: usize,
    pub win_rate: Decimal,
    pub loss_rate: Decimal,
    pub breakeven_rate: Decimal,

    // II. R-Multiple Profitability
    pub total_r: Decimal,
    pub avg_r: Decimal,
    pub gross_profit_r: Decimal,
    pub gross_loss_r: Decimal,
    pub profit_factor: MetricValue,
    pub avg_win_r: Decimal,
    pub avg_loss_r: Decimal,
    pub expectancy: Decimal,

    // III. Risk and Sequencing
    pub max_drawdown_r: Decimal,
    pub longest_win_streak: usize,
    pub longest_loss_streak: usize,

    // IV. Execution Quality
    pub avg_rule_adherence: Decimal,
    pub avg_exit_efficiency: Decimal,
}

impl PerformanceMetrics {
    /// Creates a new, zeroed-out PerformanceMetrics.
    ///
    /// This is both the starting point for aggregation and the well-defined
    /// result for an empty trade collection.
    pub fn new() -> Self {
        Self {
            total_trades: 0,
            win_rate: Decimal::ZERO,
            loss_rate: Decimal::ZERO,
            breakeven_rate: Decimal::ZERO,
            total_r: Decimal::ZERO,
            avg_r: Decimal::ZERO,
            gross_profit_r: Decimal::ZERO,
            gross_loss_r: Decimal::ZERO,
            profit_factor: MetricValue::ZERO,
            avg_win_r: Decimal::ZERO,
            avg_loss_r: Decimal::ZERO,
            expectancy: Decimal::ZERO,
            max_drawdown_r: Decimal::ZERO,
            longest_win_streak: 0,
            longest_loss_streak: 0,
            avg_rule_adherence: Decimal::ZERO,
            avg_exit_efficiency: Decimal::ZERO,
        }
    }
}

impl Default for PerformanceMetrics {
    fn default() -> Self {
        Self::new()
    }
}
