//! Sliding-window trend series.

use core_types::TradeRecord;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::engine::AnalyticsEngine;
use crate::error::AnalyticsError;
use crate::report::{MetricValue, PerformanceMetrics};

/// Substitute plotted for `Unbounded` metric values.
///
/// This cap exists purely so the series stays chartable downstream; it is
/// a presentation convention, not a measurement. The core metrics keep the
/// explicit `Unbounded` tag.
pub const UNBOUNDED_CHART_CAP: Decimal = dec!(50);

/// One point of a rolling metric series. `position` is the 1-based ordinal
/// of the last trade in the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollingPoint {
    pub position: usize,
    pub value: Decimal,
}

/// Aggregates sliding sub-windows of the chronological trade sequence and
/// projects one metric out of each window's report.
///
/// Fewer trades than `window_size` collapse to a single point summarizing
/// the whole set; an empty set yields an empty series. A zero window size
/// is a programmer error.
pub fn rolling_metric<F>(
    trades: &[TradeRecord],
    window_size: usize,
    selector: F,
) -> Result<Vec<RollingPoint>, AnalyticsError>
where
    F: Fn(&PerformanceMetrics) -> MetricValue,
{
    if window_size == 0 {
        return Err(AnalyticsError::InvalidWindowSize(window_size));
    }

    let mut ordered = trades.to_vec();
    ordered.sort_by_key(|t| t.entry_timestamp);

    let engine = AnalyticsEngine::new();

    if ordered.is_empty() {
        return Ok(Vec::new());
    }
    if ordered.len() < window_size {
        let metrics = engine.aggregate(&ordered);
        return Ok(vec![RollingPoint {
            position: ordered.len(),
            value: selector(&metrics).finite_or(UNBOUNDED_CHART_CAP).round_dp(2),
        }]);
    }

    let series = ordered
        .windows(window_size)
        .enumerate()
        .map(|(offset, window)| {
            let metrics = engine.aggregate(window);
            RollingPoint {
                position: offset + window_size,
                value: selector(&metrics).finite_or(UNBOUNDED_CHART_CAP).round_dp(2),
            }
        })
        .collect();
    Ok(series)
}
