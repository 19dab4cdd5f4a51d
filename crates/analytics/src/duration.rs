//! Holding-period statistics.

use core_types::TradeRecord;
use serde::{Deserialize, Serialize};

const MS_PER_MINUTE: i64 = 1000 * 60;
const MS_PER_HOUR: i64 = MS_PER_MINUTE * 60;
const MS_PER_DAY: i64 = MS_PER_HOUR * 24;

/// Average, shortest, and longest holding periods over the trades with a
/// defined duration. All zero when no trade has one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationStats {
    pub avg_ms: i64,
    pub min_ms: i64,
    pub max_ms: i64,
}

pub fn duration_stats(trades: &[TradeRecord]) -> DurationStats {
    let durations: Vec<i64> = trades
        .iter()
        .filter_map(|t| t.trade_duration_ms)
        .filter(|&ms| ms >= 0)
        .collect();
    if durations.is_empty() {
        return DurationStats::default();
    }
    DurationStats {
        avg_ms: durations.iter().sum::<i64>() / durations.len() as i64,
        min_ms: *durations.iter().min().unwrap(),
        max_ms: *durations.iter().max().unwrap(),
    }
}

/// Formats a millisecond duration as `"1d 4h 20m"`, omitting leading zero
/// units. Sub-minute durations render as `"0m"`.
pub fn format_duration(mut ms: i64) -> String {
    let days = ms / MS_PER_DAY;
    ms -= days * MS_PER_DAY;
    let hours = ms / MS_PER_HOUR;
    ms -= hours * MS_PER_HOUR;
    let minutes = ms / MS_PER_MINUTE;

    let mut formatted = String::new();
    if days > 0 {
        formatted.push_str(&format!("{days}d "));
    }
    if hours > 0 {
        formatted.push_str(&format!("{hours}h "));
    }
    if minutes > 0 || formatted.is_empty() {
        formatted.push_str(&format!("{minutes}m"));
    }
    formatted.trim_end().to_string()
}
