//! Calendar-period P&L grouping.

use std::collections::BTreeMap;

use core_types::TradeRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Granularity of the calendar grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Day,
    Month,
}

/// Total R and trade count for one calendar period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodPnl {
    /// `YYYY-MM-DD` for days, `YYYY-MM` for months.
    pub period: String,
    pub total_r: Decimal,
    pub trade_count: usize,
}

/// Groups trades by the calendar period of their entry timestamp and sums
/// R-multiples per period. Periods are returned chronologically.
pub fn period_pnl(trades: &[TradeRecord], period: Period) -> Vec<PeriodPnl> {
    let format = match period {
        Period::Day => "%Y-%m-%d",
        Period::Month => "%Y-%m",
    };

    // Keys in these formats sort lexicographically in chronological order.
    let mut periods: BTreeMap<String, (Decimal, usize)> = BTreeMap::new();
    for trade in trades {
        let key = trade.entry_timestamp.format(format).to_string();
        let entry = periods.entry(key).or_default();
        entry.0 += trade.r_multiple.unwrap_or(Decimal::ZERO);
        entry.1 += 1;
    }

    periods
        .into_iter()
        .map(|(period, (total_r, trade_count))| PeriodPnl {
            period,
            total_r,
            trade_count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::trade_with_r;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    #[test]
    fn daily_buckets_are_chronological() {
        let mut late = trade_with_r(dec!(1), 0);
        late.entry_timestamp += Duration::days(2);
        let early_win = trade_with_r(dec!(2), 0);
        let early_loss = trade_with_r(dec!(-0.5), 30);

        let pnl = period_pnl(&[late, early_win, early_loss], Period::Day);
        assert_eq!(pnl.len(), 2);
        assert_eq!(pnl[0].period, "2024-03-04");
        assert_eq!(pnl[0].total_r, dec!(1.50));
        assert_eq!(pnl[0].trade_count, 2);
        assert_eq!(pnl[1].period, "2024-03-06");
    }

    #[test]
    fn monthly_buckets_aggregate_across_days() {
        let mut next_month = trade_with_r(dec!(1), 0);
        next_month.entry_timestamp += Duration::days(40);
        let this_month = trade_with_r(dec!(2), 0);

        let pnl = period_pnl(&[next_month, this_month], Period::Month);
        assert_eq!(pnl.len(), 2);
        assert_eq!(pnl[0].period, "2024-03");
        assert_eq!(pnl[1].period, "2024-04");
    }
}
