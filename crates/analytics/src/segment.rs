//! Categorical performance segmentation.
//!
//! Partitions a trade set by a categorical key and aggregates each
//! partition independently. The generic entry points take any key
//! function; the convenience wrappers below cover the journal's standard
//! breakdowns (market environment, session, weekday, pre-trade emotion,
//! asset, playbook).

use std::collections::BTreeMap;

use chrono::Datelike;
use core_types::{EmotionalState, MarketEnvironment, TradeRecord, TradingSession};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::AnalyticsEngine;
use crate::report::PerformanceMetrics;

const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Metrics for one partition of a trade set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentBucket {
    pub label: String,
    pub trade_count: usize,
    pub metrics: PerformanceMetrics,
}

/// Ordering applied to the returned buckets. The metric criteria sort
/// descending; `DomainOrder` keeps the buckets in domain (or label)
/// order, which is what a chronological breakdown like weekday wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentSort {
    ProfitFactor,
    TotalR,
    TradeCount,
    DomainOrder,
}

/// Partitions by the observed values of `key` and aggregates each
/// non-empty partition. Trades for which `key` returns `None` are skipped.
pub fn segment_by<F>(trades: &[TradeRecord], key: F, sort: SegmentSort) -> Vec<SegmentBucket>
where
    F: Fn(&TradeRecord) -> Option<String>,
{
    let mut partitions: BTreeMap<String, Vec<TradeRecord>> = BTreeMap::new();
    for trade in trades {
        if let Some(label) = key(trade) {
            partitions.entry(label).or_default().push(trade.clone());
        }
    }

    let engine = AnalyticsEngine::new();
    let mut buckets: Vec<SegmentBucket> = partitions
        .into_iter()
        .map(|(label, partition)| SegmentBucket {
            label,
            trade_count: partition.len(),
            metrics: engine.aggregate(&partition),
        })
        .collect();

    sort_buckets(&mut buckets, sort);
    debug!(buckets = buckets.len(), "segmented trade set");
    buckets
}

/// Partitions over an enumerated domain instead of the observed values.
///
/// Every domain label yields a bucket, including zero-count ones, so
/// callers get full coverage and may keep or drop empty categories.
pub fn segment_by_domain<F>(
    trades: &[TradeRecord],
    domain: &[&str],
    key: F,
    sort: SegmentSort,
) -> Vec<SegmentBucket>
where
    F: Fn(&TradeRecord) -> Option<String>,
{
    let engine = AnalyticsEngine::new();
    let mut buckets: Vec<SegmentBucket> = domain
        .iter()
        .map(|label| {
            let partition: Vec<TradeRecord> = trades
                .iter()
                .filter(|t| key(t).as_deref() == Some(*label))
                .cloned()
                .collect();
            SegmentBucket {
                label: (*label).to_string(),
                trade_count: partition.len(),
                metrics: engine.aggregate(&partition),
            }
        })
        .collect();

    sort_buckets(&mut buckets, sort);
    buckets
}

/// Breakdown by market environment, non-empty buckets only.
pub fn by_market_environment(trades: &[TradeRecord], sort: SegmentSort) -> Vec<SegmentBucket> {
    let domain: Vec<&str> = MarketEnvironment::ALL.iter().map(|e| e.as_str()).collect();
    let key = |t: &TradeRecord| t.market_environment.map(|e| e.as_str().to_string());
    drop_empty(segment_by_domain(trades, &domain, key, sort))
}

/// Breakdown by time-of-day session, non-empty buckets only.
pub fn by_session(trades: &[TradeRecord], sort: SegmentSort) -> Vec<SegmentBucket> {
    let domain: Vec<&str> = TradingSession::ALL.iter().map(|s| s.as_str()).collect();
    let key = |t: &TradeRecord| t.time_of_day_session.map(|s| s.as_str().to_string());
    drop_empty(segment_by_domain(trades, &domain, key, sort))
}

/// Breakdown by entry weekday; all seven days are kept so the week reads
/// as a whole even where no trades fall.
pub fn by_weekday(trades: &[TradeRecord], sort: SegmentSort) -> Vec<SegmentBucket> {
    segment_by_domain(trades, &WEEKDAYS, weekday_label, sort)
}

/// Breakdown by pre-trade emotional state, non-empty buckets only.
pub fn by_emotion(trades: &[TradeRecord], sort: SegmentSort) -> Vec<SegmentBucket> {
    let domain: Vec<&str> = EmotionalState::ALL.iter().map(|e| e.as_str()).collect();
    let key = |t: &TradeRecord| t.emotion_pre_trade.map(|e| e.as_str().to_string());
    drop_empty(segment_by_domain(trades, &domain, key, sort))
}

/// Breakdown by traded asset, over the observed symbols.
pub fn by_asset(trades: &[TradeRecord], sort: SegmentSort) -> Vec<SegmentBucket> {
    segment_by(trades, |t| Some(t.asset.clone()), sort)
}

/// Breakdown by playbook, over the observed playbook ids. Trades logged
/// without a playbook are skipped.
pub fn by_playbook(trades: &[TradeRecord], sort: SegmentSort) -> Vec<SegmentBucket> {
    segment_by(trades, |t| t.playbook_id.map(|id| id.to_string()), sort)
}

fn weekday_label(trade: &TradeRecord) -> Option<String> {
    let index = trade.entry_timestamp.weekday().num_days_from_sunday() as usize;
    Some(WEEKDAYS[index].to_string())
}

fn sort_buckets(buckets: &mut [SegmentBucket], sort: SegmentSort) {
    match sort {
        SegmentSort::ProfitFactor => {
            buckets.sort_by(|a, b| b.metrics.profit_factor.cmp(&a.metrics.profit_factor));
        }
        SegmentSort::TotalR => buckets.sort_by(|a, b| b.metrics.total_r.cmp(&a.metrics.total_r)),
        SegmentSort::TradeCount => buckets.sort_by(|a, b| b.trade_count.cmp(&a.trade_count)),
        SegmentSort::DomainOrder => {}
    }
}

fn drop_empty(buckets: Vec<SegmentBucket>) -> Vec<SegmentBucket> {
    buckets.into_iter().filter(|b| b.trade_count > 0).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::trade_with_r;
    use core_types::MarketEnvironment;
    use rust_decimal_macros::dec;

    #[test]
    fn observed_domain_partitions_and_skips_keyless_trades() {
        let mut trending = trade_with_r(dec!(2), 0);
        trending.market_environment = Some(MarketEnvironment::TrendingUp);
        let mut choppy = trade_with_r(dec!(-1), 1);
        choppy.market_environment = Some(MarketEnvironment::RangingChoppy);
        let unlabeled = trade_with_r(dec!(1), 2);

        let buckets = segment_by(
            &[trending, choppy, unlabeled],
            |t| t.market_environment.map(|e| e.as_str().to_string()),
            SegmentSort::TotalR,
        );

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].label, "Trending Up");
        assert_eq!(buckets[0].metrics.total_r, dec!(2.00));
        assert_eq!(buckets[1].label, "Ranging/Choppy");
    }

    #[test]
    fn enumerated_domain_keeps_zero_count_buckets() {
        let mut trade = trade_with_r(dec!(1), 0);
        trade.market_environment = Some(MarketEnvironment::TrendingUp);
        let domain: Vec<&str> = MarketEnvironment::ALL.iter().map(|e| e.as_str()).collect();

        let buckets = segment_by_domain(
            &[trade],
            &domain,
            |t| t.market_environment.map(|e| e.as_str().to_string()),
            SegmentSort::TradeCount,
        );

        assert_eq!(buckets.len(), MarketEnvironment::ALL.len());
        assert_eq!(buckets[0].trade_count, 1);
        assert!(buckets[1..].iter().all(|b| b.trade_count == 0));
    }

    #[test]
    fn unbounded_profit_factor_sorts_first() {
        let mut winners = trade_with_r(dec!(1), 0);
        winners.market_environment = Some(MarketEnvironment::TrendingUp);
        let mut mixed_win = trade_with_r(dec!(3), 1);
        mixed_win.market_environment = Some(MarketEnvironment::RangingChoppy);
        let mut mixed_loss = trade_with_r(dec!(-1), 2);
        mixed_loss.market_environment = Some(MarketEnvironment::RangingChoppy);

        let buckets = by_market_environment(
            &[winners, mixed_win, mixed_loss],
            SegmentSort::ProfitFactor,
        );

        assert_eq!(buckets[0].label, "Trending Up");
        assert!(buckets[0].metrics.profit_factor.is_unbounded());
        assert_eq!(buckets[1].label, "Ranging/Choppy");
    }

    #[test]
    fn weekday_breakdown_covers_the_whole_week() {
        // The test base time is a Monday.
        let trades = vec![trade_with_r(dec!(1), 0)];
        let buckets = by_weekday(&trades, SegmentSort::TradeCount);
        assert_eq!(buckets.len(), 7);
        assert_eq!(buckets[0].label, "Monday");
        assert_eq!(buckets[0].trade_count, 1);
    }

    #[test]
    fn domain_order_keeps_the_week_chronological() {
        // One winner on the Monday base time, one loser the next day. A
        // metric sort would put Monday first regardless; domain order
        // must start the week at Sunday and run through Saturday.
        let monday = trade_with_r(dec!(2), 0);
        let mut tuesday = trade_with_r(dec!(-1), 1);
        tuesday.entry_timestamp += chrono::Duration::days(1);

        let buckets = by_weekday(&[monday, tuesday], SegmentSort::DomainOrder);
        let labels: Vec<&str> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(
            labels,
            ["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"]
        );
        assert_eq!(buckets[1].trade_count, 1);
        assert_eq!(buckets[2].trade_count, 1);
    }

    #[test]
    fn asset_breakdown_uses_observed_symbols() {
        let mut eur = trade_with_r(dec!(1), 0);
        eur.asset = "EURUSD".to_string();
        let mut spx = trade_with_r(dec!(2), 1);
        spx.asset = "ES".to_string();

        let buckets = by_asset(&[eur, spx], SegmentSort::TotalR);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].label, "ES");
    }
}
