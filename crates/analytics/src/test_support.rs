//! Shared builders for unit tests. Trades are normalized on construction so
//! tests exercise the same derivation path as production callers.

use chrono::{DateTime, Duration, TimeZone, Utc};
use core_types::TradeRecord;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::normalize;

pub(crate) fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 4, 9, 30, 0).unwrap()
}

/// A raw record with only the required caller-supplied fields set.
pub(crate) fn raw_trade(entry: Decimal, stop: Decimal) -> TradeRecord {
    TradeRecord {
        asset: "EURUSD".to_string(),
        account_id: Uuid::new_v4(),
        risk_percentage: Decimal::ONE,
        entry_timestamp: base_time(),
        entry_price: entry,
        stop_loss_price: stop,
        exit_timestamp: None,
        exit_price: None,
        playbook_id: None,
        rule_adherence_score: None,
        emotion_pre_trade: None,
        market_environment: None,
        time_of_day_session: None,
        mfe: None,
        mae: None,
        system_pnl_r: None,
        tags: Vec::new(),
        direction: None,
        outcome: None,
        r_multiple: None,
        trade_duration_ms: None,
        cost_of_discretion_r: None,
        validity: Default::default(),
    }
}

/// A normalized, closed trade entered `minutes_in` after the base time and
/// held for one hour.
pub(crate) fn closed_trade(
    entry: Decimal,
    stop: Decimal,
    exit: Decimal,
    minutes_in: i64,
) -> TradeRecord {
    let mut trade = raw_trade(entry, stop);
    trade.entry_timestamp = base_time() + Duration::minutes(minutes_in);
    trade.exit_timestamp = Some(trade.entry_timestamp + Duration::hours(1));
    trade.exit_price = Some(exit);
    normalize::normalize(&mut trade);
    trade
}

/// A closed long with exactly the given R-multiple (1.00 price risk).
pub(crate) fn trade_with_r(r: Decimal, minutes_in: i64) -> TradeRecord {
    let entry = Decimal::from(100);
    closed_trade(entry, entry - Decimal::ONE, entry + r, minutes_in)
}
