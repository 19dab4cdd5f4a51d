//! Trade field derivation.
//!
//! The normalizer is the leaf of the analytics pipeline: it turns raw
//! price/timestamp inputs into the derived fields every other component
//! consumes. It is a pure function of the record and never fails; data
//! problems are recorded in the `validity` tag instead.

use core_types::{TradeDirection, TradeOutcome, TradeRecord, TradeValidity};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// R-multiples within this band of zero classify as breakeven rather than
/// by raw sign.
const BREAKEVEN_BAND_R: Decimal = dec!(0.05);

/// Recomputes every derived field on the record from its raw inputs.
///
/// Previously derived values are cleared first, so a record whose inputs
/// changed can never carry stale statistics.
pub fn normalize(trade: &mut TradeRecord) {
    trade.direction = None;
    trade.outcome = None;
    trade.r_multiple = None;
    trade.trade_duration_ms = None;
    trade.cost_of_discretion_r = None;
    trade.validity = classify_validity(trade);

    if trade.validity == TradeValidity::InvalidPriceData {
        return;
    }

    let direction = derive_direction(trade);
    trade.direction = Some(direction);

    if trade.validity == TradeValidity::MissingExitData {
        return;
    }

    if let (Some(exit_price), Some(exit_timestamp)) = (trade.exit_price, trade.exit_timestamp) {
        trade.trade_duration_ms =
            Some((exit_timestamp - trade.entry_timestamp).num_milliseconds());

        let risk_per_unit = (trade.entry_price - trade.stop_loss_price).abs();
        if risk_per_unit.is_zero() {
            // Zero-risk trades have no defined R denominator.
            trade.outcome = Some(TradeOutcome::Breakeven);
            trade.r_multiple = Some(Decimal::ZERO);
        } else {
            let pnl_per_unit = exit_price - trade.entry_price;
            let r_multiple = match direction {
                TradeDirection::Long => pnl_per_unit / risk_per_unit,
                TradeDirection::Short => -pnl_per_unit / risk_per_unit,
            };
            // Classify from the exact value, then round for reporting.
            trade.outcome = Some(classify_outcome(r_multiple));
            trade.r_multiple = Some(r_multiple.round_dp(2));
        }

        if let (Some(system_pnl_r), Some(r_multiple)) = (trade.system_pnl_r, trade.r_multiple) {
            trade.cost_of_discretion_r = Some((system_pnl_r - r_multiple).round_dp(2));
        }
    }
}

/// Normalizes every record in the collection in place.
pub fn normalize_all(trades: &mut [TradeRecord]) {
    for trade in trades {
        normalize(trade);
    }
}

/// Sum of the defined discretion costs over a trade set. Negative totals
/// mean the trader outperformed or matched the mechanical system.
pub fn total_cost_of_discretion(trades: &[TradeRecord]) -> Decimal {
    trades
        .iter()
        .filter_map(|t| t.cost_of_discretion_r)
        .sum()
}

fn classify_validity(trade: &TradeRecord) -> TradeValidity {
    if trade.entry_price <= Decimal::ZERO || trade.stop_loss_price <= Decimal::ZERO {
        return TradeValidity::InvalidPriceData;
    }
    match (trade.exit_price, trade.exit_timestamp) {
        (Some(_), None) | (None, Some(_)) => TradeValidity::MissingExitData,
        (Some(_), Some(exit_timestamp)) if exit_timestamp < trade.entry_timestamp => {
            TradeValidity::MissingExitData
        }
        _ => TradeValidity::Valid,
    }
}

fn derive_direction(trade: &TradeRecord) -> TradeDirection {
    if trade.stop_loss_price != trade.entry_price {
        if trade.stop_loss_price < trade.entry_price {
            TradeDirection::Long
        } else {
            TradeDirection::Short
        }
    } else if let Some(exit_price) = trade.exit_price {
        // Zero-risk stop placement: fall back to which side the exit landed on.
        if exit_price > trade.entry_price {
            TradeDirection::Long
        } else {
            TradeDirection::Short
        }
    } else {
        TradeDirection::Short
    }
}

fn classify_outcome(r_multiple: Decimal) -> TradeOutcome {
    if r_multiple > BREAKEVEN_BAND_R {
        TradeOutcome::Win
    } else if r_multiple < -BREAKEVEN_BAND_R {
        TradeOutcome::Loss
    } else {
        TradeOutcome::Breakeven
    }
}
