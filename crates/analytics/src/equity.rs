//! Chronological cumulative equity curves.

use core_types::TradeRecord;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Unit of the cumulative value axis.
///
/// Currency mode carries the account context it needs: the curve starts at
/// the initial balance and each trade contributes its R-multiple scaled by
/// the dollar risk taken (`initial_balance * risk_percentage / 100`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EquityMode {
    RMultiple,
    Currency { initial_balance: Decimal },
}

/// One point of the equity curve, ordered by chronological trade sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    /// 1-based trade ordinal within the curve.
    pub index: usize,
    pub value: Decimal,
    /// Distance below the running peak, `cumulative - peak`. Zero at a new
    /// peak, negative in a drawdown, in both modes.
    pub drawdown: Decimal,
    pub is_currency: bool,
}

/// Builds the full equity curve for a trade set.
///
/// Trades are sorted by entry timestamp; one point is emitted per trade
/// with a defined R-multiple. The curve is regenerated in full on every
/// call; there is no incremental state.
pub fn build_curve(trades: &[TradeRecord], mode: EquityMode) -> Vec<EquityPoint> {
    let mut ordered: Vec<&TradeRecord> = trades.iter().collect();
    ordered.sort_by_key(|t| t.entry_timestamp);

    let is_currency = matches!(mode, EquityMode::Currency { .. });
    let mut cumulative = match mode {
        EquityMode::RMultiple => Decimal::ZERO,
        EquityMode::Currency { initial_balance } => initial_balance,
    };
    let mut peak = cumulative;

    let mut curve = Vec::new();
    for trade in ordered {
        let Some(r_multiple) = trade.r_multiple else {
            continue;
        };
        match mode {
            EquityMode::RMultiple => cumulative += r_multiple,
            EquityMode::Currency { initial_balance } => {
                let risk_amount = initial_balance * trade.risk_percentage / dec!(100);
                cumulative += r_multiple * risk_amount;
            }
        }
        if cumulative > peak {
            peak = cumulative;
        }
        curve.push(EquityPoint {
            index: curve.len() + 1,
            value: cumulative.round_dp(2),
            drawdown: (cumulative - peak).round_dp(2),
            is_currency,
        });
    }
    curve
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::trade_with_r;
    use rust_decimal_macros::dec;

    #[test]
    fn r_mode_accumulates_from_zero() {
        let trades = vec![
            trade_with_r(dec!(1), 0),
            trade_with_r(dec!(-0.5), 1),
            trade_with_r(dec!(2), 2),
        ];
        let curve = build_curve(&trades, EquityMode::RMultiple);

        assert_eq!(curve.len(), 3);
        assert_eq!(curve[0].index, 1);
        assert_eq!(curve[0].value, dec!(1.00));
        assert_eq!(curve[1].value, dec!(0.50));
        assert_eq!(curve[1].drawdown, dec!(-0.50));
        assert_eq!(curve[2].value, dec!(2.50));
        assert_eq!(curve[2].drawdown, dec!(0.00));
        assert!(!curve[0].is_currency);
    }

    #[test]
    fn currency_mode_scales_by_dollar_risk() {
        // 1% risk on a 10,000 account risks 100 per trade.
        let trades = vec![trade_with_r(dec!(2), 0), trade_with_r(dec!(-1), 1)];
        let curve = build_curve(
            &trades,
            EquityMode::Currency {
                initial_balance: dec!(10000),
            },
        );

        assert_eq!(curve[0].value, dec!(10200.00));
        assert_eq!(curve[1].value, dec!(10100.00));
        assert_eq!(curve[1].drawdown, dec!(-100.00));
        assert!(curve[0].is_currency);
    }

    #[test]
    fn input_order_does_not_change_the_curve() {
        let mut trades = vec![trade_with_r(dec!(1), 0), trade_with_r(dec!(-1), 1)];
        let forward = build_curve(&trades, EquityMode::RMultiple);
        trades.reverse();
        let reversed = build_curve(&trades, EquityMode::RMultiple);
        assert_eq!(forward, reversed);
    }

    #[test]
    fn open_trades_emit_no_points() {
        let mut open = trade_with_r(dec!(1), 0);
        open.r_multiple = None;
        let curve = build_curve(&[open], EquityMode::RMultiple);
        assert!(curve.is_empty());
    }
}
