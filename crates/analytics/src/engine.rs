use core_types::{TradeOutcome, TradeRecord};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::report::{MetricValue, PerformanceMetrics};
use crate::streak;

/// A stateless calculator for deriving performance metrics from a trade set.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for reducing a trade collection to metrics.
    ///
    /// The result depends only on the multiset of trades and their field
    /// values, never on input order: the drawdown and streak walks re-sort
    /// by entry timestamp internally. An empty collection yields the
    /// all-zero report, never an error. Records tagged `InvalidPriceData`
    /// carry no R-multiple and therefore drop out of every R-dependent
    /// aggregate while still counting toward `total_trades`.
    pub fn aggregate(&self, trades: &[TradeRecord]) -> PerformanceMetrics {
        let mut report = PerformanceMetrics::new();
        report.total_trades = trades.len();

        if trades.is_empty() {
            return report;
        }

        self.calculate_profitability(trades, &mut report);
        self.calculate_drawdown(trades, &mut report);

        let streaks = streak::streaks(trades);
        report.longest_win_streak = streaks.longest_win;
        report.longest_loss_streak = streaks.longest_loss;

        self.calculate_execution_quality(trades, &mut report);

        debug!(
            total_trades = report.total_trades,
            total_r = %report.total_r,
            "aggregated trade set"
        );
        report
    }

    /// Calculates outcome rates and all R-multiple profitability metrics.
    fn calculate_profitability(&self, trades: &[TradeRecord], report: &mut PerformanceMetrics) {
        let total = Decimal::from(trades.len());

        let winning = trades
            .iter()
            .filter(|t| t.outcome == Some(TradeOutcome::Win))
            .count();
        let losing = trades
            .iter()
            .filter(|t| t.outcome == Some(TradeOutcome::Loss))
            .count();
        let breakeven = trades
            .iter()
            .filter(|t| t.outcome == Some(TradeOutcome::Breakeven))
            .count();

        report.win_rate = Decimal::from(winning) / total * dec!(100);
        report.loss_rate = Decimal::from(losing) / total * dec!(100);
        report.breakeven_rate = Decimal::from(breakeven) / total * dec!(100);

        report.total_r = trades.iter().filter_map(|t| t.r_multiple).sum();
        report.avg_r = report.total_r / total;

        report.gross_profit_r = trades
            .iter()
            .filter(|t| t.outcome == Some(TradeOutcome::Win))
            .filter_map(|t| t.r_multiple)
            .sum();
        report.gross_loss_r = trades
            .iter()
            .filter(|t| t.outcome == Some(TradeOutcome::Loss))
            .filter_map(|t| t.r_multiple)
            .sum::<Decimal>()
            .abs();

        report.profit_factor = if report.gross_loss_r > Decimal::ZERO {
            MetricValue::Finite(report.gross_profit_r / report.gross_loss_r)
        } else if report.gross_profit_r > Decimal::ZERO {
            MetricValue::Unbounded
        } else {
            MetricValue::ZERO
        };

        if winning > 0 {
            report.avg_win_r = report.gross_profit_r / Decimal::from(winning);
        }
        if losing > 0 {
            report.avg_loss_r = report.gross_loss_r / Decimal::from(losing);
        }

        report.expectancy = (report.win_rate / dec!(100)) * report.avg_win_r
            - (report.loss_rate / dec!(100)) * report.avg_loss_r;
    }

    /// Calculates the maximum peak-to-trough decline of the cumulative
    /// R-multiple curve, as a percentage of the peak.
    fn calculate_drawdown(&self, trades: &[TradeRecord], report: &mut PerformanceMetrics) {
        let mut ordered: Vec<&TradeRecord> = trades.iter().collect();
        ordered.sort_by_key(|t| t.entry_timestamp);

        let mut cumulative = Decimal::ZERO;
        let mut peak = Decimal::ZERO;
        let mut max_drawdown = Decimal::ZERO;

        for r_multiple in ordered.iter().filter_map(|t| t.r_multiple) {
            cumulative += r_multiple;
            if cumulative > peak {
                peak = cumulative;
            }
            let drawdown = if peak > Decimal::ZERO {
                (peak - cumulative) / peak * dec!(100)
            } else {
                Decimal::ZERO
            };
            if drawdown > max_drawdown {
                max_drawdown = drawdown;
            }
        }

        report.max_drawdown_r = max_drawdown;
    }

    /// Calculates discipline and exit-quality averages.
    ///
    /// Trades without a rule adherence score are excluded from the mean,
    /// not treated as zero. Exit efficiency measures how much of the
    /// favorable excursion a winner captured, so only winning trades with
    /// a positive MFE contribute.
    fn calculate_execution_quality(&self, trades: &[TradeRecord], report: &mut PerformanceMetrics) {
        let adherence_scores: Vec<Decimal> = trades
            .iter()
            .filter_map(|t| t.rule_adherence_score)
            .map(Decimal::from)
            .collect();
        if !adherence_scores.is_empty() {
            report.avg_rule_adherence =
                adherence_scores.iter().sum::<Decimal>() / Decimal::from(adherence_scores.len());
        }

        let efficiencies: Vec<Decimal> = trades
            .iter()
            .filter(|t| t.outcome == Some(TradeOutcome::Win))
            .filter_map(|t| match (t.r_multiple, t.mfe) {
                (Some(r), Some(mfe)) if r > Decimal::ZERO && mfe > Decimal::ZERO => {
                    Some(r / mfe * dec!(100))
                }
                _ => None,
            })
            .collect();
        if !efficiencies.is_empty() {
            report.avg_exit_efficiency =
                efficiencies.iter().sum::<Decimal>() / Decimal::from(efficiencies.len());
        }
    }
}

/// Mean of the defined maximum favorable excursions over a trade set.
pub fn avg_mfe(trades: &[TradeRecord]) -> Decimal {
    mean(trades.iter().filter_map(|t| t.mfe))
}

/// Mean of the defined maximum adverse excursions over a trade set.
pub fn avg_mae(trades: &[TradeRecord]) -> Decimal {
    mean(trades.iter().filter_map(|t| t.mae))
}

fn mean(values: impl Iterator<Item = Decimal>) -> Decimal {
    let values: Vec<Decimal> = values.collect();
    if values.is_empty() {
        return Decimal::ZERO;
    }
    values.iter().sum::<Decimal>() / Decimal::from(values.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize;
    use crate::test_support::{raw_trade, trade_with_r};
    use rust_decimal_macros::dec;

    #[test]
    fn empty_set_yields_all_zero_report() {
        let report = AnalyticsEngine::new().aggregate(&[]);
        assert_eq!(report, PerformanceMetrics::new());
    }

    #[test]
    fn two_wins_one_loss_scenario() {
        let trades = vec![
            trade_with_r(dec!(2), 0),
            trade_with_r(dec!(1), 1),
            trade_with_r(dec!(-1), 2),
        ];
        let report = AnalyticsEngine::new().aggregate(&trades);

        assert_eq!(report.total_trades, 3);
        assert_eq!(report.total_r, dec!(2.00));
        assert_eq!(report.avg_r.round_dp(2), dec!(0.67));
        assert_eq!(report.win_rate.round_dp(1), dec!(66.7));
        assert_eq!(report.profit_factor, MetricValue::Finite(dec!(3)));
        assert_eq!(report.avg_win_r, dec!(1.5));
        assert_eq!(report.avg_loss_r, dec!(1));
    }

    #[test]
    fn outcome_rates_sum_to_one_hundred() {
        let trades = vec![
            trade_with_r(dec!(2), 0),
            trade_with_r(dec!(0), 1),
            trade_with_r(dec!(-1), 2),
            trade_with_r(dec!(0.5), 3),
        ];
        let report = AnalyticsEngine::new().aggregate(&trades);
        let sum = report.win_rate + report.loss_rate + report.breakeven_rate;
        assert_eq!(sum, dec!(100));
    }

    #[test]
    fn profit_factor_unbounded_iff_no_losses_and_some_profit() {
        let winners_only = vec![trade_with_r(dec!(1), 0), trade_with_r(dec!(2), 1)];
        let report = AnalyticsEngine::new().aggregate(&winners_only);
        assert!(report.profit_factor.is_unbounded());

        let breakeven_only = vec![trade_with_r(dec!(0), 0)];
        let report = AnalyticsEngine::new().aggregate(&breakeven_only);
        assert_eq!(report.profit_factor, MetricValue::ZERO);
    }

    #[test]
    fn drawdown_walk_over_known_curve() {
        // Cumulative walk 1, 2, 1, 3, 0 against peaks 1, 2, 2, 3, 3
        // yields drawdowns 0, 0, 50, 0, 100.
        let trades = vec![
            trade_with_r(dec!(1), 0),
            trade_with_r(dec!(1), 1),
            trade_with_r(dec!(-1), 2),
            trade_with_r(dec!(2), 3),
            trade_with_r(dec!(-3), 4),
        ];
        let report = AnalyticsEngine::new().aggregate(&trades);
        assert_eq!(report.max_drawdown_r, dec!(100));
    }

    #[test]
    fn strictly_rising_curve_has_zero_drawdown() {
        let trades = vec![
            trade_with_r(dec!(1), 0),
            trade_with_r(dec!(0.5), 1),
            trade_with_r(dec!(2), 2),
        ];
        let report = AnalyticsEngine::new().aggregate(&trades);
        assert_eq!(report.max_drawdown_r, Decimal::ZERO);
    }

    #[test]
    fn streaks_never_exceed_total_trades() {
        let trades = vec![
            trade_with_r(dec!(1), 0),
            trade_with_r(dec!(1), 1),
            trade_with_r(dec!(-1), 2),
        ];
        let report = AnalyticsEngine::new().aggregate(&trades);
        assert!(report.longest_win_streak + report.longest_loss_streak <= report.total_trades);
        assert_eq!(report.longest_win_streak, 2);
        assert_eq!(report.longest_loss_streak, 1);
    }

    #[test]
    fn unscored_trades_are_excluded_from_adherence_mean() {
        let mut scored = trade_with_r(dec!(1), 0);
        scored.rule_adherence_score = Some(8);
        let mut also_scored = trade_with_r(dec!(-1), 1);
        also_scored.rule_adherence_score = Some(6);
        let unscored = trade_with_r(dec!(2), 2);

        let report = AnalyticsEngine::new().aggregate(&[scored, also_scored, unscored]);
        assert_eq!(report.avg_rule_adherence, dec!(7));
    }

    #[test]
    fn exit_efficiency_uses_winners_with_positive_mfe() {
        let mut full_capture = trade_with_r(dec!(2), 0);
        full_capture.mfe = Some(dec!(2));
        let mut half_capture = trade_with_r(dec!(1), 1);
        half_capture.mfe = Some(dec!(2));
        // Losers never contribute, whatever their excursion.
        let mut loser = trade_with_r(dec!(-1), 2);
        loser.mfe = Some(dec!(1.5));

        let report = AnalyticsEngine::new().aggregate(&[full_capture, half_capture, loser]);
        assert_eq!(report.avg_exit_efficiency, dec!(75));
    }

    #[test]
    fn invalid_price_data_counts_in_total_but_not_in_r_aggregates() {
        let mut invalid = raw_trade(dec!(-1), dec!(95));
        normalize::normalize(&mut invalid);
        let trades = vec![invalid, trade_with_r(dec!(2), 1)];

        let report = AnalyticsEngine::new().aggregate(&trades);
        assert_eq!(report.total_trades, 2);
        assert_eq!(report.total_r, dec!(2.00));
        assert_eq!(report.win_rate, dec!(50));
    }

    #[test]
    fn mfe_and_mae_means_skip_undefined_values() {
        let mut first = trade_with_r(dec!(1), 0);
        first.mfe = Some(dec!(2));
        first.mae = Some(dec!(0.5));
        let second = trade_with_r(dec!(1), 1);

        let trades = vec![first, second];
        assert_eq!(avg_mfe(&trades), dec!(2));
        assert_eq!(avg_mae(&trades), dec!(0.5));
    }
}
