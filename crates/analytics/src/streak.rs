//! Consecutive win/loss streak tracking.

use core_types::{TradeOutcome, TradeRecord};

/// Longest consecutive runs observed over a chronological walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Streaks {
    pub longest_win: usize,
    pub longest_loss: usize,
}

/// Walks the trades in entry-timestamp order and tracks the longest run of
/// consecutive wins and of consecutive losses. A breakeven trade (or a
/// trade with no classified outcome) resets both running counters.
pub fn streaks(trades: &[TradeRecord]) -> Streaks {
    let mut ordered: Vec<&TradeRecord> = trades.iter().collect();
    ordered.sort_by_key(|t| t.entry_timestamp);

    let mut result = Streaks::default();
    let mut current_wins = 0usize;
    let mut current_losses = 0usize;

    for trade in ordered {
        match trade.outcome {
            Some(TradeOutcome::Win) => {
                current_wins += 1;
                current_losses = 0;
                result.longest_win = result.longest_win.max(current_wins);
            }
            Some(TradeOutcome::Loss) => {
                current_losses += 1;
                current_wins = 0;
                result.longest_loss = result.longest_loss.max(current_losses);
            }
            _ => {
                current_wins = 0;
                current_losses = 0;
            }
        }
    }

    result
}
