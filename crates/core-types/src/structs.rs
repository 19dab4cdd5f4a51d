use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::{
    EmotionalState, MarketEnvironment, TradeDirection, TradeOutcome, TradeValidity,
    TradingSession,
};

/// A single journaled position, open or closed.
///
/// The first block of fields is supplied by the caller and treated as
/// immutable once recorded. The derived block is owned by the analytics
/// normalizer and is recomputed whenever the inputs change; it must never
/// be hand-edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub asset: String,
    pub account_id: Uuid,
    /// Percentage of account equity risked on this trade (e.g., 1.0 for 1%).
    pub risk_percentage: Decimal,
    pub entry_timestamp: DateTime<Utc>,
    pub entry_price: Decimal,
    pub stop_loss_price: Decimal,
    #[serde(default)]
    pub exit_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub exit_price: Option<Decimal>,
    #[serde(default)]
    pub playbook_id: Option<Uuid>,
    /// Self-graded execution discipline, 0-10.
    #[serde(default)]
    pub rule_adherence_score: Option<u8>,
    #[serde(default)]
    pub emotion_pre_trade: Option<EmotionalState>,
    #[serde(default)]
    pub market_environment: Option<MarketEnvironment>,
    #[serde(default)]
    pub time_of_day_session: Option<TradingSession>,
    /// Maximum favorable excursion, in R.
    #[serde(default)]
    pub mfe: Option<Decimal>,
    /// Maximum adverse excursion, in R.
    #[serde(default)]
    pub mae: Option<Decimal>,
    /// The R-multiple a mechanical, rule-following exit would have produced.
    #[serde(default)]
    pub system_pnl_r: Option<Decimal>,
    #[serde(default)]
    pub tags: Vec<String>,

    // --- Derived by the normalizer; recomputed, never hand-edited ---
    #[serde(default)]
    pub direction: Option<TradeDirection>,
    #[serde(default)]
    pub outcome: Option<TradeOutcome>,
    #[serde(default)]
    pub r_multiple: Option<Decimal>,
    #[serde(default)]
    pub trade_duration_ms: Option<i64>,
    /// `system_pnl_r - r_multiple`; negative means the trader outperformed
    /// or matched the mechanical system.
    #[serde(default)]
    pub cost_of_discretion_r: Option<Decimal>,
    #[serde(default)]
    pub validity: TradeValidity,
}

/// The account a trade collection belongs to.
///
/// Only the fields the analytics engine needs are modeled here; broker
/// details and balances live with the external persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub initial_balance: Decimal,
    pub currency: String,
}
