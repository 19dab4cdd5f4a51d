use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeDirection {
    Long,
    Short,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeOutcome {
    Win,
    Loss,
    Breakeven,
}

/// Per-record data quality tag assigned during normalization.
///
/// Malformed records are never rejected outright; they are tagged so that
/// aggregation can skip them for the specific metrics they would corrupt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeValidity {
    #[default]
    Valid,
    /// Non-positive entry or stop-loss price; excluded from R-multiple aggregates.
    InvalidPriceData,
    /// Exit price without exit timestamp or vice versa; realized-outcome fields stay undefined.
    MissingExitData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmotionalState {
    Calm,
    Anxious,
    #[serde(rename = "FOMO")]
    Fomo,
    Greedy,
    Angry,
    Hopeful,
    Disciplined,
    Frustrated,
    Confident,
    Uncertain,
    Bored,
}

impl EmotionalState {
    pub const ALL: [EmotionalState; 11] = [
        EmotionalState::Calm,
        EmotionalState::Anxious,
        EmotionalState::Fomo,
        EmotionalState::Greedy,
        EmotionalState::Angry,
        EmotionalState::Hopeful,
        EmotionalState::Disciplined,
        EmotionalState::Frustrated,
        EmotionalState::Confident,
        EmotionalState::Uncertain,
        EmotionalState::Bored,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionalState::Calm => "Calm",
            EmotionalState::Anxious => "Anxious",
            EmotionalState::Fomo => "FOMO",
            EmotionalState::Greedy => "Greedy",
            EmotionalState::Angry => "Angry",
            EmotionalState::Hopeful => "Hopeful",
            EmotionalState::Disciplined => "Disciplined",
            EmotionalState::Frustrated => "Frustrated",
            EmotionalState::Confident => "Confident",
            EmotionalState::Uncertain => "Uncertain",
            EmotionalState::Bored => "Bored",
        }
    }
}

impl std::fmt::Display for EmotionalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketEnvironment {
    #[serde(rename = "Trending Up")]
    TrendingUp,
    #[serde(rename = "Trending Down")]
    TrendingDown,
    #[serde(rename = "Ranging/Choppy")]
    RangingChoppy,
    #[serde(rename = "Volatile Expansion")]
    VolatileExpansion,
    #[serde(rename = "Low Volatility Compression")]
    LowVolatilityCompression,
}

impl MarketEnvironment {
    pub const ALL: [MarketEnvironment; 5] = [
        MarketEnvironment::TrendingUp,
        MarketEnvironment::TrendingDown,
        MarketEnvironment::RangingChoppy,
        MarketEnvironment::VolatileExpansion,
        MarketEnvironment::LowVolatilityCompression,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MarketEnvironment::TrendingUp => "Trending Up",
            MarketEnvironment::TrendingDown => "Trending Down",
            MarketEnvironment::RangingChoppy => "Ranging/Choppy",
            MarketEnvironment::VolatileExpansion => "Volatile Expansion",
            MarketEnvironment::LowVolatilityCompression => "Low Volatility Compression",
        }
    }
}

impl std::fmt::Display for MarketEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradingSession {
    #[serde(rename = "Pre-Market")]
    PreMarket,
    #[serde(rename = "London Open")]
    LondonOpen,
    #[serde(rename = "London Lunch")]
    LondonLunch,
    #[serde(rename = "NY Open")]
    NyOpen,
    #[serde(rename = "NY Lunch")]
    NyLunch,
    #[serde(rename = "NY Close")]
    NyClose,
    #[serde(rename = "Asia Session")]
    AsiaSession,
    #[serde(rename = "Overnight/Other")]
    Overnight,
}

impl TradingSession {
    pub const ALL: [TradingSession; 8] = [
        TradingSession::PreMarket,
        TradingSession::LondonOpen,
        TradingSession::LondonLunch,
        TradingSession::NyOpen,
        TradingSession::NyLunch,
        TradingSession::NyClose,
        TradingSession::AsiaSession,
        TradingSession::Overnight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TradingSession::PreMarket => "Pre-Market",
            TradingSession::LondonOpen => "London Open",
            TradingSession::LondonLunch => "London Lunch",
            TradingSession::NyOpen => "NY Open",
            TradingSession::NyLunch => "NY Lunch",
            TradingSession::NyClose => "NY Close",
            TradingSession::AsiaSession => "Asia Session",
            TradingSession::Overnight => "Overnight/Other",
        }
    }
}

impl std::fmt::Display for TradingSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
