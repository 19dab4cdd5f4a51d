pub mod enums;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{
    EmotionalState, MarketEnvironment, TradeDirection, TradeOutcome, TradeValidity,
    TradingSession,
};
pub use structs::{Account, TradeRecord};
