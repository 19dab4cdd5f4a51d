use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Rolling window size must be at least 1 trade, got {0}")]
    InvalidWindowSize(usize),
}
