//! Engine error taxonomy.
//!
//! Every variant except `MissingIndicatorData` is recoverable: the caller treats
//! it as "no decision" for this cycle. Missing indicator data at evaluator entry
//! means the caller skipped its lookback guarantee, and silently returning "no
//! exit" there could mask a real exit condition.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("insufficient history: need more than {required} candles, have {available}")]
    InsufficientHistory { required: usize, available: usize },

    #[error("indicator '{field}' is undefined at index {index}")]
    MissingIndicatorData { field: &'static str, index: usize },

    #[error("invalid position: {0}")]
    InvalidPosition(String),

    #[error("invalid series: {0}")]
    InvalidSeries(String),
}

impl EngineError {
    /// True when the caller may treat this error as "no decision".
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::MissingIndicatorData { .. })
    }
}
