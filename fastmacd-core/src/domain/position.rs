//! Open position snapshot, supplied by the bookkeeping layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Direction of an open position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionSide {
    Long,
    Short,
}

impl PositionSide {
    pub fn opposite(self) -> Self {
        match self {
            Self::Long => Self::Short,
            Self::Short => Self::Long,
        }
    }

    /// +1.0 for long, -1.0 for short. Multiplying a price move by this turns
    /// it into a move in the position's favor.
    pub fn sign(self) -> f64 {
        match self {
            Self::Long => 1.0,
            Self::Short => -1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Long => "long",
            Self::Short => "short",
        }
    }
}

impl std::fmt::Display for PositionSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only snapshot of an open position.
///
/// `max_favorable_price` is the highest price reached while long, or the
/// lowest price reached while short.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenPosition {
    pub side: PositionSide,
    pub open_price: f64,
    pub current_price: f64,
    pub max_favorable_price: f64,
    pub entry_time: DateTime<Utc>,
}

impl OpenPosition {
    pub fn new(
        side: PositionSide,
        open_price: f64,
        current_price: f64,
        max_favorable_price: f64,
        entry_time: DateTime<Utc>,
    ) -> Self {
        Self {
            side,
            open_price,
            current_price,
            max_favorable_price,
            entry_time,
        }
    }

    /// Current profit ratio: `(current - open) / open`, negated for shorts.
    pub fn profit_ratio(&self) -> f64 {
        self.ratio_at(self.current_price)
    }

    /// Best profit ratio seen over the life of the position.
    pub fn max_profit_ratio(&self) -> f64 {
        self.ratio_at(self.max_favorable_price)
    }

    fn ratio_at(&self, price: f64) -> f64 {
        self.side.sign() * (price - self.open_price) / self.open_price
    }

    /// Reject snapshots the evaluator cannot reason about.
    pub fn validate(&self) -> Result<(), EngineError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.open_price) {
            return Err(EngineError::InvalidPosition(format!(
                "open_price must be positive, got {}",
                self.open_price
            )));
        }
        if !positive(self.current_price) {
            return Err(EngineError::InvalidPosition(format!(
                "current_price must be positive, got {}",
                self.current_price
            )));
        }
        if !positive(self.max_favorable_price) {
            return Err(EngineError::InvalidPosition(format!(
                "max_favorable_price must be positive, got {}",
                self.max_favorable_price
            )));
        }
        if self.max_profit_ratio() < 0.0 {
            return Err(EngineError::InvalidPosition(format!(
                "max_favorable_price {} is on the losing side of open_price {} for a {} position",
                self.max_favorable_price, self.open_price, self.side
            )));
        }
        Ok(())
    }
}
