//! Leverage selection. The policy is static: every entry gets the same multiplier.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::PositionSide;

/// Leverage applied to every entry.
pub const FIXED_LEVERAGE: f64 = 3.0;

/// Context an execution layer supplies when asking for leverage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeverageRequest {
    pub pair: String,
    pub current_time: DateTime<Utc>,
    pub current_rate: f64,
    pub proposed_leverage: f64,
    pub max_leverage: f64,
    pub entry_tag: Option<String>,
    pub side: PositionSide,
}

/// Always `FIXED_LEVERAGE`; the request fields are accepted and ignored.
pub fn select_leverage(_request: &LeverageRequest) -> f64 {
    FIXED_LEVERAGE
}
