//! Profit-tier giveback ladder.

use serde::{Deserialize, Serialize};

/// Once profit has reached `trigger`, falling back to `floor` is an exit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfitTier {
    pub trigger: f64,
    pub floor: f64,
}

const fn tier(trigger: f64, floor: f64) -> ProfitTier {
    ProfitTier { trigger, floor }
}

/// Tiers ordered from highest trigger to lowest.
pub const PROFIT_TIERS: [ProfitTier; 10] = [
    tier(0.30, 0.25),
    tier(0.25, 0.20),
    tier(0.20, 0.15),
    tier(0.15, 0.10),
    tier(0.12, 0.08),
    tier(0.08, 0.05),
    tier(0.05, 0.03),
    tier(0.03, 0.015),
    tier(0.02, 0.01),
    tier(0.01, 0.005),
];

/// Highest tier whose trigger `profit` has reached, if any.
pub fn select_tier(profit: f64) -> Option<ProfitTier> {
    PROFIT_TIERS.iter().copied().find(|t| profit >= t.trigger)
}
