//! Adaptive exit evaluation for one open position.
//!
//! Rules run in a fixed order and the first one that fires wins:
//! 1. emergency stop (also arms the reversal guard on the loss breach alone)
//! 2. profit-tier giveback ladder
//! 3. drawdown-from-peak protection
//! 4. small-profit protection

pub mod evaluator;
pub mod tiers;

pub use evaluator::evaluate_exit;
pub use tiers::{select_tier, ProfitTier, PROFIT_TIERS};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Loss ratio below which the emergency stop is considered.
pub const EMERGENCY_LOSS_RATIO: f64 = -0.02;
/// Peak profit that must be exceeded before drawdown protection applies.
pub const DRAWDOWN_ACTIVATION_RATIO: f64 = 0.10;
/// Fraction of the peak profit that may be given back.
pub const DRAWDOWN_GIVEBACK_FRACTION: f64 = 0.30;
/// Inclusive profit band for small-profit protection.
pub const SMALL_PROFIT_BAND: (f64, f64) = (0.01, 0.02);

/// Which rule produced an exit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExitKind {
    EmergencyStop,
    ProfitTier { trigger: f64, floor: f64 },
    DrawdownProtection { max_profit: f64, giveback: f64 },
    SmallProfitProtection,
}

/// An exit the evaluator wants taken now.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExitDecision {
    pub kind: ExitKind,
    /// Human-readable reason with the thresholds that triggered it.
    pub reason: String,
    pub decided_at: DateTime<Utc>,
    pub profit_ratio: f64,
}

/// Format a ratio as a percentage with two decimals (0.0312 -> "3.12%").
pub(crate) fn pct(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pct_formats_two_decimals() {
        assert_eq!(pct(0.05), "5.00%");
        assert_eq!(pct(-0.0312), "-3.12%");
        assert_eq!(pct(0.004166), "0.42%");
    }

    #[test]
    fn exit_kind_serializes_tagged() {
        let kind = ExitKind::ProfitTier {
            trigger: 0.05,
            floor: 0.03,
        };
        let json = serde_json::to_value(kind).unwrap();
        assert_eq!(json["kind"], "profit_tier");
        assert_eq!(json["floor"], 0.03);
    }
}
