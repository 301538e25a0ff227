//! Signal generation: MACD crossover entries and trend-exit flags.
//!
//! Signals are position-agnostic: they read only the indicator series, never
//! an open position or the reversal guard. Both generators are pure functions.

pub mod entry;
pub mod exit;

pub use entry::{entry_signal, populate_entry_signals};
pub use exit::{exit_signal, populate_exit_signals};

use serde::{Deserialize, Serialize};

use crate::domain::PositionSide;

/// Per-candle directional flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    #[default]
    None,
    Long,
    Short,
}

impl Signal {
    pub fn side(self) -> Option<PositionSide> {
        match self {
            Self::None => None,
            Self::Long => Some(PositionSide::Long),
            Self::Short => Some(PositionSide::Short),
        }
    }

    pub fn is_none(self) -> bool {
        self == Self::None
    }
}

impl From<PositionSide> for Signal {
    fn from(side: PositionSide) -> Self {
        match side {
            PositionSide::Long => Self::Long,
            PositionSide::Short => Self::Short,
        }
    }
}
