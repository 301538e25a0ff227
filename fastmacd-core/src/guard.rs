//! Reversal guard: gates opposite-direction re-entry after an emergency stop.
//!
//! State machine: `Idle` -> `Armed { blocked_side, trigger_index }` when the
//! exit evaluator sees the emergency loss threshold breached; `Armed` -> `Idle`
//! lazily, on the first confirmation check more than `REVERSAL_WINDOW` candles
//! after the trigger. One guard per instrument; nothing here is global.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::PositionSide;

/// Candles after the trigger during which the guard stays in force.
pub const REVERSAL_WINDOW: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GuardState {
    #[default]
    Idle,
    /// `blocked_side` is the side that was stopped out; entries on the
    /// opposite side need the stricter confirmation.
    Armed {
        blocked_side: PositionSide,
        trigger_index: usize,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReversalGuard {
    state: GuardState,
}

impl ReversalGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.state, GuardState::Armed { .. })
    }

    pub fn blocked_side(&self) -> Option<PositionSide> {
        match self.state {
            GuardState::Armed { blocked_side, .. } => Some(blocked_side),
            GuardState::Idle => None,
        }
    }

    /// Record a forced stop of `side` at `trigger_index`.
    ///
    /// Returns false when the guard is already armed for exactly this side and
    /// index, so repeated evaluation of the same candle arms once.
    pub fn arm(&mut self, side: PositionSide, trigger_index: usize) -> bool {
        let next = GuardState::Armed {
            blocked_side: side,
            trigger_index,
        };
        if self.state == next {
            return false;
        }
        info!(blocked_side = %side, trigger_index, "reversal guard armed");
        self.state = next;
        true
    }

    /// True while armed and no more than `REVERSAL_WINDOW` candles past the trigger.
    pub fn within_window(&self, current_index: usize) -> bool {
        match self.state {
            GuardState::Armed { trigger_index, .. } => {
                current_index.saturating_sub(trigger_index) <= REVERSAL_WINDOW
            }
            GuardState::Idle => false,
        }
    }

    /// Return to `Idle` if the window has elapsed. Returns true when it expired.
    pub fn expire_if_elapsed(&mut self, current_index: usize) -> bool {
        if !self.is_armed() || self.within_window(current_index) {
            return false;
        }
        info!(current_index, "reversal guard expired");
        self.reset();
        true
    }

    /// Does an entry on `side` at `current_index` need the strict confirmation?
    pub fn gates(&self, side: PositionSide, current_index: usize) -> bool {
        self.within_window(current_index) && self.blocked_side() == Some(side.opposite())
    }

    /// Drop any armed state.
    pub fn reset(&mut self) {
        self.state = GuardState::Idle;
    }
}
