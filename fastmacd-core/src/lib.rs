//! FastMACD Core: the signal/decision engine for single-instrument MACD trading.
//!
//! This crate contains:
//! - Domain types (candles, open-position snapshots, sides)
//! - Indicator calculator (MACD line, signal, histogram, histogram delta, RSI)
//! - Entry and advisory exit signal generators
//! - Reversal guard armed by emergency stops
//! - Adaptive exit evaluator (emergency stop, profit tiers, drawdown, small profit)
//! - Entry confirmation gate and the static leverage selector
//! - Per-instrument session tying the above together
//!
//! Order execution, exchange connectivity, data storage and position
//! bookkeeping live outside this crate.

pub mod config;
pub mod confirm;
pub mod domain;
pub mod error;
pub mod exit;
pub mod guard;
pub mod indicators;
pub mod leverage;
pub mod series;
pub mod session;
pub mod signals;
pub mod synthetic;

pub use config::{ConfigError, MacdParams, StrategyConfig, TradingMode};
pub use confirm::confirm_entry;
pub use domain::{Candle, OpenPosition, PositionSide};
pub use error::EngineError;
pub use exit::{evaluate_exit, ExitDecision, ExitKind};
pub use guard::{GuardState, ReversalGuard, REVERSAL_WINDOW};
pub use leverage::{select_leverage, LeverageRequest, FIXED_LEVERAGE};
pub use series::{compute_indicators, CandleSeries, IndicatorColumns, IndicatorSnapshot};
pub use session::StrategySession;
pub use signals::{entry_signal, exit_signal, Signal};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: everything a multi-instrument runner would move
    /// across threads is Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<Candle>();
        require_sync::<Candle>();
        require_send::<OpenPosition>();
        require_sync::<OpenPosition>();
        require_send::<CandleSeries>();
        require_sync::<CandleSeries>();
        require_send::<ReversalGuard>();
        require_sync::<ReversalGuard>();
        require_send::<ExitDecision>();
        require_sync::<ExitDecision>();
        require_send::<StrategyConfig>();
        require_sync::<StrategyConfig>();
        require_send::<StrategySession>();
        require_sync::<StrategySession>();
        require_send::<EngineError>();
        require_sync::<EngineError>();
    }

    /// Architecture contract: signal generators see only the series.
    ///
    /// Neither generator takes a position or a guard; if one ever did, this
    /// stops compiling.
    #[test]
    fn signal_generators_take_no_position_state() {
        fn _check(series: &CandleSeries) -> (Signal, Signal) {
            (entry_signal(series, 0), exit_signal(series, 0))
        }
    }

    /// Architecture contract: the guard is passed in explicitly, never global.
    #[test]
    fn guard_is_an_explicit_parameter() {
        fn _check(
            position: &OpenPosition,
            series: &CandleSeries,
            guard: &mut ReversalGuard,
        ) -> (Result<Option<ExitDecision>, EngineError>, bool) {
            let now = chrono::Utc::now();
            let exit = evaluate_exit(position, series, now, guard);
            let confirmed = confirm_entry(PositionSide::Long, series, 0, guard);
            (exit, confirmed)
        }
    }
}
