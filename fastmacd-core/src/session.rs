//! Per-instrument session: one candle series, one reversal guard, one config.
//!
//! Each evaluation cycle runs in a fixed order: append the closed candle
//! (indicators refresh), then query signals, exits and confirmations. Sessions
//! for different instruments share nothing.

use chrono::{DateTime, Utc};

use crate::config::{ConfigError, StrategyConfig};
use crate::confirm::confirm_entry;
use crate::domain::{Candle, OpenPosition, PositionSide};
use crate::error::EngineError;
use crate::exit::{evaluate_exit, ExitDecision};
use crate::guard::ReversalGuard;
use crate::leverage::{select_leverage, LeverageRequest};
use crate::series::CandleSeries;
use crate::signals::{entry_signal, exit_signal, Signal};

#[derive(Debug, Clone)]
pub struct StrategySession {
    config: StrategyConfig,
    series: CandleSeries,
    guard: ReversalGuard,
}

impl StrategySession {
    pub fn new(config: StrategyConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let series = CandleSeries::empty(&config);
        Ok(Self {
            config,
            series,
            guard: ReversalGuard::new(),
        })
    }

    /// Session seeded with history, e.g. the candles fetched at startup.
    pub fn with_candles(config: StrategyConfig, candles: Vec<Candle>) -> Result<Self, ConfigError> {
        config.validate()?;
        let series = CandleSeries::compute(candles, &config);
        Ok(Self {
            config,
            series,
            guard: ReversalGuard::new(),
        })
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    pub fn series(&self) -> &CandleSeries {
        &self.series
    }

    pub fn guard(&self) -> &ReversalGuard {
        &self.guard
    }

    pub fn latest_index(&self) -> Option<usize> {
        self.series.last_index()
    }

    /// Append a closed candle and refresh every indicator.
    pub fn push_candle(&mut self, candle: Candle) -> Result<(), EngineError> {
        self.series.push(candle)
    }

    /// Entry flag at the latest candle, dropped when the trading mode
    /// disallows its direction.
    pub fn entry_signal(&self) -> Signal {
        let Some(index) = self.latest_index() else {
            return Signal::None;
        };
        let signal = entry_signal(&self.series, index);
        match signal.side() {
            Some(side) if !self.config.trading_mode.allows(side) => Signal::None,
            _ => signal,
        }
    }

    /// Advisory trend-exit flag at the latest candle.
    pub fn exit_signal(&self) -> Signal {
        self.latest_index()
            .map_or(Signal::None, |index| exit_signal(&self.series, index))
    }

    pub fn evaluate_exit(
        &mut self,
        position: &OpenPosition,
        now: DateTime<Utc>,
    ) -> Result<Option<ExitDecision>, EngineError> {
        evaluate_exit(position, &self.series, now, &mut self.guard)
    }

    /// Confirmation gate at the latest candle.
    pub fn confirm_entry(&mut self, side: PositionSide) -> bool {
        if !self.config.trading_mode.allows(side) {
            return false;
        }
        let Some(index) = self.latest_index() else {
            return false;
        };
        confirm_entry(side, &self.series, index, &mut self.guard)
    }

    pub fn leverage(&self, request: &LeverageRequest) -> f64 {
        select_leverage(request)
    }
}
