//! Candle series with derived indicator columns.
//!
//! Derived columns are aligned index-for-index with the candles. Values at
//! indices below `startup_window` are warmup and every checked accessor refuses
//! to return them.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::StrategyConfig;
use crate::domain::Candle;
use crate::error::EngineError;
use crate::indicators::{closes, delta_of_series, macd_lines, rsi_of_series};

/// Derived per-index indicator columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorColumns {
    pub macd: Vec<f64>,
    pub macd_signal: Vec<f64>,
    pub macd_hist: Vec<f64>,
    pub macd_hist_delta: Vec<f64>,
    pub rsi: Vec<f64>,
}

impl IndicatorColumns {
    fn lens(&self) -> [(&'static str, usize); 5] {
        [
            ("macd", self.macd.len()),
            ("macd_signal", self.macd_signal.len()),
            ("macd_hist", self.macd_hist.len()),
            ("macd_hist_delta", self.macd_hist_delta.len()),
            ("rsi", self.rsi.len()),
        ]
    }
}

/// All indicator fields at one index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub index: usize,
    pub macd: f64,
    pub macd_signal: f64,
    pub macd_hist: f64,
    pub macd_hist_delta: f64,
    pub rsi: f64,
}

/// Periods needed to recompute the derived columns after an append.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Periods {
    fast: usize,
    slow: usize,
    signal: usize,
    rsi: usize,
}

/// Ordered candle history (most recent last) plus derived indicators.
#[derive(Debug, Clone)]
pub struct CandleSeries {
    candles: Vec<Candle>,
    columns: IndicatorColumns,
    startup_window: usize,
    periods: Option<Periods>,
}

/// Compute the indicator-augmented series for raw candles.
pub fn compute_indicators(candles: Vec<Candle>, config: &StrategyConfig) -> CandleSeries {
    CandleSeries::compute(candles, config)
}

impl CandleSeries {
    pub fn compute(candles: Vec<Candle>, config: &StrategyConfig) -> Self {
        let periods = Periods {
            fast: config.macd.fast_period(),
            slow: config.macd.slow_period(),
            signal: config.macd.signal_period(),
            rsi: config.rsi_period,
        };
        let columns = derive_columns(&candles, periods);
        Self {
            candles,
            columns,
            startup_window: config.startup_window,
            periods: Some(periods),
        }
    }

    /// Empty series ready for `push`.
    pub fn empty(config: &StrategyConfig) -> Self {
        Self::compute(Vec::new(), config)
    }

    /// Build a series from caller-supplied derived columns.
    ///
    /// Such a series is a fixed snapshot: `push` is rejected because the
    /// parameters that produced the columns are unknown.
    pub fn with_indicators(
        candles: Vec<Candle>,
        columns: IndicatorColumns,
        startup_window: usize,
    ) -> Result<Self, EngineError> {
        for (name, len) in columns.lens() {
            if len != candles.len() {
                return Err(EngineError::InvalidSeries(format!(
                    "column '{name}' has {len} values for {} candles",
                    candles.len()
                )));
            }
        }
        Ok(Self {
            candles,
            columns,
            startup_window,
            periods: None,
        })
    }

    /// Append a candle and recompute every derived column.
    pub fn push(&mut self, candle: Candle) -> Result<(), EngineError> {
        let periods = self.periods.ok_or_else(|| {
            EngineError::InvalidSeries("series built from supplied columns is read-only".into())
        })?;
        self.candles.push(candle);
        self.columns = derive_columns(&self.candles, periods);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn startup_window(&self) -> usize {
        self.startup_window
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn columns(&self) -> &IndicatorColumns {
        &self.columns
    }

    pub fn last_index(&self) -> Option<usize> {
        self.candles.len().checked_sub(1)
    }

    /// True once the latest index and the `lookback` indices before it all
    /// carry defined indicators.
    pub fn has_history(&self, lookback: usize) -> bool {
        self.candles.len() > self.startup_window + lookback
    }

    pub fn ensure_history(&self, lookback: usize) -> Result<(), EngineError> {
        if self.has_history(lookback) {
            Ok(())
        } else {
            Err(EngineError::InsufficientHistory {
                required: self.startup_window + lookback + 1,
                available: self.candles.len(),
            })
        }
    }

    /// True when `index` is past the warmup and inside the series.
    pub fn is_defined(&self, index: usize) -> bool {
        index >= self.startup_window && index < self.candles.len()
    }

    fn value(&self, field: &'static str, column: &[f64], index: usize) -> Result<f64, EngineError> {
        let missing = EngineError::MissingIndicatorData { field, index };
        if !self.is_defined(index) {
            return Err(missing);
        }
        match column.get(index) {
            Some(v) if !v.is_nan() => Ok(*v),
            _ => Err(missing),
        }
    }

    pub fn macd(&self, index: usize) -> Result<f64, EngineError> {
        self.value("macd", &self.columns.macd, index)
    }

    pub fn macd_signal(&self, index: usize) -> Result<f64, EngineError> {
        self.value("macd_signal", &self.columns.macd_signal, index)
    }

    pub fn macd_hist(&self, index: usize) -> Result<f64, EngineError> {
        self.value("macd_hist", &self.columns.macd_hist, index)
    }

    pub fn macd_hist_delta(&self, index: usize) -> Result<f64, EngineError> {
        self.value("macd_hist_delta", &self.columns.macd_hist_delta, index)
    }

    pub fn rsi(&self, index: usize) -> Result<f64, EngineError> {
        self.value("rsi", &self.columns.rsi, index)
    }

    /// Histogram `back` candles before `index`.
    pub fn macd_hist_back(&self, index: usize, back: usize) -> Result<f64, EngineError> {
        let earlier = index
            .checked_sub(back)
            .ok_or(EngineError::MissingIndicatorData {
                field: "macd_hist",
                index: 0,
            })?;
        self.macd_hist(earlier)
    }

    pub fn snapshot(&self, index: usize) -> Result<IndicatorSnapshot, EngineError> {
        Ok(IndicatorSnapshot {
            index,
            macd: self.macd(index)?,
            macd_signal: self.macd_signal(index)?,
            macd_hist: self.macd_hist(index)?,
            macd_hist_delta: self.macd_hist_delta(index)?,
            rsi: self.rsi(index)?,
        })
    }
}

fn derive_columns(candles: &[Candle], periods: Periods) -> IndicatorColumns {
    let close_prices = closes(candles);
    let lines = macd_lines(&close_prices, periods.fast, periods.slow, periods.signal);
    let macd_hist_delta = delta_of_series(&lines.histogram);
    debug!(
        candles = candles.len(),
        fast = periods.fast,
        slow = periods.slow,
        signal = periods.signal,
        "recomputed indicators"
    );
    IndicatorColumns {
        macd: lines.macd,
        macd_signal: lines.signal,
        macd_hist: lines.histogram,
        macd_hist_delta,
        rsi: rsi_of_series(&close_prices, periods.rsi),
    }
}
