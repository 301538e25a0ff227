//! Moving Average Convergence-Divergence (MACD).
//!
//! - MACD line: EMA(close, fast) - EMA(close, slow)
//! - Signal: EMA(macd, signal), seeded at the first defined MACD value
//! - Histogram: macd - signal
//!
//! Lookback: (slow - 1) for the MACD line, (slow - 1) + (signal - 1) for
//! signal and histogram.

use super::ema::{ema_after_warmup, ema_of_series};

/// All three MACD lines, aligned with the input.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdLines {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

/// Compute all three lines from close prices in one pass.
pub fn macd_lines(closes: &[f64], fast: usize, slow: usize, signal: usize) -> MacdLines {
    let ema_fast = ema_of_series(closes, fast);
    let ema_slow = ema_of_series(closes, slow);
    let macd: Vec<f64> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(f, s)| f - s)
        .collect();
    let signal_line = ema_after_warmup(&macd, signal);
    let histogram = macd
        .iter()
        .zip(&signal_line)
        .map(|(m, s)| m - s)
        .collect();
    MacdLines {
        macd,
        signal: signal_line,
        histogram,
    }
}

/// First difference of a series; NaN at index 0 and wherever either operand is NaN.
pub fn delta_of_series(values: &[f64]) -> Vec<f64> {
    let mut result = vec![f64::NAN; values.len()];
    for i in 1..values.len() {
        result[i] = values[i] - values[i - 1];
    }
    result
}
