//! MACD crossover entry signal.
//!
//! Fires Long when MACD crosses above its signal line with a positive
//! histogram. Fires Short on the mirrored bearish crossover. The two can never
//! fire together: a crossover has a single direction.

use super::Signal;
use crate::series::CandleSeries;

/// Entry flag at `index`. `Signal::None` when `index` or `index - 1` is warmup.
pub fn entry_signal(series: &CandleSeries, index: usize) -> Signal {
    if index == 0 {
        return Signal::None;
    }
    let (Ok(macd), Ok(signal), Ok(hist), Ok(macd_prev), Ok(signal_prev)) = (
        series.macd(index),
        series.macd_signal(index),
        series.macd_hist(index),
        series.macd(index - 1),
        series.macd_signal(index - 1),
    ) else {
        return Signal::None;
    };

    // Bullish: above now, at-or-below before.
    if macd > signal && macd_prev <= signal_prev && hist > 0.0 {
        return Signal::Long;
    }

    // Bearish: below now, at-or-above before.
    if macd < signal && macd_prev >= signal_prev && hist < 0.0 {
        return Signal::Short;
    }

    Signal::None
}

/// Entry flags for every index of the series.
pub fn populate_entry_signals(series: &CandleSeries) -> Vec<Signal> {
    (0..series.len()).map(|i| entry_signal(series, i)).collect()
}
