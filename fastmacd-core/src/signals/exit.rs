//! Advisory trend-exit flags.
//!
//! `Long` means "exit a long": MACD below signal with a negative histogram.
//! `Short` means "exit a short": MACD above signal with a positive histogram.
//! These are weaker than the adaptive exit evaluator, which carries a reason.

use super::Signal;
use crate::series::CandleSeries;

pub fn exit_signal(series: &CandleSeries, index: usize) -> Signal {
    let (Ok(macd), Ok(signal), Ok(hist)) = (
        series.macd(index),
        series.macd_signal(index),
        series.macd_hist(index),
    ) else {
        return Signal::None;
    };

    if macd < signal && hist < 0.0 {
        Signal::Long
    } else if macd > signal && hist > 0.0 {
        Signal::Short
    } else {
        Signal::None
    }
}

pub fn populate_exit_signals(series: &CandleSeries) -> Vec<Signal> {
    (0..series.len()).map(|i| exit_signal(series, i)).collect()
}
