//! Shared fixtures for integration tests.

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use fastmacd_core::{Candle, CandleSeries, IndicatorColumns};

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
}

/// Flat one-minute candles at `price`.
pub fn flat_candles(n: usize, price: f64) -> Vec<Candle> {
    (0..n)
        .map(|i| Candle {
            timestamp: t0() + Duration::minutes(i as i64),
            open: price,
            high: price + 0.5,
            low: price - 0.5,
            close: price,
            volume: 1_000.0,
        })
        .collect()
}

/// Candles whose closes follow `closes`.
pub fn candles_from_closes(closes: &[f64]) -> Vec<Candle> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Candle {
                timestamp: t0() + Duration::minutes(i as i64),
                open,
                high: open.max(close) * 1.001,
                low: open.min(close) * 0.999,
                close,
                volume: 1_000.0,
            }
        })
        .collect()
}

/// Series with hand-set MACD/signal lines and RSI; histogram = macd - signal.
pub fn scripted_series(
    macd: &[f64],
    signal: &[f64],
    rsi: &[f64],
    startup_window: usize,
) -> CandleSeries {
    let n = macd.len();
    let hist: Vec<f64> = macd.iter().zip(signal).map(|(m, s)| m - s).collect();
    let mut delta = vec![f64::NAN; n];
    for i in 1..n {
        delta[i] = hist[i] - hist[i - 1];
    }
    let columns = IndicatorColumns {
        macd: macd.to_vec(),
        macd_signal: signal.to_vec(),
        macd_hist: hist,
        macd_hist_delta: delta,
        rsi: rsi.to_vec(),
    };
    CandleSeries::with_indicators(flat_candles(n, 100.0), columns, startup_window)
        .expect("aligned columns")
}

/// Series of `n` candles whose histogram (signal fixed at 0) ends with `tail`.
pub fn hist_tail_series(n: usize, tail: &[f64], startup_window: usize) -> CandleSeries {
    let mut macd = vec![0.0; n];
    macd[n - tail.len()..].copy_from_slice(tail);
    scripted_series(&macd, &vec![0.0; n], &vec![50.0; n], startup_window)
}
