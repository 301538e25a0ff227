//! Entry and exit signal generation over computed indicator series.
//!
//! 1. Crossovers with a confirming histogram produce entries; nothing else does.
//! 2. No index is both a long and a short entry.
//! 3. Warmup indices never produce signals.

mod common;

use common::{candles_from_closes, scripted_series};
use fastmacd_core::signals::{populate_entry_signals, populate_exit_signals};
use fastmacd_core::{compute_indicators, entry_signal, Signal, StrategyConfig};

fn oscillating_closes(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 100.0 + (i as f64 * 0.2).sin() * 5.0 + (i as f64 * 0.05).cos() * 2.0)
        .collect()
}

#[test]
fn entries_match_crossover_definition() {
    let series = compute_indicators(
        candles_from_closes(&oscillating_closes(300)),
        &StrategyConfig::default(),
    );
    let flags = populate_entry_signals(&series);
    let mut longs = 0;
    let mut shorts = 0;

    for i in (series.startup_window() + 1)..series.len() {
        let macd = series.macd(i).unwrap();
        let signal = series.macd_signal(i).unwrap();
        let hist = series.macd_hist(i).unwrap();
        let macd_prev = series.macd(i - 1).unwrap();
        let signal_prev = series.macd_signal(i - 1).unwrap();

        let bullish = macd > signal && macd_prev <= signal_prev && hist > 0.0;
        let bearish = macd < signal && macd_prev >= signal_prev && hist < 0.0;
        assert!(!(bullish && bearish), "both crossovers at {i}");

        let expected = if bullish {
            longs += 1;
            Signal::Long
        } else if bearish {
            shorts += 1;
            Signal::Short
        } else {
            Signal::None
        };
        assert_eq!(flags[i], expected, "index {i}");
    }

    assert!(longs > 0, "oscillating prices should produce long entries");
    assert!(shorts > 0, "oscillating prices should produce short entries");
}

#[test]
fn warmup_indices_never_signal() {
    let series = compute_indicators(
        candles_from_closes(&oscillating_closes(100)),
        &StrategyConfig::default(),
    );
    let entries = populate_entry_signals(&series);
    let exits = populate_exit_signals(&series);
    for (i, entry) in entries.iter().enumerate().take(series.startup_window() + 1) {
        assert_eq!(*entry, Signal::None, "entry at warmup index {i}");
    }
    for (i, exit) in exits.iter().enumerate().take(series.startup_window()) {
        assert_eq!(*exit, Signal::None, "exit at warmup index {i}");
    }
}

#[test]
fn scripted_crossover_long_then_short() {
    let n = 8;
    let macd = [0.0, 0.0, 0.0, -0.2, 0.3, 0.4, 0.1, -0.3];
    let signal = [0.0, 0.0, 0.0, 0.0, 0.0, 0.1, 0.2, 0.0];
    let series = scripted_series(&macd, &signal, &vec![50.0; n], 2);
    assert_eq!(entry_signal(&series, 4), Signal::Long);
    assert_eq!(entry_signal(&series, 5), Signal::None);
    assert_eq!(entry_signal(&series, 6), Signal::Short);
    assert_eq!(entry_signal(&series, 7), Signal::None);
}

#[test]
fn exit_flags_follow_trend() {
    let n = 5;
    let macd = [0.0, 0.0, 0.5, -0.5, 0.0];
    let signal = [0.0; 5];
    let series = scripted_series(&macd, &signal, &vec![50.0; n], 1);
    assert_eq!(
        populate_exit_signals(&series),
        vec![Signal::None, Signal::None, Signal::Short, Signal::Long, Signal::None]
    );
}

#[test]
fn parameter_change_recomputes_series() {
    let candles = candles_from_closes(&oscillating_closes(120));
    let default = compute_indicators(candles.clone(), &StrategyConfig::default());
    let mut tuned_config = StrategyConfig::default();
    tuned_config.macd.fast_length = 3.0;
    tuned_config.macd.signal_length = 6.0;
    tuned_config.validate().unwrap();
    let tuned = compute_indicators(candles, &tuned_config);
    assert_ne!(default.macd(100).unwrap(), tuned.macd(100).unwrap());
}
