//! Deterministic synthetic candles for demos, tests, and benchmarks.
//!
//! Results produced on synthetic candles say nothing about a real market.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::Candle;

/// Seeded random walk of one-minute candles starting at price 100.
///
/// Per-candle returns are drawn from [-1%, +1%], wicks add up to 0.3%.
/// The same seed always yields the same candles.
pub fn random_walk(seed: u64, count: usize, start: DateTime<Utc>) -> Vec<Candle> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut candles = Vec::with_capacity(count);
    let mut price = 100.0_f64;

    for i in 0..count {
        let ret: f64 = rng.gen_range(-0.01..0.01);
        let open = price;
        let close = price * (1.0 + ret);
        let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.003));
        let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.003));
        let volume = rng.gen_range(1_000.0..50_000.0);

        candles.push(Candle {
            timestamp: start + Duration::minutes(i as i64),
            open,
            high,
            low,
            close,
            volume,
        });
        price = close;
    }

    candles
}
