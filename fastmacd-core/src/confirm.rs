//! Entry confirmation gate: last yes/no check before an entry order.
//!
//! Baseline: MACD on the entry's side of its signal line at `index`.
//! While the reversal guard blocks the opposite side, an entry against the
//! stopped-out side must also show histogram sign, RSI headroom, and growing
//! histogram magnitude.

use tracing::{debug, warn};

use crate::domain::PositionSide;
use crate::error::EngineError;
use crate::guard::ReversalGuard;
use crate::series::CandleSeries;

/// RSI a long reversal entry must stay above.
pub const LONG_RSI_FLOOR: f64 = 30.0;
/// RSI a short reversal entry must stay below.
pub const SHORT_RSI_CEILING: f64 = 70.0;
/// Candles back for the histogram-magnitude comparison.
pub const MOMENTUM_LOOKBACK: usize = 2;

/// Approve or reject an entry on `side` at candle `index`.
///
/// Expires the guard first when its window has elapsed. Missing indicator
/// data rejects the entry.
pub fn confirm_entry(
    side: PositionSide,
    series: &CandleSeries,
    index: usize,
    guard: &mut ReversalGuard,
) -> bool {
    guard.expire_if_elapsed(index);

    let result = if guard.gates(side, index) {
        reversal_check(side, series, index)
    } else {
        baseline_check(side, series, index)
    };

    match result {
        Ok(approved) => {
            if !approved {
                debug!(%side, index, gated = guard.gates(side, index), "entry rejected");
            }
            approved
        }
        Err(err) => {
            warn!(%side, index, error = %err, "entry rejected: indicator data missing");
            false
        }
    }
}

fn baseline_check(
    side: PositionSide,
    series: &CandleSeries,
    index: usize,
) -> Result<bool, EngineError> {
    let macd = series.macd(index)?;
    let signal = series.macd_signal(index)?;
    Ok(match side {
        PositionSide::Long => macd > signal,
        PositionSide::Short => macd < signal,
    })
}

fn reversal_check(
    side: PositionSide,
    series: &CandleSeries,
    index: usize,
) -> Result<bool, EngineError> {
    let ordered = baseline_check(side, series, index)?;
    let hist = series.macd_hist(index)?;
    let hist_back = series.macd_hist_back(index, MOMENTUM_LOOKBACK)?;
    let rsi = series.rsi(index)?;

    let (hist_favors, rsi_ok) = match side {
        PositionSide::Long => (hist > 0.0, rsi > LONG_RSI_FLOOR),
        PositionSide::Short => (hist < 0.0, rsi < SHORT_RSI_CEILING),
    };
    let strengthening = hist.abs() > hist_back.abs();

    Ok(ordered && hist_favors && rsi_ok && strengthening)
}
