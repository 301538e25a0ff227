use chrono::{DateTime, Utc};
use tracing::info;

use super::tiers::select_tier;
use super::{
    pct, ExitDecision, ExitKind, DRAWDOWN_ACTIVATION_RATIO, DRAWDOWN_GIVEBACK_FRACTION,
    EMERGENCY_LOSS_RATIO, SMALL_PROFIT_BAND,
};
use crate::domain::OpenPosition;
use crate::error::EngineError;
use crate::guard::ReversalGuard;
use crate::series::CandleSeries;

/// Candles back the momentum rules look, counting from the latest.
const MOMENTUM_DEPTH: usize = 2;

/// Histogram values the rules read, signed so that positive favors the position.
struct Momentum {
    last: f64,
    prev: f64,
    prev2: f64,
}

impl Momentum {
    fn read(series: &CandleSeries, last: usize, sign: f64) -> Result<Self, EngineError> {
        Ok(Self {
            last: sign * series.macd_hist(last)?,
            prev: sign * series.macd_hist_back(last, 1)?,
            prev2: sign * series.macd_hist_back(last, MOMENTUM_DEPTH)?,
        })
    }

    /// Histogram sign has turned against the position.
    fn reversed(&self) -> bool {
        self.last < 0.0
    }

    /// Histogram is less favorable than two candles ago.
    fn fading(&self) -> bool {
        self.last < self.prev2
    }

    /// Histogram is against the position and still getting worse.
    fn weakening(&self) -> bool {
        self.last < 0.0 && self.last < self.prev
    }
}

/// Evaluate the adaptive exit rules for `position` at the latest candle.
///
/// Side effect: when the position's loss breaches the emergency threshold the
/// guard is armed for this side at the latest index, whether or not the MACD
/// confirmation lets the emergency exit itself fire.
///
/// # Errors
/// `InvalidPosition` and `InsufficientHistory` are recoverable ("no decision").
/// History is insufficient until the histogram two candles back is past the
/// warmup. `MissingIndicatorData` after that means a hole in the series.
pub fn evaluate_exit(
    position: &OpenPosition,
    series: &CandleSeries,
    now: DateTime<Utc>,
    guard: &mut ReversalGuard,
) -> Result<Option<ExitDecision>, EngineError> {
    position.validate()?;
    series.ensure_history(MOMENTUM_DEPTH)?;
    let last = series.len() - 1;

    let side = position.side;
    let hist = Momentum::read(series, last, side.sign())?;
    let profit = position.profit_ratio();
    let max_profit = position.max_profit_ratio();

    let decide = |kind: ExitKind, reason: String| {
        info!(%side, profit, ?kind, %reason, "exit fired");
        Some(ExitDecision {
            kind,
            reason,
            decided_at: now,
            profit_ratio: profit,
        })
    };

    if profit < EMERGENCY_LOSS_RATIO {
        guard.arm(side, last);
        if hist.reversed() {
            return Ok(decide(
                ExitKind::EmergencyStop,
                format!(
                    "emergency stop: {side} loss {} breached {} and MACD reversed",
                    pct(profit),
                    pct(EMERGENCY_LOSS_RATIO)
                ),
            ));
        }
    }

    // Only the highest reached tier is examined.
    if let Some(tier) = select_tier(profit) {
        if profit <= tier.floor && (hist.reversed() || hist.fading()) {
            return Ok(decide(
                ExitKind::ProfitTier {
                    trigger: tier.trigger,
                    floor: tier.floor,
                },
                format!(
                    "profit tier: {side} reached {} profit, fell back to {} floor",
                    pct(tier.trigger),
                    pct(tier.floor)
                ),
            ));
        }
    }

    if max_profit > DRAWDOWN_ACTIVATION_RATIO {
        let giveback = max_profit - profit;
        if giveback > max_profit * DRAWDOWN_GIVEBACK_FRACTION {
            return Ok(decide(
                ExitKind::DrawdownProtection {
                    max_profit,
                    giveback,
                },
                format!(
                    "drawdown protection: max profit {}, gave back {}",
                    pct(max_profit),
                    pct(giveback)
                ),
            ));
        }
    }

    let (band_low, band_high) = SMALL_PROFIT_BAND;
    if (band_low..=band_high).contains(&profit) && hist.weakening() {
        return Ok(decide(
            ExitKind::SmallProfitProtection,
            format!(
                "small profit protection: {side} profit {} within {}-{}, MACD weakening",
                pct(profit),
                pct(band_low),
                pct(band_high)
            ),
        ));
    }

    Ok(None)
}
