//! Strategy configuration: MACD lengths, warmup, trading mode.
//!
//! Loaded from TOML. Missing fields take their defaults, so an empty file is a
//! valid config.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors from building or loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} = {value} is outside the valid range [{min}, {max}]")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("fast period ({fast}) must be shorter than slow period ({slow})")]
    FastNotBelowSlow { fast: usize, slow: usize },

    #[error(
        "startup_window ({startup_window}) must exceed slow + signal periods ({required})"
    )]
    StartupTooShort {
        startup_window: usize,
        required: usize,
    },

    #[error("rsi_period must be >= 1")]
    InvalidRsiPeriod,

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
}

/// Valid range for `fast_length`.
pub const FAST_RANGE: (f64, f64) = (2.0, 10.0);
/// Valid range for `slow_length`.
pub const SLOW_RANGE: (f64, f64) = (10.0, 20.0);
/// Valid range for `signal_length`.
pub const SIGNAL_RANGE: (f64, f64) = (2.0, 7.0);

/// Tunable MACD lengths.
///
/// The lengths are real-valued so an optimizer can search them continuously;
/// the effective integer period is the truncated value. Changing any length
/// requires recomputing the whole series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacdParams {
    pub fast_length: f64,
    pub slow_length: f64,
    pub signal_length: f64,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast_length: 5.0,
            slow_length: 12.0,
            signal_length: 4.0,
        }
    }
}

impl MacdParams {
    pub fn fast_period(&self) -> usize {
        self.fast_length as usize
    }

    pub fn slow_period(&self) -> usize {
        self.slow_length as usize
    }

    pub fn signal_period(&self) -> usize {
        self.signal_length as usize
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("fast_length", self.fast_length, FAST_RANGE)?;
        check_range("slow_length", self.slow_length, SLOW_RANGE)?;
        check_range("signal_length", self.signal_length, SIGNAL_RANGE)?;
        if self.fast_period() >= self.slow_period() {
            return Err(ConfigError::FastNotBelowSlow {
                fast: self.fast_period(),
                slow: self.slow_period(),
            });
        }
        Ok(())
    }
}

fn check_range(name: &'static str, value: f64, (min, max): (f64, f64)) -> Result<(), ConfigError> {
    if !(min..=max).contains(&value) {
        return Err(ConfigError::OutOfRange {
            name,
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// Which entry directions the strategy may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradingMode {
    LongOnly,
    ShortOnly,
    LongShort,
}

impl TradingMode {
    pub fn allows(self, side: crate::domain::PositionSide) -> bool {
        use crate::domain::PositionSide;
        match self {
            Self::LongOnly => side == PositionSide::Long,
            Self::ShortOnly => side == PositionSide::Short,
            Self::LongShort => true,
        }
    }
}

/// Complete configuration for one instrument's decision core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    /// Candle interval label (informational; the core is interval-agnostic).
    pub timeframe: String,
    pub trading_mode: TradingMode,
    /// Candles that must precede the first index with defined indicators.
    pub startup_window: usize,
    pub rsi_period: usize,
    pub macd: MacdParams,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            timeframe: "1m".to_string(),
            trading_mode: TradingMode::LongShort,
            startup_window: 30,
            rsi_period: 14,
            macd: MacdParams::default(),
        }
    }
}

impl StrategyConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.macd.validate()?;
        if self.rsi_period == 0 {
            return Err(ConfigError::InvalidRsiPeriod);
        }
        let required = self.macd.slow_period() + self.macd.signal_period();
        if self.startup_window <= required {
            return Err(ConfigError::StartupTooShort {
                startup_window: self.startup_window,
                required,
            });
        }
        Ok(())
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Deterministic identity of this configuration (BLAKE3 over canonical JSON).
    ///
    /// Two configs with identical parameters share a fingerprint, which lets
    /// replay outputs be matched to the parameters that produced them.
    pub fn fingerprint(&self) -> String {
        let json = serde_json::to_string(self).unwrap_or_default();
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}
