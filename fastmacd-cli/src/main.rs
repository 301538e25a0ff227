//! FastMACD CLI: replay candles through the decision core and inspect decisions.
//!
//! Commands:
//! - `replay`: feed candles one at a time into a session, one JSON line per candle
//! - `exit`: evaluate the adaptive exit for a position snapshot
//! - `config`: print the effective config and its fingerprint
//!
//! Logs go to stderr (filtered by `RUST_LOG`); stdout carries JSON only.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use fastmacd_core::synthetic::random_walk;
use fastmacd_core::{
    Candle, ExitDecision, GuardState, OpenPosition, Signal, StrategyConfig, StrategySession,
};

#[derive(Parser)]
#[command(
    name = "fastmacd",
    about = "FastMACD: MACD crossover decision engine for a single instrument"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay candles through a live session and print per-candle decisions.
    Replay {
        #[command(flatten)]
        source: CandleSource,

        /// Path to a TOML strategy config. Defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Evaluate the adaptive exit for one open position.
    Exit {
        /// Path to a JSON position snapshot.
        #[arg(long)]
        position: PathBuf,

        #[command(flatten)]
        source: CandleSource,

        /// Path to a TOML strategy config. Defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the effective config as TOML with its fingerprint.
    Config {
        /// Path to a TOML strategy config. Defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args)]
struct CandleSource {
    /// CSV file with columns timestamp,open,high,low,close,volume.
    #[arg(long, conflicts_with = "synthetic")]
    candles: Option<PathBuf>,

    /// Generate this many synthetic one-minute candles instead of reading a file.
    #[arg(long)]
    synthetic: Option<usize>,

    /// Seed for synthetic candles.
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

#[derive(Serialize)]
struct ReplayLine {
    index: usize,
    timestamp: DateTime<Utc>,
    entry: Signal,
    exit: Signal,
    /// Confirmation verdict for the entry side; absent when there is no entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    confirmed: Option<bool>,
}

#[derive(Serialize)]
struct ExitReport {
    decision: Option<ExitDecision>,
    guard: GuardState,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Replay { source, config } => run_replay(&source, config.as_deref()),
        Commands::Exit {
            position,
            source,
            config,
        } => run_exit(&position, &source, config.as_deref()),
        Commands::Config { config } => run_config(config.as_deref()),
    }
}

fn load_config(path: Option<&Path>) -> Result<StrategyConfig> {
    let config = match path {
        Some(path) => StrategyConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => StrategyConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn load_candles(source: &CandleSource) -> Result<Vec<Candle>> {
    match (&source.candles, source.synthetic) {
        (Some(path), _) => read_candles_csv(path),
        (None, Some(count)) => Ok(random_walk(source.seed, count, synthetic_start())),
        (None, None) => bail!("one of --candles or --synthetic is required"),
    }
}

fn synthetic_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

fn read_candles_csv(path: &Path) -> Result<Vec<Candle>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening candles {}", path.display()))?;
    let mut candles = Vec::new();
    for (row, record) in reader.deserialize::<Candle>().enumerate() {
        let candle = record.with_context(|| format!("parsing candle row {}", row + 1))?;
        if !candle.is_sane() {
            bail!("candle row {} has void or inconsistent OHLCV values", row + 1);
        }
        if let Some(prev) = candles.last().map(|c: &Candle| c.timestamp) {
            if candle.timestamp <= prev {
                bail!("candle row {} is not after the previous candle", row + 1);
            }
        }
        candles.push(candle);
    }
    Ok(candles)
}

fn run_replay(source: &CandleSource, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let candles = load_candles(source)?;
    info!(
        candles = candles.len(),
        fingerprint = %config.fingerprint(),
        "starting replay"
    );

    let mut session = StrategySession::new(config)?;
    for candle in candles {
        let timestamp = candle.timestamp;
        session.push_candle(candle)?;
        let Some(index) = session.latest_index() else {
            continue;
        };
        if !session.series().is_defined(index) {
            continue;
        }

        let entry = session.entry_signal();
        let exit = session.exit_signal();
        let confirmed = entry.side().map(|side| session.confirm_entry(side));
        let line = ReplayLine {
            index,
            timestamp,
            entry,
            exit,
            confirmed,
        };
        println!("{}", serde_json::to_string(&line)?);
    }
    Ok(())
}

fn run_exit(position_path: &Path, source: &CandleSource, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let content = std::fs::read_to_string(position_path)
        .with_context(|| format!("reading position {}", position_path.display()))?;
    let position: OpenPosition = serde_json::from_str(&content)?;
    let candles = load_candles(source)?;
    let Some(now) = candles.last().map(|c| c.timestamp) else {
        bail!("no candles to evaluate against");
    };

    let mut session = StrategySession::with_candles(config, candles)?;
    let decision = session.evaluate_exit(&position, now)?;
    let report = ExitReport {
        decision,
        guard: session.guard().state(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn run_config(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    print!("{}", config.to_toml_string()?);
    println!("# fingerprint: {}", config.fingerprint());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn reads_rfc3339_candles() {
        let file = write_temp(
            "timestamp,open,high,low,close,volume\n\
             2024-01-01T00:00:00Z,1.0,1.2,0.9,1.1,500\n\
             2024-01-01T00:01:00Z,1.1,1.3,1.0,1.2,650\n",
        );
        let candles = read_candles_csv(file.path()).unwrap();
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[1].close, 1.2);
        assert_eq!(
            candles[1].timestamp,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 1, 0).unwrap()
        );
    }

    #[test]
    fn rejects_out_of_order_candles() {
        let file = write_temp(
            "timestamp,open,high,low,close,volume\n\
             2024-01-01T00:01:00Z,1.0,1.2,0.9,1.1,500\n\
             2024-01-01T00:00:00Z,1.1,1.3,1.0,1.2,650\n",
        );
        assert!(read_candles_csv(file.path()).is_err());
    }

    #[test]
    fn rejects_inconsistent_candles() {
        // high below close
        let file = write_temp(
            "timestamp,open,high,low,close,volume\n\
             2024-01-01T00:00:00Z,1.0,1.05,0.9,1.1,500\n",
        );
        let err = read_candles_csv(file.path()).unwrap_err();
        assert!(err.to_string().contains("row 1"));

        let void = write_temp(
            "timestamp,open,high,low,close,volume\n\
             2024-01-01T00:00:00Z,1.0,1.2,0.9,NaN,500\n",
        );
        assert!(read_candles_csv(void.path()).is_err());
    }

    #[test]
    fn requires_a_candle_source() {
        let source = CandleSource {
            candles: None,
            synthetic: None,
            seed: 1,
        };
        assert!(load_candles(&source).is_err());

        let synthetic = CandleSource {
            synthetic: Some(10),
            ..source
        };
        assert_eq!(load_candles(&synthetic).unwrap().len(), 10);
    }

    #[test]
    fn invalid_config_file_is_rejected() {
        let file = write_temp("[macd]\nfast_length = 15.0\n");
        assert!(load_config(Some(file.path())).is_err());
    }

    #[test]
    fn cli_parses_replay_flags() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
        let cli = Cli::try_parse_from(["fastmacd", "replay", "--synthetic", "100", "--seed", "3"])
            .unwrap();
        match cli.command {
            Commands::Replay { source, config } => {
                assert_eq!(source.synthetic, Some(100));
                assert_eq!(source.seed, 3);
                assert!(config.is_none());
            }
            _ => panic!("expected replay"),
        }
    }
}
