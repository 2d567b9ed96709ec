//! CLI argument definitions for coinpulse.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `insight` | Descriptive statistics for one asset over a window |
//! | `volatility` | Log-return volatility for one asset over a window |
//! | `trend` | OLS trend classification for one asset over a window |
//! | `movers` | Rank all tracked assets by absolute percent change |
//! | `forecast` | Regression forecast with a ~95% prediction interval |
//! | `overview` | Whole-market statistics with top gainers and losers |
//! | `assets` | List tracked asset identifiers |
//! | `load` | Load NDJSON samples into the store |
//!
//! Window bounds are RFC3339 UTC timestamps; an omitted bound is
//! unbounded on that side. Output is JSON on stdout.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Market analytics and forecasting over stored price samples.
#[derive(Debug, Parser)]
#[command(name = "coinpulse", version, about)]
pub struct Cli {
    /// Path to the SQLite sample database.
    ///
    /// Defaults to `$COINPULSE_HOME/coinpulse.db`, falling back to
    /// `~/.coinpulse/coinpulse.db`.
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Descriptive statistics for one asset over a window.
    Insight(SeriesArgs),
    /// Log-return volatility for one asset over a window.
    Volatility(SeriesArgs),
    /// OLS trend classification for one asset over a window.
    Trend(TrendArgs),
    /// Rank all tracked assets by absolute percent change over a lookback.
    Movers(MoversArgs),
    /// Regression forecast with a ~95% prediction interval.
    Forecast(ForecastArgs),
    /// Whole-market statistics with top gainers and losers.
    Overview(OverviewArgs),
    /// List tracked asset identifiers.
    Assets,
    /// Load NDJSON samples (`{"asset_id","ts","price"}` per line).
    Load(LoadArgs),
}

#[derive(Debug, Args)]
pub struct SeriesArgs {
    /// Asset identifier (e.g. `bitcoin`).
    pub asset: String,

    /// Window start, RFC3339 UTC (inclusive).
    #[arg(long)]
    pub start: Option<String>,

    /// Window end, RFC3339 UTC (exclusive).
    #[arg(long)]
    pub end: Option<String>,
}

#[derive(Debug, Args)]
pub struct TrendArgs {
    #[command(flatten)]
    pub series: SeriesArgs,

    /// Use the fine-grained slope thresholds (the forecasting profile)
    /// instead of the coarse range-query profile.
    #[arg(long, default_value_t = false)]
    pub sensitive: bool,
}

#[derive(Debug, Args)]
pub struct MoversArgs {
    /// Lookback in minutes.
    #[arg(long, default_value_t = 1440)]
    pub minutes: i64,
}

#[derive(Debug, Args)]
pub struct ForecastArgs {
    /// Asset identifier.
    pub asset: String,

    /// Forecast horizon in minutes (clamped to 1..=10080).
    #[arg(long, default_value_t = 60)]
    pub horizon_minutes: i64,

    /// Fitting lookback in minutes (clamped to 30..=43200).
    #[arg(long, default_value_t = 1440)]
    pub lookback_minutes: i64,
}

#[derive(Debug, Args)]
pub struct OverviewArgs {
    /// Window length in minutes, ending now.
    #[arg(long, default_value_t = 1440)]
    pub minutes: i64,

    /// Number of top gainers/losers to surface.
    #[arg(long, default_value_t = coinpulse_core::DEFAULT_TOP_N)]
    pub top: usize,
}

#[derive(Debug, Args)]
pub struct LoadArgs {
    /// NDJSON file of samples, one object per line.
    pub file: PathBuf,
}
