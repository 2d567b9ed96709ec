use serde_json::Value;

use coinpulse_core::{Analytics, TrendThresholds};

use crate::cli::TrendArgs;
use crate::error::CliError;

use super::{parse_asset, parse_window};

pub async fn run(args: &TrendArgs, engine: &Analytics) -> Result<Value, CliError> {
    let asset = parse_asset(&args.series.asset)?;
    let window = parse_window(&args.series)?;
    let thresholds = if args.sensitive {
        TrendThresholds::SENSITIVE
    } else {
        TrendThresholds::STANDARD
    };
    let report = engine.trend(&asset, window, thresholds).await?;
    Ok(serde_json::to_value(report)?)
}
