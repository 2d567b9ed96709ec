use serde_json::Value;

use coinpulse_core::Analytics;

use crate::cli::SeriesArgs;
use crate::error::CliError;

use super::{parse_asset, parse_window};

pub async fn run(args: &SeriesArgs, engine: &Analytics) -> Result<Value, CliError> {
    let asset = parse_asset(&args.asset)?;
    let window = parse_window(args)?;
    let report = engine.volatility(&asset, window).await?;
    Ok(serde_json::to_value(report)?)
}
