use serde_json::Value;

use coinpulse_core::{Analytics, UtcDateTime};

use crate::cli::ForecastArgs;
use crate::error::CliError;

use super::parse_asset;

/// One week, in minutes.
const MAX_HORIZON_MINUTES: i64 = 10_080;
/// Thirty days, in minutes.
const MAX_LOOKBACK_MINUTES: i64 = 43_200;
const MIN_LOOKBACK_MINUTES: i64 = 30;

pub async fn run(args: &ForecastArgs, engine: &Analytics) -> Result<Value, CliError> {
    let asset = parse_asset(&args.asset)?;
    let horizon_minutes = args.horizon_minutes.clamp(1, MAX_HORIZON_MINUTES);
    let lookback_minutes = args
        .lookback_minutes
        .clamp(MIN_LOOKBACK_MINUTES, MAX_LOOKBACK_MINUTES);

    let forecast = engine
        .forecast(&asset, horizon_minutes, lookback_minutes, UtcDateTime::now())
        .await?;
    Ok(serde_json::to_value(forecast)?)
}
