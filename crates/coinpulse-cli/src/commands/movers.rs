use serde_json::Value;
use time::Duration;

use coinpulse_core::{Analytics, UtcDateTime};

use crate::cli::MoversArgs;
use crate::error::CliError;

pub async fn run(args: &MoversArgs, engine: &Analytics) -> Result<Value, CliError> {
    let movers = engine
        .movers(Duration::minutes(args.minutes), UtcDateTime::now())
        .await?;
    Ok(serde_json::to_value(movers)?)
}
