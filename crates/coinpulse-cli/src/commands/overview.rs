use serde_json::Value;

use coinpulse_core::{Analytics, TimeWindow, UtcDateTime};

use crate::cli::OverviewArgs;
use crate::error::CliError;

pub async fn run(args: &OverviewArgs, engine: &Analytics) -> Result<Value, CliError> {
    let window = TimeWindow::last_minutes(UtcDateTime::now(), args.minutes)?;
    let overview = engine.overview(window, args.top).await?;
    Ok(serde_json::to_value(overview)?)
}
