use serde_json::Value;

use coinpulse_core::Analytics;

use crate::error::CliError;

pub async fn run(engine: &Analytics) -> Result<Value, CliError> {
    let assets = engine.store().list_assets().await?;
    Ok(serde_json::to_value(assets)?)
}
