mod assets;
mod forecast;
mod insight;
mod load;
mod movers;
mod overview;
mod trend;
mod volatility;

use serde_json::Value;

use coinpulse_core::{Analytics, AssetId, TimeWindow, UtcDateTime};

use crate::cli::{Cli, Command, SeriesArgs};
use crate::error::CliError;

pub async fn run(cli: &Cli, engine: &Analytics) -> Result<Value, CliError> {
    match &cli.command {
        Command::Insight(args) => insight::run(args, engine).await,
        Command::Volatility(args) => volatility::run(args, engine).await,
        Command::Trend(args) => trend::run(args, engine).await,
        Command::Movers(args) => movers::run(args, engine).await,
        Command::Forecast(args) => forecast::run(args, engine).await,
        Command::Overview(args) => overview::run(args, engine).await,
        Command::Assets => assets::run(engine).await,
        Command::Load(args) => load::run(args, engine).await,
    }
}

fn parse_asset(input: &str) -> Result<AssetId, CliError> {
    Ok(AssetId::parse(input)?)
}

fn parse_window(args: &SeriesArgs) -> Result<TimeWindow, CliError> {
    let start = args.start.as_deref().map(UtcDateTime::parse).transpose()?;
    let end = args.end.as_deref().map(UtcDateTime::parse).transpose()?;
    Ok(TimeWindow::new(start, end)?)
}
