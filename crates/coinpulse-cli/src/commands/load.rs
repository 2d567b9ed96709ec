use std::fs;

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use coinpulse_core::{Analytics, AssetId, Sample, UtcDateTime, ValidationError};

use crate::cli::LoadArgs;
use crate::error::CliError;

/// One NDJSON line of input.
#[derive(Debug, Deserialize)]
struct SampleLine {
    asset_id: String,
    ts: String,
    price: f64,
}

impl SampleLine {
    fn into_sample(self) -> Result<Sample, ValidationError> {
        let asset_id = AssetId::parse(&self.asset_id)?;
        let ts = UtcDateTime::parse(&self.ts)?;
        Sample::new(asset_id, ts, self.price)
    }
}

/// Each line stands alone: a malformed line is logged and skipped, the
/// rest of the file still loads.
pub async fn run(args: &LoadArgs, engine: &Analytics) -> Result<Value, CliError> {
    let content = fs::read_to_string(&args.file)?;

    let mut samples = Vec::new();
    let mut lines = 0usize;
    let mut skipped = 0usize;
    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        lines += 1;

        let parsed = serde_json::from_str::<SampleLine>(line)
            .map_err(|error| error.to_string())
            .and_then(|parsed| parsed.into_sample().map_err(|error| error.to_string()));
        match parsed {
            Ok(sample) => samples.push(sample),
            Err(error) => {
                warn!(line = index + 1, %error, "skipping malformed sample line");
                skipped += 1;
            }
        }
    }

    let inserted = engine.store().insert_samples(&samples).await?;
    Ok(json!({ "lines": lines, "inserted": inserted, "skipped": skipped }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Arc;

    use coinpulse_core::{MemoryStore, SampleStore, TimeWindow};

    #[tokio::test]
    async fn malformed_lines_are_skipped_not_fatal() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            r#"{{"asset_id":"bitcoin","ts":"2024-01-01T00:00:00Z","price":100.0}}"#
        )
        .expect("write");
        writeln!(file, "not json").expect("write");
        writeln!(file).expect("write");
        writeln!(
            file,
            r#"{{"asset_id":"","ts":"2024-01-01T00:02:00Z","price":1.0}}"#
        )
        .expect("write");
        writeln!(
            file,
            r#"{{"asset_id":"bitcoin","ts":"2024-01-01T00:01:00Z","price":101.0}}"#
        )
        .expect("write");

        let store = Arc::new(MemoryStore::new());
        let engine = Analytics::new(store.clone());
        let args = LoadArgs {
            file: file.path().to_path_buf(),
        };

        let report = run(&args, &engine).await.expect("load");
        assert_eq!(report["lines"], 4);
        assert_eq!(report["inserted"], 2);
        assert_eq!(report["skipped"], 2);

        let asset = AssetId::parse("bitcoin").expect("asset id");
        let series = store
            .fetch_range(&asset, TimeWindow::UNBOUNDED)
            .await
            .expect("fetch");
        assert_eq!(series.prices(), vec![100.0, 101.0]);
    }
}
