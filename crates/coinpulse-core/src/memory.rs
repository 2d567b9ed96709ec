//! In-memory [`SampleStore`] used by engine tests and embedders that do
//! not want a database on disk.

use std::collections::BTreeSet;
use std::sync::RwLock;

use crate::store::{SampleStore, StoreError, StoreFuture};
use crate::{AssetId, Sample, Series, TimeWindow, UtcDateTime};

/// Thread-safe in-memory sample store.
///
/// Matches the SQLite store's contract: upsert on `(asset_id, unix
/// second)`, ascending windowed reads, boundary lookups.
#[derive(Debug, Default)]
pub struct MemoryStore {
    samples: RwLock<Vec<Sample>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor for pre-seeded fixtures.
    pub fn seeded(samples: Vec<Sample>) -> Self {
        let mut seeded = Vec::with_capacity(samples.len());
        for sample in samples {
            upsert(&mut seeded, sample);
        }
        Self {
            samples: RwLock::new(seeded),
        }
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Vec<Sample>>, StoreError> {
        self.samples
            .read()
            .map_err(|_| StoreError::Connection(String::from("sample lock poisoned")))
    }
}

fn upsert(samples: &mut Vec<Sample>, sample: Sample) {
    let second = sample.ts.unix_timestamp();
    if let Some(existing) = samples
        .iter_mut()
        .find(|s| s.asset_id == sample.asset_id && s.ts.unix_timestamp() == second)
    {
        *existing = sample;
    } else {
        samples.push(sample);
    }
}

impl SampleStore for MemoryStore {
    fn fetch_range<'a>(
        &'a self,
        asset_id: &'a AssetId,
        window: TimeWindow,
    ) -> StoreFuture<'a, Series> {
        Box::pin(async move {
            let samples = self.read()?;
            let matching = samples
                .iter()
                .filter(|sample| sample.asset_id == *asset_id && window.contains(sample.ts))
                .cloned()
                .collect();
            Ok(Series::normalized(asset_id.clone(), matching))
        })
    }

    fn latest_at_or_before<'a>(
        &'a self,
        asset_id: &'a AssetId,
        at: UtcDateTime,
    ) -> StoreFuture<'a, Option<Sample>> {
        Box::pin(async move {
            let samples = self.read()?;
            let mut best: Option<&Sample> = None;
            for sample in samples.iter() {
                if sample.asset_id != *asset_id || sample.ts > at {
                    continue;
                }
                if best.map_or(true, |current| sample.ts >= current.ts) {
                    best = Some(sample);
                }
            }
            Ok(best.cloned())
        })
    }

    fn list_assets<'a>(&'a self) -> StoreFuture<'a, Vec<AssetId>> {
        Box::pin(async move {
            let samples = self.read()?;
            let assets: BTreeSet<AssetId> = samples
                .iter()
                .map(|sample| sample.asset_id.clone())
                .collect();
            Ok(assets.into_iter().collect())
        })
    }

    fn insert_samples<'a>(&'a self, new_samples: &'a [Sample]) -> StoreFuture<'a, usize> {
        Box::pin(async move {
            let mut samples = self
                .samples
                .write()
                .map_err(|_| StoreError::Connection(String::from("sample lock poisoned")))?;
            for sample in new_samples {
                upsert(&mut samples, sample.clone());
            }
            Ok(new_samples.len())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(id: &str) -> AssetId {
        AssetId::parse(id).expect("asset id")
    }

    fn sample(id: &str, unix: i64, price: f64) -> Sample {
        Sample::new(
            asset(id),
            UtcDateTime::from_unix_timestamp(unix).expect("timestamp"),
            price,
        )
        .expect("sample")
    }

    #[tokio::test]
    async fn fetch_range_is_windowed_and_ascending() {
        let store = MemoryStore::seeded(vec![
            sample("bitcoin", 300, 3.0),
            sample("bitcoin", 100, 1.0),
            sample("bitcoin", 200, 2.0),
            sample("ethereum", 150, 9.0),
        ]);

        let window = TimeWindow::new(
            Some(UtcDateTime::from_unix_timestamp(100).expect("ts")),
            Some(UtcDateTime::from_unix_timestamp(300).expect("ts")),
        )
        .expect("window");
        let series = store
            .fetch_range(&asset("bitcoin"), window)
            .await
            .expect("fetch");
        assert_eq!(series.prices(), vec![1.0, 2.0]);
    }

    #[tokio::test]
    async fn boundary_lookup_is_inclusive() {
        let store = MemoryStore::seeded(vec![
            sample("bitcoin", 100, 1.0),
            sample("bitcoin", 200, 2.0),
        ]);

        let at = UtcDateTime::from_unix_timestamp(200).expect("ts");
        let found = store
            .latest_at_or_before(&asset("bitcoin"), at)
            .await
            .expect("lookup")
            .expect("sample");
        assert_eq!(found.price, 2.0);

        let early = UtcDateTime::from_unix_timestamp(99).expect("ts");
        let missing = store
            .latest_at_or_before(&asset("bitcoin"), early)
            .await
            .expect("lookup");
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn insert_upserts_on_asset_and_second() {
        let store = MemoryStore::new();
        store
            .insert_samples(&[sample("bitcoin", 100, 1.0)])
            .await
            .expect("insert");
        store
            .insert_samples(&[sample("bitcoin", 100, 5.0)])
            .await
            .expect("insert");

        let series = store
            .fetch_range(&asset("bitcoin"), TimeWindow::UNBOUNDED)
            .await
            .expect("fetch");
        assert_eq!(series.prices(), vec![5.0]);
    }

    #[tokio::test]
    async fn lists_assets_sorted() {
        let store = MemoryStore::seeded(vec![
            sample("ethereum", 100, 1.0),
            sample("bitcoin", 100, 1.0),
        ]);
        let assets = store.list_assets().await.expect("list");
        let names: Vec<&str> = assets.iter().map(AssetId::as_str).collect();
        assert_eq!(names, vec!["bitcoin", "ethereum"]);
    }
}
