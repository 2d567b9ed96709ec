//! Behavior tests for market-wide mover ranking.

use std::sync::Arc;

use time::Duration;

use coinpulse_core::{Analytics, AnalyticsError, AssetId, MemoryStore, Sample, UtcDateTime};

fn asset(id: &str) -> AssetId {
    AssetId::parse(id).expect("asset id")
}

fn at(unix: i64) -> UtcDateTime {
    UtcDateTime::from_unix_timestamp(unix).expect("timestamp")
}

fn sample(id: &str, unix: i64, price: f64) -> Sample {
    Sample::new(asset(id), at(unix), price).expect("sample")
}

fn engine(samples: Vec<Sample>) -> Analytics {
    Analytics::new(Arc::new(MemoryStore::seeded(samples)))
}

#[tokio::test]
async fn ranks_by_absolute_percent_change() {
    // Lookback boundary at 86_400. bitcoin: 100 -> 110 (+10%),
    // ethereum: 50 -> 40 (-20%). The bigger absolute move wins.
    let engine = engine(vec![
        sample("bitcoin", 86_000, 100.0),
        sample("bitcoin", 170_000, 110.0),
        sample("ethereum", 86_000, 50.0),
        sample("ethereum", 170_000, 40.0),
    ]);

    let movers = engine
        .movers(Duration::seconds(86_400), at(172_800))
        .await
        .expect("movers");

    assert_eq!(movers.len(), 2);
    assert_eq!(movers[0].asset_id.as_str(), "ethereum");
    assert!((movers[0].percent_change - -20.0).abs() < 1e-9);
    assert_eq!(movers[1].asset_id.as_str(), "bitcoin");
    assert!((movers[1].percent_change - 10.0).abs() < 1e-9);
}

#[tokio::test]
async fn boundary_lookup_takes_the_latest_sample_at_or_before() {
    // Two samples before the boundary: the later one (price 200) defines
    // the change, giving -50% instead of +0%.
    let engine = engine(vec![
        sample("bitcoin", 50_000, 100.0),
        sample("bitcoin", 86_000, 200.0),
        sample("bitcoin", 170_000, 100.0),
    ]);

    let movers = engine
        .movers(Duration::seconds(86_400), at(172_800))
        .await
        .expect("movers");
    assert_eq!(movers.len(), 1);
    assert!((movers[0].percent_change - -50.0).abs() < 1e-9);
    assert_eq!(movers[0].boundary_price, 200.0);
    assert_eq!(movers[0].latest_price, 100.0);
}

#[tokio::test]
async fn excludes_assets_with_no_boundary_sample() {
    // "newcoin" only has samples after the boundary, so there is no
    // baseline to measure against.
    let engine = engine(vec![
        sample("bitcoin", 86_000, 100.0),
        sample("bitcoin", 170_000, 120.0),
        sample("newcoin", 100_000, 5.0),
        sample("newcoin", 170_000, 6.0),
    ]);

    let movers = engine
        .movers(Duration::seconds(86_400), at(172_800))
        .await
        .expect("movers");
    assert_eq!(movers.len(), 1);
    assert_eq!(movers[0].asset_id.as_str(), "bitcoin");
}

#[tokio::test]
async fn excludes_assets_with_a_non_positive_boundary_price() {
    let engine = engine(vec![
        sample("deadcoin", 86_000, 0.0),
        sample("deadcoin", 170_000, 3.0),
        sample("bitcoin", 86_000, 100.0),
        sample("bitcoin", 170_000, 90.0),
    ]);

    let movers = engine
        .movers(Duration::seconds(86_400), at(172_800))
        .await
        .expect("movers");
    assert_eq!(movers.len(), 1);
    assert_eq!(movers[0].asset_id.as_str(), "bitcoin");
}

#[tokio::test]
async fn equal_magnitudes_break_ties_by_asset_id() {
    let engine = engine(vec![
        sample("bitcoin", 86_000, 100.0),
        sample("bitcoin", 170_000, 110.0),
        sample("ethereum", 86_000, 200.0),
        sample("ethereum", 170_000, 220.0),
    ]);

    let movers = engine
        .movers(Duration::seconds(86_400), at(172_800))
        .await
        .expect("movers");
    assert_eq!(movers.len(), 2);
    assert_eq!(movers[0].asset_id.as_str(), "bitcoin");
    assert_eq!(movers[1].asset_id.as_str(), "ethereum");
}

#[tokio::test]
async fn empty_market_ranks_nothing() {
    let engine = engine(Vec::new());
    let movers = engine
        .movers(Duration::seconds(86_400), at(172_800))
        .await
        .expect("movers");
    assert!(movers.is_empty());
}

#[tokio::test]
async fn rejects_non_positive_lookback() {
    let engine = engine(vec![sample("bitcoin", 100, 1.0)]);
    let err = engine
        .movers(Duration::ZERO, at(172_800))
        .await
        .expect_err("must reject");
    assert!(matches!(err, AnalyticsError::Validation(_)));
}
