//! Time-series store contract.
//!
//! The analytics engine never touches a database handle directly; it is
//! handed a [`SampleStore`] and performs read-only, request-scoped
//! computation over whatever snapshot the store returns. Implementations
//! may execute lookups concurrently; each query is self-contained and no
//! ordering between concurrent requests is assumed.

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

use crate::{AssetId, Sample, Series, TimeWindow, UtcDateTime};

/// Boxed future returned by store methods, so implementations can be
/// async without forcing an async-trait dependency on embedders.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send + 'a>>;

/// Failures at the store boundary.
///
/// An empty result set is never an error: a windowed fetch may yield an
/// empty series and a boundary lookup may yield `None`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store connection error: {0}")]
    Connection(String),

    #[error("store query error: {0}")]
    Query(String),

    #[error("invalid stored data: {0}")]
    InvalidData(String),
}

/// Storage contract for per-asset price samples.
pub trait SampleStore: Send + Sync {
    /// Fetch samples for one asset inside a half-open window, ascending by
    /// timestamp. Gaps are never filled; duplicates pass through.
    fn fetch_range<'a>(
        &'a self,
        asset_id: &'a AssetId,
        window: TimeWindow,
    ) -> StoreFuture<'a, Series>;

    /// The latest sample with `ts <= at`, or `None` if the asset has no
    /// sample that early. This is the boundary lookup mover ranking needs;
    /// it is a distinct query shape from a ranged fetch.
    fn latest_at_or_before<'a>(
        &'a self,
        asset_id: &'a AssetId,
        at: UtcDateTime,
    ) -> StoreFuture<'a, Option<Sample>>;

    /// Distinct tracked asset identifiers, sorted ascending.
    fn list_assets<'a>(&'a self) -> StoreFuture<'a, Vec<AssetId>>;

    /// Upsert samples keyed on `(asset_id, ts)`; returns the number of
    /// rows written.
    fn insert_samples<'a>(&'a self, samples: &'a [Sample]) -> StoreFuture<'a, usize>;
}
