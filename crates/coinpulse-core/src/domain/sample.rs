use serde::{Deserialize, Serialize};

use crate::{AssetId, UtcDateTime, ValidationError};

/// One observed price for one asset at one instant.
///
/// Prices are assumed non-negative; zero (and, from degraded feeds,
/// negative) values are accepted here and guarded at the computation
/// sites that would divide by them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub asset_id: AssetId,
    pub ts: UtcDateTime,
    pub price: f64,
}

impl Sample {
    pub fn new(asset_id: AssetId, ts: UtcDateTime, price: f64) -> Result<Self, ValidationError> {
        if !price.is_finite() {
            return Err(ValidationError::NonFinitePrice { value: price });
        }

        Ok(Self {
            asset_id,
            ts,
            price,
        })
    }
}

/// Ordered per-asset price series, ascending by timestamp.
///
/// Equal timestamps are preserved in input order; nothing deduplicates
/// coincident samples. A series may be empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub asset_id: AssetId,
    pub samples: Vec<Sample>,
}

impl Series {
    pub fn new(asset_id: AssetId, samples: Vec<Sample>) -> Self {
        Self { asset_id, samples }
    }

    /// Build a series from samples in arbitrary order.
    ///
    /// Uses a stable sort so coincident timestamps keep their input order.
    pub fn normalized(asset_id: AssetId, mut samples: Vec<Sample>) -> Self {
        samples.sort_by_key(|sample| sample.ts);
        Self { asset_id, samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    pub fn prices(&self) -> Vec<f64> {
        self.samples.iter().map(|sample| sample.price).collect()
    }

    /// Unix-second timestamps as the regression x axis.
    pub fn unix_times(&self) -> Vec<f64> {
        self.samples
            .iter()
            .map(|sample| sample.ts.unix_timestamp() as f64)
            .collect()
    }
}
