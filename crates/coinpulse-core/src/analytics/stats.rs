//! Descriptive statistics over a single price series.

use serde::{Deserialize, Serialize};

use crate::analytics::volatility;
use crate::error::AnalyticsError;
use crate::{AssetId, Series};

/// Minimum samples for the compute-insight operation.
pub const STATS_MIN_SAMPLES: usize = 2;

/// Computed descriptive-statistics record for one asset over one window.
///
/// Recomputed on every request, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub asset_id: AssetId,
    pub first_price: f64,
    pub last_price: f64,
    pub percent_change: f64,
    pub avg_price: f64,
    pub stddev_price: f64,
    pub volatility: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub median_price: f64,
    pub range_pct: f64,
    pub sample_count: usize,
}

/// Compute the insight record for an ascending series.
///
/// Degenerate inputs keep the legacy zero-fill policy consumers depend
/// on: `percent_change` is `0` when the first price is `0`, and
/// `range_pct` is `0` when the minimum is non-positive.
pub fn describe(series: &Series) -> Result<Insight, AnalyticsError> {
    let n = series.len();
    if n < STATS_MIN_SAMPLES {
        return Err(AnalyticsError::InsufficientData {
            required: STATS_MIN_SAMPLES,
            actual: n,
        });
    }

    let prices = series.prices();
    let first = prices[0];
    let last = prices[n - 1];

    let avg = prices.iter().sum::<f64>() / n as f64;
    let stddev = volatility::sample_stddev(&prices);
    let vol = volatility::log_return_volatility(&prices);

    let percent_change = if first != 0.0 {
        (last - first) / first * 100.0
    } else {
        0.0
    };

    let mut min = prices[0];
    let mut max = prices[0];
    for &price in &prices {
        min = min.min(price);
        max = max.max(price);
    }

    // Upper-middle median: index n/2 of the ascending sort, even for even
    // n. Consumers rely on this exact tie-break.
    let mut sorted = prices.clone();
    sorted.sort_by(f64::total_cmp);
    let median = sorted[n / 2];

    let range_pct = if min > 0.0 {
        (max - min) / min * 100.0
    } else {
        0.0
    };

    Ok(Insight {
        asset_id: series.asset_id.clone(),
        first_price: first,
        last_price: last,
        percent_change,
        avg_price: avg,
        stddev_price: stddev,
        volatility: vol,
        min_price: min,
        max_price: max,
        median_price: median,
        range_pct,
        sample_count: n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Sample, UtcDateTime};

    fn series(prices: &[f64]) -> Series {
        let asset = AssetId::parse("bitcoin").expect("asset id");
        let samples = prices
            .iter()
            .enumerate()
            .map(|(i, &price)| {
                Sample::new(
                    asset.clone(),
                    UtcDateTime::from_unix_timestamp(1_000 + 60 * i as i64).expect("timestamp"),
                    price,
                )
                .expect("sample")
            })
            .collect();
        Series::new(asset, samples)
    }

    #[test]
    fn rejects_short_series() {
        let err = describe(&series(&[1.0])).expect_err("must reject");
        assert!(matches!(
            err,
            AnalyticsError::InsufficientData {
                required: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn constant_series_has_zero_dispersion() {
        let insight = describe(&series(&[7.0, 7.0, 7.0])).expect("insight");
        assert_eq!(insight.stddev_price, 0.0);
        assert_eq!(insight.volatility, 0.0);
        assert_eq!(insight.range_pct, 0.0);
        assert_eq!(insight.percent_change, 0.0);
    }

    #[test]
    fn percent_change_sign_convention() {
        let insight = describe(&series(&[100.0, 150.0])).expect("insight");
        assert_eq!(insight.percent_change, 50.0);

        let zero_first = describe(&series(&[0.0, 150.0])).expect("insight");
        assert_eq!(zero_first.percent_change, 0.0);
    }

    #[test]
    fn median_takes_upper_middle_for_even_counts() {
        let insight = describe(&series(&[4.0, 1.0, 3.0, 2.0])).expect("insight");
        assert_eq!(insight.median_price, 3.0);
    }

    #[test]
    fn range_pct_guards_non_positive_minimum() {
        let insight = describe(&series(&[0.0, 5.0, 10.0])).expect("insight");
        assert_eq!(insight.range_pct, 0.0);

        let positive = describe(&series(&[10.0, 5.0, 20.0])).expect("insight");
        assert!((positive.range_pct - 300.0).abs() < 1e-12);
    }

    #[test]
    fn basic_aggregates() {
        let insight = describe(&series(&[2.0, 4.0, 6.0])).expect("insight");
        assert_eq!(insight.first_price, 2.0);
        assert_eq!(insight.last_price, 6.0);
        assert_eq!(insight.avg_price, 4.0);
        assert_eq!(insight.min_price, 2.0);
        assert_eq!(insight.max_price, 6.0);
        assert_eq!(insight.sample_count, 3);
        assert_eq!(insight.percent_change, 200.0);
    }
}
