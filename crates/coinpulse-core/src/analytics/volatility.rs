//! Realized-volatility proxy: dispersion of consecutive log returns.

use serde::{Deserialize, Serialize};

use crate::AssetId;

/// Response record for the compute-volatility operation.
///
/// The figure is the sample standard deviation of log returns over the
/// observed interval; it is not annualized or otherwise scaled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolatilityReport {
    pub asset_id: AssetId,
    pub volatility: f64,
    pub sample_count: usize,
    /// Log returns that actually entered the estimate; pairs touching a
    /// non-positive price are skipped, not zeroed.
    pub returns_used: usize,
}

/// Consecutive log returns `ln(p_i / p_{i-1})` for pairs where both
/// prices are strictly positive.
pub fn log_returns(prices: &[f64]) -> Vec<f64> {
    let mut returns = Vec::new();
    for pair in prices.windows(2) {
        if pair[0] > 0.0 && pair[1] > 0.0 {
            returns.push((pair[1] / pair[0]).ln());
        }
    }
    returns
}

/// Sample standard deviation (divisor `n - 1`) of the log returns;
/// `0` when fewer than two returns survive the positivity filter.
pub fn log_return_volatility(prices: &[f64]) -> f64 {
    let returns = log_returns(prices);
    sample_stddev(&returns)
}

/// Sample standard deviation with divisor `n - 1`; `0` when `n <= 1`.
pub fn sample_stddev(values: &[f64]) -> f64 {
    let n = values.len();
    if n <= 1 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let mut variance = 0.0;
    for value in values {
        let diff = value - mean;
        variance += diff * diff;
    }
    (variance / (n - 1) as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_prices_have_zero_volatility() {
        assert_eq!(log_return_volatility(&[5.0, 5.0, 5.0, 5.0]), 0.0);
    }

    #[test]
    fn skips_pairs_with_non_positive_prices() {
        // Only (2.0, 4.0) survives; one return cannot disperse.
        let returns = log_returns(&[2.0, 4.0, 0.0, 3.0, -1.0]);
        assert_eq!(returns.len(), 1);
        assert_eq!(log_return_volatility(&[2.0, 4.0, 0.0, 3.0, -1.0]), 0.0);
    }

    #[test]
    fn single_return_yields_zero() {
        assert_eq!(log_return_volatility(&[1.0, 2.0]), 0.0);
    }

    #[test]
    fn alternating_prices_have_positive_volatility() {
        let vol = log_return_volatility(&[100.0, 110.0, 100.0, 110.0, 100.0]);
        assert!(vol > 0.0);
    }

    #[test]
    fn sample_stddev_uses_n_minus_one() {
        let stddev = sample_stddev(&[2.0, 4.0]);
        assert!((stddev - std::f64::consts::SQRT_2).abs() < 1e-12);
    }
}
