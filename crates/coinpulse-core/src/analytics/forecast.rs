//! Short-horizon price forecast with a normal-approximation prediction
//! interval.

use serde::{Deserialize, Serialize};
use time::Duration;

use crate::analytics::regression;
use crate::analytics::trend::{Trend, TrendThresholds};
use crate::error::AnalyticsError;
use crate::{AssetId, Series, UtcDateTime, ValidationError};

/// Minimum samples before a regression forecast is attempted.
pub const FORECAST_MIN_SAMPLES: usize = 10;

/// Two-sided ~95% normal-approximation multiplier.
const Z_95: f64 = 1.96;

/// Point forecast plus prediction interval for one asset.
///
/// `predicted_price`, `price_low`, and `price_high` are rounded to two
/// decimals for display; `slope` keeps full precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub asset_id: AssetId,
    pub horizon_minutes: i64,
    pub predicted_price: f64,
    pub price_low: f64,
    pub price_high: f64,
    pub trend: Trend,
    pub slope: f64,
    pub sample_count: usize,
    pub predicted_at: UtcDateTime,
    pub horizon_end: UtcDateTime,
}

/// Fit OLS over the series and project `horizon_minutes` past `now`.
///
/// The interval standard error scales the residual standard error by the
/// leverage at the forecast point:
/// `se = rse * sqrt(1 + 1/n + (x_f - mean_x)^2 / sxx)`. A degenerate fit
/// (all timestamps coincident) already has zero slope and zero residual
/// error, so `sxx` only needs a positive stand-in to avoid dividing by
/// zero. The lower bound clamps at zero; the upper bound does not.
pub fn forecast_series(
    series: &Series,
    horizon_minutes: i64,
    now: UtcDateTime,
) -> Result<Forecast, AnalyticsError> {
    if horizon_minutes <= 0 {
        return Err(ValidationError::NonPositiveDuration {
            field: "horizon",
            minutes: horizon_minutes,
        }
        .into());
    }
    let n = series.len();
    if n < FORECAST_MIN_SAMPLES {
        return Err(AnalyticsError::InsufficientData {
            required: FORECAST_MIN_SAMPLES,
            actual: n,
        });
    }

    let xs = series.unix_times();
    let ys = series.prices();
    let fit = regression::fit(&xs, &ys);

    let horizon_end = now.checked_add(Duration::minutes(horizon_minutes))?;
    let future_x = horizon_end.unix_timestamp() as f64;
    let predicted = fit.intercept + fit.slope * future_x;

    let sxx = if fit.sxx < 1e-20 { 1.0 } else { fit.sxx };
    let leverage = (future_x - fit.mean_x).powi(2) / sxx;
    let se_pred = fit.rse * (1.0 + 1.0 / n as f64 + leverage).sqrt();

    let price_low = (predicted - Z_95 * se_pred).max(0.0);
    let price_high = predicted + Z_95 * se_pred;

    Ok(Forecast {
        asset_id: series.asset_id.clone(),
        horizon_minutes,
        predicted_price: round_price(predicted),
        price_low: round_price(price_low),
        price_high: round_price(price_high),
        trend: TrendThresholds::SENSITIVE.classify(fit.slope),
        slope: fit.slope,
        sample_count: n,
        predicted_at: now,
        horizon_end,
    })
}

/// Display rounding to two decimal places; applied only after all
/// interval math is done at full precision.
fn round_price(price: f64) -> f64 {
    (price * 100.0).round() / 100.0
}
