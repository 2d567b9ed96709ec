//! Request-scoped analytics facade over an injected [`SampleStore`].
//!
//! Every operation reads one snapshot, normalizes it, computes purely,
//! and drops the data; nothing is retained between invocations, so
//! concurrent requests need no coordination.

use std::sync::Arc;

use time::Duration;
use tracing::{debug, warn};

use crate::analytics::forecast::{self, Forecast};
use crate::analytics::movers::{self, MoverRecord};
use crate::analytics::overview::MarketOverview;
use crate::analytics::regression;
use crate::analytics::stats::{self, Insight, STATS_MIN_SAMPLES};
use crate::analytics::trend::{TrendReport, TrendThresholds};
use crate::analytics::volatility::{self, VolatilityReport};
use crate::error::AnalyticsError;
use crate::store::SampleStore;
use crate::{AssetId, Series, TimeWindow, UtcDateTime};

/// Minimum samples for the compute-volatility operation.
const VOLATILITY_MIN_SAMPLES: usize = 2;

/// Minimum samples for the compute-trend operation (bare slope).
const TREND_MIN_SAMPLES: usize = 2;

/// The analytics and forecasting engine.
///
/// Holds only the store handle; cloning is cheap and every method is safe
/// to call from concurrent tasks.
#[derive(Clone)]
pub struct Analytics {
    store: Arc<dyn SampleStore>,
}

impl Analytics {
    pub fn new(store: Arc<dyn SampleStore>) -> Self {
        Self { store }
    }

    /// The underlying store, for ingestion paths that sit next to the
    /// read-only query shapes.
    pub fn store(&self) -> &Arc<dyn SampleStore> {
        &self.store
    }

    /// Load one asset's series for a window, normalized ascending.
    async fn load(
        &self,
        asset_id: &AssetId,
        window: TimeWindow,
    ) -> Result<Series, AnalyticsError> {
        let series = self.store.fetch_range(asset_id, window).await?;
        debug!(asset = %asset_id, samples = series.len(), "loaded series");
        Ok(Series::normalized(series.asset_id, series.samples))
    }

    /// Descriptive statistics for one asset over one window.
    pub async fn insight(
        &self,
        asset_id: &AssetId,
        window: TimeWindow,
    ) -> Result<Insight, AnalyticsError> {
        let series = self.load(asset_id, window).await?;
        stats::describe(&series)
    }

    /// Log-return volatility for one asset over one window.
    pub async fn volatility(
        &self,
        asset_id: &AssetId,
        window: TimeWindow,
    ) -> Result<VolatilityReport, AnalyticsError> {
        let series = self.load(asset_id, window).await?;
        let n = series.len();
        if n < VOLATILITY_MIN_SAMPLES {
            return Err(AnalyticsError::InsufficientData {
                required: VOLATILITY_MIN_SAMPLES,
                actual: n,
            });
        }

        let prices = series.prices();
        let returns_used = volatility::log_returns(&prices).len();
        Ok(VolatilityReport {
            asset_id: series.asset_id,
            volatility: volatility::log_return_volatility(&prices),
            sample_count: n,
            returns_used,
        })
    }

    /// OLS slope and trend label for one asset over one window.
    pub async fn trend(
        &self,
        asset_id: &AssetId,
        window: TimeWindow,
        thresholds: TrendThresholds,
    ) -> Result<TrendReport, AnalyticsError> {
        let series = self.load(asset_id, window).await?;
        let n = series.len();
        if n < TREND_MIN_SAMPLES {
            return Err(AnalyticsError::InsufficientData {
                required: TREND_MIN_SAMPLES,
                actual: n,
            });
        }

        let fit = regression::fit(&series.unix_times(), &series.prices());
        Ok(TrendReport {
            asset_id: series.asset_id,
            slope: fit.slope,
            trend: thresholds.classify(fit.slope),
            sample_count: n,
        })
    }

    /// Rank all tracked assets by absolute percent change over `lookback`.
    pub async fn movers(
        &self,
        lookback: Duration,
        now: UtcDateTime,
    ) -> Result<Vec<MoverRecord>, AnalyticsError> {
        movers::rank_movers(Arc::clone(&self.store), lookback, now).await
    }

    /// Regression forecast `horizon_minutes` past `now`, fitted over the
    /// trailing `lookback_minutes` of samples.
    pub async fn forecast(
        &self,
        asset_id: &AssetId,
        horizon_minutes: i64,
        lookback_minutes: i64,
        now: UtcDateTime,
    ) -> Result<Forecast, AnalyticsError> {
        let window = TimeWindow::last_minutes(now, lookback_minutes)?;
        let series = self.load(asset_id, window).await?;
        forecast::forecast_series(&series, horizon_minutes, now)
    }

    /// Per-asset insights for the whole market over one window, with the
    /// `top_n` gainers and losers pulled out. Assets with too few samples
    /// or a failing store lookup are excluded, never fatal.
    pub async fn overview(
        &self,
        window: TimeWindow,
        top_n: usize,
    ) -> Result<MarketOverview, AnalyticsError> {
        let assets = self.store.list_assets().await?;
        let mut insights = Vec::with_capacity(assets.len());
        for asset_id in assets {
            let series = match self.load(&asset_id, window).await {
                Ok(series) => series,
                Err(error) => {
                    warn!(asset = %asset_id, %error, "series load failed; excluding from overview");
                    continue;
                }
            };
            if series.len() < STATS_MIN_SAMPLES {
                continue;
            }
            insights.push(stats::describe(&series)?);
        }

        Ok(MarketOverview::from_insights(window, insights, top_n))
    }
}
