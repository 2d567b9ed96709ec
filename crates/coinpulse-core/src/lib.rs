//! Core contracts for coinpulse.
//!
//! This crate contains:
//! - Canonical domain models and validation
//! - The `SampleStore` trait consumed by the analytics engine
//! - Descriptive statistics, volatility, trend, mover ranking, and
//!   forecasting over per-asset price series
//! - An in-memory store for tests and embedders

pub mod analytics;
pub mod domain;
pub mod engine;
pub mod error;
pub mod memory;
pub mod store;

pub use analytics::forecast::{Forecast, FORECAST_MIN_SAMPLES};
pub use analytics::movers::MoverRecord;
pub use analytics::overview::{MarketOverview, DEFAULT_TOP_N};
pub use analytics::regression::LinearFit;
pub use analytics::stats::{Insight, STATS_MIN_SAMPLES};
pub use analytics::trend::{Trend, TrendReport, TrendThresholds};
pub use analytics::volatility::VolatilityReport;
pub use domain::{AssetId, Sample, Series, TimeWindow, UtcDateTime};
pub use engine::Analytics;
pub use error::{AnalyticsError, ValidationError};
pub use memory::MemoryStore;
pub use store::{SampleStore, StoreError, StoreFuture};
