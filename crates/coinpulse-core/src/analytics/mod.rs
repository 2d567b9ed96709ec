//! Numerical core: descriptive statistics, volatility, trend
//! classification, mover ranking, and short-horizon forecasting.
//!
//! Every function here is a pure computation over an already-loaded
//! series; loading and normalization live in [`crate::engine`].

pub mod forecast;
pub mod movers;
pub mod overview;
pub mod regression;
pub mod stats;
pub mod trend;
pub mod volatility;
