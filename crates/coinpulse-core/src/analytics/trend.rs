//! Directional trend classification from the fitted OLS slope.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::AssetId;

/// Directional label for a fitted slope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Uptrend,
    Downtrend,
    Sideways,
}

impl Trend {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uptrend => "Uptrend",
            Self::Downtrend => "Downtrend",
            Self::Sideways => "Sideways",
        }
    }
}

impl Display for Trend {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Slope thresholds for classification, in price units per second.
///
/// Two profiles are deliberately kept distinct: the range-query trend
/// endpoint historically used the coarser `STANDARD` profile, while
/// forecasting labels its slope with the finer `SENSITIVE` profile.
/// Unifying them would change observable behavior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendThresholds {
    pub up: f64,
    pub down: f64,
}

impl TrendThresholds {
    /// Coarse profile for short, noisy windows.
    pub const STANDARD: Self = Self::symmetric(0.01);

    /// Fine profile for day-scale windows; used by forecasting.
    pub const SENSITIVE: Self = Self::symmetric(1e-4);

    pub const fn symmetric(magnitude: f64) -> Self {
        Self {
            up: magnitude,
            down: magnitude,
        }
    }

    /// Strict inequalities on both sides: a slope exactly at a threshold
    /// is still `Sideways`.
    pub fn classify(self, slope: f64) -> Trend {
        if slope > self.up {
            Trend::Uptrend
        } else if slope < -self.down {
            Trend::Downtrend
        } else {
            Trend::Sideways
        }
    }
}

/// Response record for the compute-trend operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendReport {
    pub asset_id: AssetId,
    pub slope: f64,
    pub trend: Trend,
    pub sample_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_slope_is_sideways() {
        let thresholds = TrendThresholds::STANDARD;
        assert_eq!(thresholds.classify(0.01), Trend::Sideways);
        assert_eq!(thresholds.classify(-0.01), Trend::Sideways);
    }

    #[test]
    fn slopes_past_the_threshold_flip_the_label() {
        let thresholds = TrendThresholds::STANDARD;
        assert_eq!(thresholds.classify(0.010001), Trend::Uptrend);
        assert_eq!(thresholds.classify(-0.010001), Trend::Downtrend);
        assert_eq!(thresholds.classify(0.0), Trend::Sideways);
    }

    #[test]
    fn profiles_differ_in_granularity() {
        let slope = 0.001;
        assert_eq!(TrendThresholds::STANDARD.classify(slope), Trend::Sideways);
        assert_eq!(TrendThresholds::SENSITIVE.classify(slope), Trend::Uptrend);
    }
}
