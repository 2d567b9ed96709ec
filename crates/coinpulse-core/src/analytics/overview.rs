//! Market-wide insight report: every tracked asset's statistics over one
//! window, with top gainers and losers pulled out.

use serde::{Deserialize, Serialize};

use crate::analytics::stats::Insight;
use crate::TimeWindow;

/// Default number of gainers/losers surfaced in an overview.
pub const DEFAULT_TOP_N: usize = 5;

/// Whole-market snapshot for one window.
///
/// `insights` is sorted by percent change, gainers first. Losers are
/// listed worst-first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketOverview {
    pub window: TimeWindow,
    pub insights: Vec<Insight>,
    pub top_gainers: Vec<Insight>,
    pub top_losers: Vec<Insight>,
}

impl MarketOverview {
    /// Assemble an overview from per-asset insights.
    pub fn from_insights(window: TimeWindow, mut insights: Vec<Insight>, top_n: usize) -> Self {
        insights.sort_by(|a, b| {
            b.percent_change
                .partial_cmp(&a.percent_change)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let top = top_n.min(insights.len());
        let top_gainers = insights[..top].to_vec();
        let top_losers: Vec<Insight> = insights.iter().rev().take(top).cloned().collect();

        Self {
            window,
            insights,
            top_gainers,
            top_losers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AssetId;

    fn insight(id: &str, percent_change: f64) -> Insight {
        Insight {
            asset_id: AssetId::parse(id).expect("asset id"),
            first_price: 1.0,
            last_price: 1.0,
            percent_change,
            avg_price: 1.0,
            stddev_price: 0.0,
            volatility: 0.0,
            min_price: 1.0,
            max_price: 1.0,
            median_price: 1.0,
            range_pct: 0.0,
            sample_count: 2,
        }
    }

    #[test]
    fn splits_gainers_and_losers() {
        let overview = MarketOverview::from_insights(
            TimeWindow::UNBOUNDED,
            vec![
                insight("flat", 0.0),
                insight("up", 12.0),
                insight("down", -8.0),
            ],
            2,
        );

        let order: Vec<&str> = overview
            .insights
            .iter()
            .map(|i| i.asset_id.as_str())
            .collect();
        assert_eq!(order, vec!["up", "flat", "down"]);

        let gainers: Vec<&str> = overview
            .top_gainers
            .iter()
            .map(|i| i.asset_id.as_str())
            .collect();
        assert_eq!(gainers, vec!["up", "flat"]);

        let losers: Vec<&str> = overview
            .top_losers
            .iter()
            .map(|i| i.asset_id.as_str())
            .collect();
        assert_eq!(losers, vec!["down", "flat"]);
    }

    #[test]
    fn top_n_is_clamped_to_available_assets() {
        let overview =
            MarketOverview::from_insights(TimeWindow::UNBOUNDED, vec![insight("only", 1.0)], 5);
        assert_eq!(overview.top_gainers.len(), 1);
        assert_eq!(overview.top_losers.len(), 1);
    }
}
