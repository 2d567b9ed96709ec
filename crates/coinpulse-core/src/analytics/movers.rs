//! Cross-asset mover ranking over a fixed lookback window.

use std::cmp::Ordering;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use time::Duration;
use tokio::task::JoinSet;
use tracing::warn;

use crate::error::AnalyticsError;
use crate::store::SampleStore;
use crate::{AssetId, UtcDateTime, ValidationError};

/// One ranked mover: boundary price at the window start versus the latest
/// known price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoverRecord {
    pub asset_id: AssetId,
    pub boundary_price: f64,
    pub latest_price: f64,
    pub percent_change: f64,
}

/// Rank every tracked asset by absolute percent change over `lookback`.
///
/// Per asset this needs exactly two point lookups: the latest sample at
/// or before `now - lookback`, and the latest sample overall. The pairs
/// are independent, so they fan out as concurrent tasks and join before
/// sorting. An asset missing either endpoint, or with a non-positive
/// boundary price, is excluded rather than failing the ranking; a store
/// failure for one asset is logged and likewise excludes only that asset.
pub async fn rank_movers(
    store: Arc<dyn SampleStore>,
    lookback: Duration,
    now: UtcDateTime,
) -> Result<Vec<MoverRecord>, AnalyticsError> {
    if !lookback.is_positive() {
        return Err(ValidationError::NonPositiveDuration {
            field: "lookback",
            minutes: lookback.whole_minutes(),
        }
        .into());
    }
    let boundary_at = now.checked_sub(lookback)?;

    let assets = store.list_assets().await?;
    let mut tasks: JoinSet<Option<MoverRecord>> = JoinSet::new();
    for asset_id in assets {
        let store = Arc::clone(&store);
        tasks.spawn(async move {
            change_for_asset(store.as_ref(), &asset_id, boundary_at, now).await
        });
    }

    let mut movers = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        if let Ok(Some(record)) = joined {
            movers.push(record);
        }
    }

    // Largest absolute movers first, gains and losses intermixed; asset id
    // breaks exact ties so concurrent completion order never shows through.
    movers.sort_by(|a, b| {
        b.percent_change
            .abs()
            .partial_cmp(&a.percent_change.abs())
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.asset_id.cmp(&b.asset_id))
    });

    Ok(movers)
}

async fn change_for_asset(
    store: &dyn SampleStore,
    asset_id: &AssetId,
    boundary_at: UtcDateTime,
    now: UtcDateTime,
) -> Option<MoverRecord> {
    let boundary = match store.latest_at_or_before(asset_id, boundary_at).await {
        Ok(found) => found,
        Err(error) => {
            warn!(asset = %asset_id, %error, "boundary lookup failed; excluding asset");
            return None;
        }
    };
    let latest = match store.latest_at_or_before(asset_id, now).await {
        Ok(found) => found,
        Err(error) => {
            warn!(asset = %asset_id, %error, "latest lookup failed; excluding asset");
            return None;
        }
    };

    let (boundary, latest) = match (boundary, latest) {
        (Some(boundary), Some(latest)) => (boundary, latest),
        _ => return None,
    };
    if boundary.price <= 0.0 {
        return None;
    }

    let percent_change = (latest.price - boundary.price) / boundary.price * 100.0;
    Some(MoverRecord {
        asset_id: asset_id.clone(),
        boundary_price: boundary.price,
        latest_price: latest.price,
        percent_change,
    })
}
