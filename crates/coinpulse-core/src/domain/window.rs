use serde::{Deserialize, Serialize};
use time::Duration;

use crate::{UtcDateTime, ValidationError};

/// Half-open query window `[start, end)`.
///
/// A missing bound means unbounded on that side; "now" is always the
/// caller's concern, never implied here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: Option<UtcDateTime>,
    pub end: Option<UtcDateTime>,
}

impl TimeWindow {
    pub const UNBOUNDED: Self = Self {
        start: None,
        end: None,
    };

    pub fn new(
        start: Option<UtcDateTime>,
        end: Option<UtcDateTime>,
    ) -> Result<Self, ValidationError> {
        if let (Some(start), Some(end)) = (start, end) {
            if start >= end {
                return Err(ValidationError::EmptyWindow);
            }
        }
        Ok(Self { start, end })
    }

    pub fn since(start: UtcDateTime) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    pub fn until(end: UtcDateTime) -> Self {
        Self {
            start: None,
            end: Some(end),
        }
    }

    /// The lookback window `[now - minutes, ..)` used by forecasting.
    pub fn last_minutes(now: UtcDateTime, minutes: i64) -> Result<Self, ValidationError> {
        if minutes <= 0 {
            return Err(ValidationError::NonPositiveDuration {
                field: "lookback",
                minutes,
            });
        }
        Ok(Self::since(now.checked_sub(Duration::minutes(minutes))?))
    }

    pub fn contains(&self, ts: UtcDateTime) -> bool {
        if let Some(start) = self.start {
            if ts < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if ts >= end {
                return false;
            }
        }
        true
    }
}
