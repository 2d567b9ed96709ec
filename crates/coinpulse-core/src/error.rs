use thiserror::Error;

use crate::store::StoreError;

/// Validation and contract errors exposed by `coinpulse-core`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("asset id cannot be empty")]
    EmptyAssetId,
    #[error("asset id length {len} exceeds max {max}")]
    AssetIdTooLong { len: usize, max: usize },
    #[error("asset id must start with an ASCII letter or digit: '{ch}'")]
    AssetIdInvalidStart { ch: char },
    #[error("asset id contains invalid character '{ch}' at index {index}")]
    AssetIdInvalidChar { ch: char, index: usize },

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },
    #[error("timestamp is outside the representable range")]
    TimestampOutOfRange,

    #[error("price must be finite, got {value}")]
    NonFinitePrice { value: f64 },

    #[error("window start must precede window end")]
    EmptyWindow,

    #[error("{field} must be positive, got {minutes} minutes")]
    NonPositiveDuration { field: &'static str, minutes: i64 },
}

/// Top-level error type for analytics operations.
///
/// `InsufficientData` rejects the whole request; it is never silently
/// substituted with a default result. Store failures inside batch
/// operations (mover ranking, market overview) exclude the affected asset
/// instead of surfacing here.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("not enough samples: required {required}, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
