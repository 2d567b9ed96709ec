use thiserror::Error;

use coinpulse_core::{AnalyticsError, StoreError, ValidationError};

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Analytics(#[from] AnalyticsError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("command error: {0}")]
    Command(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) | Self::Command(_) => 2,
            Self::Analytics(AnalyticsError::Validation(_)) => 2,
            Self::Analytics(AnalyticsError::InsufficientData { .. }) => 3,
            Self::Analytics(AnalyticsError::Store(_))
            | Self::Store(_)
            | Self::Serialization(_)
            | Self::Io(_) => 10,
        }
    }
}
