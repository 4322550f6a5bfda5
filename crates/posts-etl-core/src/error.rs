//! Pipeline error types that cross the core/infra boundary.

use thiserror::Error;

use crate::domain::DestinationError;
use crate::ports::StorageError;

/// Write failures - destination, serialization or storage problems.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("Invalid destination: {0}")]
    InvalidDestination(#[from] DestinationError),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage failed: {0}")]
    Storage(#[from] StorageError),
}

impl WriteError {
    /// Stable category label for structured logs.
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidDestination(_) => "invalid_destination",
            Self::Serialization(_) => "serialization",
            Self::Storage(e) => e.category(),
        }
    }
}
