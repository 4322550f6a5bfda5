use async_trait::async_trait;

use crate::domain::RecordSet;

/// Record source - abstraction over where raw records come from.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch all records at `url`.
    ///
    /// Failures are reported by the implementation and yield an empty set;
    /// an empty set is never an error for the caller.
    async fn fetch(&self, url: &str) -> RecordSet;
}

/// Fetch failures.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Unexpected status: {0}")]
    Status(u16),

    #[error("Response body is not a JSON array of objects: {0}")]
    Decode(String),
}

impl FetchError {
    pub fn category(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Status(_) => "status",
            Self::Decode(_) => "decode",
        }
    }

    /// HTTP status code, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status(code) => Some(*code),
            _ => None,
        }
    }
}
