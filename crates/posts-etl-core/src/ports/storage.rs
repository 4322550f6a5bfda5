use async_trait::async_trait;

use crate::domain::Destination;

/// Object store - abstraction over local disk and bucket storage.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Replace whatever is at `destination` with `payload`.
    async fn put(
        &self,
        destination: &Destination,
        payload: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError>;

    /// Read the content at `destination`, `None` if nothing is there.
    async fn get(&self, destination: &Destination) -> Result<Option<Vec<u8>>, StorageError>;
}

/// Storage operation errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Unsupported destination: {0}")]
    Unsupported(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

impl StorageError {
    pub fn category(&self) -> &'static str {
        match self {
            Self::PermissionDenied(_) => "permission_denied",
            Self::NotFound(_) => "not_found",
            Self::Connection(_) => "connection",
            Self::Unsupported(_) => "unsupported_destination",
            Self::Io(_) => "io",
            Self::Backend(_) => "backend",
        }
    }
}
