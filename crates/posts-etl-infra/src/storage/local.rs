//! Local filesystem store.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use posts_etl_core::domain::Destination;
use posts_etl_core::ports::{ObjectStore, StorageError};

/// Writes payloads to files, replacing them atomically.
///
/// Content goes to a sibling temp file first and is renamed over the
/// target, so readers never observe a partially written file.
#[derive(Debug, Clone, Default)]
pub struct LocalFileStore;

impl LocalFileStore {
    pub fn new() -> Self {
        Self
    }

    fn path_of(destination: &Destination) -> Result<&Path, StorageError> {
        match destination {
            Destination::Local(path) => Ok(path.as_path()),
            other => Err(StorageError::Unsupported(format!(
                "{other} is not a local path"
            ))),
        }
    }

    fn temp_path(path: &Path) -> Result<PathBuf, StorageError> {
        let name = path.file_name().ok_or_else(|| {
            StorageError::Unsupported(format!("{} has no file name", path.display()))
        })?;
        let mut temp_name = std::ffi::OsString::from(".");
        temp_name.push(name);
        temp_name.push(".tmp");
        Ok(path.with_file_name(temp_name))
    }
}

fn classify(path: &Path, e: io::Error) -> StorageError {
    match e.kind() {
        io::ErrorKind::PermissionDenied => {
            StorageError::PermissionDenied(format!("{}: {e}", path.display()))
        }
        io::ErrorKind::NotFound => StorageError::NotFound(format!("{}: {e}", path.display())),
        _ => StorageError::Io(e),
    }
}

#[async_trait]
impl ObjectStore for LocalFileStore {
    async fn put(
        &self,
        destination: &Destination,
        payload: Vec<u8>,
        _content_type: &str,
    ) -> Result<(), StorageError> {
        let path = Self::path_of(destination)?;
        let temp = Self::temp_path(path)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| classify(parent, e))?;
        }

        tokio::fs::write(&temp, &payload)
            .await
            .map_err(|e| classify(&temp, e))?;

        if let Err(e) = tokio::fs::rename(&temp, path).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(classify(path, e));
        }

        tracing::debug!(path = %path.display(), bytes = payload.len(), "Replaced local file");
        Ok(())
    }

    async fn get(&self, destination: &Destination) -> Result<Option<Vec<u8>>, StorageError> {
        let path = Self::path_of(destination)?;
        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(classify(path, e)),
        }
    }
}
