//! In-memory object store - used in tests and dry runs.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use posts_etl_core::domain::Destination;
use posts_etl_core::ports::{ObjectStore, StorageError};

struct StoredObject {
    payload: Vec<u8>,
    content_type: String,
}

/// Object store backed by a HashMap with an async RwLock.
///
/// Note: Data is lost when the store is dropped.
pub struct InMemoryObjectStore {
    objects: RwLock<HashMap<Destination, StoredObject>>,
    unavailable: bool,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
            unavailable: false,
        }
    }

    /// A store whose every operation fails with a connection error.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::new()
        }
    }

    /// Number of stored objects.
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn content_type(&self, destination: &Destination) -> Option<String> {
        let objects = self.objects.read().await;
        objects.get(destination).map(|o| o.content_type.clone())
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.unavailable {
            return Err(StorageError::Connection("store unavailable".to_string()));
        }
        Ok(())
    }
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn put(
        &self,
        destination: &Destination,
        payload: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        self.check_available()?;

        let mut objects = self.objects.write().await;
        objects.insert(
            destination.clone(),
            StoredObject {
                payload,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn get(&self, destination: &Destination) -> Result<Option<Vec<u8>>, StorageError> {
        self.check_available()?;

        let objects = self.objects.read().await;
        Ok(objects.get(destination).map(|o| o.payload.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dest() -> Destination {
        Destination::Object {
            bucket: "bucket".to_string(),
            key: "out.json".to_string(),
        }
    }

    #[tokio::test]
    async fn test_put_replaces_and_get() {
        let store = InMemoryObjectStore::new();
        store.put(&dest(), b"first".to_vec(), "application/json").await.unwrap();
        store.put(&dest(), b"second".to_vec(), "application/x-ndjson").await.unwrap();

        assert_eq!(store.get(&dest()).await.unwrap(), Some(b"second".to_vec()));
        assert_eq!(store.len().await, 1);
        assert_eq!(
            store.content_type(&dest()).await.as_deref(),
            Some("application/x-ndjson")
        );
    }

    #[tokio::test]
    async fn test_unavailable_store_fails() {
        let store = InMemoryObjectStore::unavailable();

        let err = store.put(&dest(), Vec::new(), "").await.unwrap_err();
        assert_eq!(err.category(), "connection");
        assert!(store.is_empty().await);
    }
}
