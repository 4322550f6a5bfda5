//! Dispatch between local and object storage by destination kind.

use std::sync::Arc;

use async_trait::async_trait;

use posts_etl_core::domain::Destination;
use posts_etl_core::ports::{ObjectStore, StorageError};

/// Routes local paths to one store and bucket URIs to another.
///
/// Without an object backend, bucket destinations fail with
/// [`StorageError::Unsupported`].
#[derive(Clone)]
pub struct StoreRouter {
    local: Arc<dyn ObjectStore>,
    object: Option<Arc<dyn ObjectStore>>,
}

impl StoreRouter {
    pub fn new(local: Arc<dyn ObjectStore>) -> Self {
        Self {
            local,
            object: None,
        }
    }

    pub fn with_object_store(mut self, object: Arc<dyn ObjectStore>) -> Self {
        self.object = Some(object);
        self
    }

    fn route(&self, destination: &Destination) -> Result<&dyn ObjectStore, StorageError> {
        match destination {
            Destination::Local(_) => Ok(self.local.as_ref()),
            Destination::Object { .. } => self.object.as_deref().ok_or_else(|| {
                StorageError::Unsupported(format!(
                    "{destination}: object storage is not configured"
                ))
            }),
        }
    }
}

#[async_trait]
impl ObjectStore for StoreRouter {
    async fn put(
        &self,
        destination: &Destination,
        payload: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        self.route(destination)?
            .put(destination, payload, content_type)
            .await
    }

    async fn get(&self, destination: &Destination) -> Result<Option<Vec<u8>>, StorageError> {
        self.route(destination)?.get(destination).await
    }
}
