//! HTTP record source - one GET per fetch, no retries.

use async_trait::async_trait;

use posts_etl_core::domain::RecordSet;
use posts_etl_core::ports::{FetchError, RecordSource};

/// Fetches a JSON array of objects over HTTP.
#[derive(Debug, Clone, Default)]
pub struct HttpRecordSource {
    client: reqwest::Client,
}

impl HttpRecordSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch and decode, surfacing the failure instead of swallowing it.
    pub async fn try_fetch(&self, url: &str) -> Result<RecordSet, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[async_trait]
impl RecordSource for HttpRecordSource {
    async fn fetch(&self, url: &str) -> RecordSet {
        match self.try_fetch(url).await {
            Ok(records) => {
                tracing::info!(url = %url, records = records.len(), "Fetched records");
                records
            }
            Err(e) => {
                tracing::error!(
                    url = %url,
                    status = e.status(),
                    category = e.category(),
                    error = %e,
                    "Error fetching data"
                );
                RecordSet::new()
            }
        }
    }
}
