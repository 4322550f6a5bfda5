//! JSON table writer - serializes a table and overwrites the destination.

use std::sync::Arc;

use async_trait::async_trait;

use posts_etl_core::domain::{Destination, OutputFormat, TransformedTable, WriteReceipt};
use posts_etl_core::ports::{ObjectStore, TableWriter};
use posts_etl_core::WriteError;

/// Writes tables as JSON through an [`ObjectStore`].
///
/// Every failure is logged here with its category before being returned,
/// so callers only decide whether it matters for their exit status.
pub struct JsonTableWriter {
    store: Arc<dyn ObjectStore>,
    format: OutputFormat,
}

impl JsonTableWriter {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self {
            store,
            format: OutputFormat::default(),
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    async fn overwrite(
        &self,
        table: &TransformedTable,
        destination: &str,
    ) -> Result<WriteReceipt, WriteError> {
        let parsed: Destination = destination.parse()?;
        let payload = table.to_json(self.format)?;
        let bytes = payload.len();

        self.store
            .put(&parsed, payload, self.format.content_type())
            .await?;

        Ok(WriteReceipt {
            destination: parsed.to_string(),
            format: self.format,
            rows: table.len(),
            bytes,
            written_at: chrono::Utc::now(),
        })
    }
}

#[async_trait]
impl TableWriter for JsonTableWriter {
    async fn write(
        &self,
        table: &TransformedTable,
        destination: &str,
    ) -> Result<WriteReceipt, WriteError> {
        match self.overwrite(table, destination).await {
            Ok(receipt) => {
                tracing::info!(
                    destination = %receipt.destination,
                    rows = receipt.rows,
                    bytes = receipt.bytes,
                    format = %receipt.format,
                    "Data successfully saved"
                );
                Ok(receipt)
            }
            Err(e) => {
                tracing::error!(
                    destination = %destination,
                    category = e.category(),
                    error = %e,
                    "Error writing data"
                );
                Err(e)
            }
        }
    }
}
