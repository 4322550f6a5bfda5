use async_trait::async_trait;

use crate::domain::{TransformedTable, WriteReceipt};
use crate::error::WriteError;

/// Table writer - serializes a transformed table to a destination.
#[async_trait]
pub trait TableWriter: Send + Sync {
    /// Overwrite `destination` with every row of `table`.
    async fn write(
        &self,
        table: &TransformedTable,
        destination: &str,
    ) -> Result<WriteReceipt, WriteError>;
}
