//! Domain entities - the records flowing through the pipeline.

mod destination;
mod record;
mod row;

pub use destination::{Destination, DestinationError, OutputFormat, UnknownFormat};
pub use record::{Record, RecordSet};
pub use row::{TransformedRow, TransformedTable, WriteReceipt};
