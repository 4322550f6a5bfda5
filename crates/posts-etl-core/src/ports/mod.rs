//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod source;
mod storage;
mod writer;

pub use source::{FetchError, RecordSource};
pub use storage::{ObjectStore, StorageError};
pub use writer::TableWriter;
