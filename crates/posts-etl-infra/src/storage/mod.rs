//! Storage backends - local filesystem, S3 and in-memory.

mod local;
mod memory;
mod router;

pub use local::LocalFileStore;
pub use memory::InMemoryObjectStore;
pub use router::StoreRouter;

#[cfg(feature = "s3")]
mod s3;
#[cfg(feature = "s3")]
pub use self::s3::{S3Config, S3ObjectStore};
