//! # Posts ETL Infrastructure
//!
//! Concrete implementations of the ports defined in `posts-etl-core`.
//! This crate contains the HTTP source, storage backends and the JSON writer.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - Local filesystem and in-memory storage only
//! - `s3` - S3-compatible object storage via the AWS SDK

pub mod fetch;
pub mod storage;
pub mod writer;

pub use fetch::HttpRecordSource;
pub use storage::{InMemoryObjectStore, LocalFileStore, StoreRouter};
pub use writer::JsonTableWriter;

#[cfg(feature = "s3")]
pub use storage::{S3Config, S3ObjectStore};
