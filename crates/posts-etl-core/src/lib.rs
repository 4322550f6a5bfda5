//! # Posts ETL Core
//!
//! The domain layer of the posts ETL pipeline.
//! This crate holds the record model, the transformation rules and the
//! port traits; it performs no I/O of its own.

pub mod domain;
pub mod error;
pub mod ports;
pub mod transform;

pub use error::WriteError;
pub use transform::transform;
