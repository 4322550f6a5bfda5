//! Record sources.

mod http;

pub use http::HttpRecordSource;
