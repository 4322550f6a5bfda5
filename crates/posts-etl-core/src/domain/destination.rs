use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Where a transformed table is written.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Destination {
    /// A file on the local filesystem.
    Local(PathBuf),
    /// An object in an S3-compatible bucket.
    Object { bucket: String, key: String },
}

/// Reasons a destination string cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DestinationError {
    #[error("Destination is empty")]
    Empty,

    #[error("Unsupported destination scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Object destination is missing a bucket: {0}")]
    MissingBucket(String),

    #[error("Object destination is missing a key: {0}")]
    MissingKey(String),
}

impl Destination {
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local(_))
    }
}

impl FromStr for Destination {
    type Err = DestinationError;

    /// Accepts `s3://bucket/key`, `s3a://bucket/key`, `file:///path` and plain paths.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(DestinationError::Empty);
        }

        match raw.split_once("://") {
            Some(("s3" | "s3a", rest)) => {
                let (bucket, key) = rest
                    .split_once('/')
                    .ok_or_else(|| DestinationError::MissingKey(raw.to_string()))?;
                if bucket.is_empty() {
                    return Err(DestinationError::MissingBucket(raw.to_string()));
                }
                let key = key.trim_start_matches('/');
                if key.is_empty() {
                    return Err(DestinationError::MissingKey(raw.to_string()));
                }
                Ok(Self::Object {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                })
            }
            Some(("file", "")) => Err(DestinationError::Empty),
            Some(("file", path)) => Ok(Self::Local(PathBuf::from(path))),
            Some((scheme, _)) => Err(DestinationError::UnsupportedScheme(scheme.to_string())),
            None => Ok(Self::Local(PathBuf::from(raw))),
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(path) => write!(f, "{}", path.display()),
            Self::Object { bucket, key } => write!(f, "s3://{bucket}/{key}"),
        }
    }
}

/// Serialized layout of a written table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// One JSON object per line.
    #[default]
    JsonLines,
    /// A single JSON array.
    JsonArray,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown output format: {0} (expected json_lines or json_array)")]
pub struct UnknownFormat(pub String);

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::JsonLines => "json_lines",
            Self::JsonArray => "json_array",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::JsonLines => "application/x-ndjson",
            Self::JsonArray => "application/json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = UnknownFormat;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_lowercase().as_str() {
            "json_lines" | "jsonl" | "ndjson" => Ok(Self::JsonLines),
            "json_array" | "json" => Ok(Self::JsonArray),
            other => Err(UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
