//! Application configuration loaded from environment variables.

use std::env;
use std::fmt;

use posts_etl_core::domain::{OutputFormat, UnknownFormat};

pub const DEFAULT_APP_NAME: &str = "posts-etl";
pub const DEFAULT_SOURCE_URL: &str = "https://jsonplaceholder.typicode.com/posts";
pub const DEFAULT_OUTPUT_PATH: &str = "output/transformed_data.json";
pub const DEFAULT_REGION: &str = "us-east-1";

/// Object key used when only a bucket is configured.
const BUCKET_OUTPUT_KEY: &str = "transformed_data/output.json";

/// Configuration errors detected at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{present} is set but {missing} is not; provide both or neither")]
    IncompleteCredentials {
        present: &'static str,
        missing: &'static str,
    },

    #[error("Invalid ETL_OUTPUT_FORMAT: {0}")]
    OutputFormat(#[from] UnknownFormat),

    #[error("Invalid boolean for {var}: {value}")]
    InvalidBool { var: &'static str, value: String },
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app_name: String,
    pub source_url: String,
    pub output_path: String,
    pub output_format: OutputFormat,
    pub storage: StorageConfig,
}

/// Object storage session settings.
#[derive(Clone, Default)]
pub struct StorageConfig {
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub endpoint: Option<String>,
    pub region: String,
    pub path_style: bool,
}

impl fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageConfig")
            .field("access_key", &self.access_key)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("region", &self.region)
            .field("path_style", &self.path_style)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let output_path = var("ETL_OUTPUT_PATH")
            .or_else(|| {
                var("ETL_OUTPUT_BUCKET").map(|bucket| format!("s3a://{bucket}/{BUCKET_OUTPUT_KEY}"))
            })
            .unwrap_or_else(|| DEFAULT_OUTPUT_PATH.to_string());

        let output_format = var("ETL_OUTPUT_FORMAT")
            .map(|v| v.parse::<OutputFormat>())
            .transpose()?
            .unwrap_or_default();

        let access_key = var("STORAGE_ACCESS_KEY");
        let secret_key = var("STORAGE_SECRET_KEY");
        match (&access_key, &secret_key) {
            (Some(_), None) => {
                return Err(ConfigError::IncompleteCredentials {
                    present: "STORAGE_ACCESS_KEY",
                    missing: "STORAGE_SECRET_KEY",
                });
            }
            (None, Some(_)) => {
                return Err(ConfigError::IncompleteCredentials {
                    present: "STORAGE_SECRET_KEY",
                    missing: "STORAGE_ACCESS_KEY",
                });
            }
            _ => {}
        }

        let path_style = match var("STORAGE_PATH_STYLE") {
            None => false,
            Some(v) => parse_bool("STORAGE_PATH_STYLE", &v)?,
        };

        Ok(Self {
            app_name: var("ETL_APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            source_url: var("ETL_SOURCE_URL").unwrap_or_else(|| DEFAULT_SOURCE_URL.to_string()),
            output_path,
            output_format,
            storage: StorageConfig {
                access_key,
                secret_key,
                endpoint: var("STORAGE_ENDPOINT"),
                region: var("STORAGE_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
                path_style,
            },
        })
    }

    /// Whether the output path points at object storage.
    pub fn writes_to_object_storage(&self) -> bool {
        self.output_path
            .parse::<posts_etl_core::domain::Destination>()
            .map(|d| !d.is_local())
            .unwrap_or(false)
    }

    #[cfg(feature = "s3")]
    pub fn s3_config(&self) -> posts_etl_infra::S3Config {
        posts_etl_infra::S3Config {
            app_name: self.app_name.clone(),
            region: self.storage.region.clone(),
            endpoint: self.storage.endpoint.clone(),
            access_key_id: self.storage.access_key.clone(),
            secret_access_key: self.storage.secret_key.clone(),
            path_style: self.storage.path_style,
        }
    }
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            var,
            value: value.to_string(),
        }),
    }
}
