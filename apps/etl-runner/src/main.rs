//! # Posts ETL Runner
//!
//! Fetches posts from the configured URL, transforms them and writes the
//! result as JSON to a local path or an S3 bucket.

use std::sync::Arc;

use anyhow::Context;

use posts_etl_core::ports::ObjectStore;
use posts_etl_infra::{HttpRecordSource, JsonTableWriter, LocalFileStore, StoreRouter};

mod config;
mod pipeline;
mod telemetry;

use config::AppConfig;
use pipeline::{Job, Pipeline};
use telemetry::TelemetryConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("Failed to load configuration")?;

    telemetry::init_telemetry(&TelemetryConfig::from_env(&config.app_name));

    tracing::info!(
        app = %config.app_name,
        source_url = %config.source_url,
        destination = %config.output_path,
        format = %config.output_format,
        "Starting posts ETL run"
    );

    let store = build_store(&config).await;
    let writer = JsonTableWriter::new(store).with_format(config.output_format);
    let pipeline = Pipeline::new(Arc::new(HttpRecordSource::new()), Arc::new(writer));

    let report = pipeline
        .run(&Job {
            app_name: config.app_name.clone(),
            source_url: config.source_url.clone(),
            destination: config.output_path.clone(),
        })
        .await;
    report.log();

    Ok(())
}

/// Local storage always; S3 only when the destination needs it.
async fn build_store(config: &AppConfig) -> Arc<dyn ObjectStore> {
    let router = StoreRouter::new(Arc::new(LocalFileStore::new()));

    if !config.writes_to_object_storage() {
        return Arc::new(router);
    }

    #[cfg(feature = "s3")]
    let router = router.with_object_store(Arc::new(
        posts_etl_infra::S3ObjectStore::new(&config.s3_config()).await,
    ));

    #[cfg(not(feature = "s3"))]
    tracing::warn!(
        destination = %config.output_path,
        "Object storage destination configured but the s3 feature is disabled"
    );

    Arc::new(router)
}
