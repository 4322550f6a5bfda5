//! Run orchestration - fetch, transform, write, strictly in sequence.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::Instrument;
use uuid::Uuid;

use posts_etl_core::domain::WriteReceipt;
use posts_etl_core::ports::{RecordSource, TableWriter};

/// What a run ended with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    /// The source returned nothing; transform and write were skipped.
    NoData,
    Written(WriteReceipt),
    WriteFailed { category: String, message: String },
}

/// Summary of a single run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub app_name: String,
    pub source_url: String,
    pub records_fetched: usize,
    pub rows_transformed: usize,
    pub outcome: RunOutcome,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunReport {
    /// Emit the run summary at a level matching the outcome.
    pub fn log(&self) {
        let summary = self.summary();
        match &self.outcome {
            RunOutcome::WriteFailed { category, .. } => {
                tracing::warn!(
                    run_id = %self.run_id,
                    category = %category,
                    summary = %summary,
                    "Run finished without output"
                )
            }
            RunOutcome::NoData => {
                tracing::info!(run_id = %self.run_id, summary = %summary, "Run finished: no data")
            }
            RunOutcome::Written(_) => {
                tracing::info!(run_id = %self.run_id, summary = %summary, "Run finished")
            }
        }
    }

    /// The report as JSON, or its debug form if serialization fails.
    fn summary(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            tracing::warn!(run_id = %self.run_id, error = %e, "Failed to serialize run summary");
            format!("{self:?}")
        })
    }
}

/// What to fetch and where to put it.
#[derive(Debug, Clone)]
pub struct Job {
    pub app_name: String,
    pub source_url: String,
    pub destination: String,
}

/// Wires a record source to a table writer.
#[derive(Clone)]
pub struct Pipeline {
    source: Arc<dyn RecordSource>,
    writer: Arc<dyn TableWriter>,
}

impl Pipeline {
    pub fn new(source: Arc<dyn RecordSource>, writer: Arc<dyn TableWriter>) -> Self {
        Self { source, writer }
    }

    /// Execute one run. Never fails; problems end up in the report.
    pub async fn run(&self, job: &Job) -> RunReport {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("etl_run", %run_id, app = %job.app_name);
        self.run_inner(run_id, job).instrument(span).await
    }

    async fn run_inner(&self, run_id: Uuid, job: &Job) -> RunReport {
        let started_at = Utc::now();
        let report = |records_fetched, rows_transformed, outcome| RunReport {
            run_id,
            app_name: job.app_name.clone(),
            source_url: job.source_url.clone(),
            records_fetched,
            rows_transformed,
            outcome,
            started_at,
            finished_at: Utc::now(),
        };

        let records = self.source.fetch(&job.source_url).await;
        if records.is_empty() {
            tracing::info!(url = %job.source_url, "No data fetched; skipping transform and write");
            return report(0, 0, RunOutcome::NoData);
        }

        let table = posts_etl_core::transform(&records);
        tracing::info!(
            fetched = records.len(),
            retained = table.len(),
            "Transformed records"
        );

        let outcome = match self.writer.write(&table, &job.destination).await {
            Ok(receipt) => RunOutcome::Written(receipt),
            Err(e) => RunOutcome::WriteFailed {
                category: e.category().to_string(),
                message: e.to_string(),
            },
        };

        report(records.len(), table.len(), outcome)
    }
}
