use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::destination::OutputFormat;

/// One output row - a retained post after every transformation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformedRow {
    /// Copied from `id`; `None` when the source record had no integer id.
    pub post_id: Option<i64>,
    pub post_title: String,
    pub post_body: String,
    pub body_word_count: usize,
    pub post_length: usize,
    pub contains_lorem: bool,
}

/// Transformed rows in filtered input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransformedTable(Vec<TransformedRow>);

impl TransformedTable {
    pub fn new(rows: Vec<TransformedRow>) -> Self {
        Self(rows)
    }

    pub fn rows(&self) -> &[TransformedRow] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Serialize the table in the given layout.
    ///
    /// `JsonLines` emits one object per line with a trailing newline;
    /// `JsonArray` emits a single pretty-printed array.
    pub fn to_json(&self, format: OutputFormat) -> Result<Vec<u8>, serde_json::Error> {
        match format {
            OutputFormat::JsonLines => {
                let mut out = Vec::new();
                for row in &self.0 {
                    serde_json::to_writer(&mut out, row)?;
                    out.push(b'\n');
                }
                Ok(out)
            }
            OutputFormat::JsonArray => serde_json::to_vec_pretty(&self.0),
        }
    }
}

impl FromIterator<TransformedRow> for TransformedTable {
    fn from_iter<I: IntoIterator<Item = TransformedRow>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Summary of a completed write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteReceipt {
    pub destination: String,
    pub format: OutputFormat,
    pub rows: usize,
    pub bytes: usize,
    pub written_at: DateTime<Utc>,
}
