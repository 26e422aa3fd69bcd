// Batch report schema: one record per input, serializable to JSON

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::format::DocumentFormat;

/// Outcome of converting a single input file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ConversionOutcome {
    Converted {
        output_path: PathBuf,
        bytes_written: u64,
        content_sha256: String,
    },
    Failed {
        error: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRecord {
    pub source_path: PathBuf,
    /// None when the extension was not recognised
    pub format: Option<DocumentFormat>,
    #[serde(flatten)]
    pub outcome: ConversionOutcome,
}

impl ConversionRecord {
    pub fn converted(
        source_path: impl Into<PathBuf>,
        format: DocumentFormat,
        output_path: impl Into<PathBuf>,
        content: &str,
    ) -> Self {
        Self {
            source_path: source_path.into(),
            format: Some(format),
            outcome: ConversionOutcome::Converted {
                output_path: output_path.into(),
                bytes_written: content.len() as u64,
                content_sha256: content_digest(content),
            },
        }
    }

    pub fn failed(source_path: impl Into<PathBuf>, format: Option<DocumentFormat>, error: &crate::Error) -> Self {
        Self {
            source_path: source_path.into(),
            format,
            outcome: ConversionOutcome::Failed {
                error: error.to_string(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, ConversionOutcome::Converted { .. })
    }

    pub fn output_path(&self) -> Option<&Path> {
        match &self.outcome {
            ConversionOutcome::Converted { output_path, .. } => Some(output_path.as_path()),
            ConversionOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            ConversionOutcome::Converted { .. } => None,
            ConversionOutcome::Failed { error } => Some(error.as_str()),
        }
    }
}

/// Summary of one batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub started_at_utc: String,
    pub finished_at_utc: Option<String>,
    pub output_dir: PathBuf,
    #[serde(default)]
    pub records: Vec<ConversionRecord>,
}

impl BatchReport {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            started_at_utc: Utc::now().to_rfc3339(),
            finished_at_utc: None,
            output_dir: output_dir.into(),
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, record: ConversionRecord) {
        self.records.push(record);
    }

    pub fn finish(&mut self) {
        self.finished_at_utc = Some(Utc::now().to_rfc3339());
    }

    pub fn succeeded(&self) -> impl Iterator<Item = &ConversionRecord> {
        self.records.iter().filter(|r| r.is_success())
    }

    pub fn failed(&self) -> impl Iterator<Item = &ConversionRecord> {
        self.records.iter().filter(|r| !r.is_success())
    }

    pub fn has_failures(&self) -> bool {
        self.failed().next().is_some()
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// SHA-256 of the written text, hex encoded
pub fn content_digest(content: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}
