use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

/// Why a date change could not be committed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommitError {
    #[error("commit rejected: {reason}")]
    Rejected { reason: String },
    #[error("item {0} no longer exists")]
    UnknownItem(Uuid),
    #[error("invalid range {start} → {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
    #[error("commit was dropped before it resolved")]
    Disconnected,
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV is missing required columns (need a name column). Found headers: {found:?}")]
    MissingColumns { found: Vec<String> },
    #[error("no valid items found ({skipped} rows skipped)")]
    Empty { skipped: usize },
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no platform configuration directory available")]
    NoConfigDir,
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}
