//! Error taxonomy for the pipeline stages.
//!
//! Stage functions return `crate::error::Result`; the driver wraps these in
//! `anyhow` with context, so callers can still `downcast_ref::<PipelineError>()`.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = PipelineError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// An input, stopword or artifact file could not be opened or read.
    #[error("cannot access {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The designated text field is absent from a row.
    #[error("{}: row {row} has no field `{field}` (available: {})", path.display(), available.join(", "))]
    Schema {
        path: PathBuf,
        row: u64,
        field: String,
        available: Vec<String>,
    },

    #[error("{}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A cache artifact exists but cannot be used as-is.
    #[error("cache artifact {}: {reason}", path.display())]
    Cache { path: PathBuf, reason: String },

    /// Nothing survived filtering, so there is nothing to model.
    #[error("corpus is empty after filtering")]
    EmptyCorpus,

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl PipelineError {
    pub(crate) fn file_access(path: impl Into<PathBuf>, source: io::Error) -> Self {
        PipelineError::FileAccess { path: path.into(), source }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        PipelineError::Csv { path: path.into(), source }
    }

    pub(crate) fn cache(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        PipelineError::Cache { path: path.into(), reason: reason.into() }
    }
}
