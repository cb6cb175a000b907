//! Output error types.

use std::path::PathBuf;

use thiserror::Error;

use naics_transform::TransformError;

/// Artifact write or read error.
#[derive(Debug, Error)]
pub enum OutputError {
    /// File I/O error.
    #[error("failed to {operation} {}", path.display())]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The temporary file could not be renamed over the target.
    #[error("failed to move {} into place at {}", temp_path.display(), target_path.display())]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The artifact format cannot be inferred from the path.
    #[error("unrecognized artifact extension for {} (expected .parquet or .json)", path.display())]
    UnknownFormat { path: PathBuf },

    #[error("JSON error for {}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },

    /// The artifact frame does not hold valid records.
    #[error(transparent)]
    Records(#[from] TransformError),
}

impl From<polars::prelude::PolarsError> for OutputError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;
