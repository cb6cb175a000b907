//! Error types for NAICS source ingestion.

use thiserror::Error;

use crate::config::SourceKind;

/// Errors that can occur while loading a source table.
///
/// Every variant is fatal to a run: no partial output is written.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Fetch Errors ===
    /// The source could not be fetched (transport error, HTTP status, missing file).
    #[error("{name} source unavailable at {location}: {reason}")]
    SourceUnavailable {
        name: SourceKind,
        location: String,
        reason: String,
    },

    // === Schema Errors ===
    /// Declared columns (or the declared sheet) are absent from the source.
    #[error("{name} source does not match its schema: missing {missing:?} (found {found:?})")]
    SchemaMismatch {
        name: SourceKind,
        missing: Vec<String>,
        found: Vec<String>,
    },

    /// A cell could not be converted to its declared type.
    #[error("invalid {column} value '{value}' in {name} source row {row}")]
    InvalidValue {
        name: SourceKind,
        column: String,
        row: usize,
        value: String,
    },

    // === Decoding Errors ===
    /// The workbook container could not be opened or a sheet could not be read.
    #[error("failed to read {name} workbook: {message}")]
    Workbook { name: SourceKind, message: String },

    /// The delimited text could not be parsed.
    #[error("failed to parse {name} CSV: {message}")]
    Csv { name: SourceKind, message: String },

    // === Configuration Errors ===
    #[error("config error: {message}")]
    Config { message: String },

    // === DataFrame Errors ===
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl IngestError {
    pub(crate) fn unavailable(
        name: SourceKind,
        location: &str,
        reason: impl Into<String>,
    ) -> Self {
        Self::SourceUnavailable {
            name,
            location: location.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
