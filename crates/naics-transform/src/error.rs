//! Error types for the reconciliation pipeline.

use thiserror::Error;

use naics_model::ModelError;

/// Errors raised while reconciling loaded sources.
///
/// Every stage is a total function over in-memory tables; these surface
/// malformed input that slipped past the loader or a broken invariant.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A titles row failed code or sequence validation.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// A canonical column is absent from a loaded table.
    #[error("{table} table has no '{column}' column")]
    MissingColumn { table: String, column: String },

    /// A titles row lacks a required value.
    #[error("{table} table row {row} has no {column}")]
    MissingValue {
        table: String,
        column: String,
        row: usize,
    },

    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for TransformError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;
