//! Error types for import mapping.

use thiserror::Error;

/// Errors that can occur while preparing an import.
///
/// Individual bad values never produce an error; they are omitted from the
/// transformed row instead.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Column mapping names a field the target schema does not have.
    #[error("column mapping references unknown field '{key}'")]
    UnknownField { key: String },

    /// Column mapping targets a field that carries no data.
    #[error("field '{key}' of type '{field_type}' cannot receive imported data")]
    NotImportable { key: String, field_type: String },

    /// Column mapping names a column absent from the imported headers.
    #[error("column '{column}' mapped to field '{key}' is not present in the import")]
    UnknownColumn { key: String, column: String },

    /// Failed DataFrame operation while building a preview.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for import operations.
pub type Result<T> = std::result::Result<T, IngestError>;
