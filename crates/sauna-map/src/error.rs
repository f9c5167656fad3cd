//! Error types for column mapping.

use thiserror::Error;

use sauna_model::{DataType, SemanticField};

/// Errors from mapping operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
    /// Mandatory semantic fields could not be resolved, even after the
    /// structural fallback. Carries the full actual column list so the
    /// caller can diagnose the export.
    #[error(
        "missing required fields for {data_type}: [{}]; columns found: [{}]",
        join_fields(missing),
        columns.join(", ")
    )]
    MissingFields {
        data_type: DataType,
        missing: Vec<SemanticField>,
        columns: Vec<String>,
    },

    /// `Auto` must be resolved to a concrete data type before mapping.
    #[error("cannot map columns for the 'auto' data type")]
    UnresolvedDataType,
}

fn join_fields(fields: &[SemanticField]) -> String {
    fields
        .iter()
        .map(SemanticField::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, MapError>;
