//! Error taxonomy for the aggregation core.
//!
//! Intake and schema errors carry full diagnostics for the caller;
//! anything unexpected propagates to the CLI boundary.

use std::path::PathBuf;

use thiserror::Error;

use sauna_ingest::IngestError;
use sauna_map::MapError;

#[derive(Debug, Error)]
pub enum CoreError {
    /// File intake failed (extension, decoding, delimiter detection).
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// Schema inference fell short of the mandatory fields.
    #[error(transparent)]
    Map(#[from] MapError),

    /// `auto` upload whose filename matches no known data type.
    #[error("could not determine data type from filename: {filename}")]
    UnknownDataType { filename: String },

    /// Persisted dashboard state exists but cannot be read. Surfaced
    /// as an explicit stale/unavailable signal, never masked with
    /// placeholder data.
    #[error("dashboard state unavailable at {path}: {reason}")]
    StateUnavailable { path: PathBuf, reason: String },

    /// Failed to persist dashboard state.
    #[error("failed to write dashboard state {path}: {source}")]
    StateWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Analytics configuration file exists but cannot be parsed.
    #[error("invalid analytics config {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, CoreError>;
