//! Error types for CSV intake.

use std::path::PathBuf;

use thiserror::Error;

/// One failed encoding/delimiter combination from the prober.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeAttempt {
    pub encoding: &'static str,
    pub delimiter: char,
    pub reason: String,
}

impl std::fmt::Display for ProbeAttempt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} + {:?}: {}",
            self.encoding, self.delimiter, self.reason
        )
    }
}

/// Errors that can occur during upload intake.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Upload does not carry a `.csv` extension.
    #[error("not a CSV file: {filename}")]
    NotCsv { filename: String },

    /// Upload contains no bytes.
    #[error("uploaded file is empty")]
    EmptyUpload,

    /// No encoding/delimiter combination produced a usable table.
    ///
    /// `first_line` echoes the first raw line (lossily decoded) so the
    /// caller can see what the export actually looks like.
    #[error("could not parse CSV: {} combinations tried, first line: {first_line:?}", attempts.len())]
    Unparsable {
        attempts: Vec<ProbeAttempt>,
        first_line: String,
    },

    /// Failed to write an upload to the store.
    #[error("failed to save upload {path}: {source}")]
    SaveFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create the uploads directory.
    #[error("failed to create uploads directory {path}: {source}")]
    StoreUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for intake operations.
pub type Result<T> = std::result::Result<T, IngestError>;
