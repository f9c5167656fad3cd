//! CSV intake for the sauna analytics dashboard.
//!
//! This crate owns everything between "raw upload bytes" and "a parsed
//! table with column statistics":
//!
//! - **Encoding/format probing**: decode attempts across Japanese and
//!   Unicode encodings and candidate delimiters, with structured
//!   diagnostics when nothing parses.
//! - **Column hints**: per-column statistics (numeric/date-likeness,
//!   null and unique ratios) used by the field matcher's fallback.
//! - **Discovery**: data-type sniffing and year-month extraction from
//!   filenames.
//! - **Upload store**: verbatim persistence of accepted uploads.

mod discovery;
mod error;
mod hints;
mod probe;
mod store;

pub use discovery::{detect_data_type, extract_year_month};
pub use error::{IngestError, ProbeAttempt, Result};
pub use hints::{ColumnHint, build_column_hints};
pub use probe::{RawTable, probe_table};
pub use store::{SavedUpload, UploadStore};
