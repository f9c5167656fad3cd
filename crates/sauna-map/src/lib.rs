//! Header-to-field matching for heterogeneous CSV exports.
//!
//! Export tools name the same concept many ways, in two languages:
//! a date column may arrive as `date`, `日付` or `レッスン日`. This
//! crate resolves actual column names to the canonical
//! [`sauna_model::SemanticField`] vocabulary using one declarative
//! candidate table per data type, with a structural fallback driven by
//! column statistics, and classifies which occupancy-computation
//! variant a given upload supports.

mod error;
mod matcher;
mod patterns;
mod variant;

pub use error::{MapError, Result};
pub use matcher::{ColumnMapping, match_columns};
pub use patterns::{FieldPattern, field_patterns};
pub use variant::{RateVariant, classify_rate_variant};
