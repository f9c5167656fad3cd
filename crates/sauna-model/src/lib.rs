//! Data model for the sauna analytics dashboard.
//!
//! This crate defines the types shared across the pipeline: the upload
//! data-type tag, the semantic-field vocabulary, typed table cells, the
//! per-section aggregate summaries, and the dashboard state itself.

mod data_type;
mod error;
mod field;
mod state;
mod summary;
mod table;

pub use data_type::DataType;
pub use error::{ModelError, Result};
pub use field::SemanticField;
pub use state::{DashboardState, Labels, Section, fallback_competitors};
pub use summary::{
    CompetitorEntry, CompetitorsSummary, FinanceMonth, FinanceSummary, GroupStats,
    MembersSummary, MetricsSummary, ReservationsSummary, UtilizationSummary,
};
pub use table::{CellValue, NormalizedRow, NormalizedTable};
