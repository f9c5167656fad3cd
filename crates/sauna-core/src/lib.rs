//! Aggregation core of the sauna analytics dashboard.
//!
//! Takes the parsed, field-resolved output of `sauna-ingest` and
//! `sauna-map`, normalizes cell values, computes per-section aggregate
//! summaries, and merges them into the shared dashboard state.

mod aggregate;
mod config;
mod error;
mod intake;
mod normalize;
pub mod sections;
mod store;

pub use aggregate::{Accumulator, month_key, weekday_name};
pub use config::AnalyticsConfig;
pub use error::{CoreError, Result};
pub use intake::{UploadOutcome, process_upload};
pub use normalize::{
    normalize_month, normalize_table, parse_amount, parse_date, parse_datetime, parse_percent,
};
pub use store::{DashboardStore, SectionUpdate};
