//! Per-section aggregators.
//!
//! Each function reduces one normalized table to its dashboard section
//! summary. Sub-computation failures (an unparsable rate, a row with
//! no room) downgrade to zeros or skipped rows with a warning; they
//! never abort the upload.

mod competitors;
mod finance;
mod members;
mod reservations;
mod utilization;

pub use competitors::summarize_competitors;
pub use finance::{summarize_finance, summarize_sales};
pub use members::summarize_members;
pub use reservations::{classify_ticket, summarize_reservations};
pub use utilization::summarize_utilization;
