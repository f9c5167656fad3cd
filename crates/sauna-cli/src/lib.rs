//! CLI library components for the sauna analytics dashboard.

pub mod logging;
