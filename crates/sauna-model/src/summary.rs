//! Aggregate summaries, one struct per dashboard section.
//!
//! These are purely derived values: recomputed on every upload and
//! merged into [`crate::DashboardState`] by the store.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Grouped statistics for one entity (room, category, month).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupStats {
    pub average: f64,
    pub min: f64,
    pub max: f64,
    pub count: u64,
}

/// Member-roster aggregates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MembersSummary {
    pub total: u64,
    pub active: u64,
    pub gender_distribution: BTreeMap<String, u64>,
    pub age_distribution: BTreeMap<String, u64>,
    pub region_distribution: BTreeMap<String, u64>,
}

/// Headline metrics derived from the member roster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_members: u64,
    pub active_members: u64,
    pub join_rate: f64,
    pub churn_rate: f64,
}

/// Room-occupancy aggregates.
///
/// `monthly_rates` is month-keyed (`YYYY-MM`) and merged across
/// uploads; the other maps reflect the most recent upload.
/// `hourly_rates` is keyed by time-slot label (`9-12時` etc.) and
/// stays empty when the upload carries no time-of-day signal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UtilizationSummary {
    pub room_stats: BTreeMap<String, GroupStats>,
    pub room_avg_rates: BTreeMap<String, f64>,
    pub monthly_rates: BTreeMap<String, BTreeMap<String, f64>>,
    pub weekday_rates: BTreeMap<String, BTreeMap<String, f64>>,
    #[serde(default)]
    pub hourly_rates: BTreeMap<String, BTreeMap<String, f64>>,
}

/// One competitor row, reduced to the resolved fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompetitorEntry {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
}

/// Competitor reference data; semi-static, preserved across resets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompetitorsSummary {
    pub price_comparison: BTreeMap<String, f64>,
    pub competitor_details: Vec<CompetitorEntry>,
    pub area_distribution: BTreeMap<String, u64>,
}

impl CompetitorsSummary {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.price_comparison.is_empty() && self.competitor_details.is_empty()
    }
}

/// One month of the finance trend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FinanceMonth {
    pub sales: f64,
    pub costs: f64,
    pub profit: f64,
    pub profit_rate: f64,
}

/// Finance aggregates. `monthly_trend` and `monthly_sales` are
/// month-keyed and merged across uploads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinanceSummary {
    pub monthly_trend: BTreeMap<String, FinanceMonth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_month: Option<String>,
    pub member_type_sales: BTreeMap<String, f64>,
    pub monthly_sales: BTreeMap<String, f64>,
    pub total_sales: f64,
    pub average_transaction: f64,
}

/// Reservation-log aggregates by ticket category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReservationsSummary {
    pub ticket_distribution: BTreeMap<String, u64>,
    pub monthly_counts: BTreeMap<String, BTreeMap<String, u64>>,
}
