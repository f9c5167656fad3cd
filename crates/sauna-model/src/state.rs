//! Dashboard state: static labels plus one slot per section.

use serde::{Deserialize, Serialize};

use crate::summary::{
    CompetitorsSummary, FinanceSummary, MembersSummary, MetricsSummary, ReservationsSummary,
    UtilizationSummary,
};

/// Dashboard section identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Metrics,
    Members,
    Utilization,
    Competitors,
    Finance,
    Reservations,
}

/// Static chart labels, fixed at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Labels {
    pub months: Vec<String>,
    #[serde(rename = "daysOfWeek")]
    pub days_of_week: Vec<String>,
    #[serde(rename = "timeSlots")]
    pub time_slots: Vec<String>,
    pub regions: Vec<String>,
    #[serde(rename = "roomNames")]
    pub room_names: Vec<String>,
    #[serde(rename = "competitorNames")]
    pub competitor_names: Vec<String>,
    #[serde(rename = "ageGroups")]
    pub age_groups: Vec<String>,
    pub genders: Vec<String>,
}

impl Default for Labels {
    fn default() -> Self {
        let mut months: Vec<String> = (1..=12).map(|m| format!("2023-{m:02}")).collect();
        months.extend((1..=6).map(|m| format!("2024-{m:02}")));
        Self {
            months,
            days_of_week: ["月", "火", "水", "木", "金", "土", "日"]
                .map(str::to_string)
                .to_vec(),
            time_slots: ["9-12時", "12-15時", "15-18時", "18-21時", "21-24時"]
                .map(str::to_string)
                .to_vec(),
            regions: [
                "大阪府",
                "兵庫県",
                "京都府",
                "奈良県",
                "滋賀県",
                "和歌山県",
                "その他",
            ]
            .map(str::to_string)
            .to_vec(),
            room_names: ["Room1", "Room2", "Room3"].map(str::to_string).to_vec(),
            competitor_names: [
                "HAAAVE.sauna",
                "KUDOCHI sauna",
                "MENTE",
                "M's Sauna",
                "SAUNA Pod 槃",
                "SAUNA OOO OSAKA",
                "大阪サウナ DESSE",
            ]
            .map(str::to_string)
            .to_vec(),
            age_groups: ["20代", "30代", "40代", "50代", "~19歳", "60歳~"]
                .map(str::to_string)
                .to_vec(),
            genders: ["男性", "女性"].map(str::to_string).to_vec(),
        }
    }
}

/// The shared dashboard structure read by the presentation layer.
///
/// Sections start empty (`None`); the JSON snapshot renders absent
/// sections as `{}` so the front end never sees `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardState {
    #[serde(default)]
    pub labels: Labels,
    #[serde(default)]
    pub metrics: Option<MetricsSummary>,
    #[serde(default)]
    pub members: Option<MembersSummary>,
    #[serde(default)]
    pub utilization: Option<UtilizationSummary>,
    #[serde(default)]
    pub competitors: Option<CompetitorsSummary>,
    #[serde(default)]
    pub finance: Option<FinanceSummary>,
    #[serde(default)]
    pub reservations: Option<ReservationsSummary>,
}

/// Reference competitor data used to re-seed the competitors section
/// when a reset finds it empty. Hourly rates are list prices for the
/// surveyed Osaka private-sauna market.
#[must_use]
pub fn fallback_competitors() -> CompetitorsSummary {
    let seed: [(&str, f64); 7] = [
        ("HAAAVE.sauna", 5500.0),
        ("KUDOCHI sauna", 6000.0),
        ("MENTE", 4800.0),
        ("M's Sauna", 5000.0),
        ("SAUNA Pod 槃", 4500.0),
        ("SAUNA OOO OSAKA", 5800.0),
        ("大阪サウナ DESSE", 3800.0),
    ];
    let mut summary = CompetitorsSummary::default();
    for (name, rate) in seed {
        summary.price_comparison.insert(name.to_string(), rate);
        summary.competitor_details.push(crate::CompetitorEntry {
            name: name.to_string(),
            location: None,
            hourly_rate: Some(rate),
            area: Some("大阪府".to_string()),
        });
    }
    *summary
        .area_distribution
        .entry("大阪府".to_string())
        .or_insert(0) += seed.len() as u64;
    summary
}
