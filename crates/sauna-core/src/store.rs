//! The shared dashboard store.
//!
//! An injectable, lock-guarded wrapper around [`DashboardState`] with
//! per-section merge semantics: roster-shaped sections are replaced
//! wholesale, month-keyed series are merged key by key so a March
//! upload never erases February.

use std::path::Path;
use std::sync::{PoisonError, RwLock};

use sauna_model::{
    CompetitorsSummary, DashboardState, FinanceSummary, MembersSummary, MetricsSummary,
    ReservationsSummary, UtilizationSummary, fallback_competitors,
};

use crate::error::{CoreError, Result};

/// One section's worth of freshly computed aggregates.
#[derive(Debug, Clone)]
pub enum SectionUpdate {
    Members {
        members: MembersSummary,
        metrics: MetricsSummary,
    },
    Utilization(UtilizationSummary),
    Competitors(CompetitorsSummary),
    Finance(FinanceSummary),
    Reservations(ReservationsSummary),
}

#[derive(Debug, Default)]
pub struct DashboardStore {
    state: RwLock<DashboardState>,
}

impl DashboardStore {
    #[must_use]
    pub fn new(state: DashboardState) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }

    /// Loads persisted state; a missing file starts fresh, a present
    /// but unreadable one is an explicit unavailability signal.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(CoreError::StateUnavailable {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
            }
        };
        let state: DashboardState =
            serde_json::from_str(&contents).map_err(|e| CoreError::StateUnavailable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        Ok(Self::new(state))
    }

    /// Persists the current state as JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.snapshot()).map_err(|e| {
            CoreError::StateUnavailable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;
        std::fs::write(path, json).map_err(|source| CoreError::StateWrite {
            path: path.to_path_buf(),
            source,
        })
    }

    #[must_use]
    pub fn snapshot(&self) -> DashboardState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// JSON snapshot for the presentation layer: absent sections
    /// render as `{}`, never `null`.
    #[must_use]
    pub fn snapshot_json(&self) -> serde_json::Value {
        let mut value = serde_json::to_value(self.snapshot()).unwrap_or_default();
        if let Some(map) = value.as_object_mut() {
            for section in [
                "metrics",
                "members",
                "utilization",
                "competitors",
                "finance",
                "reservations",
            ] {
                let slot = map
                    .entry(section)
                    .or_insert(serde_json::Value::Null);
                if slot.is_null() {
                    *slot = serde_json::json!({});
                }
            }
        }
        value
    }

    /// Merges one section update into the shared state.
    pub fn apply(&self, update: SectionUpdate) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        match update {
            SectionUpdate::Members { members, metrics } => {
                state.members = Some(members);
                state.metrics = Some(metrics);
            }
            SectionUpdate::Utilization(update) => {
                let merged = match state.utilization.take() {
                    Some(existing) => merge_utilization(existing, update),
                    None => update,
                };
                state.utilization = Some(merged);
            }
            SectionUpdate::Competitors(update) => {
                state.competitors = Some(update);
            }
            SectionUpdate::Finance(update) => {
                let merged = match state.finance.take() {
                    Some(existing) => merge_finance(existing, update),
                    None => update,
                };
                state.finance = Some(merged);
            }
            SectionUpdate::Reservations(update) => {
                let merged = match state.reservations.take() {
                    Some(existing) => merge_reservations(existing, update),
                    None => update,
                };
                state.reservations = Some(merged);
            }
        }
    }

    /// Restores defaults while preserving competitor reference data,
    /// re-seeding it when the section is empty or absent.
    pub fn reset(&self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let competitors = match state.competitors.take() {
            Some(existing) if !existing.is_empty() => existing,
            _ => fallback_competitors(),
        };
        *state = DashboardState {
            competitors: Some(competitors),
            ..DashboardState::default()
        };
        tracing::info!("dashboard state reset; competitors preserved");
    }
}

/// Month-keyed maps merge; the most recent upload wins everywhere else.
fn merge_utilization(
    existing: UtilizationSummary,
    mut update: UtilizationSummary,
) -> UtilizationSummary {
    let mut monthly = existing.monthly_rates;
    monthly.extend(std::mem::take(&mut update.monthly_rates));
    update.monthly_rates = monthly;
    update
}

fn merge_finance(existing: FinanceSummary, mut update: FinanceSummary) -> FinanceSummary {
    let mut trend = existing.monthly_trend;
    trend.extend(std::mem::take(&mut update.monthly_trend));
    update.monthly_trend = trend;

    let mut monthly = existing.monthly_sales;
    monthly.extend(std::mem::take(&mut update.monthly_sales));
    update.monthly_sales = monthly;
    // Totals reflect the whole merged series, not the last upload.
    update.total_sales = update.monthly_sales.values().sum();
    update.latest_month = update.monthly_trend.keys().next_back().cloned();

    if update.member_type_sales.is_empty() {
        update.member_type_sales = existing.member_type_sales;
    }
    if update.average_transaction == 0.0 {
        update.average_transaction = existing.average_transaction;
    }
    update
}

fn merge_reservations(
    existing: ReservationsSummary,
    mut update: ReservationsSummary,
) -> ReservationsSummary {
    let mut monthly = existing.monthly_counts;
    monthly.extend(std::mem::take(&mut update.monthly_counts));
    update.monthly_counts = monthly;
    update
}

#[cfg(test)]
mod tests {
    use sauna_model::FinanceMonth;

    use super::*;

    fn utilization_for(month: &str, room: &str, rate: f64) -> UtilizationSummary {
        let mut summary = UtilizationSummary::default();
        summary
            .monthly_rates
            .entry(month.to_string())
            .or_default()
            .insert(room.to_string(), rate);
        summary.room_avg_rates.insert(room.to_string(), rate);
        summary
    }

    #[test]
    fn monthly_merge_keeps_other_months() {
        let store = DashboardStore::default();
        store.apply(SectionUpdate::Utilization(utilization_for(
            "2024-03", "Room1", 80.0,
        )));
        store.apply(SectionUpdate::Utilization(utilization_for(
            "2024-04", "Room1", 60.0,
        )));
        let state = store.snapshot();
        let utilization = state.utilization.unwrap();
        assert_eq!(utilization.monthly_rates["2024-03"]["Room1"], 80.0);
        assert_eq!(utilization.monthly_rates["2024-04"]["Room1"], 60.0);
        // Non-monthly maps reflect the most recent upload.
        assert_eq!(utilization.room_avg_rates["Room1"], 60.0);
    }

    #[test]
    fn same_month_is_overwritten() {
        let store = DashboardStore::default();
        store.apply(SectionUpdate::Utilization(utilization_for(
            "2024-03", "Room1", 80.0,
        )));
        store.apply(SectionUpdate::Utilization(utilization_for(
            "2024-03", "Room1", 65.0,
        )));
        let state = store.snapshot();
        assert_eq!(
            state.utilization.unwrap().monthly_rates["2024-03"]["Room1"],
            65.0
        );
    }

    #[test]
    fn finance_totals_cover_merged_months() {
        let store = DashboardStore::default();
        let mut march = FinanceSummary::default();
        march.monthly_sales.insert("2024-03".to_string(), 1000.0);
        march.total_sales = 1000.0;
        march.average_transaction = 500.0;
        store.apply(SectionUpdate::Finance(march));

        let mut april = FinanceSummary::default();
        april.monthly_sales.insert("2024-04".to_string(), 3000.0);
        april.total_sales = 3000.0;
        april.average_transaction = 750.0;
        store.apply(SectionUpdate::Finance(april));

        let finance = store.snapshot().finance.unwrap();
        assert_eq!(finance.total_sales, 4000.0);
        assert_eq!(finance.average_transaction, 750.0);
    }

    #[test]
    fn finance_latest_month_tracks_merged_trend() {
        let store = DashboardStore::default();
        for month in ["2024-04", "2024-02"] {
            let mut summary = FinanceSummary::default();
            summary
                .monthly_trend
                .insert(month.to_string(), FinanceMonth::default());
            store.apply(SectionUpdate::Finance(summary));
        }
        let finance = store.snapshot().finance.unwrap();
        assert_eq!(finance.latest_month.as_deref(), Some("2024-04"));
    }

    #[test]
    fn reset_preserves_non_empty_competitors() {
        let store = DashboardStore::default();
        let mut competitors = CompetitorsSummary::default();
        competitors
            .price_comparison
            .insert("KUDOCHI sauna".to_string(), 6000.0);
        store.apply(SectionUpdate::Competitors(competitors.clone()));
        store.apply(SectionUpdate::Utilization(utilization_for(
            "2024-03", "Room1", 80.0,
        )));
        store.reset();
        let state = store.snapshot();
        assert!(state.utilization.is_none());
        assert_eq!(state.competitors, Some(competitors));
    }

    #[test]
    fn reset_reseeds_empty_competitors() {
        let store = DashboardStore::default();
        store.reset();
        let competitors = store.snapshot().competitors.unwrap();
        assert!(!competitors.is_empty());
        assert_eq!(competitors.competitor_details.len(), 7);
    }

    #[test]
    fn snapshot_json_renders_absent_sections_as_empty_objects() {
        let store = DashboardStore::default();
        let json = store.snapshot_json();
        assert_eq!(json["members"], serde_json::json!({}));
        assert_eq!(json["finance"], serde_json::json!({}));
        assert!(json["labels"]["months"].is_array());
    }

    #[test]
    fn load_round_trips_and_flags_corruption() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let store = DashboardStore::default();
        store.apply(SectionUpdate::Utilization(utilization_for(
            "2024-03", "Room1", 80.0,
        )));
        store.save(&path).unwrap();
        let reloaded = DashboardStore::load(&path).unwrap();
        assert_eq!(reloaded.snapshot(), store.snapshot());

        std::fs::write(&path, "{broken").unwrap();
        assert!(matches!(
            DashboardStore::load(&path),
            Err(CoreError::StateUnavailable { .. })
        ));

        // Missing file is a fresh start, not an error.
        let fresh = DashboardStore::load(&dir.path().join("absent.json")).unwrap();
        assert!(fresh.snapshot().utilization.is_none());
    }
}
