//! Member-roster aggregation.

use sauna_model::{MembersSummary, MetricsSummary, NormalizedTable, SemanticField};

use crate::config::AnalyticsConfig;

fn text<'a>(
    row: &'a sauna_model::NormalizedRow,
    field: SemanticField,
) -> Option<&'a str> {
    row.get(&field).and_then(sauna_model::CellValue::as_text)
}

/// Reduces a member roster to distributions plus headline metrics.
///
/// Rows whose member ID appears in the config's exclusion list are
/// dropped first. Without a status column every member counts as
/// active; rates on an empty roster are 0, never NaN.
#[must_use]
pub fn summarize_members(
    table: &NormalizedTable,
    config: &AnalyticsConfig,
) -> (MembersSummary, MetricsSummary) {
    let mut summary = MembersSummary::default();
    let has_status = table.has_field(SemanticField::Status);
    let mut excluded = 0u64;

    for row in &table.rows {
        if let Some(id) = text(row, SemanticField::MemberId) {
            if config.is_excluded_member(id) {
                excluded += 1;
                continue;
            }
        }
        summary.total += 1;
        let active = if has_status {
            text(row, SemanticField::Status)
                .is_some_and(|status| config.is_active_status(status))
        } else {
            true
        };
        if active {
            summary.active += 1;
        }
        if let Some(gender) = text(row, SemanticField::Gender) {
            *summary
                .gender_distribution
                .entry(gender.to_string())
                .or_insert(0) += 1;
        }
        if let Some(age) = text(row, SemanticField::AgeGroup) {
            *summary.age_distribution.entry(age.to_string()).or_insert(0) += 1;
        }
        if let Some(region) = text(row, SemanticField::Region) {
            *summary
                .region_distribution
                .entry(region.to_string())
                .or_insert(0) += 1;
        }
    }
    if excluded > 0 {
        tracing::info!(excluded, "dropped roster rows on the exclusion list");
    }

    let metrics = derive_metrics(&summary);
    (summary, metrics)
}

fn derive_metrics(summary: &MembersSummary) -> MetricsSummary {
    let total = summary.total;
    let active = summary.active;
    let (join_rate, churn_rate) = if total == 0 {
        (0.0, 0.0)
    } else {
        let join = active as f64 / total as f64 * 100.0;
        (join, 100.0 - join)
    };
    MetricsSummary {
        total_members: total,
        active_members: active,
        join_rate,
        churn_rate,
    }
}

#[cfg(test)]
mod tests {
    use sauna_model::{CellValue, DataType, NormalizedRow};

    use super::*;

    fn roster(rows: &[(&str, &str, &str)]) -> NormalizedTable {
        let mut table = NormalizedTable::new(
            DataType::Members,
            vec![
                SemanticField::MemberId,
                SemanticField::Gender,
                SemanticField::Status,
            ],
        );
        for (id, gender, status) in rows {
            let mut row = NormalizedRow::new();
            row.insert(SemanticField::MemberId, CellValue::Text((*id).into()));
            row.insert(SemanticField::Gender, CellValue::Text((*gender).into()));
            row.insert(SemanticField::Status, CellValue::Text((*status).into()));
            table.push_row(row);
        }
        table
    }

    #[test]
    fn rates_follow_active_ratio() {
        let rows: Vec<(String, String, String)> = (0..100)
            .map(|i| {
                let status = if i < 80 { "在籍" } else { "退会" };
                (i.to_string(), "男性".to_string(), status.to_string())
            })
            .collect();
        let borrowed: Vec<(&str, &str, &str)> = rows
            .iter()
            .map(|(a, b, c)| (a.as_str(), b.as_str(), c.as_str()))
            .collect();
        let (summary, metrics) = summarize_members(&roster(&borrowed), &AnalyticsConfig::default());
        assert_eq!(summary.total, 100);
        assert_eq!(summary.active, 80);
        assert!((metrics.join_rate - 80.0).abs() < 1e-9);
        assert!((metrics.churn_rate - 20.0).abs() < 1e-9);
    }

    #[test]
    fn empty_roster_has_zero_rates() {
        let table = NormalizedTable::new(DataType::Members, vec![SemanticField::MemberId]);
        let (_, metrics) = summarize_members(&table, &AnalyticsConfig::default());
        assert_eq!(metrics.total_members, 0);
        assert_eq!(metrics.join_rate, 0.0);
        assert_eq!(metrics.churn_rate, 0.0);
    }

    #[test]
    fn missing_status_column_means_all_active() {
        let mut table = NormalizedTable::new(DataType::Members, vec![SemanticField::MemberId]);
        for id in ["1", "2"] {
            let mut row = NormalizedRow::new();
            row.insert(SemanticField::MemberId, CellValue::Text(id.into()));
            table.push_row(row);
        }
        let (summary, _) = summarize_members(&table, &AnalyticsConfig::default());
        assert_eq!(summary.active, 2);
    }

    #[test]
    fn exclusion_list_removes_members_before_counting() {
        let table = roster(&[("1", "男性", "在籍"), ("2", "女性", "在籍")]);
        let mut config = AnalyticsConfig::default();
        config.excluded_member_ids.insert("2".to_string());
        let (summary, metrics) = summarize_members(&table, &config);
        assert_eq!(summary.total, 1);
        assert_eq!(metrics.total_members, 1);
        assert_eq!(summary.gender_distribution.get("女性"), None);
    }
}
