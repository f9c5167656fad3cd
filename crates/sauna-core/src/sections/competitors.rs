//! Competitor reference-data aggregation.

use sauna_model::{CellValue, CompetitorEntry, CompetitorsSummary, NormalizedTable, SemanticField};

/// Reduces a competitor survey to price comparison and area counts.
///
/// Rows without a name are skipped; the area distribution falls back
/// to the location column when no explicit area column resolved.
#[must_use]
pub fn summarize_competitors(table: &NormalizedTable) -> CompetitorsSummary {
    let mut summary = CompetitorsSummary::default();
    for row in &table.rows {
        let Some(name) = row.get(&SemanticField::Name).and_then(CellValue::as_text) else {
            continue;
        };
        let location = row
            .get(&SemanticField::Location)
            .and_then(CellValue::as_text)
            .map(str::to_string);
        let area = row
            .get(&SemanticField::Area)
            .and_then(CellValue::as_text)
            .map(str::to_string)
            .or_else(|| location.clone());
        let hourly_rate = row
            .get(&SemanticField::HourlyRate)
            .and_then(CellValue::as_number);
        if let Some(rate) = hourly_rate {
            summary.price_comparison.insert(name.to_string(), rate);
        }
        if let Some(area) = &area {
            *summary.area_distribution.entry(area.clone()).or_insert(0) += 1;
        }
        summary.competitor_details.push(CompetitorEntry {
            name: name.to_string(),
            location,
            hourly_rate,
            area,
        });
    }
    summary
}
