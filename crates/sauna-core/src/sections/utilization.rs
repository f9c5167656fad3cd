//! Room-occupancy aggregation across the four computation variants.

use std::collections::BTreeMap;

use sauna_map::RateVariant;
use sauna_model::{CellValue, NormalizedRow, NormalizedTable, SemanticField, UtilizationSummary};

use crate::aggregate::{Accumulator, month_key, weekday_name};
use crate::config::AnalyticsConfig;

fn row_rate(row: &NormalizedRow, variant: RateVariant, config: &AnalyticsConfig) -> f64 {
    match variant {
        RateVariant::DirectRate => {
            match row.get(&SemanticField::OccupancyRate) {
                Some(CellValue::Number(rate)) => *rate,
                // Missing or unparsable rate counts as an empty slot.
                _ => {
                    tracing::warn!("unparsable occupancy rate; counting as 0");
                    0.0
                }
            }
        }
        RateVariant::DerivedRate => {
            let count = row
                .get(&SemanticField::ReservationCount)
                .and_then(CellValue::as_number)
                .unwrap_or(0.0);
            let capacity = row
                .get(&SemanticField::Capacity)
                .and_then(CellValue::as_number)
                .unwrap_or(0.0);
            if capacity <= 0.0 {
                0.0
            } else {
                count / capacity * 100.0
            }
        }
        RateVariant::StatusRate => {
            let status = row.get(&SemanticField::Status).and_then(CellValue::as_text);
            match status {
                Some(status) if config.is_occupied_status(status) => 100.0,
                Some(status) if config.is_no_show_status(status) => {
                    // Staff holds block the slot even when nobody shows.
                    let member = row
                        .get(&SemanticField::MemberId)
                        .and_then(CellValue::as_text)
                        .unwrap_or("");
                    if config.is_staff_hold(member) { 100.0 } else { 0.0 }
                }
                _ => 0.0,
            }
        }
        RateVariant::NoSignal => 0.0,
    }
}

/// Business-hours time slot for an hour of day; hours outside the
/// opening window are unbucketed.
fn time_slot(hour: u32) -> Option<&'static str> {
    match hour {
        9..=11 => Some("9-12時"),
        12..=14 => Some("12-15時"),
        15..=17 => Some("15-18時"),
        18..=20 => Some("18-21時"),
        21..=23 => Some("21-24時"),
        _ => None,
    }
}

/// Reduces an occupancy table to per-room, per-month, per-weekday and
/// per-time-slot statistics.
///
/// Rows without a room name are skipped. When a row's date is missing
/// the filename-embedded `fallback_month` (if any) keys the monthly
/// series; such rows contribute nothing to the weekday series. The
/// time-slot series only fills when date cells carry a time of day.
#[must_use]
pub fn summarize_utilization(
    table: &NormalizedTable,
    variant: RateVariant,
    config: &AnalyticsConfig,
    fallback_month: Option<&str>,
) -> UtilizationSummary {
    let mut per_room: BTreeMap<String, Accumulator> = BTreeMap::new();
    let mut per_month: BTreeMap<String, BTreeMap<String, Accumulator>> = BTreeMap::new();
    let mut per_weekday: BTreeMap<String, BTreeMap<String, Accumulator>> = BTreeMap::new();
    let mut per_slot: BTreeMap<String, BTreeMap<String, Accumulator>> = BTreeMap::new();
    let mut skipped = 0usize;

    for row in &table.rows {
        let Some(room) = row.get(&SemanticField::Room).and_then(CellValue::as_text) else {
            skipped += 1;
            continue;
        };
        let room = room.to_string();
        let rate = row_rate(row, variant, config);
        per_room.entry(room.clone()).or_default().push(rate);

        let date_cell = row.get(&SemanticField::Date);
        let date = date_cell.and_then(CellValue::as_date);
        let month = date
            .map(month_key)
            .or_else(|| fallback_month.map(str::to_string));
        if let Some(month) = month {
            per_month
                .entry(month)
                .or_default()
                .entry(room.clone())
                .or_default()
                .push(rate);
        }
        if let Some(slot) = date_cell
            .and_then(CellValue::as_hour)
            .and_then(time_slot)
        {
            per_slot
                .entry(slot.to_string())
                .or_default()
                .entry(room.clone())
                .or_default()
                .push(rate);
        }
        if let Some(date) = date {
            per_weekday
                .entry(weekday_name(date).to_string())
                .or_default()
                .entry(room)
                .or_default()
                .push(rate);
        }
    }
    if skipped > 0 {
        tracing::warn!(skipped, "skipped occupancy rows without a room name");
    }

    UtilizationSummary {
        room_avg_rates: per_room
            .iter()
            .map(|(room, acc)| (room.clone(), acc.mean()))
            .collect(),
        room_stats: per_room
            .into_iter()
            .map(|(room, acc)| (room, acc.stats()))
            .collect(),
        monthly_rates: collapse(per_month),
        weekday_rates: collapse(per_weekday),
        hourly_rates: collapse(per_slot),
    }
}

fn collapse(
    nested: BTreeMap<String, BTreeMap<String, Accumulator>>,
) -> BTreeMap<String, BTreeMap<String, f64>> {
    nested
        .into_iter()
        .map(|(key, rooms)| {
            let means = rooms
                .into_iter()
                .map(|(room, acc)| (room, acc.mean()))
                .collect();
            (key, means)
        })
        .collect()
}
