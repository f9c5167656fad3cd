//! Reservation-log aggregation by ticket category.

use sauna_model::{CellValue, NormalizedTable, ReservationsSummary, SemanticField};

use crate::aggregate::month_key;

/// Maps a raw ticket label to its canonical category.
#[must_use]
pub fn classify_ticket(label: &str) -> &'static str {
    let lower = label.trim().to_lowercase();
    if lower.is_empty() {
        "other"
    } else if lower.contains("体験") || lower.contains("trial") {
        "trial"
    } else if lower.contains("会員") || lower.contains("プラン") || lower.contains("member") {
        "member"
    } else if lower.contains("ビジター") || lower.contains("visitor") {
        "visitor"
    } else {
        "other"
    }
}

/// Reduces a reservation log to ticket-category counts, overall and
/// per month. Undated rows use the filename-embedded month when one
/// exists, otherwise they count only in the overall distribution.
#[must_use]
pub fn summarize_reservations(
    table: &NormalizedTable,
    fallback_month: Option<&str>,
) -> ReservationsSummary {
    let mut summary = ReservationsSummary::default();
    for row in &table.rows {
        let category = row
            .get(&SemanticField::Ticket)
            .and_then(CellValue::as_text)
            .map_or("other", classify_ticket);
        *summary
            .ticket_distribution
            .entry(category.to_string())
            .or_insert(0) += 1;
        let month = row
            .get(&SemanticField::Date)
            .and_then(CellValue::as_date)
            .map(month_key)
            .or_else(|| fallback_month.map(str::to_string));
        if let Some(month) = month {
            *summary
                .monthly_counts
                .entry(month)
                .or_default()
                .entry(category.to_string())
                .or_insert(0) += 1;
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use sauna_model::{DataType, NormalizedRow};

    use super::*;

    #[test]
    fn ticket_labels_classify_by_substring() {
        assert_eq!(classify_ticket("初回体験"), "trial");
        assert_eq!(classify_ticket("月額プラン"), "member");
        assert_eq!(classify_ticket("会員チケット"), "member");
        assert_eq!(classify_ticket("ビジター利用"), "visitor");
        assert_eq!(classify_ticket("Visitor Pass"), "visitor");
        assert_eq!(classify_ticket("回数券"), "other");
        assert_eq!(classify_ticket(""), "other");
    }

    #[test]
    fn counts_overall_and_per_month() {
        let mut table = NormalizedTable::new(
            DataType::Reservation,
            vec![SemanticField::Date, SemanticField::Ticket],
        );
        for (month, ticket) in [(3, "初回体験"), (3, "会員"), (4, "会員")] {
            let mut row = NormalizedRow::new();
            row.insert(
                SemanticField::Date,
                CellValue::Date(NaiveDate::from_ymd_opt(2024, month, 1).unwrap()),
            );
            row.insert(SemanticField::Ticket, CellValue::Text(ticket.into()));
            table.push_row(row);
        }
        let summary = summarize_reservations(&table, None);
        assert_eq!(summary.ticket_distribution["member"], 2);
        assert_eq!(summary.ticket_distribution["trial"], 1);
        assert_eq!(summary.monthly_counts["2024-03"]["trial"], 1);
        assert_eq!(summary.monthly_counts["2024-04"]["member"], 1);
    }

    #[test]
    fn undated_rows_use_fallback_month() {
        let mut table = NormalizedTable::new(
            DataType::Reservation,
            vec![SemanticField::Date, SemanticField::Ticket],
        );
        let mut row = NormalizedRow::new();
        row.insert(SemanticField::Date, CellValue::Missing);
        row.insert(SemanticField::Ticket, CellValue::Text("会員".into()));
        table.push_row(row);
        let summary = summarize_reservations(&table, Some("2024-05"));
        assert_eq!(summary.monthly_counts["2024-05"]["member"], 1);
    }
}
