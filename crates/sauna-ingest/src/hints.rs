//! Per-column statistics used by the field matcher's structural
//! fallback.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::probe::RawTable;

/// Date formats accepted when sniffing whether a column is date-like.
/// Kept in sync with the normalization layer's parse attempts.
pub(crate) const DATE_FORMATS: [&str; 7] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y年%m月%d日",
    "%m/%d/%Y",
];

pub(crate) fn parses_as_date(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return false;
    }
    DATE_FORMATS
        .iter()
        .any(|format| NaiveDate::parse_from_str(trimmed, format).is_ok())
        // Datetime values with seconds ("2024-03-01 10:00:00") still
        // carry a parseable date prefix.
        || NaiveDate::parse_from_str(trimmed.get(..10).unwrap_or(""), "%Y-%m-%d").is_ok()
        || NaiveDate::parse_from_str(trimmed.get(..10).unwrap_or(""), "%Y/%m/%d").is_ok()
}

/// Statistics about one source column.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ColumnHint {
    /// Every non-empty cell parses as a number.
    pub is_numeric: bool,
    /// Every non-empty cell parses as a date (or datetime).
    pub is_datelike: bool,
    /// Ratio of empty cells to total rows (0.0 to 1.0).
    pub null_ratio: f64,
    /// Ratio of distinct non-empty values to non-empty cells.
    pub unique_ratio: f64,
}

/// Computes hints for every column of a raw table.
#[must_use]
pub fn build_column_hints(table: &RawTable) -> BTreeMap<String, ColumnHint> {
    let mut hints = BTreeMap::new();
    let row_count = table.rows.len();
    for (index, header) in table.headers.iter().enumerate() {
        let mut non_null = 0usize;
        let mut numeric = 0usize;
        let mut datelike = 0usize;
        let mut uniques = std::collections::BTreeSet::new();
        for value in table.column_values(index) {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                continue;
            }
            non_null += 1;
            uniques.insert(trimmed.to_string());
            if trimmed.parse::<f64>().is_ok() {
                numeric += 1;
            }
            if parses_as_date(trimmed) {
                datelike += 1;
            }
        }
        let null_ratio = if row_count == 0 {
            1.0
        } else {
            (row_count.saturating_sub(non_null)) as f64 / row_count as f64
        };
        let unique_ratio = if non_null == 0 {
            0.0
        } else {
            uniques.len() as f64 / non_null as f64
        };
        hints.insert(
            header.clone(),
            ColumnHint {
                is_numeric: non_null > 0 && numeric == non_null,
                is_datelike: non_null > 0 && datelike == non_null,
                null_ratio,
                unique_ratio,
            },
        );
    }
    hints
}
