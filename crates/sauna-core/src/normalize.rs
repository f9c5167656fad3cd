//! Cell-level normalization: raw strings to typed values.
//!
//! Japanese business exports decorate numbers freely (`85%`, `1,234`,
//! `¥5,500`, `3800円`) and write dates in half a dozen formats. The
//! parsers here strip the decoration; anything still unparsable maps
//! to [`CellValue::Missing`], never to an error.

use chrono::{NaiveDate, NaiveDateTime};

use sauna_ingest::RawTable;
use sauna_map::ColumnMapping;
use sauna_model::{CellValue, NormalizedTable, SemanticField};

/// Date formats attempted in order. Kept in sync with the ingest
/// crate's column sniffing.
const DATE_FORMATS: [&str; 7] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y年%m月%d日",
    "%m/%d/%Y",
];

/// Datetime formats attempted before the plain date formats, so a
/// time-of-day component survives normalization when one is present.
const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
];

/// Parses a datetime cell. Date-only values do not match; use
/// [`parse_date`] for those.
#[must_use]
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
}

/// Parses a date cell, tolerating datetime suffixes.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    // Datetimes with seconds still carry a date prefix.
    let prefix = trimmed.get(..10).unwrap_or("");
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(prefix, "%Y/%m/%d"))
        .ok()
}

/// Parses a percentage cell: `85%`, `85.5`, `8,500` style decoration
/// is stripped before the numeric parse.
#[must_use]
pub fn parse_percent(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != '%' && *c != ',' && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

/// Parses a monetary or count cell, stripping thousands separators and
/// currency markers.
#[must_use]
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '¥' | '￥' | '円') && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

/// Normalizes a month label to `YYYY-MM` (`2024/03` and `2024-3`
/// forms included); anything else is returned trimmed as-is.
#[must_use]
pub fn normalize_month(raw: &str) -> String {
    let trimmed = raw.trim();
    let parts: Vec<&str> = trimmed.splitn(2, ['-', '/']).collect();
    if let [year, month] = parts.as_slice() {
        if year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(m) = month.parse::<u32>() {
                if (1..=12).contains(&m) {
                    return format!("{year}-{m:02}");
                }
            }
        }
    }
    // A full date also identifies its month.
    if let Some(date) = parse_date(trimmed) {
        return date.format("%Y-%m").to_string();
    }
    trimmed.to_string()
}

fn coerce(field: SemanticField, raw: &str) -> CellValue {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return CellValue::Missing;
    }
    match field {
        SemanticField::Date | SemanticField::JoinDate => parse_datetime(trimmed)
            .map(CellValue::DateTime)
            .or_else(|| parse_date(trimmed).map(CellValue::Date))
            .unwrap_or(CellValue::Missing),
        SemanticField::OccupancyRate => {
            parse_percent(trimmed).map_or(CellValue::Missing, CellValue::Number)
        }
        SemanticField::Amount
        | SemanticField::Sales
        | SemanticField::Costs
        | SemanticField::HourlyRate
        | SemanticField::Capacity
        | SemanticField::ReservationCount => {
            parse_amount(trimmed).map_or(CellValue::Missing, CellValue::Number)
        }
        SemanticField::Month => CellValue::Text(normalize_month(trimmed)),
        _ => CellValue::Text(trimmed.to_string()),
    }
}

/// Applies a resolved column mapping to a raw table, producing typed
/// rows keyed by semantic field.
#[must_use]
pub fn normalize_table(table: &RawTable, mapping: &ColumnMapping) -> NormalizedTable {
    let fields = mapping.fields();
    let mut sources: Vec<(SemanticField, usize)> = Vec::with_capacity(fields.len());
    for field in &fields {
        if let Some(column) = mapping.column(*field) {
            if let Some(index) = table.column_index(column) {
                sources.push((*field, index));
            }
        }
    }
    let mut normalized = NormalizedTable::new(mapping.data_type, fields);
    for row_index in 0..table.rows.len() {
        let mut row = sauna_model::NormalizedRow::new();
        for (field, column_index) in &sources {
            let raw = table.cell(row_index, *column_index).unwrap_or("");
            row.insert(*field, coerce(*field, raw));
        }
        normalized.push_row(row);
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use sauna_ingest::probe_table;
    use sauna_map::match_columns;
    use sauna_model::DataType;

    #[test]
    fn parses_decorated_numbers() {
        assert_eq!(parse_percent("85%"), Some(85.0));
        assert_eq!(parse_percent(" 85.5 % "), Some(85.5));
        assert_eq!(parse_amount("1,234"), Some(1234.0));
        assert_eq!(parse_amount("¥5,500"), Some(5500.0));
        assert_eq!(parse_amount("3800円"), Some(3800.0));
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_percent(""), None);
    }

    #[test]
    fn parses_japanese_dates() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(parse_date("2024-03-01"), Some(expected));
        assert_eq!(parse_date("2024/03/01"), Some(expected));
        assert_eq!(parse_date("2024年3月1日"), Some(expected));
        assert_eq!(parse_date("2024-03-01 10:00:00"), Some(expected));
        assert_eq!(parse_date("not a date"), None);
    }

    #[test]
    fn datetime_cells_keep_their_hour() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(19, 30, 0)
            .unwrap();
        assert_eq!(parse_datetime("2024-03-01 19:30:00"), Some(expected));
        assert_eq!(parse_datetime("2024/03/01 19:30"), Some(expected));
        assert_eq!(parse_datetime("2024-03-01"), None);

        // A reservation timestamp is normalized to a DateTime cell; a
        // bare date stays a Date cell.
        assert_eq!(
            coerce(SemanticField::Date, "2024-03-01 19:30"),
            CellValue::DateTime(expected)
        );
        assert_eq!(
            coerce(SemanticField::Date, "2024-03-01"),
            CellValue::Date(expected.date())
        );
    }

    #[test]
    fn month_labels_are_canonicalized() {
        assert_eq!(normalize_month("2024/3"), "2024-03");
        assert_eq!(normalize_month("2024-03"), "2024-03");
        assert_eq!(normalize_month("2024-03-15"), "2024-03");
        assert_eq!(normalize_month("3月"), "3月");
    }

    #[test]
    fn normalizes_a_utilization_table() {
        let raw = probe_table(
            "日付,ルーム名,稼働率\n2024-03-01,Room1,85%\n2024-03-02,Room2,junk\n".as_bytes(),
        )
        .unwrap();
        let mapping =
            match_columns(DataType::Utilization, &raw.headers, &Default::default()).unwrap();
        let table = normalize_table(&raw, &mapping);
        assert_eq!(table.row_count(), 2);
        assert_eq!(
            table.rows[0].get(&SemanticField::OccupancyRate),
            Some(&CellValue::Number(85.0))
        );
        assert_eq!(
            table.rows[0].get(&SemanticField::Room),
            Some(&CellValue::Text("Room1".to_string()))
        );
        // Unparsable rate becomes Missing, not an error.
        assert_eq!(
            table.rows[1].get(&SemanticField::OccupancyRate),
            Some(&CellValue::Missing)
        );
    }
}
