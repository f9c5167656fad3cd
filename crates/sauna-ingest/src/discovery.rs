//! Filename-based classification.
//!
//! `auto` uploads carry no declared data type; the original export
//! tools put a recognizable prefix in the filename, and some exports
//! embed the covered year-month.

use sauna_model::DataType;

/// Sniffs a data type from a filename.
///
/// Matching is case-insensitive substring containment, checked in a
/// fixed priority order so `member_sales.csv` classifies as members.
#[must_use]
pub fn detect_data_type(filename: &str) -> Option<DataType> {
    let lower = filename.to_ascii_lowercase();
    const RULES: [(&str, DataType); 7] = [
        ("member", DataType::Members),
        ("reservation", DataType::Reservation),
        ("frame", DataType::Utilization),
        ("occupancy", DataType::Utilization),
        ("competitor", DataType::Competitors),
        ("finance", DataType::Finance),
        ("sales", DataType::Sales),
    ];
    for (needle, data_type) in RULES {
        if lower.contains(needle) {
            tracing::debug!(filename, detected = %data_type, "auto-detected data type");
            return Some(data_type);
        }
    }
    None
}

/// Extracts an embedded `YYYY-MM` from a filename.
///
/// Recognizes `2024-03`, `2024_03` and compact `202403` forms. Used as
/// a fallback month when an upload's date column is entirely
/// unparsable.
#[must_use]
pub fn extract_year_month(filename: &str) -> Option<String> {
    let bytes = filename.as_bytes();
    let digits_at = |start: usize, len: usize| -> Option<&str> {
        let slice = filename.get(start..start + len)?;
        slice
            .bytes()
            .all(|b| b.is_ascii_digit())
            .then_some(slice)
    };
    for start in 0..bytes.len() {
        // YYYY-MM or YYYY_MM
        if let Some(year) = digits_at(start, 4) {
            if !plausible_year(year) {
                continue;
            }
            let sep = bytes.get(start + 4).copied();
            if matches!(sep, Some(b'-') | Some(b'_')) {
                if let Some(month) = digits_at(start + 5, 2) {
                    if plausible_month(month) {
                        return Some(format!("{year}-{month}"));
                    }
                }
            }
            // Compact YYYYMM, not followed by another digit (avoid
            // matching the head of a timestamp like 20240301123000).
            if let Some(month) = digits_at(start + 4, 2) {
                let next_is_digit = bytes
                    .get(start + 6)
                    .is_some_and(|b| b.is_ascii_digit());
                if plausible_month(month) && !next_is_digit {
                    return Some(format!("{year}-{month}"));
                }
            }
        }
    }
    None
}

fn plausible_year(digits: &str) -> bool {
    matches!(digits.parse::<u32>(), Ok(year) if (2000..2100).contains(&year))
}

fn plausible_month(digits: &str) -> bool {
    matches!(digits.parse::<u32>(), Ok(month) if (1..=12).contains(&month))
}
