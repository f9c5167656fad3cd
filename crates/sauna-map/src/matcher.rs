//! The single matcher interpreting the candidate tables.

use std::collections::{BTreeMap, BTreeSet};

use sauna_ingest::ColumnHint;
use sauna_model::{DataType, SemanticField};

use crate::error::{MapError, Result};
use crate::patterns::field_patterns;

/// Resolved mapping from semantic field to actual source column.
///
/// Only fields with a confirmed or sniffed source column are present.
/// Assignment is one-to-one: a claimed column is not reused for a
/// later field.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ColumnMapping {
    pub data_type: DataType,
    pub assignments: BTreeMap<SemanticField, String>,
}

impl ColumnMapping {
    #[must_use]
    pub fn column(&self, field: SemanticField) -> Option<&str> {
        self.assignments.get(&field).map(String::as_str)
    }

    #[must_use]
    pub fn has(&self, field: SemanticField) -> bool {
        self.assignments.contains_key(&field)
    }

    #[must_use]
    pub fn fields(&self) -> Vec<SemanticField> {
        self.assignments.keys().copied().collect()
    }
}

/// What kind of column the structural fallback may claim for a field
/// whose candidates all missed.
enum FallbackKind {
    DateLike,
    Categorical,
    Numeric,
    None,
}

fn fallback_kind(field: SemanticField) -> FallbackKind {
    match field {
        SemanticField::Date | SemanticField::JoinDate => FallbackKind::DateLike,
        SemanticField::Room | SemanticField::Name => FallbackKind::Categorical,
        SemanticField::OccupancyRate
        | SemanticField::Amount
        | SemanticField::Sales
        | SemanticField::Costs
        | SemanticField::HourlyRate => FallbackKind::Numeric,
        _ => FallbackKind::None,
    }
}

/// Resolves source columns to semantic fields for one upload.
///
/// Candidate pass first: for each field, candidates are scanned in
/// priority order and the first containing match among unclaimed
/// columns wins. Then a structural fallback for still-missing
/// *required* fields: first unclaimed fully-date-parsing column for a
/// date field, first unclaimed string-like column for a categorical
/// field, first unclaimed numeric column for a rate/amount field.
///
/// # Errors
///
/// [`MapError::MissingFields`] when required fields remain unresolved,
/// naming the fields and echoing the actual column list.
pub fn match_columns(
    data_type: DataType,
    headers: &[String],
    hints: &BTreeMap<String, ColumnHint>,
) -> Result<ColumnMapping> {
    if data_type == DataType::Auto {
        return Err(MapError::UnresolvedDataType);
    }
    let patterns = field_patterns(data_type);
    let lowered: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();
    let mut assignments: BTreeMap<SemanticField, String> = BTreeMap::new();
    let mut claimed: BTreeSet<usize> = BTreeSet::new();

    for pattern in patterns {
        'candidates: for candidate in pattern.candidates {
            for (index, lower) in lowered.iter().enumerate() {
                if claimed.contains(&index) {
                    continue;
                }
                if lower.contains(candidate) {
                    claimed.insert(index);
                    assignments.insert(pattern.field, headers[index].clone());
                    tracing::debug!(
                        field = %pattern.field,
                        column = %headers[index],
                        candidate,
                        "matched column"
                    );
                    break 'candidates;
                }
            }
        }
    }

    // Structural fallback for required fields the candidates missed.
    for pattern in patterns {
        if !pattern.required || assignments.contains_key(&pattern.field) {
            continue;
        }
        let wanted = fallback_kind(pattern.field);
        let found = headers.iter().enumerate().find(|(index, header)| {
            if claimed.contains(index) {
                return false;
            }
            // A column with no hint has unknown shape; never claim it.
            let Some(hint) = hints.get(*header) else {
                return false;
            };
            match wanted {
                FallbackKind::DateLike => hint.is_datelike,
                FallbackKind::Categorical => !hint.is_numeric && !hint.is_datelike,
                FallbackKind::Numeric => hint.is_numeric,
                FallbackKind::None => false,
            }
        });
        if let Some((index, header)) = found {
            claimed.insert(index);
            assignments.insert(pattern.field, header.clone());
            tracing::info!(
                field = %pattern.field,
                column = %header,
                "resolved field by structural fallback"
            );
        }
    }

    let missing: Vec<SemanticField> = patterns
        .iter()
        .filter(|p| p.required && !assignments.contains_key(&p.field))
        .map(|p| p.field)
        .collect();
    if !missing.is_empty() {
        return Err(MapError::MissingFields {
            data_type,
            missing,
            columns: headers.to_vec(),
        });
    }

    Ok(ColumnMapping {
        data_type,
        assignments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_hints() -> BTreeMap<String, ColumnHint> {
        BTreeMap::new()
    }

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn matches_japanese_member_headers() {
        let headers = headers(&["会員ID", "性別", "年齢層", "地域", "入会日", "ステータス"]);
        let mapping = match_columns(DataType::Members, &headers, &no_hints()).unwrap();
        assert_eq!(mapping.column(SemanticField::MemberId), Some("会員ID"));
        assert_eq!(mapping.column(SemanticField::Gender), Some("性別"));
        assert_eq!(mapping.column(SemanticField::AgeGroup), Some("年齢層"));
        assert_eq!(mapping.column(SemanticField::Region), Some("地域"));
        assert_eq!(mapping.column(SemanticField::JoinDate), Some("入会日"));
        assert_eq!(mapping.column(SemanticField::Status), Some("ステータス"));
    }

    #[test]
    fn substring_match_is_position_independent() {
        // Same columns, shuffled; suffixes added by an export tool.
        let first = headers(&["export_date", "room_name", "occupancy_rate_pct"]);
        let second = headers(&["occupancy_rate_pct", "export_date", "room_name"]);
        let a = match_columns(DataType::Utilization, &first, &no_hints()).unwrap();
        let b = match_columns(DataType::Utilization, &second, &no_hints()).unwrap();
        assert_eq!(a.assignments, b.assignments);
        assert_eq!(a.column(SemanticField::Date), Some("export_date"));
        assert_eq!(
            a.column(SemanticField::OccupancyRate),
            Some("occupancy_rate_pct")
        );
    }

    #[test]
    fn candidate_priority_breaks_ties() {
        // Both columns contain a Date candidate; 受講日 is listed first
        // in the reservation table so it wins over 日付.
        let headers = headers(&["日付", "受講日", "予約ステータス"]);
        let mapping = match_columns(DataType::Reservation, &headers, &no_hints()).unwrap();
        assert_eq!(mapping.column(SemanticField::Date), Some("受講日"));
    }

    #[test]
    fn structural_fallback_resolves_required_fields() {
        let headers = headers(&["いつ", "どこ", "どれくらい"]);
        let mut hints = BTreeMap::new();
        hints.insert(
            "いつ".to_string(),
            ColumnHint {
                is_datelike: true,
                ..ColumnHint::default()
            },
        );
        hints.insert("どこ".to_string(), ColumnHint::default());
        hints.insert(
            "どれくらい".to_string(),
            ColumnHint {
                is_numeric: true,
                ..ColumnHint::default()
            },
        );
        let mapping = match_columns(DataType::Utilization, &headers, &hints).unwrap();
        assert_eq!(mapping.column(SemanticField::Date), Some("いつ"));
        assert_eq!(mapping.column(SemanticField::Room), Some("どこ"));
        // occupancy_rate is optional; no numeric fallback is applied.
        assert!(!mapping.has(SemanticField::OccupancyRate));
    }

    #[test]
    fn columns_without_hints_are_never_claimed() {
        // Same headers as the hinted fallback test, but no statistics:
        // nothing may be claimed structurally.
        let headers = headers(&["いつ", "どこ", "どれくらい"]);
        let err = match_columns(DataType::Utilization, &headers, &no_hints()).unwrap_err();
        assert!(matches!(err, MapError::MissingFields { .. }));
    }

    #[test]
    fn missing_required_fields_error_lists_columns() {
        let headers = headers(&["foo", "bar"]);
        let err = match_columns(DataType::Utilization, &headers, &no_hints()).unwrap_err();
        match err {
            MapError::MissingFields {
                data_type,
                missing,
                columns,
            } => {
                assert_eq!(data_type, DataType::Utilization);
                assert!(missing.contains(&SemanticField::Date));
                assert!(missing.contains(&SemanticField::Room));
                assert_eq!(columns, vec!["foo".to_string(), "bar".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn claimed_columns_are_not_reused() {
        // 総予約数 and スペース数 both end in 数; one column must not
        // satisfy two fields.
        let headers = headers(&["レッスン日", "ルーム名", "スペース数", "総予約数"]);
        let mapping = match_columns(DataType::Utilization, &headers, &no_hints()).unwrap();
        assert_eq!(mapping.column(SemanticField::Room), Some("ルーム名"));
        assert_eq!(mapping.column(SemanticField::Capacity), Some("スペース数"));
        assert_eq!(
            mapping.column(SemanticField::ReservationCount),
            Some("総予約数")
        );
    }

    #[test]
    fn auto_is_rejected() {
        assert!(matches!(
            match_columns(DataType::Auto, &headers(&["a"]), &no_hints()),
            Err(MapError::UnresolvedDataType)
        ));
    }
}
