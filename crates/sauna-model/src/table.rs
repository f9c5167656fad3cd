//! Normalized tabular data with typed cells.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::{DataType, SemanticField};

/// A single typed cell after normalization.
///
/// Unparsable dates and numbers become [`CellValue::Missing`] rather
/// than errors; missing-value policy is decided by the aggregators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Missing,
}

impl CellValue {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(value) => Some(*value),
            Self::DateTime(value) => Some(value.date()),
            _ => None,
        }
    }

    /// Hour of day, only for cells that carry a time component.
    #[must_use]
    pub fn as_hour(&self) -> Option<u32> {
        match self {
            Self::DateTime(value) => Some(value.hour()),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

/// One row of a normalized table, keyed by semantic field.
pub type NormalizedRow = BTreeMap<SemanticField, CellValue>;

/// A source table with resolved columns renamed to their canonical
/// semantic fields and cells coerced to typed values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedTable {
    pub data_type: DataType,
    /// Semantic fields present in this table, in resolution order.
    pub fields: Vec<SemanticField>,
    pub rows: Vec<NormalizedRow>,
}

impl NormalizedTable {
    #[must_use]
    pub fn new(data_type: DataType, fields: Vec<SemanticField>) -> Self {
        Self {
            data_type,
            fields,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: NormalizedRow) {
        self.rows.push(row);
    }

    #[must_use]
    pub fn has_field(&self, field: SemanticField) -> bool {
        self.fields.contains(&field)
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_accessors() {
        assert_eq!(CellValue::Number(85.0).as_number(), Some(85.0));
        assert_eq!(CellValue::Text("a".into()).as_number(), None);
        assert!(CellValue::Missing.is_missing());
    }

    #[test]
    fn datetime_cells_expose_date_and_hour() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(19, 30, 0)
            .unwrap();
        let cell = CellValue::DateTime(at);
        assert_eq!(cell.as_date(), Some(at.date()));
        assert_eq!(cell.as_hour(), Some(19));
        assert_eq!(CellValue::Date(at.date()).as_hour(), None);
    }

    #[test]
    fn table_tracks_fields() {
        let table = NormalizedTable::new(
            DataType::Utilization,
            vec![SemanticField::Date, SemanticField::Room],
        );
        assert!(table.has_field(SemanticField::Room));
        assert!(!table.has_field(SemanticField::Status));
    }
}
