//! Computation-variant classification.
//!
//! Different exports encode "how full was this room" in incompatible
//! shapes. The classifier looks only at which fields were *matched*,
//! never at cell values.

use sauna_model::SemanticField;

use crate::matcher::ColumnMapping;

/// Strategy for turning an upload into a numeric occupancy series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateVariant {
    /// An explicit occupancy/rate column exists; parse it.
    DirectRate,
    /// Reservation count and capacity exist; rate = count/capacity×100.
    DerivedRate,
    /// Only a categorical status column exists; map statuses to 0/100.
    StatusRate,
    /// No usable signal; every row gets an explicit placeholder 0.
    NoSignal,
}

/// Picks the computation variant for a resolved mapping.
#[must_use]
pub fn classify_rate_variant(mapping: &ColumnMapping) -> RateVariant {
    if mapping.has(SemanticField::OccupancyRate) {
        RateVariant::DirectRate
    } else if mapping.has(SemanticField::ReservationCount) && mapping.has(SemanticField::Capacity)
    {
        RateVariant::DerivedRate
    } else if mapping.has(SemanticField::Status) {
        RateVariant::StatusRate
    } else {
        RateVariant::NoSignal
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use sauna_model::DataType;

    use super::*;

    fn mapping(fields: &[SemanticField]) -> ColumnMapping {
        let mut assignments = BTreeMap::new();
        for (index, field) in fields.iter().enumerate() {
            assignments.insert(*field, format!("col{index}"));
        }
        ColumnMapping {
            data_type: DataType::Utilization,
            assignments,
        }
    }

    #[test]
    fn direct_rate_wins_over_everything() {
        let m = mapping(&[
            SemanticField::OccupancyRate,
            SemanticField::ReservationCount,
            SemanticField::Capacity,
            SemanticField::Status,
        ]);
        assert_eq!(classify_rate_variant(&m), RateVariant::DirectRate);
    }

    #[test]
    fn derived_rate_needs_both_count_and_capacity() {
        let both = mapping(&[SemanticField::ReservationCount, SemanticField::Capacity]);
        assert_eq!(classify_rate_variant(&both), RateVariant::DerivedRate);
        let only_count = mapping(&[SemanticField::ReservationCount]);
        assert_eq!(classify_rate_variant(&only_count), RateVariant::NoSignal);
    }

    #[test]
    fn status_rate_when_only_status_present() {
        let m = mapping(&[SemanticField::Status]);
        assert_eq!(classify_rate_variant(&m), RateVariant::StatusRate);
    }

    #[test]
    fn no_signal_when_nothing_matches() {
        let m = mapping(&[SemanticField::Date, SemanticField::Room]);
        assert_eq!(classify_rate_variant(&m), RateVariant::NoSignal);
    }
}
