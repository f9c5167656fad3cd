//! Canonical semantic-field vocabulary.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A canonical concept a CSV column may represent under many different
/// header spellings (English or Japanese).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SemanticField {
    // Shared timing/dimension fields
    Date,
    Month,
    Room,
    Status,
    MemberId,
    // Occupancy inputs
    OccupancyRate,
    ReservationCount,
    Capacity,
    // Member roster
    Gender,
    AgeGroup,
    Region,
    JoinDate,
    // Competitors
    Name,
    Location,
    HourlyRate,
    Area,
    // Finance / sales ledger
    Sales,
    Costs,
    MemberType,
    Amount,
    Item,
    // Reservations
    ReservationId,
    Ticket,
}

impl SemanticField {
    /// Canonical snake_case name, used as the normalized column name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Month => "month",
            Self::Room => "room",
            Self::Status => "status",
            Self::MemberId => "member_id",
            Self::OccupancyRate => "occupancy_rate",
            Self::ReservationCount => "reservation_count",
            Self::Capacity => "capacity",
            Self::Gender => "gender",
            Self::AgeGroup => "age_group",
            Self::Region => "region",
            Self::JoinDate => "join_date",
            Self::Name => "name",
            Self::Location => "location",
            Self::HourlyRate => "hourly_rate",
            Self::Area => "area",
            Self::Sales => "sales",
            Self::Costs => "costs",
            Self::MemberType => "member_type",
            Self::Amount => "amount",
            Self::Item => "item",
            Self::ReservationId => "reservation_id",
            Self::Ticket => "ticket",
        }
    }
}

impl fmt::Display for SemanticField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
