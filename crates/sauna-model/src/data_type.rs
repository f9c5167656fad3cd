//! Upload data-type tags.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// The kind of data a CSV upload claims to contain.
///
/// `Auto` defers classification to filename sniffing at intake time.
/// The legacy tag `occupancy` is accepted as an alias for
/// [`DataType::Utilization`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Members,
    Utilization,
    Competitors,
    Finance,
    Sales,
    Reservation,
    Auto,
}

impl DataType {
    /// All concrete (non-`Auto`) data types.
    pub const CONCRETE: [DataType; 6] = [
        DataType::Members,
        DataType::Utilization,
        DataType::Competitors,
        DataType::Finance,
        DataType::Sales,
        DataType::Reservation,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Members => "members",
            Self::Utilization => "utilization",
            Self::Competitors => "competitors",
            Self::Finance => "finance",
            Self::Sales => "sales",
            Self::Reservation => "reservation",
            Self::Auto => "auto",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "members" | "member" => Ok(Self::Members),
            // "occupancy" is the tag some older upload clients send.
            "utilization" | "occupancy" => Ok(Self::Utilization),
            "competitors" | "competitor" => Ok(Self::Competitors),
            "finance" => Ok(Self::Finance),
            "sales" => Ok(Self::Sales),
            "reservation" | "reservations" => Ok(Self::Reservation),
            "auto" => Ok(Self::Auto),
            other => Err(ModelError::UnknownDataType(other.to_string())),
        }
    }
}
