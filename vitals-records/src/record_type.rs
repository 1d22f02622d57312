//! Record-type identifiers
//!
//! Identifiers are persisted next to every serialized record, so a value is
//! never reassigned once published. `0` is reserved for "unknown" and never
//! names a variant.

use serde::{Deserialize, Serialize};
use std::fmt;
use vitals_core::RecordError;

/// Stable identifier of one record variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(i32)]
pub enum RecordType {
    Steps = 1,
    ActiveCaloriesBurned = 3,
    Hydration = 4,
    ElevationGained = 5,
    FloorsClimbed = 8,
    WheelchairPushes = 9,
    Distance = 10,
    Nutrition = 12,
    TotalCaloriesBurned = 13,
    HeartRate = 17,
    CyclingPedalingCadence = 18,
    Power = 19,
    Speed = 20,
    StepsCadence = 21,
    BasalMetabolicRate = 22,
}

impl RecordType {
    /// The reserved identifier no variant carries
    pub const UNKNOWN_ID: i32 = 0;

    /// Every variant, in ascending identifier order
    pub const ALL: [RecordType; 15] = [
        RecordType::Steps,
        RecordType::ActiveCaloriesBurned,
        RecordType::Hydration,
        RecordType::ElevationGained,
        RecordType::FloorsClimbed,
        RecordType::WheelchairPushes,
        RecordType::Distance,
        RecordType::Nutrition,
        RecordType::TotalCaloriesBurned,
        RecordType::HeartRate,
        RecordType::CyclingPedalingCadence,
        RecordType::Power,
        RecordType::Speed,
        RecordType::StepsCadence,
        RecordType::BasalMetabolicRate,
    ];

    pub fn id(self) -> i32 {
        self as i32
    }

    pub fn name(self) -> &'static str {
        match self {
            RecordType::Steps => "Steps",
            RecordType::ActiveCaloriesBurned => "ActiveCaloriesBurned",
            RecordType::Hydration => "Hydration",
            RecordType::ElevationGained => "ElevationGained",
            RecordType::FloorsClimbed => "FloorsClimbed",
            RecordType::WheelchairPushes => "WheelchairPushes",
            RecordType::Distance => "Distance",
            RecordType::Nutrition => "Nutrition",
            RecordType::TotalCaloriesBurned => "TotalCaloriesBurned",
            RecordType::HeartRate => "HeartRate",
            RecordType::CyclingPedalingCadence => "CyclingPedalingCadence",
            RecordType::Power => "Power",
            RecordType::Speed => "Speed",
            RecordType::StepsCadence => "StepsCadence",
            RecordType::BasalMetabolicRate => "BasalMetabolicRate",
        }
    }
}

impl TryFrom<i32> for RecordType {
    type Error = RecordError;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        RecordType::ALL
            .into_iter()
            .find(|record_type| record_type.id() == id)
            .ok_or_else(|| RecordError::unknown_record_type(id))
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.id())
    }
}

/// How a variant is anchored in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordShape {
    /// Start and end instants, each with a zone offset
    Interval,
    /// One instant with a zone offset
    Instant,
    /// An interval plus ordered timed samples
    Series,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique_and_ascending() {
        let ids: Vec<i32> = RecordType::ALL.iter().map(|t| t.id()).collect();
        let unique: HashSet<i32> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_try_from_round_trip() {
        for record_type in RecordType::ALL {
            assert_eq!(RecordType::try_from(record_type.id()).unwrap(), record_type);
        }
    }

    #[test]
    fn test_unknown_id_rejected() {
        let err = RecordType::try_from(RecordType::UNKNOWN_ID).unwrap_err();
        assert_eq!(err.code(), vitals_core::codes::UNKNOWN_RECORD_TYPE);
        assert!(RecordType::try_from(2).is_err());
        assert!(RecordType::try_from(-1).is_err());
    }

    #[test]
    fn test_fixed_identifiers() {
        assert_eq!(RecordType::Steps.id(), 1);
        assert_eq!(RecordType::Nutrition.id(), 12);
        assert_eq!(RecordType::HeartRate.id(), 17);
        assert_eq!(RecordType::BasalMetabolicRate.id(), 22);
    }

    #[test]
    fn test_display() {
        assert_eq!(RecordType::Distance.to_string(), "Distance (10)");
    }
}
