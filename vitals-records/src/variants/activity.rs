//! Interval records of physical activity

use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};
use vitals_core::RecordResult;
use vitals_units::{Energy, Length, Volume};

use crate::convert::{check_non_negative, check_range, ExternalField};
use crate::field::FieldKind;
use crate::time::IntervalTime;
use crate::variant::{no_extra_checks, record_variant};

/// Counts accepted for steps and wheelchair pushes
pub const COUNT_RANGE: std::ops::RangeInclusive<i64> = 1..=1_000_000;

/// A number of floors; fractional floors are allowed
#[derive(Debug, Clone, Copy, Default, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Floors(f64);

impl Floors {
    pub fn new(floors: f64) -> Self {
        Floors(floors)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for Floors {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for Floors {}

impl Hash for Floors {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl From<f64> for Floors {
    fn from(floors: f64) -> Self {
        Floors(floors)
    }
}

impl fmt::Display for Floors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} floors", self.0)
    }
}

impl ExternalField for Floors {
    type Primitive = f64;

    const KIND: FieldKind = FieldKind::Real;

    fn to_primitive(&self) -> f64 {
        self.0
    }

    fn from_primitive(primitive: f64) -> RecordResult<Self> {
        Ok(Floors(primitive))
    }

    fn validate(&self, field: &'static str) -> RecordResult<()> {
        check_non_negative(field, self.0)
    }
}

fn validate_steps(record: &StepsRecord) -> RecordResult<()> {
    check_range("count", *record.count(), COUNT_RANGE)
}

fn validate_wheelchair_pushes(record: &WheelchairPushesRecord) -> RecordResult<()> {
    check_range("count", *record.count(), COUNT_RANGE)
}

record_variant! {
    /// Steps taken over an interval
    pub struct StepsRecord / StepsRecordInternal / StepsRecordBuilder {
        record_type: Steps,
        table: "steps_record_table",
        schema_version: 1,
        shape: Interval,
        time: IntervalTime,
        validate: validate_steps,
        required { count: i64 }
        optional {}
    }
}

record_variant! {
    /// Wheelchair pushes over an interval
    pub struct WheelchairPushesRecord / WheelchairPushesRecordInternal / WheelchairPushesRecordBuilder {
        record_type: WheelchairPushes,
        table: "wheelchair_pushes_record_table",
        schema_version: 1,
        shape: Interval,
        time: IntervalTime,
        validate: validate_wheelchair_pushes,
        required { count: i64 }
        optional {}
    }
}

record_variant! {
    /// Distance covered over an interval
    pub struct DistanceRecord / DistanceRecordInternal / DistanceRecordBuilder {
        record_type: Distance,
        table: "distance_record_table",
        schema_version: 1,
        shape: Interval,
        time: IntervalTime,
        validate: no_extra_checks,
        required { distance: Length }
        optional {}
    }
}

record_variant! {
    /// Elevation gained over an interval
    pub struct ElevationGainedRecord / ElevationGainedRecordInternal / ElevationGainedRecordBuilder {
        record_type: ElevationGained,
        table: "elevation_gained_record_table",
        schema_version: 1,
        shape: Interval,
        time: IntervalTime,
        validate: no_extra_checks,
        required { elevation: Length }
        optional {}
    }
}

record_variant! {
    /// Floors climbed over an interval; fractional floors are allowed
    pub struct FloorsClimbedRecord / FloorsClimbedRecordInternal / FloorsClimbedRecordBuilder {
        record_type: FloorsClimbed,
        table: "floors_climbed_record_table",
        schema_version: 1,
        shape: Interval,
        time: IntervalTime,
        validate: no_extra_checks,
        required { floors: Floors }
        optional {}
    }
}

record_variant! {
    /// Energy burned by activity, excluding basal metabolism
    pub struct ActiveCaloriesBurnedRecord / ActiveCaloriesBurnedRecordInternal / ActiveCaloriesBurnedRecordBuilder {
        record_type: ActiveCaloriesBurned,
        table: "active_calories_burned_record_table",
        schema_version: 1,
        shape: Interval,
        time: IntervalTime,
        validate: no_extra_checks,
        required { energy: Energy }
        optional {}
    }
}

record_variant! {
    /// Total energy burned, basal metabolism included
    pub struct TotalCaloriesBurnedRecord / TotalCaloriesBurnedRecordInternal / TotalCaloriesBurnedRecordBuilder {
        record_type: TotalCaloriesBurned,
        table: "total_calories_burned_record_table",
        schema_version: 1,
        shape: Interval,
        time: IntervalTime,
        validate: no_extra_checks,
        required { energy: Energy }
        optional {}
    }
}

record_variant! {
    /// Liquid drunk over an interval
    pub struct HydrationRecord / HydrationRecordInternal / HydrationRecordBuilder {
        record_type: Hydration,
        table: "hydration_record_table",
        schema_version: 1,
        shape: Interval,
        time: IntervalTime,
        validate: no_extra_checks,
        required { volume: Volume }
        optional {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldKind, FieldValue};
    use crate::variant::RecordVariant;
    use chrono::{DateTime, FixedOffset, Utc};
    use vitals_core::{DataOrigin, Metadata, RecordError};

    fn at(millis: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(millis).unwrap()
    }

    fn ten_minutes() -> IntervalTime {
        IntervalTime::new(at(1_700_000_000_000), at(1_700_000_600_000))
            .with_zone_offset(FixedOffset::east_opt(3600).unwrap())
    }

    fn metadata() -> Metadata {
        Metadata::builder()
            .data_origin(DataOrigin::new("com.example.fitness"))
            .build()
    }

    #[test]
    fn test_steps_builder() {
        let record = StepsRecord::builder(metadata(), ten_minutes(), 120).build().unwrap();
        assert_eq!(*record.count(), 120);
        assert_eq!(record.time().duration().num_minutes(), 10);
    }

    #[test]
    fn test_steps_count_range() {
        for count in [0, -5, 1_000_001] {
            let err = StepsRecord::builder(metadata(), ten_minutes(), count).build().unwrap_err();
            assert!(matches!(err, RecordError::Validation { ref field, .. } if field == "count"));
        }
        assert!(StepsRecord::builder(metadata(), ten_minutes(), 1_000_000).build().is_ok());
    }

    #[test]
    fn test_wheelchair_pushes_count_range() {
        assert!(WheelchairPushesRecord::builder(metadata(), ten_minutes(), 0).build().is_err());
        assert!(WheelchairPushesRecord::builder(metadata(), ten_minutes(), 40).build().is_ok());
    }

    #[test]
    fn test_end_before_start_rejected() {
        let time = IntervalTime::new(at(2_000), at(1_000));
        let err = StepsRecord::builder(metadata(), time, 10).build().unwrap_err();
        assert!(matches!(err, RecordError::Validation { ref field, .. } if field == "end_time"));
    }

    #[test]
    fn test_steps_columns() {
        let columns = StepsRecordInternal::columns();
        let names: Vec<&str> = columns.iter().map(|c| c.name).collect();
        assert_eq!(names[0], "uuid");
        assert_eq!(&names[8..], &["start_time", "start_zone_offset", "end_time", "end_zone_offset", "count"]);
        assert_eq!(columns.last().unwrap().kind, FieldKind::Long);
    }

    #[test]
    fn test_steps_internal() {
        let record = StepsRecord::builder(metadata(), ten_minutes(), 120).build().unwrap();
        let internal = record.to_internal();
        assert_eq!(internal.count, 120);
        assert_eq!(internal.time.start_time, 1_700_000_000_000);
        assert_eq!(internal.time.end_zone_offset, 3600);
        assert_eq!(internal.header.package_name.as_deref(), Some("com.example.fitness"));
        assert_eq!(internal.to_external().unwrap(), record);
    }

    #[test]
    fn test_distance_normalized_to_meters() {
        let record = DistanceRecord::builder(metadata(), ten_minutes(), Length::from_kilometers(2.5))
            .build()
            .unwrap();
        assert_eq!(record.to_internal().distance, 2500.0);
    }

    #[test]
    fn test_negative_volume_rejected() {
        let err = HydrationRecord::builder(metadata(), ten_minutes(), Volume::from_liters(-0.5))
            .build()
            .unwrap_err();
        assert!(matches!(err, RecordError::Validation { ref field, .. } if field == "volume"));
    }

    #[test]
    fn test_values_round_trip() {
        let internal = TotalCaloriesBurnedRecordInternal {
            energy: 4184.0,
            ..Default::default()
        };
        let values = internal.values();
        assert_eq!(values.last(), Some(&FieldValue::Real(4184.0)));
        assert_eq!(TotalCaloriesBurnedRecordInternal::from_values(values).unwrap(), internal);
    }

    #[test]
    fn test_from_values_rejects_extra_values() {
        let mut values = FloorsClimbedRecordInternal::default().values();
        values.push(FieldValue::Real(1.0));
        let err = FloorsClimbedRecordInternal::from_values(values).unwrap_err();
        assert_eq!(err.code(), vitals_core::codes::SCHEMA_MISMATCH);
    }

    #[test]
    fn test_fractional_floors() {
        let record = FloorsClimbedRecord::builder(metadata(), ten_minutes(), Floors::new(2.5))
            .build()
            .unwrap();
        assert_eq!(record.to_internal().floors, 2.5);
        assert!(FloorsClimbedRecord::builder(metadata(), ten_minutes(), Floors::new(-1.0))
            .build()
            .is_err());
    }

    #[test]
    fn test_all_zero_internal_converts_back() {
        let external = StepsRecordInternal::default().to_external().unwrap();
        assert_eq!(*external.count(), 0);
        assert_eq!(*external.time().start_time(), DateTime::UNIX_EPOCH);
    }
}
