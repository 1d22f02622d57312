//! Time shapes of records and their internal columns

use chrono::{DateTime, FixedOffset, SubsecRound, TimeDelta, Utc};
use serde::Serialize;
use std::fmt;
use std::hash::Hash;
use vitals_core::time::{
    instant_from_millis, instant_millis, local_offset_at, offset_from_seconds, offset_seconds,
    serialize_offset,
};
use vitals_core::{RecordError, RecordResult};

use crate::field::{take_field, FieldGroup, FieldKind, FieldSpec, FieldValue};

/// The time part of an external record
pub trait RecordTime: Clone + fmt::Debug + PartialEq + Eq + Hash + Serialize + Send + Sync + 'static {
    /// Columns the time part occupies in an internal record
    type Internal: FieldGroup;

    fn validate(&self) -> RecordResult<()>;

    fn to_internal(&self) -> Self::Internal;

    fn from_internal(internal: &Self::Internal) -> RecordResult<Self>;
}

/// Start and end instants, each with the zone offset in effect there
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct IntervalTime {
    start_time: DateTime<Utc>,
    #[serde(serialize_with = "serialize_offset")]
    start_zone_offset: FixedOffset,
    end_time: DateTime<Utc>,
    #[serde(serialize_with = "serialize_offset")]
    end_zone_offset: FixedOffset,
}

impl IntervalTime {
    /// Offsets default to the local offset at each instant.
    /// Instants keep millisecond precision.
    pub fn new(start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        IntervalTime {
            start_time: start_time.trunc_subsecs(3),
            start_zone_offset: local_offset_at(&start_time),
            end_time: end_time.trunc_subsecs(3),
            end_zone_offset: local_offset_at(&end_time),
        }
    }

    pub fn with_start_zone_offset(mut self, offset: FixedOffset) -> Self {
        self.start_zone_offset = offset;
        self
    }

    pub fn with_end_zone_offset(mut self, offset: FixedOffset) -> Self {
        self.end_zone_offset = offset;
        self
    }

    /// Use one offset for both ends
    pub fn with_zone_offset(self, offset: FixedOffset) -> Self {
        self.with_start_zone_offset(offset).with_end_zone_offset(offset)
    }

    pub fn start_time(&self) -> &DateTime<Utc> {
        &self.start_time
    }

    pub fn start_zone_offset(&self) -> &FixedOffset {
        &self.start_zone_offset
    }

    pub fn end_time(&self) -> &DateTime<Utc> {
        &self.end_time
    }

    pub fn end_zone_offset(&self) -> &FixedOffset {
        &self.end_zone_offset
    }

    pub fn duration(&self) -> TimeDelta {
        self.end_time - self.start_time
    }

    /// Both ends inclusive
    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        self.start_time <= *instant && *instant <= self.end_time
    }
}

impl RecordTime for IntervalTime {
    type Internal = InternalInterval;

    fn validate(&self) -> RecordResult<()> {
        // Equal instants are a valid zero-length interval
        if self.end_time < self.start_time {
            return Err(RecordError::validation(
                "end_time",
                format!("{} is before start_time {}", self.end_time, self.start_time),
            ));
        }
        Ok(())
    }

    fn to_internal(&self) -> InternalInterval {
        InternalInterval {
            start_time: instant_millis(&self.start_time),
            start_zone_offset: offset_seconds(&self.start_zone_offset),
            end_time: instant_millis(&self.end_time),
            end_zone_offset: offset_seconds(&self.end_zone_offset),
        }
    }

    fn from_internal(internal: &InternalInterval) -> RecordResult<Self> {
        Ok(IntervalTime {
            start_time: instant_from_millis(internal.start_time)?,
            start_zone_offset: offset_from_seconds(internal.start_zone_offset)?,
            end_time: instant_from_millis(internal.end_time)?,
            end_zone_offset: offset_from_seconds(internal.end_zone_offset)?,
        })
    }
}

/// One instant with its zone offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct InstantTime {
    time: DateTime<Utc>,
    #[serde(serialize_with = "serialize_offset")]
    zone_offset: FixedOffset,
}

impl InstantTime {
    pub fn new(time: DateTime<Utc>) -> Self {
        InstantTime {
            time: time.trunc_subsecs(3),
            zone_offset: local_offset_at(&time),
        }
    }

    pub fn with_zone_offset(mut self, offset: FixedOffset) -> Self {
        self.zone_offset = offset;
        self
    }

    pub fn time(&self) -> &DateTime<Utc> {
        &self.time
    }

    pub fn zone_offset(&self) -> &FixedOffset {
        &self.zone_offset
    }
}

impl RecordTime for InstantTime {
    type Internal = InternalInstant;

    fn validate(&self) -> RecordResult<()> {
        Ok(())
    }

    fn to_internal(&self) -> InternalInstant {
        InternalInstant {
            time: instant_millis(&self.time),
            zone_offset: offset_seconds(&self.zone_offset),
        }
    }

    fn from_internal(internal: &InternalInstant) -> RecordResult<Self> {
        Ok(InstantTime {
            time: instant_from_millis(internal.time)?,
            zone_offset: offset_from_seconds(internal.zone_offset)?,
        })
    }
}

/// Interval columns: epoch millis and offset seconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct InternalInterval {
    pub start_time: i64,
    pub start_zone_offset: i32,
    pub end_time: i64,
    pub end_zone_offset: i32,
}

impl FieldGroup for InternalInterval {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("start_time", FieldKind::Long),
        FieldSpec::new("start_zone_offset", FieldKind::Int),
        FieldSpec::new("end_time", FieldKind::Long),
        FieldSpec::new("end_zone_offset", FieldKind::Int),
    ];

    fn values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::Long(self.start_time),
            FieldValue::Int(self.start_zone_offset),
            FieldValue::Long(self.end_time),
            FieldValue::Int(self.end_zone_offset),
        ]
    }

    fn take_from<I: Iterator<Item = FieldValue>>(table: &str, values: &mut I) -> RecordResult<Self> {
        Ok(InternalInterval {
            start_time: take_field(table, "start_time", values)?,
            start_zone_offset: take_field(table, "start_zone_offset", values)?,
            end_time: take_field(table, "end_time", values)?,
            end_zone_offset: take_field(table, "end_zone_offset", values)?,
        })
    }
}

/// Instant columns: epoch millis and offset seconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct InternalInstant {
    pub time: i64,
    pub zone_offset: i32,
}

impl FieldGroup for InternalInstant {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("time", FieldKind::Long),
        FieldSpec::new("zone_offset", FieldKind::Int),
    ];

    fn values(&self) -> Vec<FieldValue> {
        vec![FieldValue::Long(self.time), FieldValue::Int(self.zone_offset)]
    }

    fn take_from<I: Iterator<Item = FieldValue>>(table: &str, values: &mut I) -> RecordResult<Self> {
        Ok(InternalInstant {
            time: take_field(table, "time", values)?,
            zone_offset: take_field(table, "zone_offset", values)?,
        })
    }
}
