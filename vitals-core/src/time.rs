//! Instant and zone-offset helpers
//!
//! Records keep instants in UTC next to the zone offset that was in effect
//! where the measurement was taken. The persisted forms are epoch
//! milliseconds and offset seconds.

use chrono::{DateTime, FixedOffset, Local, Offset, TimeZone, Utc};
use serde::Serializer;

use crate::RecordError;

/// Largest magnitude a zone offset may have, in seconds (exclusive)
pub const MAX_OFFSET_SECONDS: i32 = 86_400;

/// The process's local zone offset at `instant`
pub fn local_offset_at(instant: &DateTime<Utc>) -> FixedOffset {
    Local.offset_from_utc_datetime(&instant.naive_utc()).fix()
}

/// The process's local zone offset right now
pub fn local_offset() -> FixedOffset {
    local_offset_at(&Utc::now())
}

/// Build a zone offset from seconds east of UTC
pub fn offset_from_seconds(seconds: i32) -> Result<FixedOffset, RecordError> {
    FixedOffset::east_opt(seconds).ok_or_else(|| {
        RecordError::validation(
            "zone_offset",
            format!("{} seconds is outside ±{}", seconds, MAX_OFFSET_SECONDS),
        )
    })
}

pub fn offset_seconds(offset: &FixedOffset) -> i32 {
    offset.local_minus_utc()
}

/// Convert epoch milliseconds back to an instant
pub fn instant_from_millis(millis: i64) -> Result<DateTime<Utc>, RecordError> {
    DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        RecordError::validation("time", format!("{} ms is out of the supported range", millis))
    })
}

/// Epoch milliseconds of an instant; sub-millisecond precision is dropped
pub fn instant_millis(instant: &DateTime<Utc>) -> i64 {
    instant.timestamp_millis()
}

/// Serialize a zone offset as seconds east of UTC
pub fn serialize_offset<S: Serializer>(offset: &FixedOffset, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_i32(offset.local_minus_utc())
}
