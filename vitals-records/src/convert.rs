//! Conversion between external and internal records
//!
//! Each external field type knows its primitive form. Present quantities
//! are extracted in their canonical unit; absent ones collapse to `0.0`,
//! and on the way back every primitive is wrapped again, so zero stands in
//! for "absent" after a round trip.

use std::ops::RangeInclusive;
use tracing::trace;
use vitals_core::{RecordError, RecordResult};
use vitals_units::{CanonicalQuantity, Energy, Length, Mass, Power, Velocity, Volume};

use crate::catalog::{ExternalRecord, InternalRecord};
use crate::field::{FieldKind, Primitive};
use crate::sample::{InternalSample, Sample, SampleValue};
use crate::time::IntervalTime;

/// A field type of an external record
pub trait ExternalField: Sized {
    type Primitive: Primitive;

    const KIND: FieldKind;

    fn to_primitive(&self) -> Self::Primitive;

    fn from_primitive(primitive: Self::Primitive) -> RecordResult<Self>;

    /// Checks applied by builders; never applied when reading stored data
    fn validate(&self, _field: &'static str) -> RecordResult<()> {
        Ok(())
    }
}

macro_rules! quantity_field {
    ($($quantity:ident),+ $(,)?) => {
        $(
            impl ExternalField for $quantity {
                type Primitive = f64;

                const KIND: FieldKind = FieldKind::$quantity;

                fn to_primitive(&self) -> f64 {
                    self.canonical_value()
                }

                fn from_primitive(primitive: f64) -> RecordResult<Self> {
                    Ok($quantity::from_canonical(primitive))
                }

                fn validate(&self, field: &'static str) -> RecordResult<()> {
                    check_non_negative(field, self.canonical_value())
                }
            }

            impl ExternalField for Option<$quantity> {
                type Primitive = f64;

                const KIND: FieldKind = FieldKind::$quantity;

                fn to_primitive(&self) -> f64 {
                    self.map_or(0.0, |quantity| quantity.canonical_value())
                }

                fn from_primitive(primitive: f64) -> RecordResult<Self> {
                    Ok(Some($quantity::from_canonical(primitive)))
                }

                fn validate(&self, field: &'static str) -> RecordResult<()> {
                    match self {
                        Some(quantity) => quantity.validate(field),
                        None => Ok(()),
                    }
                }
            }
        )+
    };
}

quantity_field!(Mass, Energy, Length, Power, Volume, Velocity);

impl ExternalField for i64 {
    type Primitive = i64;

    const KIND: FieldKind = FieldKind::Long;

    fn to_primitive(&self) -> i64 {
        *self
    }

    fn from_primitive(primitive: i64) -> RecordResult<Self> {
        Ok(primitive)
    }
}

impl ExternalField for Option<String> {
    type Primitive = Option<String>;

    const KIND: FieldKind = FieldKind::Text;

    fn to_primitive(&self) -> Option<String> {
        self.clone()
    }

    fn from_primitive(primitive: Option<String>) -> RecordResult<Self> {
        Ok(primitive)
    }
}

impl<T: SampleValue> ExternalField for Vec<Sample<T>> {
    type Primitive = Vec<InternalSample>;

    const KIND: FieldKind = FieldKind::Samples;

    fn to_primitive(&self) -> Vec<InternalSample> {
        self.iter().map(Sample::to_internal).collect()
    }

    fn from_primitive(primitive: Vec<InternalSample>) -> RecordResult<Self> {
        primitive.iter().map(Sample::from_internal).collect()
    }

    fn validate(&self, field: &'static str) -> RecordResult<()> {
        self.iter()
            .try_for_each(|sample| check_non_negative(field, sample.value().to_sample()))
    }
}

/// Reject NaN, infinities and negative values
pub fn check_non_negative(field: &'static str, value: f64) -> RecordResult<()> {
    if !value.is_finite() {
        return Err(RecordError::validation(field, format!("{} is not finite", value)));
    }
    if value < 0.0 {
        return Err(RecordError::validation(field, format!("{} is negative", value)));
    }
    Ok(())
}

pub fn check_range(field: &'static str, value: i64, range: RangeInclusive<i64>) -> RecordResult<()> {
    if !range.contains(&value) {
        return Err(RecordError::validation(
            field,
            format!("{} is outside {}..={}", value, range.start(), range.end()),
        ));
    }
    Ok(())
}

/// Every sample must fall inside the record's interval
pub fn check_samples_within<T: SampleValue>(time: &IntervalTime, samples: &[Sample<T>]) -> RecordResult<()> {
    match samples.iter().find(|sample| !time.contains(sample.time())) {
        Some(sample) => Err(RecordError::validation(
            "samples",
            format!(
                "sample at {} is outside {}..{}",
                sample.time(),
                time.start_time(),
                time.end_time()
            ),
        )),
        None => Ok(()),
    }
}

/// External record to its unit-normalized internal form
pub fn to_internal(external: &ExternalRecord) -> InternalRecord {
    trace!(record_type = %external.record_type(), "external -> internal");
    external.to_internal()
}

/// Internal record back to its external form
pub fn to_external(internal: &InternalRecord) -> RecordResult<ExternalRecord> {
    trace!(record_type = %internal.record_type(), "internal -> external");
    internal.to_external()
}
