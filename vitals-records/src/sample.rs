//! Timed samples carried by series variants

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use vitals_core::time::{instant_from_millis, instant_millis};
use vitals_core::RecordResult;
use vitals_units::{CanonicalQuantity, Power, Velocity};

/// Persisted form of one sample: epoch milliseconds and a canonical value
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InternalSample {
    pub epoch_millis: i64,
    pub value: f64,
}

impl InternalSample {
    pub fn new(epoch_millis: i64, value: f64) -> Self {
        InternalSample {
            epoch_millis,
            value,
        }
    }
}

/// A value a series sample can hold
pub trait SampleValue: Copy + fmt::Debug + Send + Sync + 'static {
    fn to_sample(&self) -> f64;

    fn from_sample(value: f64) -> Self;
}

impl SampleValue for i64 {
    fn to_sample(&self) -> f64 {
        *self as f64
    }

    fn from_sample(value: f64) -> Self {
        value.round() as i64
    }
}

impl SampleValue for f64 {
    fn to_sample(&self) -> f64 {
        *self
    }

    fn from_sample(value: f64) -> Self {
        value
    }
}

impl SampleValue for Velocity {
    fn to_sample(&self) -> f64 {
        self.canonical_value()
    }

    fn from_sample(value: f64) -> Self {
        Velocity::from_canonical(value)
    }
}

impl SampleValue for Power {
    fn to_sample(&self) -> f64 {
        self.canonical_value()
    }

    fn from_sample(value: f64) -> Self {
        Power::from_canonical(value)
    }
}

/// One timed measurement inside a series record
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Sample<T> {
    time: DateTime<Utc>,
    value: T,
}

impl<T: SampleValue> Sample<T> {
    /// Sub-millisecond precision of `time` is dropped
    pub fn new(time: DateTime<Utc>, value: T) -> Self {
        Sample {
            time: time.trunc_subsecs(3),
            value,
        }
    }

    pub fn time(&self) -> &DateTime<Utc> {
        &self.time
    }

    pub fn value(&self) -> T {
        self.value
    }

    pub fn to_internal(&self) -> InternalSample {
        InternalSample::new(instant_millis(&self.time), self.value.to_sample())
    }

    pub fn from_internal(internal: &InternalSample) -> RecordResult<Self> {
        Ok(Sample {
            time: instant_from_millis(internal.epoch_millis)?,
            value: T::from_sample(internal.value),
        })
    }
}

impl<T: SampleValue> PartialEq for Sample<T> {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time && self.value.to_sample().to_bits() == other.value.to_sample().to_bits()
    }
}

impl<T: SampleValue> Eq for Sample<T> {}

impl<T: SampleValue> Hash for Sample<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.time.hash(state);
        self.value.to_sample().to_bits().hash(state);
    }
}
