//! Instant measurements and sampled series

use vitals_core::RecordResult;
use vitals_units::{Power, Velocity};

use crate::convert::{check_range, check_samples_within};
use crate::sample::Sample;
use crate::time::{InstantTime, IntervalTime};
use crate::variant::{no_extra_checks, record_variant};

pub const HEART_RATE_RANGE: std::ops::RangeInclusive<i64> = 1..=300;

fn validate_heart_rate(record: &HeartRateRecord) -> RecordResult<()> {
    for sample in record.samples() {
        check_range("samples", sample.value(), HEART_RATE_RANGE)?;
    }
    check_samples_within(record.time(), record.samples())
}

fn validate_cycling_pedaling_cadence(record: &CyclingPedalingCadenceRecord) -> RecordResult<()> {
    check_samples_within(record.time(), record.samples())
}

fn validate_power(record: &PowerRecord) -> RecordResult<()> {
    check_samples_within(record.time(), record.samples())
}

fn validate_speed(record: &SpeedRecord) -> RecordResult<()> {
    check_samples_within(record.time(), record.samples())
}

fn validate_steps_cadence(record: &StepsCadenceRecord) -> RecordResult<()> {
    check_samples_within(record.time(), record.samples())
}

record_variant! {
    /// Energy the body spends at rest, as a rate
    pub struct BasalMetabolicRateRecord / BasalMetabolicRateRecordInternal / BasalMetabolicRateRecordBuilder {
        record_type: BasalMetabolicRate,
        table: "basal_metabolic_rate_record_table",
        schema_version: 1,
        shape: Instant,
        time: InstantTime,
        validate: no_extra_checks,
        required { basal_metabolic_rate: Power }
        optional {}
    }
}

record_variant! {
    /// Heart rate samples in beats per minute
    pub struct HeartRateRecord / HeartRateRecordInternal / HeartRateRecordBuilder {
        record_type: HeartRate,
        table: "heart_rate_record_table",
        schema_version: 1,
        shape: Series,
        time: IntervalTime,
        validate: validate_heart_rate,
        required { samples: Vec<Sample<i64>> }
        optional {}
    }
}

record_variant! {
    /// Pedal revolutions per minute
    pub struct CyclingPedalingCadenceRecord / CyclingPedalingCadenceRecordInternal / CyclingPedalingCadenceRecordBuilder {
        record_type: CyclingPedalingCadence,
        table: "cycling_pedaling_cadence_record_table",
        schema_version: 1,
        shape: Series,
        time: IntervalTime,
        validate: validate_cycling_pedaling_cadence,
        required { samples: Vec<Sample<f64>> }
        optional {}
    }
}

record_variant! {
    /// Power output samples
    pub struct PowerRecord / PowerRecordInternal / PowerRecordBuilder {
        record_type: Power,
        table: "power_record_table",
        schema_version: 1,
        shape: Series,
        time: IntervalTime,
        validate: validate_power,
        required { samples: Vec<Sample<Power>> }
        optional {}
    }
}

record_variant! {
    /// Speed samples
    pub struct SpeedRecord / SpeedRecordInternal / SpeedRecordBuilder {
        record_type: Speed,
        table: "speed_record_table",
        schema_version: 1,
        shape: Series,
        time: IntervalTime,
        validate: validate_speed,
        required { samples: Vec<Sample<Velocity>> }
        optional {}
    }
}

record_variant! {
    /// Steps per minute samples
    pub struct StepsCadenceRecord / StepsCadenceRecordInternal / StepsCadenceRecordBuilder {
        record_type: StepsCadence,
        table: "steps_cadence_record_table",
        schema_version: 1,
        shape: Series,
        time: IntervalTime,
        validate: validate_steps_cadence,
        required { samples: Vec<Sample<f64>> }
        optional {}
    }
}
