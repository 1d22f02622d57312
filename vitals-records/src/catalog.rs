//! The closed catalog of variants
//!
//! `ExternalRecord` and `InternalRecord` hold any variant. Every dispatch
//! matches on `RecordType` exhaustively, so a variant added to the
//! identifier enum but missing here does not compile.

use serde::Serialize;
use std::any::TypeId;
use vitals_core::{Metadata, RecordResult};

use crate::field::{FieldSpec, FieldValue};
use crate::header::InternalHeader;
use crate::record_type::{RecordShape, RecordType};
use crate::registry::{RecordRegistry, RegistryError};
use crate::variant::RecordVariant;
use crate::variants::*;

macro_rules! record_catalog {
    ($($variant:ident => $external:ident, $internal:ident;)+) => {
        /// Any caller-facing record
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
        pub enum ExternalRecord {
            $($variant($external),)+
        }

        /// Any internal record
        #[derive(Debug, Clone, PartialEq)]
        pub enum InternalRecord {
            $($variant($internal),)+
        }

        $(
            impl From<$external> for ExternalRecord {
                fn from(record: $external) -> Self {
                    ExternalRecord::$variant(record)
                }
            }

            impl From<$internal> for InternalRecord {
                fn from(record: $internal) -> Self {
                    InternalRecord::$variant(record)
                }
            }
        )+

        impl ExternalRecord {
            pub fn record_type(&self) -> RecordType {
                match self {
                    $(ExternalRecord::$variant(_) => RecordType::$variant,)+
                }
            }

            pub fn metadata(&self) -> &Metadata {
                match self {
                    $(ExternalRecord::$variant(record) => record.metadata(),)+
                }
            }

            /// `TypeId` of the wrapped external record
            pub fn variant_type_id(&self) -> TypeId {
                match self {
                    $(ExternalRecord::$variant(_) => TypeId::of::<$external>(),)+
                }
            }

            pub fn to_internal(&self) -> InternalRecord {
                match self {
                    $(ExternalRecord::$variant(record) => {
                        InternalRecord::$variant(<$internal as RecordVariant>::from_external(record))
                    })+
                }
            }
        }

        impl InternalRecord {
            /// An all-default internal record of the given type
            pub fn empty(record_type: RecordType) -> Self {
                match record_type {
                    $(RecordType::$variant => InternalRecord::$variant($internal::default()),)+
                }
            }

            pub fn record_type(&self) -> RecordType {
                match self {
                    $(InternalRecord::$variant(_) => RecordType::$variant,)+
                }
            }

            pub fn header(&self) -> &InternalHeader {
                match self {
                    $(InternalRecord::$variant(record) => record.header(),)+
                }
            }

            pub fn to_external(&self) -> RecordResult<ExternalRecord> {
                match self {
                    $(InternalRecord::$variant(record) => {
                        record.to_external().map(ExternalRecord::$variant)
                    })+
                }
            }

            /// Every value, in column order
            pub fn values(&self) -> Vec<FieldValue> {
                match self {
                    $(InternalRecord::$variant(record) => record.values(),)+
                }
            }

            pub fn from_values(record_type: RecordType, values: Vec<FieldValue>) -> RecordResult<Self> {
                match record_type {
                    $(RecordType::$variant => {
                        <$internal as RecordVariant>::from_values(values).map(InternalRecord::$variant)
                    })+
                }
            }

            pub fn columns(record_type: RecordType) -> Vec<FieldSpec> {
                match record_type {
                    $(RecordType::$variant => <$internal as RecordVariant>::columns(),)+
                }
            }

            pub fn table_name(record_type: RecordType) -> &'static str {
                match record_type {
                    $(RecordType::$variant => <$internal as RecordVariant>::TABLE_NAME,)+
                }
            }

            pub fn schema_version(record_type: RecordType) -> i32 {
                match record_type {
                    $(RecordType::$variant => <$internal as RecordVariant>::SCHEMA_VERSION,)+
                }
            }

            pub fn shape(record_type: RecordType) -> RecordShape {
                match record_type {
                    $(RecordType::$variant => <$internal as RecordVariant>::SHAPE,)+
                }
            }
        }

        /// Register every catalog variant
        pub fn register_standard(registry: &mut RecordRegistry) -> Result<(), RegistryError> {
            $(registry.register::<$internal>()?;)+
            Ok(())
        }
    };
}

record_catalog! {
    Steps => StepsRecord, StepsRecordInternal;
    ActiveCaloriesBurned => ActiveCaloriesBurnedRecord, ActiveCaloriesBurnedRecordInternal;
    Hydration => HydrationRecord, HydrationRecordInternal;
    ElevationGained => ElevationGainedRecord, ElevationGainedRecordInternal;
    FloorsClimbed => FloorsClimbedRecord, FloorsClimbedRecordInternal;
    WheelchairPushes => WheelchairPushesRecord, WheelchairPushesRecordInternal;
    Distance => DistanceRecord, DistanceRecordInternal;
    Nutrition => NutritionRecord, NutritionRecordInternal;
    TotalCaloriesBurned => TotalCaloriesBurnedRecord, TotalCaloriesBurnedRecordInternal;
    HeartRate => HeartRateRecord, HeartRateRecordInternal;
    CyclingPedalingCadence => CyclingPedalingCadenceRecord, CyclingPedalingCadenceRecordInternal;
    Power => PowerRecord, PowerRecordInternal;
    Speed => SpeedRecord, SpeedRecordInternal;
    StepsCadence => StepsCadenceRecord, StepsCadenceRecordInternal;
    BasalMetabolicRate => BasalMetabolicRateRecord, BasalMetabolicRateRecordInternal;
}
