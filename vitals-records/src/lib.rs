//! Vitals Records - Typed health records and their serialized forms
//!
//! Each record variant exists in three representations: an immutable
//! external record built through a validating builder, a unit-normalized
//! internal record, and a named-column storage row. This crate provides:
//! - the closed catalog of variants (`variants`, `catalog`)
//! - the identifier registry (`registry`)
//! - external/internal conversion (`convert`)
//! - the wire codec (`wire`) and the storage mapper (`storage`)

pub mod catalog;
pub mod convert;
pub mod field;
pub mod header;
pub mod record_type;
pub mod registry;
pub mod sample;
pub mod storage;
pub mod time;
pub mod variant;
pub mod variants;
pub mod wire;

pub use catalog::{ExternalRecord, InternalRecord};
pub use convert::ExternalField;
pub use field::{FieldKind, FieldSpec, FieldValue, StorageType};
pub use header::InternalHeader;
pub use record_type::{RecordShape, RecordType};
pub use registry::{standard_registry, RecordRegistry, RegistryEntry, RegistryError, TypeDescriptor, REGISTRY};
pub use sample::{InternalSample, Sample};
pub use storage::{ColumnInfo, StorageRow, StorageValue};
pub use time::{InstantTime, IntervalTime, RecordTime};
pub use variant::RecordVariant;
pub use wire::WireError;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::variants::*;
    pub use crate::{
        ExternalRecord, InstantTime, InternalRecord, IntervalTime, RecordRegistry, RecordType,
        RecordVariant, Sample,
    };
}
