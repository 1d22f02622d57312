//! Field descriptors and primitive values
//!
//! Every variant declares one ordered table of `(name, kind)` pairs. The
//! wire codec, the storage mapper and the conversion engine all walk that
//! same table, so field order lives in exactly one place.

use serde::{Deserialize, Serialize};
use std::fmt;
use vitals_core::{RecordError, RecordResult};
use vitals_units::{CanonicalQuantity, Energy, Length, Mass, Power, Velocity, Volume};

use crate::sample::InternalSample;

/// What a field holds, which decides its primitive and storage type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Mass,
    Energy,
    Length,
    Power,
    Volume,
    Velocity,
    /// Unitless real number
    Real,
    /// 64-bit integer
    Long,
    /// 32-bit integer, used for enumerations
    Int,
    /// Nullable text
    Text,
    /// Ordered timed samples
    Samples,
}

impl FieldKind {
    pub fn storage_type(self) -> StorageType {
        match self {
            FieldKind::Mass
            | FieldKind::Energy
            | FieldKind::Length
            | FieldKind::Power
            | FieldKind::Volume
            | FieldKind::Velocity
            | FieldKind::Real => StorageType::Real,
            FieldKind::Long | FieldKind::Int => StorageType::Integer,
            FieldKind::Text | FieldKind::Samples => StorageType::NullableText,
        }
    }

    /// Symbol of the unit a physical field is normalized to
    pub fn canonical_unit(self) -> Option<&'static str> {
        match self {
            FieldKind::Mass => Some(Mass::CANONICAL_SYMBOL),
            FieldKind::Energy => Some(Energy::CANONICAL_SYMBOL),
            FieldKind::Length => Some(Length::CANONICAL_SYMBOL),
            FieldKind::Power => Some(Power::CANONICAL_SYMBOL),
            FieldKind::Volume => Some(Volume::CANONICAL_SYMBOL),
            FieldKind::Velocity => Some(Velocity::CANONICAL_SYMBOL),
            _ => None,
        }
    }

    /// Check whether a primitive value has the shape this kind expects
    pub fn accepts(self, value: &FieldValue) -> bool {
        matches!(
            (self.storage_type(), self, value),
            (StorageType::Real, _, FieldValue::Real(_))
                | (_, FieldKind::Long, FieldValue::Long(_))
                | (_, FieldKind::Int, FieldValue::Int(_))
                | (_, FieldKind::Text, FieldValue::Text(_))
                | (_, FieldKind::Samples, FieldValue::Samples(_))
        )
    }
}

/// Column type in the relational schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StorageType {
    Real,
    Integer,
    NullableText,
}

impl StorageType {
    pub fn sql_type(self) -> &'static str {
        match self {
            StorageType::Real => "REAL",
            StorageType::Integer => "INTEGER",
            StorageType::NullableText => "TEXT",
        }
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql_type())
    }
}

/// One entry of a field descriptor table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        FieldSpec { name, kind }
    }

    pub fn storage_type(&self) -> StorageType {
        self.kind.storage_type()
    }
}

/// A primitive field value of an internal record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Real(f64),
    Long(i64),
    Int(i32),
    Text(Option<String>),
    Samples(Vec<InternalSample>),
}

impl FieldValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Real(_) => "real",
            FieldValue::Long(_) => "long",
            FieldValue::Int(_) => "int",
            FieldValue::Text(_) => "text",
            FieldValue::Samples(_) => "samples",
        }
    }
}

/// Types an internal record field may have
pub trait Primitive: Clone + Default + PartialEq + fmt::Debug + Send + Sync + 'static {
    fn into_value(self) -> FieldValue;

    fn from_value(value: FieldValue) -> Option<Self>;
}

impl Primitive for f64 {
    fn into_value(self) -> FieldValue {
        FieldValue::Real(self)
    }

    fn from_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Real(v) => Some(v),
            _ => None,
        }
    }
}

impl Primitive for i64 {
    fn into_value(self) -> FieldValue {
        FieldValue::Long(self)
    }

    fn from_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Long(v) => Some(v),
            _ => None,
        }
    }
}

impl Primitive for i32 {
    fn into_value(self) -> FieldValue {
        FieldValue::Int(self)
    }

    fn from_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Int(v) => Some(v),
            _ => None,
        }
    }
}

impl Primitive for Option<String> {
    fn into_value(self) -> FieldValue {
        FieldValue::Text(self)
    }

    fn from_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl Primitive for Vec<InternalSample> {
    fn into_value(self) -> FieldValue {
        FieldValue::Samples(self)
    }

    fn from_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Samples(v) => Some(v),
            _ => None,
        }
    }
}

/// A fixed run of fields shared by many variants (header, time columns)
pub trait FieldGroup: Default + Clone + fmt::Debug + PartialEq + Send + Sync + 'static {
    const FIELDS: &'static [FieldSpec];

    fn values(&self) -> Vec<FieldValue>;

    fn take_from<I: Iterator<Item = FieldValue>>(table: &str, values: &mut I) -> RecordResult<Self>;
}

/// Pull the next value off `values` as the primitive type of field `name`
pub(crate) fn take_field<P, I>(table: &str, name: &'static str, values: &mut I) -> RecordResult<P>
where
    P: Primitive,
    I: Iterator<Item = FieldValue>,
{
    let value = values
        .next()
        .ok_or_else(|| RecordError::schema_mismatch(table, name, "value missing"))?;
    let found = value.type_name();
    P::from_value(value).ok_or_else(|| {
        RecordError::schema_mismatch(table, name, format!("unexpected {} value", found))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_types() {
        assert_eq!(FieldKind::Mass.storage_type(), StorageType::Real);
        assert_eq!(FieldKind::Real.storage_type(), StorageType::Real);
        assert_eq!(FieldKind::Long.storage_type(), StorageType::Integer);
        assert_eq!(FieldKind::Int.storage_type(), StorageType::Integer);
        assert_eq!(FieldKind::Text.storage_type(), StorageType::NullableText);
        assert_eq!(FieldKind::Samples.storage_type(), StorageType::NullableText);
    }

    #[test]
    fn test_canonical_units() {
        assert_eq!(FieldKind::Mass.canonical_unit(), Some("kg"));
        assert_eq!(FieldKind::Energy.canonical_unit(), Some("J"));
        assert_eq!(FieldKind::Volume.canonical_unit(), Some("L"));
        assert_eq!(FieldKind::Long.canonical_unit(), None);
    }

    #[test]
    fn test_accepts() {
        assert!(FieldKind::Energy.accepts(&FieldValue::Real(1.0)));
        assert!(!FieldKind::Energy.accepts(&FieldValue::Long(1)));
        assert!(FieldKind::Int.accepts(&FieldValue::Int(2)));
        assert!(!FieldKind::Int.accepts(&FieldValue::Long(2)));
        assert!(FieldKind::Text.accepts(&FieldValue::Text(None)));
        assert!(!FieldKind::Samples.accepts(&FieldValue::Text(None)));
    }

    #[test]
    fn test_take_field() {
        let mut values = vec![FieldValue::Long(120), FieldValue::Real(2.0)].into_iter();
        let count: i64 = take_field("steps_record_table", "count", &mut values).unwrap();
        assert_eq!(count, 120);
        let err = take_field::<i64, _>("steps_record_table", "other", &mut values).unwrap_err();
        assert_eq!(err.code(), vitals_core::codes::SCHEMA_MISMATCH);
        let err = take_field::<i64, _>("steps_record_table", "missing", &mut values).unwrap_err();
        assert!(err.to_string().contains("value missing"));
    }
}
