//! The record variant abstraction
//!
//! A variant is one internal record struct plus its external counterpart,
//! described by a single field descriptor table. Column lists, wire order
//! and conversions are all derived from that table; `record_variant!`
//! generates the three types and the trait impl from one declaration.

use std::fmt;
use std::hash::Hash;
use vitals_core::{RecordError, RecordResult};

use crate::field::{FieldGroup, FieldSpec, FieldValue};
use crate::header::InternalHeader;
use crate::record_type::{RecordShape, RecordType};
use crate::time::RecordTime;

/// Internal time columns of variant `V`
pub type TimeColumns<V> = <<V as RecordVariant>::Time as RecordTime>::Internal;

/// Implemented by every internal record struct
pub trait RecordVariant: Default + Clone + fmt::Debug + PartialEq + Send + Sync + 'static {
    type External: Clone + fmt::Debug + PartialEq + Eq + Hash + Send + Sync + 'static;
    type Time: RecordTime;

    const RECORD_TYPE: RecordType;
    const TABLE_NAME: &'static str;
    /// Bumped whenever the field table changes
    const SCHEMA_VERSION: i32;
    const SHAPE: RecordShape;
    /// Variant-specific fields, in wire and column order
    const FIELDS: &'static [FieldSpec];

    fn header(&self) -> &InternalHeader;

    fn time(&self) -> &TimeColumns<Self>;

    /// Values of the variant-specific fields, in `FIELDS` order
    fn field_values(&self) -> Vec<FieldValue>;

    fn from_parts<I: Iterator<Item = FieldValue>>(
        header: InternalHeader,
        time: TimeColumns<Self>,
        values: &mut I,
    ) -> RecordResult<Self>;

    fn from_external(external: &Self::External) -> Self;

    /// Range checks are not re-applied, stored data converts back as is
    fn to_external(&self) -> RecordResult<Self::External>;

    /// Header columns, then time columns, then variant fields
    fn columns() -> Vec<FieldSpec> {
        InternalHeader::FIELDS
            .iter()
            .chain(<TimeColumns<Self> as FieldGroup>::FIELDS)
            .chain(Self::FIELDS)
            .copied()
            .collect()
    }

    /// All values, in `columns()` order
    fn values(&self) -> Vec<FieldValue> {
        let mut values = self.header().values();
        values.extend(self.time().values());
        values.extend(self.field_values());
        values
    }

    fn from_values(values: Vec<FieldValue>) -> RecordResult<Self> {
        let mut values = values.into_iter();
        let header = InternalHeader::take_from(Self::TABLE_NAME, &mut values)?;
        let time = <TimeColumns<Self> as FieldGroup>::take_from(Self::TABLE_NAME, &mut values)?;
        let record = Self::from_parts(header, time, &mut values)?;

        let extra = values.count();
        if extra > 0 {
            return Err(RecordError::schema_mismatch(
                Self::TABLE_NAME,
                "*",
                format!("{} values beyond the last column", extra),
            ));
        }
        Ok(record)
    }
}

/// No checks beyond the per-field ones
pub(crate) fn no_extra_checks<T>(_record: &T) -> RecordResult<()> {
    Ok(())
}

/// Declare one record variant.
///
/// Generates the immutable external record with accessors, its validating
/// builder, the internal record with one primitive field per external
/// field, and the `RecordVariant` impl tying them together. Required
/// fields are builder arguments; optional fields start at their default
/// and have a setter each.
macro_rules! record_variant {
    (
        $(#[$meta:meta])*
        pub struct $external:ident / $internal:ident / $builder:ident {
            record_type: $record_type:ident,
            table: $table:literal,
            schema_version: $version:literal,
            shape: $shape:ident,
            time: $time:ty,
            validate: $validate:path,
            required { $($req:ident: $req_ty:ty),* $(,)? }
            optional { $($opt:ident: $opt_ty:ty),* $(,)? }
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
        pub struct $external {
            metadata: vitals_core::Metadata,
            time: $time,
            $($req: $req_ty,)*
            $($opt: $opt_ty,)*
        }

        impl $external {
            pub fn builder(
                metadata: vitals_core::Metadata,
                time: $time,
                $($req: $req_ty,)*
            ) -> $builder {
                $builder {
                    metadata,
                    time,
                    $($req,)*
                    $($opt: Default::default(),)*
                }
            }

            pub fn metadata(&self) -> &vitals_core::Metadata {
                &self.metadata
            }

            pub fn time(&self) -> &$time {
                &self.time
            }

            $(
                pub fn $req(&self) -> &$req_ty {
                    &self.$req
                }
            )*

            $(
                pub fn $opt(&self) -> &$opt_ty {
                    &self.$opt
                }
            )*

            pub fn to_internal(&self) -> $internal {
                <$internal as $crate::variant::RecordVariant>::from_external(self)
            }
        }

        #[derive(Debug, Clone)]
        pub struct $builder {
            metadata: vitals_core::Metadata,
            time: $time,
            $($req: $req_ty,)*
            $($opt: $opt_ty,)*
        }

        impl $builder {
            $(
                pub fn $opt(mut self, $opt: impl Into<$opt_ty>) -> Self {
                    self.$opt = $opt.into();
                    self
                }
            )*

            pub fn build(self) -> vitals_core::RecordResult<$external> {
                $crate::time::RecordTime::validate(&self.time)?;
                $($crate::convert::ExternalField::validate(&self.$req, stringify!($req))?;)*
                $($crate::convert::ExternalField::validate(&self.$opt, stringify!($opt))?;)*

                let record = $external {
                    metadata: self.metadata,
                    time: self.time,
                    $($req: self.$req,)*
                    $($opt: self.$opt,)*
                };
                $validate(&record)?;
                Ok(record)
            }
        }

        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $internal {
            pub header: $crate::header::InternalHeader,
            pub time: <$time as $crate::time::RecordTime>::Internal,
            $(pub $req: <$req_ty as $crate::convert::ExternalField>::Primitive,)*
            $(pub $opt: <$opt_ty as $crate::convert::ExternalField>::Primitive,)*
        }

        impl $internal {
            pub fn with_header(self, header: $crate::header::InternalHeader) -> Self {
                Self { header, ..self }
            }

            pub fn with_time(self, time: <$time as $crate::time::RecordTime>::Internal) -> Self {
                Self { time, ..self }
            }
        }

        impl $crate::variant::RecordVariant for $internal {
            type External = $external;
            type Time = $time;

            const RECORD_TYPE: $crate::record_type::RecordType =
                $crate::record_type::RecordType::$record_type;
            const TABLE_NAME: &'static str = $table;
            const SCHEMA_VERSION: i32 = $version;
            const SHAPE: $crate::record_type::RecordShape =
                $crate::record_type::RecordShape::$shape;
            const FIELDS: &'static [$crate::field::FieldSpec] = &[
                $($crate::field::FieldSpec::new(
                    stringify!($req),
                    <$req_ty as $crate::convert::ExternalField>::KIND,
                ),)*
                $($crate::field::FieldSpec::new(
                    stringify!($opt),
                    <$opt_ty as $crate::convert::ExternalField>::KIND,
                ),)*
            ];

            fn header(&self) -> &$crate::header::InternalHeader {
                &self.header
            }

            fn time(&self) -> &<$time as $crate::time::RecordTime>::Internal {
                &self.time
            }

            fn field_values(&self) -> Vec<$crate::field::FieldValue> {
                vec![
                    $($crate::field::Primitive::into_value(self.$req.clone()),)*
                    $($crate::field::Primitive::into_value(self.$opt.clone()),)*
                ]
            }

            fn from_parts<I: Iterator<Item = $crate::field::FieldValue>>(
                header: $crate::header::InternalHeader,
                time: <$time as $crate::time::RecordTime>::Internal,
                values: &mut I,
            ) -> vitals_core::RecordResult<Self> {
                Ok(Self {
                    header,
                    time,
                    $($req: $crate::field::take_field(Self::TABLE_NAME, stringify!($req), values)?,)*
                    $($opt: $crate::field::take_field(Self::TABLE_NAME, stringify!($opt), values)?,)*
                })
            }

            fn from_external(external: &$external) -> Self {
                Self {
                    header: $crate::header::InternalHeader::from_metadata(&external.metadata),
                    time: $crate::time::RecordTime::to_internal(&external.time),
                    $($req: $crate::convert::ExternalField::to_primitive(&external.$req),)*
                    $($opt: $crate::convert::ExternalField::to_primitive(&external.$opt),)*
                }
            }

            fn to_external(&self) -> vitals_core::RecordResult<$external> {
                Ok($external {
                    metadata: self.header.to_metadata()?,
                    time: <$time as $crate::time::RecordTime>::from_internal(&self.time)?,
                    $($req: <$req_ty as $crate::convert::ExternalField>::from_primitive(
                        self.$req.clone(),
                    )?,)*
                    $($opt: <$opt_ty as $crate::convert::ExternalField>::from_primitive(
                        self.$opt.clone(),
                    )?,)*
                })
            }
        }
    };
}

pub(crate) use record_variant;
