//! Vitals - Typed health records
//!
//! `Vitals` is the conversion surface over the record catalog: external
//! records in and out, storage rows in and out, wire payloads in and out.
//! Every operation is synchronous and pure; the engine only holds a shared
//! registry and its configuration.

pub mod config;
pub mod logging;

pub use config::VitalsConfig;
pub use vitals_core::{codes, DataOrigin, Device, DeviceType, Metadata, MetadataBuilder, RecordError, RecordResult};
pub use vitals_records::variants::*;
pub use vitals_records::{
    ColumnInfo, ExternalRecord, FieldValue, InstantTime, InternalRecord, InternalSample, IntervalTime, RecordRegistry,
    RecordShape, RecordType, Sample, StorageRow, StorageType, StorageValue, WireError,
};
pub use vitals_units::{Energy, Length, Mass, Power, Velocity, Volume};

use chrono::{DateTime, FixedOffset, Utc};
use std::sync::Arc;
use tracing::debug;
use vitals_core::time::offset_from_seconds;
use vitals_records::{convert, storage, wire};

/// Main conversion engine
#[derive(Debug, Clone)]
pub struct Vitals {
    registry: Arc<RecordRegistry>,
    config: VitalsConfig,
}

impl Vitals {
    /// Engine over the standard catalog with default configuration
    pub fn new() -> Self {
        Self {
            registry: vitals_records::standard_registry(),
            config: VitalsConfig::default(),
        }
    }

    pub fn with_config(mut self, config: VitalsConfig) -> RecordResult<Self> {
        config.validate()?;
        debug!(?config, "vitals configured");
        self.config = config;
        Ok(self)
    }

    /// Restrict the engine to the variants of `registry`
    pub fn with_registry(mut self, registry: Arc<RecordRegistry>) -> Self {
        self.registry = registry;
        self
    }

    pub fn registry(&self) -> &RecordRegistry {
        &self.registry
    }

    pub fn config(&self) -> &VitalsConfig {
        &self.config
    }

    pub fn to_external(&self, internal: &InternalRecord) -> RecordResult<ExternalRecord> {
        self.check_registered(internal.record_type())?;
        convert::to_external(internal)
    }

    pub fn from_external(&self, external: &ExternalRecord) -> RecordResult<InternalRecord> {
        self.registry.identifier_for_type_id(external.variant_type_id())?;
        Ok(convert::to_internal(external))
    }

    pub fn to_storage_row(&self, internal: &InternalRecord) -> RecordResult<StorageRow> {
        self.check_registered(internal.record_type())?;
        storage::to_row(internal)
    }

    pub fn from_storage_row(&self, id: i32, row: &StorageRow) -> RecordResult<InternalRecord> {
        let record_type = self.registry.record_type(id)?;
        storage::from_row(record_type, row)
    }

    pub fn to_wire(&self, internal: &InternalRecord) -> RecordResult<Vec<u8>> {
        self.check_registered(internal.record_type())?;
        wire::encode(internal, self.config.framed_wire)
    }

    pub fn from_wire(&self, bytes: &[u8]) -> RecordResult<InternalRecord> {
        let record = wire::decode(bytes, self.config.framed_wire)?;
        self.check_registered(record.record_type())?;
        Ok(record)
    }

    /// Ordered columns of a variant's table
    pub fn columns(&self, id: i32) -> RecordResult<Vec<ColumnInfo>> {
        Ok(storage::columns(self.registry.record_type(id)?))
    }

    pub fn create_table_sql(&self, id: i32) -> RecordResult<String> {
        Ok(storage::create_table_sql(self.registry.record_type(id)?))
    }

    /// An interval in the configured zone, or the local one
    pub fn interval(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> RecordResult<IntervalTime> {
        let time = IntervalTime::new(start, end);
        Ok(match self.default_offset()? {
            Some(offset) => time.with_zone_offset(offset),
            None => time,
        })
    }

    /// An instant in the configured zone, or the local one
    pub fn instant(&self, time: DateTime<Utc>) -> RecordResult<InstantTime> {
        let instant = InstantTime::new(time);
        Ok(match self.default_offset()? {
            Some(offset) => instant.with_zone_offset(offset),
            None => instant,
        })
    }

    fn default_offset(&self) -> RecordResult<Option<FixedOffset>> {
        self.config
            .default_zone_offset_seconds
            .map(|seconds| offset_from_seconds(seconds).map_err(|err| RecordError::config(err.to_string())))
            .transpose()
    }

    fn check_registered(&self, record_type: RecordType) -> RecordResult<()> {
        self.registry.record_type(record_type.id()).map(|_| ())
    }
}

impl Default for Vitals {
    fn default() -> Self {
        Self::new()
    }
}
