//! Record metadata: who wrote a record, on which device, and when

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::RecordError;

/// The app that produced a record
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataOrigin {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
}

impl DataOrigin {
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: Some(package_name.into()),
        }
    }
}

/// Kind of hardware a record was measured on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum DeviceType {
    #[default]
    Unknown = 0,
    Watch = 1,
    Phone = 2,
    Scale = 3,
    Ring = 4,
    HeadMounted = 5,
    FitnessBand = 6,
    ChestStrap = 7,
    SmartDisplay = 8,
}

impl DeviceType {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for DeviceType {
    type Error = RecordError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => DeviceType::Unknown,
            1 => DeviceType::Watch,
            2 => DeviceType::Phone,
            3 => DeviceType::Scale,
            4 => DeviceType::Ring,
            5 => DeviceType::HeadMounted,
            6 => DeviceType::FitnessBand,
            7 => DeviceType::ChestStrap,
            8 => DeviceType::SmartDisplay,
            other => {
                return Err(RecordError::validation(
                    "device_type",
                    format!("unknown device type {}", other),
                ))
            }
        })
    }
}

/// Descriptor of the device that produced a record
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Device {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub device_type: DeviceType,
}

impl Device {
    pub fn new(device_type: DeviceType) -> Self {
        Self {
            device_type,
            ..Self::default()
        }
    }

    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// Metadata attached to every record. Immutable once built.
///
/// `id` is absent until the record has been stored; `last_modified_time`
/// defaults to the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Metadata {
    id: Option<Uuid>,
    data_origin: DataOrigin,
    device: Device,
    client_record_id: Option<String>,
    client_record_version: i64,
    last_modified_time: DateTime<Utc>,
}

impl Metadata {
    pub fn builder() -> MetadataBuilder {
        MetadataBuilder::default()
    }

    pub fn id(&self) -> Option<&Uuid> {
        self.id.as_ref()
    }

    pub fn data_origin(&self) -> &DataOrigin {
        &self.data_origin
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn client_record_id(&self) -> Option<&str> {
        self.client_record_id.as_deref()
    }

    pub fn client_record_version(&self) -> i64 {
        self.client_record_version
    }

    pub fn last_modified_time(&self) -> &DateTime<Utc> {
        &self.last_modified_time
    }
}

impl Default for Metadata {
    fn default() -> Self {
        MetadataBuilder::default().build()
    }
}

impl fmt::Display for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "record {}", id)?,
            None => write!(f, "unsaved record")?,
        }
        if let Some(package) = &self.data_origin.package_name {
            write!(f, " from {}", package)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct MetadataBuilder {
    id: Option<Uuid>,
    data_origin: DataOrigin,
    device: Device,
    client_record_id: Option<String>,
    client_record_version: i64,
    last_modified_time: DateTime<Utc>,
}

impl Default for MetadataBuilder {
    fn default() -> Self {
        Self {
            id: None,
            data_origin: DataOrigin::default(),
            device: Device::default(),
            client_record_id: None,
            client_record_version: 0,
            last_modified_time: DateTime::UNIX_EPOCH,
        }
    }
}

impl MetadataBuilder {
    pub fn id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    /// Assign a fresh random id
    pub fn generate_id(self) -> Self {
        self.id(Uuid::new_v4())
    }

    pub fn data_origin(mut self, data_origin: DataOrigin) -> Self {
        self.data_origin = data_origin;
        self
    }

    pub fn device(mut self, device: Device) -> Self {
        self.device = device;
        self
    }

    pub fn client_record_id(mut self, client_record_id: impl Into<String>) -> Self {
        self.client_record_id = Some(client_record_id.into());
        self
    }

    pub fn client_record_version(mut self, version: i64) -> Self {
        self.client_record_version = version;
        self
    }

    /// Persisted at millisecond precision, finer digits are dropped here
    pub fn last_modified_time(mut self, time: DateTime<Utc>) -> Self {
        self.last_modified_time = time.trunc_subsecs(3);
        self
    }

    pub fn build(self) -> Metadata {
        Metadata {
            id: self.id,
            data_origin: self.data_origin,
            device: self.device,
            client_record_id: self.client_record_id,
            client_record_version: self.client_record_version,
            last_modified_time: self.last_modified_time,
        }
    }
}
