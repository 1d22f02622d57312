//! Header columns every internal record starts with

use uuid::Uuid;
use vitals_core::time::{instant_from_millis, instant_millis};
use vitals_core::{DataOrigin, Device, DeviceType, Metadata, RecordError, RecordResult};

use crate::field::{take_field, FieldGroup, FieldKind, FieldSpec, FieldValue};

/// Flattened `Metadata` in its persisted form
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct InternalHeader {
    pub uuid: Option<String>,
    pub package_name: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub device_type: i32,
    pub client_record_id: Option<String>,
    pub client_record_version: i64,
    /// Epoch milliseconds
    pub last_modified_time: i64,
}

impl InternalHeader {
    pub fn from_metadata(metadata: &Metadata) -> Self {
        let device = metadata.device();
        InternalHeader {
            uuid: metadata.id().map(Uuid::to_string),
            package_name: metadata.data_origin().package_name.clone(),
            manufacturer: device.manufacturer.clone(),
            model: device.model.clone(),
            device_type: device.device_type.as_i32(),
            client_record_id: metadata.client_record_id().map(str::to_string),
            client_record_version: metadata.client_record_version(),
            last_modified_time: instant_millis(metadata.last_modified_time()),
        }
    }

    pub fn to_metadata(&self) -> RecordResult<Metadata> {
        let device = Device {
            manufacturer: self.manufacturer.clone(),
            model: self.model.clone(),
            device_type: DeviceType::try_from(self.device_type)?,
        };
        let mut builder = Metadata::builder()
            .data_origin(DataOrigin {
                package_name: self.package_name.clone(),
            })
            .device(device)
            .client_record_version(self.client_record_version)
            .last_modified_time(instant_from_millis(self.last_modified_time)?);

        if let Some(uuid) = &self.uuid {
            let id = Uuid::parse_str(uuid)
                .map_err(|err| RecordError::validation("uuid", err.to_string()))?;
            builder = builder.id(id);
        }
        if let Some(client_record_id) = &self.client_record_id {
            builder = builder.client_record_id(client_record_id.clone());
        }
        Ok(builder.build())
    }
}

impl FieldGroup for InternalHeader {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("uuid", FieldKind::Text),
        FieldSpec::new("package_name", FieldKind::Text),
        FieldSpec::new("manufacturer", FieldKind::Text),
        FieldSpec::new("model", FieldKind::Text),
        FieldSpec::new("device_type", FieldKind::Int),
        FieldSpec::new("client_record_id", FieldKind::Text),
        FieldSpec::new("client_record_version", FieldKind::Long),
        FieldSpec::new("last_modified_time", FieldKind::Long),
    ];

    fn values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::Text(self.uuid.clone()),
            FieldValue::Text(self.package_name.clone()),
            FieldValue::Text(self.manufacturer.clone()),
            FieldValue::Text(self.model.clone()),
            FieldValue::Int(self.device_type),
            FieldValue::Text(self.client_record_id.clone()),
            FieldValue::Long(self.client_record_version),
            FieldValue::Long(self.last_modified_time),
        ]
    }

    fn take_from<I: Iterator<Item = FieldValue>>(table: &str, values: &mut I) -> RecordResult<Self> {
        Ok(InternalHeader {
            uuid: take_field(table, "uuid", values)?,
            package_name: take_field(table, "package_name", values)?,
            manufacturer: take_field(table, "manufacturer", values)?,
            model: take_field(table, "model", values)?,
            device_type: take_field(table, "device_type", values)?,
            client_record_id: take_field(table, "client_record_id", values)?,
            client_record_version: take_field(table, "client_record_version", values)?,
            last_modified_time: take_field(table, "last_modified_time", values)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn test_metadata_round_trip() {
        let metadata = Metadata::builder()
            .generate_id()
            .data_origin(DataOrigin::new("com.example.fitness"))
            .device(Device::new(DeviceType::Watch).with_model("W1"))
            .client_record_id("walk-7")
            .client_record_version(2)
            .last_modified_time(DateTime::from_timestamp_millis(1_700_000_000_456).unwrap())
            .build();

        let header = InternalHeader::from_metadata(&metadata);
        assert_eq!(header.device_type, 1);
        assert_eq!(header.last_modified_time, 1_700_000_000_456);
        assert_eq!(header.to_metadata().unwrap(), metadata);
    }

    #[test]
    fn test_empty_header_is_default_metadata() {
        let metadata = InternalHeader::default().to_metadata().unwrap();
        assert_eq!(metadata, Metadata::default());
    }

    #[test]
    fn test_bad_uuid_rejected() {
        let header = InternalHeader {
            uuid: Some("not-a-uuid".to_string()),
            ..InternalHeader::default()
        };
        let err = header.to_metadata().unwrap_err();
        assert_eq!(err.code(), vitals_core::codes::VALIDATION);
    }

    #[test]
    fn test_unknown_device_type_rejected() {
        let header = InternalHeader {
            device_type: 42,
            ..InternalHeader::default()
        };
        assert!(header.to_metadata().is_err());
    }
}
