//! Type registry
//!
//! A bijection between record-type identifiers and the external and
//! internal types implementing them. Built once, then only read.

use std::any::{type_name, TypeId};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, LazyLock};
use thiserror::Error;
use tracing::{debug, error};
use vitals_core::{RecordError, RecordResult};

use crate::field::FieldSpec;
use crate::record_type::{RecordShape, RecordType};
use crate::variant::RecordVariant;

/// The process-wide registry holding the standard catalog.
///
/// An inconsistent catalog is a build defect; first access panics rather
/// than publish a partial registry.
pub static REGISTRY: LazyLock<Arc<RecordRegistry>> = LazyLock::new(|| {
    let registry = RecordRegistry::standard().unwrap_or_else(|err| {
        error!(error = %err, "standard record catalog is inconsistent");
        panic!("standard record catalog is inconsistent: {}", err)
    });
    Arc::new(registry)
});

/// Shared handle to the standard registry
pub fn standard_registry() -> Arc<RecordRegistry> {
    Arc::clone(&REGISTRY)
}

/// A runtime type, identified and named
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    pub type_id: TypeId,
    pub type_name: &'static str,
}

impl TypeDescriptor {
    pub fn of<T: 'static>() -> Self {
        TypeDescriptor {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
        }
    }
}

/// Everything the registry knows about one variant
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryEntry {
    pub record_type: RecordType,
    pub external: TypeDescriptor,
    pub internal: TypeDescriptor,
    pub table_name: &'static str,
    pub shape: RecordShape,
    pub schema_version: i32,
    pub columns: Vec<FieldSpec>,
}

impl RegistryEntry {
    pub fn of<V: RecordVariant>() -> Self {
        RegistryEntry {
            record_type: V::RECORD_TYPE,
            external: TypeDescriptor::of::<V::External>(),
            internal: TypeDescriptor::of::<V>(),
            table_name: V::TABLE_NAME,
            shape: V::SHAPE,
            schema_version: V::SCHEMA_VERSION,
            columns: V::columns(),
        }
    }
}

/// Registration clashes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("identifier {0} is already registered")]
    DuplicateIdentifier(RecordType),

    #[error("external type {0} is already registered")]
    DuplicateExternalType(&'static str),

    #[error("internal type {0} is already registered")]
    DuplicateInternalType(&'static str),
}

impl From<RegistryError> for RecordError {
    fn from(err: RegistryError) -> Self {
        RecordError::Registry(err.to_string())
    }
}

/// Bijective catalog of identifier, external type and internal type
#[derive(Debug, Default)]
pub struct RecordRegistry {
    entries: BTreeMap<i32, RegistryEntry>,
    by_external: HashMap<TypeId, RecordType>,
    by_internal: HashMap<TypeId, RecordType>,
}

impl RecordRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every variant of the standard catalog
    pub fn standard() -> Result<Self, RegistryError> {
        Self::from_catalog(crate::catalog::register_standard)
    }

    /// Build a registry from a catalog; any clash fails the whole build
    pub fn from_catalog<F>(register: F) -> Result<Self, RegistryError>
    where
        F: FnOnce(&mut Self) -> Result<(), RegistryError>,
    {
        let mut registry = Self::new();
        register(&mut registry)?;
        Ok(registry)
    }

    pub fn register<V: RecordVariant>(&mut self) -> Result<(), RegistryError> {
        self.insert(RegistryEntry::of::<V>())
    }

    /// Builder-style `register`
    pub fn with<V: RecordVariant>(mut self) -> Result<Self, RegistryError> {
        self.register::<V>()?;
        Ok(self)
    }

    /// Add an entry; nothing is changed if any of its three keys is taken
    pub fn insert(&mut self, entry: RegistryEntry) -> Result<(), RegistryError> {
        if self.entries.contains_key(&entry.record_type.id()) {
            return Err(RegistryError::DuplicateIdentifier(entry.record_type));
        }
        if self.by_external.contains_key(&entry.external.type_id) {
            return Err(RegistryError::DuplicateExternalType(entry.external.type_name));
        }
        if self.by_internal.contains_key(&entry.internal.type_id) {
            return Err(RegistryError::DuplicateInternalType(entry.internal.type_name));
        }

        debug!(
            record_type = %entry.record_type,
            table = entry.table_name,
            columns = entry.columns.len(),
            "registered record variant"
        );
        self.by_external.insert(entry.external.type_id, entry.record_type);
        self.by_internal.insert(entry.internal.type_id, entry.record_type);
        self.entries.insert(entry.record_type.id(), entry);
        Ok(())
    }

    pub fn entry(&self, id: i32) -> RecordResult<&RegistryEntry> {
        self.entries
            .get(&id)
            .ok_or_else(|| RecordError::unknown_record_type(id))
    }

    /// Resolve and check a bare identifier
    pub fn record_type(&self, id: i32) -> RecordResult<RecordType> {
        self.entry(id).map(|entry| entry.record_type)
    }

    pub fn internal_type_for(&self, id: i32) -> RecordResult<TypeDescriptor> {
        self.entry(id).map(|entry| entry.internal)
    }

    pub fn external_type_for(&self, id: i32) -> RecordResult<TypeDescriptor> {
        self.entry(id).map(|entry| entry.external)
    }

    /// Inverse lookup from an external record type
    pub fn identifier_for<E: 'static>(&self) -> RecordResult<RecordType> {
        self.identifier_for_type_id(TypeId::of::<E>())
            .map_err(|_| RecordError::unknown_record_type(type_name::<E>()))
    }

    pub fn identifier_for_type_id(&self, type_id: TypeId) -> RecordResult<RecordType> {
        self.by_external
            .get(&type_id)
            .copied()
            .ok_or_else(|| RecordError::unknown_record_type(format!("{:?}", type_id)))
    }

    /// Inverse lookup from an internal record type
    pub fn identifier_for_internal<V: 'static>(&self) -> RecordResult<RecordType> {
        self.by_internal
            .get(&TypeId::of::<V>())
            .copied()
            .ok_or_else(|| RecordError::unknown_record_type(type_name::<V>()))
    }

    pub fn is_registered(&self, record_type: RecordType) -> bool {
        self.entries.contains_key(&record_type.id())
    }

    /// Registered identifiers, ascending
    pub fn record_types(&self) -> Vec<RecordType> {
        self.entries.values().map(|entry| entry.record_type).collect()
    }

    pub fn entries(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variants::{
        DistanceRecord, DistanceRecordInternal, HeartRateRecord, HeartRateRecordInternal, StepsRecord,
        StepsRecordInternal,
    };

    #[test]
    fn test_standard_registry_is_complete() {
        let registry = RecordRegistry::standard().unwrap();
        assert_eq!(registry.len(), RecordType::ALL.len());
        assert_eq!(registry.record_types(), RecordType::ALL.to_vec());
    }

    #[test]
    fn test_bijection() {
        let registry = standard_registry();
        for record_type in registry.record_types() {
            let external = registry.external_type_for(record_type.id()).unwrap();
            let internal = registry.internal_type_for(record_type.id()).unwrap();
            assert_eq!(registry.identifier_for_type_id(external.type_id).unwrap(), record_type);
            assert_ne!(external.type_id, internal.type_id);
        }
    }

    #[test]
    fn test_typed_lookups() {
        let registry = standard_registry();
        assert_eq!(registry.identifier_for::<StepsRecord>().unwrap(), RecordType::Steps);
        assert_eq!(registry.identifier_for::<HeartRateRecord>().unwrap(), RecordType::HeartRate);
        assert_eq!(
            registry.identifier_for_internal::<StepsRecordInternal>().unwrap(),
            RecordType::Steps
        );
        assert_eq!(
            registry.internal_type_for(1).unwrap().type_id,
            TypeId::of::<StepsRecordInternal>()
        );
        assert!(registry.identifier_for::<String>().is_err());
    }

    #[test]
    fn test_unknown_identifier() {
        let registry = standard_registry();
        for id in [0, 2, 99, -1] {
            let err = registry.internal_type_for(id).unwrap_err();
            assert_eq!(err.code(), vitals_core::codes::UNKNOWN_RECORD_TYPE);
            assert!(registry.external_type_for(id).is_err());
        }
    }

    #[test]
    fn test_duplicate_identifier_rejected() {
        let mut registry = RecordRegistry::new();
        registry.register::<StepsRecordInternal>().unwrap();
        let err = registry.register::<StepsRecordInternal>().unwrap_err();
        assert_eq!(err, RegistryError::DuplicateIdentifier(RecordType::Steps));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_types_rejected() {
        let mut registry = RecordRegistry::new().with::<StepsRecordInternal>().unwrap();

        let mut entry = RegistryEntry::of::<DistanceRecordInternal>();
        entry.external = TypeDescriptor::of::<StepsRecord>();
        assert!(matches!(
            registry.insert(entry),
            Err(RegistryError::DuplicateExternalType(_))
        ));

        let mut entry = RegistryEntry::of::<DistanceRecordInternal>();
        entry.internal = TypeDescriptor::of::<StepsRecordInternal>();
        assert!(matches!(
            registry.insert(entry),
            Err(RegistryError::DuplicateInternalType(_))
        ));

        assert!(!registry.is_registered(RecordType::Distance));
        registry.register::<DistanceRecordInternal>().unwrap();
        assert_eq!(registry.identifier_for::<DistanceRecord>().unwrap(), RecordType::Distance);
    }

    #[test]
    fn test_catalog_clash_fails_construction() {
        let result = RecordRegistry::from_catalog(|registry| {
            crate::catalog::register_standard(registry)?;
            registry.register::<HeartRateRecordInternal>()
        });
        assert_eq!(
            result.unwrap_err(),
            RegistryError::DuplicateIdentifier(RecordType::HeartRate)
        );

        let partial = RecordRegistry::from_catalog(|registry| {
            registry.register::<StepsRecordInternal>()?;
            registry.register::<StepsRecordInternal>()?;
            registry.register::<DistanceRecordInternal>()
        });
        assert!(partial.is_err());
    }

    #[test]
    fn test_registry_error_maps_to_record_error() {
        let err: RecordError = RegistryError::DuplicateIdentifier(RecordType::Steps).into();
        assert_eq!(err.code(), vitals_core::codes::REGISTRY);
    }

    #[test]
    fn test_entry_metadata() {
        let entry = standard_registry().entry(12).unwrap().clone();
        assert_eq!(entry.table_name, "nutrition_record_table");
        assert_eq!(entry.shape, RecordShape::Interval);
        assert_eq!(entry.schema_version, 1);
        assert_eq!(entry.columns.len(), 8 + 4 + 44);
    }
}
