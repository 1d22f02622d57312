//! Storage mapper: internal records to and from named-column rows
//!
//! A row holds one entry per declared column. Reading looks every column
//! up by name; a missing column or a value of the wrong storage type is a
//! schema mismatch and no partial record is produced. Series samples live
//! in a single nullable-text column as a JSON array.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;
use vitals_core::{RecordError, RecordResult};

use crate::catalog::InternalRecord;
use crate::field::{FieldKind, FieldSpec, FieldValue, StorageType};
use crate::record_type::RecordType;
use crate::sample::InternalSample;

/// One column of a variant's table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ColumnInfo {
    pub name: &'static str,
    pub storage_type: StorageType,
}

impl From<&FieldSpec> for ColumnInfo {
    fn from(spec: &FieldSpec) -> Self {
        ColumnInfo {
            name: spec.name,
            storage_type: spec.storage_type(),
        }
    }
}

/// A stored cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StorageValue {
    Real(f64),
    Integer(i64),
    Text(Option<String>),
}

impl StorageValue {
    pub fn storage_type(&self) -> StorageType {
        match self {
            StorageValue::Real(_) => StorageType::Real,
            StorageValue::Integer(_) => StorageType::Integer,
            StorageValue::Text(_) => StorageType::NullableText,
        }
    }
}

/// Column name to cell
pub type StorageRow = BTreeMap<String, StorageValue>;

/// Ordered columns of a variant's table
pub fn columns(record_type: RecordType) -> Vec<ColumnInfo> {
    InternalRecord::columns(record_type)
        .iter()
        .map(ColumnInfo::from)
        .collect()
}

pub fn to_row(record: &InternalRecord) -> RecordResult<StorageRow> {
    let record_type = record.record_type();
    let table = InternalRecord::table_name(record_type);
    let columns = InternalRecord::columns(record_type);

    let mut row = StorageRow::new();
    for (spec, value) in columns.iter().zip(record.values()) {
        row.insert(spec.name.to_string(), to_storage_value(table, spec, value)?);
    }
    Ok(row)
}

pub fn from_row(record_type: RecordType, row: &StorageRow) -> RecordResult<InternalRecord> {
    let table = InternalRecord::table_name(record_type);
    let columns = InternalRecord::columns(record_type);

    let mut values = Vec::with_capacity(columns.len());
    for spec in &columns {
        let cell = row.get(spec.name).ok_or_else(|| mismatch(table, spec.name, "column missing"))?;
        values.push(from_storage_value(table, spec, cell)?);
    }
    InternalRecord::from_values(record_type, values)
}

/// `CREATE TABLE` statement for a variant's table
pub fn create_table_sql(record_type: RecordType) -> String {
    let columns: Vec<String> = columns(record_type)
        .iter()
        .map(|column| format!("{} {}", column.name, column.storage_type.sql_type()))
        .collect();
    format!(
        "CREATE TABLE IF NOT EXISTS {} (row_id INTEGER PRIMARY KEY AUTOINCREMENT, {})",
        InternalRecord::table_name(record_type),
        columns.join(", ")
    )
}

fn to_storage_value(table: &str, spec: &FieldSpec, value: FieldValue) -> RecordResult<StorageValue> {
    Ok(match value {
        FieldValue::Real(v) => StorageValue::Real(v),
        FieldValue::Long(v) => StorageValue::Integer(v),
        FieldValue::Int(v) => StorageValue::Integer(i64::from(v)),
        FieldValue::Text(v) => StorageValue::Text(v),
        FieldValue::Samples(samples) => {
            // JSON has no spelling for NaN or infinity
            if let Some(sample) = samples.iter().find(|sample| !sample.value.is_finite()) {
                let err = RecordError::validation(
                    spec.name,
                    format!(
                        "sample at {} ms holds {}, which a samples column cannot store",
                        sample.epoch_millis, sample.value
                    ),
                );
                warn!(table, error = %err, "unstorable sample value");
                return Err(err);
            }
            let json = serde_json::to_string(&samples)
                .map_err(|err| mismatch(table, spec.name, err.to_string()))?;
            StorageValue::Text(Some(json))
        }
    })
}

fn from_storage_value(table: &str, spec: &FieldSpec, cell: &StorageValue) -> RecordResult<FieldValue> {
    let value = match (spec.kind, cell) {
        (kind, StorageValue::Real(v)) if kind.storage_type() == StorageType::Real => FieldValue::Real(*v),
        // Integral values in a REAL column read back as reals
        (kind, StorageValue::Integer(v)) if kind.storage_type() == StorageType::Real => {
            FieldValue::Real(*v as f64)
        }
        (FieldKind::Long, StorageValue::Integer(v)) => FieldValue::Long(*v),
        (FieldKind::Int, StorageValue::Integer(v)) => {
            let v = i32::try_from(*v)
                .map_err(|_| mismatch(table, spec.name, format!("{} does not fit a 32-bit column", v)))?;
            FieldValue::Int(v)
        }
        (FieldKind::Text, StorageValue::Text(v)) => FieldValue::Text(v.clone()),
        (FieldKind::Samples, StorageValue::Text(None)) => FieldValue::Samples(Vec::new()),
        (FieldKind::Samples, StorageValue::Text(Some(json))) => {
            let samples: Vec<InternalSample> = serde_json::from_str(json)
                .map_err(|err| mismatch(table, spec.name, format!("bad samples: {}", err)))?;
            FieldValue::Samples(samples)
        }
        (kind, cell) => {
            return Err(mismatch(
                table,
                spec.name,
                format!(
                    "expected {}, found {}",
                    kind.storage_type(),
                    cell.storage_type()
                ),
            ))
        }
    };
    Ok(value)
}

fn mismatch(table: &str, column: &str, reason: impl Into<String>) -> RecordError {
    let err = RecordError::schema_mismatch(table, column, reason);
    warn!(error = %err, "storage schema mismatch");
    err
}
