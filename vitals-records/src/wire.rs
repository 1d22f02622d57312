//! Wire codec for cross-process transport
//!
//! Fields are written in descriptor order with fixed-width little-endian
//! integers, IEEE754 doubles and length-prefixed UTF-8 text (length `-1`
//! for null). A payload starts with the record-type identifier; framed
//! payloads add the schema version and the field count so a reader on a
//! different schema fails loudly instead of misreading.

use std::io::{Cursor, Read, Write};
use thiserror::Error;
use tracing::warn;
use vitals_core::{RecordError, RecordResult};

use crate::catalog::InternalRecord;
use crate::field::{FieldKind, FieldValue, StorageType};
use crate::record_type::RecordType;
use crate::sample::InternalSample;

/// Length prefix marking a null text value
pub const NULL_LENGTH: i32 = -1;

#[derive(Debug, Error)]
pub enum WireError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid UTF-8 in text field: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("invalid length prefix {0}")]
    InvalidLength(i32),

    #[error("value of {0} bytes is too long to encode")]
    TooLong(usize),

    #[error("expected {expected} bytes, found {found}")]
    Truncated { expected: usize, found: usize },

    #[error("unknown record type {0}")]
    UnknownRecordType(i32),

    #[error("{record_type}: schema version {found} does not match {expected}")]
    VersionMismatch {
        record_type: RecordType,
        expected: i32,
        found: i32,
    },

    #[error("{record_type}: field count {found} does not match {expected}")]
    FieldCountMismatch {
        record_type: RecordType,
        expected: i32,
        found: i32,
    },

    #[error("field {field} holds a {found} value")]
    KindMismatch { field: &'static str, found: &'static str },

    #[error("{0} trailing bytes after record")]
    TrailingBytes(usize),
}

impl From<WireError> for RecordError {
    fn from(err: WireError) -> Self {
        match err {
            WireError::UnknownRecordType(id) => RecordError::unknown_record_type(id),
            other => RecordError::Wire(other.to_string()),
        }
    }
}

/// Writes primitives in wire encoding
pub struct WireWriter<W> {
    inner: W,
}

impl<W: Write> WireWriter<W> {
    pub fn new(inner: W) -> Self {
        WireWriter { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    pub fn write_i32(&mut self, value: i32) -> Result<(), WireError> {
        self.inner.write_all(&value.to_le_bytes())?;
        Ok(())
    }

    pub fn write_i64(&mut self, value: i64) -> Result<(), WireError> {
        self.inner.write_all(&value.to_le_bytes())?;
        Ok(())
    }

    pub fn write_f64(&mut self, value: f64) -> Result<(), WireError> {
        self.inner.write_all(&value.to_le_bytes())?;
        Ok(())
    }

    pub fn write_text(&mut self, value: Option<&str>) -> Result<(), WireError> {
        match value {
            None => self.write_i32(NULL_LENGTH),
            Some(text) => {
                self.write_length(text.len())?;
                self.inner.write_all(text.as_bytes())?;
                Ok(())
            }
        }
    }

    pub fn write_samples(&mut self, samples: &[InternalSample]) -> Result<(), WireError> {
        self.write_length(samples.len())?;
        for sample in samples {
            self.write_i64(sample.epoch_millis)?;
            self.write_f64(sample.value)?;
        }
        Ok(())
    }

    pub fn write_value(&mut self, value: &FieldValue) -> Result<(), WireError> {
        match value {
            FieldValue::Real(v) => self.write_f64(*v),
            FieldValue::Long(v) => self.write_i64(*v),
            FieldValue::Int(v) => self.write_i32(*v),
            FieldValue::Text(v) => self.write_text(v.as_deref()),
            FieldValue::Samples(v) => self.write_samples(v),
        }
    }

    fn write_length(&mut self, len: usize) -> Result<(), WireError> {
        let len = i32::try_from(len).map_err(|_| WireError::TooLong(len))?;
        self.write_i32(len)
    }
}

/// Reads primitives in wire encoding
pub struct WireReader<R> {
    inner: R,
}

impl<R: Read> WireReader<R> {
    pub fn new(inner: R) -> Self {
        WireReader { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    pub fn read_i32(&mut self) -> Result<i32, WireError> {
        let mut buf = [0u8; 4];
        self.inner.read_exact(&mut buf)?;
        Ok(i32::from_le_bytes(buf))
    }

    pub fn read_i64(&mut self) -> Result<i64, WireError> {
        let mut buf = [0u8; 8];
        self.inner.read_exact(&mut buf)?;
        Ok(i64::from_le_bytes(buf))
    }

    pub fn read_f64(&mut self) -> Result<f64, WireError> {
        let mut buf = [0u8; 8];
        self.inner.read_exact(&mut buf)?;
        Ok(f64::from_le_bytes(buf))
    }

    pub fn read_text(&mut self) -> Result<Option<String>, WireError> {
        let len = self.read_i32()?;
        if len == NULL_LENGTH {
            return Ok(None);
        }
        let expected = usize::try_from(len).map_err(|_| WireError::InvalidLength(len))?;

        // Bounded by the bytes actually present, never by the prefix
        let mut buf = Vec::new();
        (&mut self.inner).take(expected as u64).read_to_end(&mut buf)?;
        if buf.len() != expected {
            return Err(WireError::Truncated {
                expected,
                found: buf.len(),
            });
        }
        Ok(Some(String::from_utf8(buf)?))
    }

    pub fn read_samples(&mut self) -> Result<Vec<InternalSample>, WireError> {
        let count = self.read_i32()?;
        let count = usize::try_from(count).map_err(|_| WireError::InvalidLength(count))?;
        let mut samples = Vec::new();
        for _ in 0..count {
            let epoch_millis = self.read_i64()?;
            let value = self.read_f64()?;
            samples.push(InternalSample::new(epoch_millis, value));
        }
        Ok(samples)
    }

    pub fn read_value(&mut self, kind: FieldKind) -> Result<FieldValue, WireError> {
        Ok(match (kind, kind.storage_type()) {
            (_, StorageType::Real) => FieldValue::Real(self.read_f64()?),
            (FieldKind::Int, _) => FieldValue::Int(self.read_i32()?),
            (FieldKind::Samples, _) => FieldValue::Samples(self.read_samples()?),
            (_, StorageType::Integer) => FieldValue::Long(self.read_i64()?),
            (_, StorageType::NullableText) => FieldValue::Text(self.read_text()?),
        })
    }
}

/// Write `record` to `out`
pub fn write_record<W: Write>(record: &InternalRecord, framed: bool, out: W) -> Result<(), WireError> {
    let record_type = record.record_type();
    let columns = InternalRecord::columns(record_type);
    let values = record.values();

    let mut writer = WireWriter::new(out);
    writer.write_i32(record_type.id())?;
    if framed {
        writer.write_i32(InternalRecord::schema_version(record_type))?;
        writer.write_length(columns.len())?;
    }
    for (spec, value) in columns.iter().zip(&values) {
        if !spec.kind.accepts(value) {
            return Err(WireError::KindMismatch {
                field: spec.name,
                found: value.type_name(),
            });
        }
        writer.write_value(value)?;
    }
    Ok(())
}

/// Encode `record` into a fresh buffer
pub fn encode(record: &InternalRecord, framed: bool) -> RecordResult<Vec<u8>> {
    let mut buf = Vec::new();
    write_record(record, framed, &mut buf)?;
    Ok(buf)
}

/// Decode exactly one record from `bytes`
pub fn decode(bytes: &[u8], framed: bool) -> RecordResult<InternalRecord> {
    let mut cursor = Cursor::new(bytes);
    let record = read_record(&mut cursor, framed)?;

    let trailing = bytes.len() - cursor.position() as usize;
    if trailing > 0 {
        return Err(desync(WireError::TrailingBytes(trailing)));
    }
    Ok(record)
}

/// Read one record from `input`, leaving anything after it unread
pub fn read_record<R: Read>(input: R, framed: bool) -> RecordResult<InternalRecord> {
    let mut reader = WireReader::new(input);

    let id = reader.read_i32().map_err(desync)?;
    let record_type = RecordType::try_from(id).map_err(|_| desync(WireError::UnknownRecordType(id)))?;
    let columns = InternalRecord::columns(record_type);

    if framed {
        let expected = InternalRecord::schema_version(record_type);
        let found = reader.read_i32().map_err(desync)?;
        if found != expected {
            return Err(desync(WireError::VersionMismatch {
                record_type,
                expected,
                found,
            }));
        }

        let expected = columns.len() as i32;
        let found = reader.read_i32().map_err(desync)?;
        if found != expected {
            return Err(desync(WireError::FieldCountMismatch {
                record_type,
                expected,
                found,
            }));
        }
    }

    let mut values = Vec::with_capacity(columns.len());
    for spec in &columns {
        values.push(reader.read_value(spec.kind).map_err(desync)?);
    }
    InternalRecord::from_values(record_type, values)
}

fn desync(err: WireError) -> RecordError {
    warn!(error = %err, "wire desync");
    err.into()
}
