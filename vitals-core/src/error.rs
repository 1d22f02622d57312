//! Structured errors for record conversion
//!
//! Every failure carries a machine-readable code and a severity so callers
//! can tell a rejected input apart from version skew between a writer and a
//! reader.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const VALIDATION: &str = "VALIDATION";
    pub const UNKNOWN_RECORD_TYPE: &str = "UNKNOWN_RECORD_TYPE";
    pub const SCHEMA_MISMATCH: &str = "SCHEMA_MISMATCH";
    pub const WIRE_DESYNC: &str = "WIRE_DESYNC";
    pub const REGISTRY: &str = "REGISTRY";
    pub const CONFIG: &str = "CONFIG";
}

/// Severity level of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The offending input was rejected, nothing else is affected
    Error,
    /// Writer and reader disagree on the schema; the process should not continue silently
    Fatal,
}

/// Error type for every record operation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no such record type: {0}")]
    UnknownRecordType(String),

    #[error("schema mismatch on {table}.{column}: {reason}")]
    SchemaMismatch {
        table: String,
        column: String,
        reason: String,
    },

    #[error("wire desync: {0}")]
    Wire(String),

    #[error("registry error: {0}")]
    Registry(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl RecordError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn unknown_record_type(what: impl Display) -> Self {
        Self::UnknownRecordType(what.to_string())
    }

    pub fn schema_mismatch(
        table: impl Into<String>,
        column: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::SchemaMismatch {
            table: table.into(),
            column: column.into(),
            reason: reason.into(),
        }
    }

    pub fn config(details: impl Into<String>) -> Self {
        Self::Config(details.into())
    }

    /// Machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => codes::VALIDATION,
            Self::UnknownRecordType(_) => codes::UNKNOWN_RECORD_TYPE,
            Self::SchemaMismatch { .. } => codes::SCHEMA_MISMATCH,
            Self::Wire(_) => codes::WIRE_DESYNC,
            Self::Registry(_) => codes::REGISTRY,
            Self::Config(_) => codes::CONFIG,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::Validation { .. } | Self::Config(_) => Severity::Error,
            Self::UnknownRecordType(_)
            | Self::SchemaMismatch { .. }
            | Self::Wire(_)
            | Self::Registry(_) => Severity::Fatal,
        }
    }
}

pub type RecordResult<T> = Result<T, RecordError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_follow_variant() {
        assert_eq!(RecordError::validation("count", "too small").code(), codes::VALIDATION);
        assert_eq!(RecordError::unknown_record_type(99).code(), codes::UNKNOWN_RECORD_TYPE);
        assert_eq!(
            RecordError::schema_mismatch("steps_record_table", "count", "missing").code(),
            codes::SCHEMA_MISMATCH
        );
    }

    #[test]
    fn test_version_skew_is_fatal() {
        assert_eq!(RecordError::unknown_record_type(42).severity(), Severity::Fatal);
        assert_eq!(RecordError::Wire("short read".into()).severity(), Severity::Fatal);
        assert_eq!(RecordError::validation("end_time", "before start").severity(), Severity::Error);
    }

    #[test]
    fn test_display() {
        let err = RecordError::schema_mismatch("steps_record_table", "count", "column missing");
        assert_eq!(
            err.to_string(),
            "schema mismatch on steps_record_table.count: column missing"
        );
    }
}
