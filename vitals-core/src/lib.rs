//! Vitals Core - Fundamental types
//!
//! This crate provides the types shared by every record variant:
//! - `Metadata`: record id, data origin, device and modification info
//! - `RecordError`: structured errors with machine-readable codes
//! - `time`: instant and zone-offset helpers

mod error;
mod metadata;
pub mod time;

pub use error::{codes, RecordError, RecordResult, Severity};
pub use metadata::{DataOrigin, Device, DeviceType, Metadata, MetadataBuilder};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::codes;
    pub use crate::{DataOrigin, Device, DeviceType, Metadata, RecordError, RecordResult};
}
