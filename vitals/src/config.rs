//! Engine configuration

use serde::Deserialize;
use std::env;
use vitals_core::time::offset_from_seconds;
use vitals_core::{RecordError, RecordResult};

pub const ENV_DEFAULT_ZONE_OFFSET: &str = "VITALS_DEFAULT_ZONE_OFFSET";
pub const ENV_FRAMED_WIRE: &str = "VITALS_FRAMED_WIRE";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VitalsConfig {
    /// Zone offset, in seconds east of UTC, used when a caller gives none.
    /// `None` means the process's local offset.
    pub default_zone_offset_seconds: Option<i32>,
    /// Prefix wire payloads with schema version and field count
    pub framed_wire: bool,
}

impl Default for VitalsConfig {
    fn default() -> Self {
        Self {
            default_zone_offset_seconds: None,
            framed_wire: true,
        }
    }
}

impl VitalsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_zone_offset(mut self, seconds: i32) -> Self {
        self.default_zone_offset_seconds = Some(seconds);
        self
    }

    pub fn with_framed_wire(mut self, framed: bool) -> Self {
        self.framed_wire = framed;
        self
    }

    /// Defaults overridden by `VITALS_DEFAULT_ZONE_OFFSET` and `VITALS_FRAMED_WIRE`
    pub fn from_env() -> RecordResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_json(json: &str) -> RecordResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|err| RecordError::config(format!("invalid configuration: {}", err)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> RecordResult<()> {
        if let Some(seconds) = self.default_zone_offset_seconds {
            offset_from_seconds(seconds).map_err(|err| {
                RecordError::config(format!("default_zone_offset_seconds: {}", err))
            })?;
        }
        Ok(())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> RecordResult<Self> {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_DEFAULT_ZONE_OFFSET) {
            let seconds = raw.trim().parse::<i32>().map_err(|_| {
                RecordError::config(format!("{}: '{}' is not a number of seconds", ENV_DEFAULT_ZONE_OFFSET, raw))
            })?;
            config.default_zone_offset_seconds = Some(seconds);
        }

        if let Some(raw) = lookup(ENV_FRAMED_WIRE) {
            config.framed_wire = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(RecordError::config(format!(
                        "{}: '{}' is not a boolean",
                        ENV_FRAMED_WIRE, raw
                    )))
                }
            };
        }

        config.validate()?;
        Ok(config)
    }
}
