//! # Type Settings
//!
//! Deployment-wide defaults consulted when recommending wire types and when
//! binding zone-less temporal values. Loaded from YAML; every key is
//! optional and unknown keys are rejected.
//!
//! ```yaml
//! preferred_boolean_type: boolean
//! preferred_uuid_type: uuid
//! preferred_duration_type: numeric
//! preferred_instant_type: timestamp_utc
//! nationalized: false
//! max_varchar_length: 4000
//! max_varbinary_length: 4000
//! enum_storage: ordinal
//! jdbc_time_zone: "Z"
//! ```

use std::path::Path;

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::context::parse_offset;
use crate::error::{ConfigError, ConversionError};
use crate::temporal::TemporalPrecision;
use crate::wire::{EnumStorage, WireTypeCode, WireTypeIndicators};

/// Deployment-wide descriptor settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TypeSettings {
    /// Column type for `boolean` attributes.
    pub preferred_boolean_type: WireTypeCode,
    /// Column type for `uuid` attributes.
    pub preferred_uuid_type: WireTypeCode,
    /// Column type for `duration` attributes.
    pub preferred_duration_type: WireTypeCode,
    /// Column type for `instant` attributes.
    pub preferred_instant_type: WireTypeCode,
    /// Use national character types for all character columns.
    pub nationalized: bool,
    pub max_varchar_length: u32,
    pub max_varbinary_length: u32,
    /// Default enum storage when a column does not say.
    pub enum_storage: EnumStorage,
    /// Offset for binding zone-less temporal values, e.g. `Z` or `+02:00`.
    pub jdbc_time_zone: String,
}

impl Default for TypeSettings {
    fn default() -> Self {
        Self {
            preferred_boolean_type: WireTypeCode::Boolean,
            preferred_uuid_type: WireTypeCode::Uuid,
            preferred_duration_type: WireTypeCode::Numeric,
            preferred_instant_type: WireTypeCode::TimestampUtc,
            nationalized: false,
            max_varchar_length: 4000,
            max_varbinary_length: 4000,
            enum_storage: EnumStorage::Ordinal,
            jdbc_time_zone: "Z".to_string(),
        }
    }
}

const BOOLEAN_TYPES: &[WireTypeCode] = &[
    WireTypeCode::Boolean,
    WireTypeCode::Bit,
    WireTypeCode::TinyInt,
    WireTypeCode::SmallInt,
    WireTypeCode::Integer,
    WireTypeCode::Char,
];

const UUID_TYPES: &[WireTypeCode] = &[
    WireTypeCode::Uuid,
    WireTypeCode::Binary,
    WireTypeCode::Char,
    WireTypeCode::VarChar,
];

const DURATION_TYPES: &[WireTypeCode] = &[
    WireTypeCode::Numeric,
    WireTypeCode::BigInt,
    WireTypeCode::IntervalSecond,
];

const INSTANT_TYPES: &[WireTypeCode] = &[
    WireTypeCode::TimestampUtc,
    WireTypeCode::TimestampWithTimezone,
    WireTypeCode::Timestamp,
];

impl TypeSettings {
    /// Parse and validate settings from a YAML document.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_yaml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate a YAML settings file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let settings = Self::from_yaml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded type settings");
        Ok(settings)
    }

    /// Check every setting against its domain.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_choice("preferred_boolean_type", self.preferred_boolean_type, BOOLEAN_TYPES)?;
        check_choice("preferred_uuid_type", self.preferred_uuid_type, UUID_TYPES)?;
        check_choice("preferred_duration_type", self.preferred_duration_type, DURATION_TYPES)?;
        check_choice("preferred_instant_type", self.preferred_instant_type, INSTANT_TYPES)?;
        if self.max_varchar_length == 0 {
            return Err(ConfigError::Invalid {
                key: "max_varchar_length",
                reason: "must be positive".to_string(),
            });
        }
        if self.max_varbinary_length == 0 {
            return Err(ConfigError::Invalid {
                key: "max_varbinary_length",
                reason: "must be positive".to_string(),
            });
        }
        self.jdbc_offset().map_err(|e| ConfigError::Invalid {
            key: "jdbc_time_zone",
            reason: e.to_string(),
        })?;
        Ok(())
    }

    /// The configured JDBC offset.
    pub fn jdbc_offset(&self) -> Result<FixedOffset, ConversionError> {
        parse_offset(self.jdbc_time_zone.trim())
    }
}

fn check_choice(
    key: &'static str,
    value: WireTypeCode,
    allowed: &[WireTypeCode],
) -> Result<(), ConfigError> {
    if allowed.contains(&value) {
        return Ok(());
    }
    let names: Vec<&str> = allowed.iter().map(|c| c.as_str()).collect();
    Err(ConfigError::Invalid {
        key,
        reason: format!("{value} is not one of {}", names.join(", ")),
    })
}

// ─── Column Indicators ───────────────────────────────────────────────

/// Settings plus the flags of one column.
///
/// Column flags win over settings where both speak (nationalization and
/// enum storage).
#[derive(Debug, Clone, Copy)]
pub struct ColumnIndicators<'a> {
    settings: &'a TypeSettings,
    nationalized: Option<bool>,
    lob: bool,
    length: Option<u32>,
    precision: Option<TemporalPrecision>,
    enum_storage: Option<EnumStorage>,
}

impl<'a> ColumnIndicators<'a> {
    /// Indicators for a column with no flags of its own.
    pub fn new(settings: &'a TypeSettings) -> Self {
        Self {
            settings,
            nationalized: None,
            lob: false,
            length: None,
            precision: None,
            enum_storage: None,
        }
    }

    pub fn nationalized(mut self, nationalized: bool) -> Self {
        self.nationalized = Some(nationalized);
        self
    }

    pub fn lob(mut self, lob: bool) -> Self {
        self.lob = lob;
        self
    }

    pub fn length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    pub fn precision(mut self, precision: TemporalPrecision) -> Self {
        self.precision = Some(precision);
        self
    }

    pub fn enum_storage(mut self, storage: EnumStorage) -> Self {
        self.enum_storage = Some(storage);
        self
    }
}

impl WireTypeIndicators for ColumnIndicators<'_> {
    fn is_nationalized(&self) -> bool {
        self.nationalized.unwrap_or(self.settings.nationalized)
    }

    fn is_lob(&self) -> bool {
        self.lob
    }

    fn column_length(&self) -> Option<u32> {
        self.length
    }

    fn enum_storage(&self) -> EnumStorage {
        self.enum_storage.unwrap_or(self.settings.enum_storage)
    }

    fn temporal_precision(&self) -> Option<TemporalPrecision> {
        self.precision
    }

    fn preferred_boolean_type(&self) -> WireTypeCode {
        self.settings.preferred_boolean_type
    }

    fn preferred_uuid_type(&self) -> WireTypeCode {
        self.settings.preferred_uuid_type
    }

    fn preferred_duration_type(&self) -> WireTypeCode {
        self.settings.preferred_duration_type
    }

    fn preferred_instant_type(&self) -> WireTypeCode {
        self.settings.preferred_instant_type
    }

    fn max_varchar_length(&self) -> u32 {
        self.settings.max_varchar_length
    }

    fn max_varbinary_length(&self) -> u32 {
        self.settings.max_varbinary_length
    }
}
