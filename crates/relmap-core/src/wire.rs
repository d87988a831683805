//! # Wire Types
//!
//! Column-type hints a descriptor recommends to the relational layer, and the
//! schema context it consults while choosing one.
//!
//! [`WireTypeCode`] carries the standard JDBC type codes plus a handful of
//! extension codes (UUID, JSON, UTC timestamp, interval) above 3000. The
//! mapping from a code to a concrete column definition belongs to the SQL
//! type registry, which is not part of this crate.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConversionError;
use crate::temporal::TemporalPrecision;

/// A relational column type, identified by its JDBC code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WireTypeCode {
    Bit,
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    Float,
    Real,
    Double,
    Numeric,
    Decimal,
    Char,
    VarChar,
    LongVarChar,
    NChar,
    NVarChar,
    LongNVarChar,
    Date,
    Time,
    Timestamp,
    TimeWithTimezone,
    TimestampWithTimezone,
    Binary,
    VarBinary,
    LongVarBinary,
    Blob,
    Clob,
    NClob,
    Boolean,
    JavaObject,
    Uuid,
    Json,
    TimestampUtc,
    IntervalSecond,
}

impl WireTypeCode {
    /// Every code, in declaration order.
    pub fn all() -> &'static [WireTypeCode] {
        use WireTypeCode::*;
        &[
            Bit, TinyInt, SmallInt, Integer, BigInt, Float, Real, Double, Numeric, Decimal, Char,
            VarChar, LongVarChar, NChar, NVarChar, LongNVarChar, Date, Time, Timestamp,
            TimeWithTimezone, TimestampWithTimezone, Binary, VarBinary, LongVarBinary, Blob, Clob,
            NClob, Boolean, JavaObject, Uuid, Json, TimestampUtc, IntervalSecond,
        ]
    }

    /// The numeric JDBC code.
    pub fn code(&self) -> i32 {
        match self {
            Self::Bit => -7,
            Self::TinyInt => -6,
            Self::SmallInt => 5,
            Self::Integer => 4,
            Self::BigInt => -5,
            Self::Float => 6,
            Self::Real => 7,
            Self::Double => 8,
            Self::Numeric => 2,
            Self::Decimal => 3,
            Self::Char => 1,
            Self::VarChar => 12,
            Self::LongVarChar => -1,
            Self::NChar => -15,
            Self::NVarChar => -9,
            Self::LongNVarChar => -16,
            Self::Date => 91,
            Self::Time => 92,
            Self::Timestamp => 93,
            Self::TimeWithTimezone => 2013,
            Self::TimestampWithTimezone => 2014,
            Self::Binary => -2,
            Self::VarBinary => -3,
            Self::LongVarBinary => -4,
            Self::Blob => 2004,
            Self::Clob => 2005,
            Self::NClob => 2011,
            Self::Boolean => 16,
            Self::JavaObject => 2000,
            Self::Uuid => 3000,
            Self::Json => 3001,
            Self::TimestampUtc => 3003,
            Self::IntervalSecond => 3100,
        }
    }

    /// The code with the given JDBC number, if known.
    pub fn from_code(code: i32) -> Option<Self> {
        Self::all().iter().copied().find(|c| c.code() == code)
    }

    /// The upper-case SQL spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bit => "BIT",
            Self::TinyInt => "TINYINT",
            Self::SmallInt => "SMALLINT",
            Self::Integer => "INTEGER",
            Self::BigInt => "BIGINT",
            Self::Float => "FLOAT",
            Self::Real => "REAL",
            Self::Double => "DOUBLE",
            Self::Numeric => "NUMERIC",
            Self::Decimal => "DECIMAL",
            Self::Char => "CHAR",
            Self::VarChar => "VARCHAR",
            Self::LongVarChar => "LONGVARCHAR",
            Self::NChar => "NCHAR",
            Self::NVarChar => "NVARCHAR",
            Self::LongNVarChar => "LONGNVARCHAR",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Timestamp => "TIMESTAMP",
            Self::TimeWithTimezone => "TIME_WITH_TIMEZONE",
            Self::TimestampWithTimezone => "TIMESTAMP_WITH_TIMEZONE",
            Self::Binary => "BINARY",
            Self::VarBinary => "VARBINARY",
            Self::LongVarBinary => "LONGVARBINARY",
            Self::Blob => "BLOB",
            Self::Clob => "CLOB",
            Self::NClob => "NCLOB",
            Self::Boolean => "BOOLEAN",
            Self::JavaObject => "JAVA_OBJECT",
            Self::Uuid => "UUID",
            Self::Json => "JSON",
            Self::TimestampUtc => "TIMESTAMP_UTC",
            Self::IntervalSecond => "INTERVAL_SECOND",
        }
    }

    /// Whether this is a character-typed column.
    pub fn is_character(&self) -> bool {
        matches!(
            self,
            Self::Char
                | Self::VarChar
                | Self::LongVarChar
                | Self::NChar
                | Self::NVarChar
                | Self::LongNVarChar
                | Self::Clob
                | Self::NClob
        )
    }
}

impl std::fmt::Display for WireTypeCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WireTypeCode {
    type Err = ConversionError;

    /// Parse the SQL spelling (case-insensitive) or the numeric code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(code) = s.parse::<i32>() {
            return Self::from_code(code)
                .ok_or_else(|| ConversionError::invalid_literal("wire_type", s, "unknown JDBC code"));
        }
        let upper = s.to_ascii_uppercase();
        Self::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == upper)
            .ok_or_else(|| ConversionError::invalid_literal("wire_type", s, "unknown wire type"))
    }
}

/// How enum values are stored in their column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnumStorage {
    /// The declaration index.
    #[default]
    Ordinal,
    /// The constant name.
    String,
}

impl EnumStorage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ordinal => "ordinal",
            Self::String => "string",
        }
    }
}

impl std::fmt::Display for EnumStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnumStorage {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ordinal" => Ok(Self::Ordinal),
            "string" => Ok(Self::String),
            _ => Err(ConversionError::invalid_literal(
                "enum_storage",
                s,
                "expected ordinal or string",
            )),
        }
    }
}

/// The resolved schema context for one column.
///
/// Every query has a default so an implementation only overrides what it
/// knows. Descriptors read it inside `recommended_wire_type` and never keep
/// it.
pub trait WireTypeIndicators {
    /// Character data should use the national character set.
    fn is_nationalized(&self) -> bool {
        false
    }

    /// The column is a large object.
    fn is_lob(&self) -> bool {
        false
    }

    /// Declared column length, when one was given.
    fn column_length(&self) -> Option<u32> {
        None
    }

    /// Storage form for enum columns.
    fn enum_storage(&self) -> EnumStorage {
        EnumStorage::Ordinal
    }

    /// Precision declared for a temporal column, when one was given.
    fn temporal_precision(&self) -> Option<TemporalPrecision> {
        None
    }

    fn preferred_boolean_type(&self) -> WireTypeCode {
        WireTypeCode::Boolean
    }

    fn preferred_uuid_type(&self) -> WireTypeCode {
        WireTypeCode::Uuid
    }

    fn preferred_duration_type(&self) -> WireTypeCode {
        WireTypeCode::Numeric
    }

    fn preferred_instant_type(&self) -> WireTypeCode {
        WireTypeCode::TimestampUtc
    }

    /// Longest length a `VARCHAR` column may declare.
    fn max_varchar_length(&self) -> u32 {
        4000
    }

    /// Longest length a `VARBINARY` column may declare.
    fn max_varbinary_length(&self) -> u32 {
        4000
    }

    /// Look a wire type up by its JDBC code.
    fn resolve_code(&self, code: i32) -> Option<WireTypeCode> {
        WireTypeCode::from_code(code)
    }
}
