//! # Representation Kinds
//!
//! The closed set of shapes a logical type can be converted to and from at
//! the relational boundary. [`ValueKind`] names a shape; [`JdbcValue`] carries
//! a value of that shape. There is exactly one `JdbcValue` variant per
//! `ValueKind`, so a descriptor's `wrap`/`unwrap` is an exhaustive `match`
//! with a single fallback arm for unsupported kinds.

use std::any::Any;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use uuid::Uuid;

use crate::error::ConversionError;

/// A representation shape understood by the relational layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueKind {
    /// SQL `BOOLEAN`.
    Boolean,
    /// 8-bit signed integer.
    TinyInt,
    /// 16-bit signed integer.
    SmallInt,
    /// 32-bit signed integer.
    Integer,
    /// 64-bit signed integer.
    BigInt,
    /// 32-bit float.
    Real,
    /// 64-bit float.
    Double,
    /// A single character.
    Char,
    /// Text.
    String,
    /// A character sequence held as individual characters.
    Characters,
    /// A byte sequence.
    Bytes,
    /// Calendar date without time.
    Date,
    /// Wall-clock time without date.
    Time,
    /// Date and time without zone.
    Timestamp,
    /// An instant on the UTC timeline.
    TimestampUtc,
    /// Date and time with a fixed UTC offset.
    TimestampWithOffset,
    /// A 128-bit UUID.
    Uuid,
    /// An opaque in-memory object reference.
    Object,
}

impl ValueKind {
    /// Every kind, in declaration order.
    pub fn all() -> &'static [ValueKind] {
        &[
            Self::Boolean,
            Self::TinyInt,
            Self::SmallInt,
            Self::Integer,
            Self::BigInt,
            Self::Real,
            Self::Double,
            Self::Char,
            Self::String,
            Self::Characters,
            Self::Bytes,
            Self::Date,
            Self::Time,
            Self::Timestamp,
            Self::TimestampUtc,
            Self::TimestampWithOffset,
            Self::Uuid,
            Self::Object,
        ]
    }

    /// The snake_case identifier for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::TinyInt => "tiny_int",
            Self::SmallInt => "small_int",
            Self::Integer => "integer",
            Self::BigInt => "big_int",
            Self::Real => "real",
            Self::Double => "double",
            Self::Char => "char",
            Self::String => "string",
            Self::Characters => "characters",
            Self::Bytes => "bytes",
            Self::Date => "date",
            Self::Time => "time",
            Self::Timestamp => "timestamp",
            Self::TimestampUtc => "timestamp_utc",
            Self::TimestampWithOffset => "timestamp_with_offset",
            Self::Uuid => "uuid",
            Self::Object => "object",
        }
    }

    /// Whether the kind is one of the numeric shapes.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::TinyInt | Self::SmallInt | Self::Integer | Self::BigInt | Self::Real | Self::Double
        )
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueKind {
    type Err = ConversionError;

    /// Parse a kind from its identifier. The common Java-style aliases
    /// (`byte`, `short`, `int`, `long`, `float`, `binary`, ...) are accepted too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "boolean" | "bool" => Ok(Self::Boolean),
            "tiny_int" | "byte" => Ok(Self::TinyInt),
            "small_int" | "short" => Ok(Self::SmallInt),
            "integer" | "int" => Ok(Self::Integer),
            "big_int" | "long" => Ok(Self::BigInt),
            "real" | "float" => Ok(Self::Real),
            "double" => Ok(Self::Double),
            "char" | "character" => Ok(Self::Char),
            "string" | "text" => Ok(Self::String),
            "characters" => Ok(Self::Characters),
            "bytes" | "binary" => Ok(Self::Bytes),
            "date" => Ok(Self::Date),
            "time" => Ok(Self::Time),
            "timestamp" => Ok(Self::Timestamp),
            "timestamp_utc" => Ok(Self::TimestampUtc),
            "timestamp_with_offset" => Ok(Self::TimestampWithOffset),
            "uuid" => Ok(Self::Uuid),
            "object" => Ok(Self::Object),
            other => Err(ConversionError::invalid_literal(
                "value_kind",
                other,
                "unknown representation kind",
            )),
        }
    }
}

/// A shared, opaque object reference.
///
/// Equality of `ObjectRef` is reference identity; two refs are the same
/// object only if they point at the same allocation.
#[derive(Clone)]
pub struct ObjectRef(Arc<dyn Any + Send + Sync>);

impl ObjectRef {
    /// Wrap a value in a fresh shared allocation.
    pub fn new<V: Any + Send + Sync>(value: V) -> Self {
        Self(Arc::new(value))
    }

    /// Whether both refs point at the same allocation.
    pub fn same_object(&self, other: &ObjectRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Address of the shared allocation, stable for the object's lifetime.
    pub fn address(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }

    /// Borrow the referenced value if it is a `V`.
    pub fn downcast_ref<V: Any>(&self) -> Option<&V> {
        self.0.downcast_ref::<V>()
    }
}

impl std::fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ObjectRef({:#x})", self.address())
    }
}

/// A value in one of the relational representation shapes.
#[derive(Debug, Clone)]
pub enum JdbcValue {
    /// See [`ValueKind::Boolean`].
    Boolean(bool),
    /// See [`ValueKind::TinyInt`].
    TinyInt(i8),
    /// See [`ValueKind::SmallInt`].
    SmallInt(i16),
    /// See [`ValueKind::Integer`].
    Integer(i32),
    /// See [`ValueKind::BigInt`].
    BigInt(i64),
    /// See [`ValueKind::Real`].
    Real(f32),
    /// See [`ValueKind::Double`].
    Double(f64),
    /// See [`ValueKind::Char`].
    Char(char),
    /// See [`ValueKind::String`].
    String(String),
    /// See [`ValueKind::Characters`].
    Characters(Vec<char>),
    /// See [`ValueKind::Bytes`].
    Bytes(Vec<u8>),
    /// See [`ValueKind::Date`].
    Date(NaiveDate),
    /// See [`ValueKind::Time`].
    Time(NaiveTime),
    /// See [`ValueKind::Timestamp`].
    Timestamp(NaiveDateTime),
    /// See [`ValueKind::TimestampUtc`].
    TimestampUtc(DateTime<Utc>),
    /// See [`ValueKind::TimestampWithOffset`].
    TimestampWithOffset(DateTime<FixedOffset>),
    /// See [`ValueKind::Uuid`].
    Uuid(Uuid),
    /// See [`ValueKind::Object`].
    Object(ObjectRef),
}

impl JdbcValue {
    /// The shape of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Boolean(_) => ValueKind::Boolean,
            Self::TinyInt(_) => ValueKind::TinyInt,
            Self::SmallInt(_) => ValueKind::SmallInt,
            Self::Integer(_) => ValueKind::Integer,
            Self::BigInt(_) => ValueKind::BigInt,
            Self::Real(_) => ValueKind::Real,
            Self::Double(_) => ValueKind::Double,
            Self::Char(_) => ValueKind::Char,
            Self::String(_) => ValueKind::String,
            Self::Characters(_) => ValueKind::Characters,
            Self::Bytes(_) => ValueKind::Bytes,
            Self::Date(_) => ValueKind::Date,
            Self::Time(_) => ValueKind::Time,
            Self::Timestamp(_) => ValueKind::Timestamp,
            Self::TimestampUtc(_) => ValueKind::TimestampUtc,
            Self::TimestampWithOffset(_) => ValueKind::TimestampWithOffset,
            Self::Uuid(_) => ValueKind::Uuid,
            Self::Object(_) => ValueKind::Object,
        }
    }
}

impl std::fmt::Display for JdbcValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Boolean(v) => write!(f, "{v}"),
            Self::TinyInt(v) => write!(f, "{v}"),
            Self::SmallInt(v) => write!(f, "{v}"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::BigInt(v) => write!(f, "{v}"),
            Self::Real(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::Char(v) => write!(f, "{v}"),
            Self::String(v) => f.write_str(v),
            Self::Characters(v) => {
                for c in v {
                    write!(f, "{c}")?;
                }
                Ok(())
            }
            Self::Bytes(v) => {
                for b in v {
                    write!(f, "{b:02x}")?;
                }
                Ok(())
            }
            Self::Date(v) => write!(f, "{}", v.format("%Y-%m-%d")),
            Self::Time(v) => write!(f, "{}", v.format("%H:%M:%S%.f")),
            Self::Timestamp(v) => write!(f, "{}", v.format("%Y-%m-%d %H:%M:%S%.f")),
            Self::TimestampUtc(v) => write!(f, "{}", v.to_rfc3339()),
            Self::TimestampWithOffset(v) => write!(f, "{}", v.to_rfc3339()),
            Self::Uuid(v) => write!(f, "{v}"),
            Self::Object(v) => write!(f, "{v:?}"),
        }
    }
}
