//! # Error Types
//!
//! Structured errors for the descriptor contract, built with `thiserror`.
//! Every error is a deterministic function of bad input: nothing is retried
//! internally, and callers decide how to recover.
//!
//! ## Design
//!
//! - [`ConversionError`] is a *data* error: text or a numeric value that
//!   cannot become the logical type.
//! - [`TypeError::UnsupportedConversion`] and
//!   [`TypeError::UnsupportedPrecision`] are *programmer* errors: a mapping
//!   asked for a representation or precision outside the type's closed set.
//! - A `None` value is never an error for coercions; it passes through.

use thiserror::Error;

use crate::kind::ValueKind;
use crate::temporal::TemporalPrecision;

/// Direction of a coercion through a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Domain value to relational representation.
    Unwrap,
    /// Relational representation to domain value.
    Wrap,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unwrap => f.write_str("unwrap"),
            Self::Wrap => f.write_str("wrap"),
        }
    }
}

/// Top-level error type for descriptor operations.
#[derive(Error, Debug)]
pub enum TypeError {
    /// Text or a value could not be converted into the logical type.
    #[error("conversion error: {0}")]
    Conversion(#[from] ConversionError),

    /// The requested representation is outside the type's supported set.
    #[error("cannot {direction} `{type_name}` as {kind}")]
    UnsupportedConversion {
        /// Logical type name of the descriptor.
        type_name: String,
        /// The representation that was requested or supplied.
        kind: ValueKind,
        /// Whether the failure happened while wrapping or unwrapping.
        direction: Direction,
    },

    /// A temporal type was asked for a precision it cannot represent.
    #[error("`{type_name}` cannot be resolved to {precision} precision")]
    UnsupportedPrecision {
        /// Logical type name of the descriptor.
        type_name: String,
        /// The precision that was requested.
        precision: TemporalPrecision,
    },

    /// A null value reached an operation that requires a value.
    #[error("`{operation}` on `{type_name}` requires a non-null value")]
    NullValue {
        /// Logical type name of the descriptor.
        type_name: String,
        /// The operation that was attempted.
        operation: &'static str,
    },

    /// A cached value did not hold the type the plan assembles.
    #[error("cached value is not a `{type_name}`")]
    CacheMismatch {
        /// The value type the plan expected.
        type_name: String,
    },

    /// No descriptor is registered under the name, or it has another value type.
    #[error("no descriptor registered for `{name}`")]
    UnknownType {
        /// The requested registry name.
        name: String,
    },
}

/// Errors parsing or narrowing a value into a logical type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// The text is not a valid literal for the type.
    #[error("invalid `{type_name}` literal \"{text}\" ({reason})")]
    InvalidLiteral {
        /// Logical type name.
        type_name: String,
        /// The rejected text.
        text: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The text or value has the wrong number of elements.
    #[error("invalid `{type_name}` value \"{text}\": expected {expected} characters, found {actual}")]
    WrongLength {
        /// Logical type name.
        type_name: String,
        /// The rejected text.
        text: String,
        /// Required length.
        expected: usize,
        /// Observed length.
        actual: usize,
    },

    /// A numeric value lies outside the range the type can hold.
    #[error("value {value} is out of range for `{type_name}`")]
    OutOfRange {
        /// Logical type name.
        type_name: String,
        /// The rejected value, rendered.
        value: String,
    },
}

impl ConversionError {
    /// Build an [`ConversionError::InvalidLiteral`].
    pub fn invalid_literal(
        type_name: &str,
        text: &str,
        reason: impl std::fmt::Display,
    ) -> Self {
        Self::InvalidLiteral {
            type_name: type_name.to_string(),
            text: text.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Build an [`ConversionError::OutOfRange`].
    pub fn out_of_range(type_name: &str, value: impl std::fmt::Display) -> Self {
        Self::OutOfRange {
            type_name: type_name.to_string(),
            value: value.to_string(),
        }
    }
}

/// Errors loading [`TypeSettings`](crate::settings::TypeSettings).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The settings file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The settings document is not valid YAML for the schema.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A setting holds a value outside its domain.
    #[error("invalid setting `{key}`: {reason}")]
    Invalid {
        /// The offending key.
        key: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_conversion_names_type_and_kind() {
        let err = TypeError::UnsupportedConversion {
            type_name: "integer".to_string(),
            kind: ValueKind::Uuid,
            direction: Direction::Unwrap,
        };
        let msg = format!("{err}");
        assert!(msg.contains("integer"));
        assert!(msg.contains("uuid"));
        assert!(msg.contains("unwrap"));
    }

    #[test]
    fn unsupported_precision_display() {
        let err = TypeError::UnsupportedPrecision {
            type_name: "local_date".to_string(),
            precision: TemporalPrecision::Time,
        };
        let msg = format!("{err}");
        assert!(msg.contains("local_date"));
        assert!(msg.contains("TIME"));
    }

    #[test]
    fn conversion_error_wraps_into_type_error() {
        let inner = ConversionError::invalid_literal("integer", "abc", "invalid digit");
        let err: TypeError = inner.into();
        let msg = format!("{err}");
        assert!(msg.contains("conversion error"));
        assert!(msg.contains("abc"));
    }

    #[test]
    fn wrong_length_display() {
        let err = ConversionError::WrongLength {
            type_name: "character".to_string(),
            text: "ab".to_string(),
            expected: 1,
            actual: 2,
        };
        let msg = format!("{err}");
        assert!(msg.contains("expected 1"));
        assert!(msg.contains("found 2"));
    }

    #[test]
    fn null_value_display() {
        let err = TypeError::NullValue {
            type_name: "string".to_string(),
            operation: "extract_hash_code",
        };
        assert!(format!("{err}").contains("extract_hash_code"));
    }

    #[test]
    fn config_error_invalid_display() {
        let err = ConfigError::Invalid {
            key: "jdbc_time_zone",
            reason: "not an offset".to_string(),
        };
        assert!(format!("{err}").contains("jdbc_time_zone"));
    }
}
