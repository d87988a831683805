//! # Temporal Precision
//!
//! A temporal descriptor has a fixed *native* precision and can resolve to a
//! sibling descriptor for another precision. Resolution is a pure function
//! evaluated once per attribute mapping:
//!
//! ```text
//!   requested = None        ──▶ `self`, unchanged
//!   requested = native      ──▶ `self`, unchanged
//!   requested ∈ supported   ──▶ the registered sibling for that precision
//!   requested ∉ supported   ──▶ TypeError::UnsupportedPrecision
//! ```
//!
//! Siblings are looked up by name in the [`TypeRegistry`] passed in, so a
//! resolved sibling is always the registry's single authoritative instance
//! for its logical type. Resolving to `self` never touches the registry.

use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::descriptor::TypeDescriptor;
use crate::error::{ConversionError, TypeError};
use crate::registry::TypeRegistry;

/// The granularity a temporal type is stored at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemporalPrecision {
    /// Calendar date only.
    Date,
    /// Wall-clock time only.
    Time,
    /// Date and time.
    Timestamp,
}

impl TemporalPrecision {
    /// All precisions in canonical order.
    pub fn all() -> &'static [TemporalPrecision] {
        &[Self::Date, Self::Time, Self::Timestamp]
    }

    /// The upper-case SQL name of the precision.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Timestamp => "TIMESTAMP",
        }
    }
}

impl std::fmt::Display for TemporalPrecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemporalPrecision {
    type Err = ConversionError;

    /// Case-insensitive parse of `date`, `time` or `timestamp`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "time" => Ok(Self::Time),
            "timestamp" => Ok(Self::Timestamp),
            _ => Err(ConversionError::invalid_literal(
                "temporal_precision",
                s,
                "expected DATE, TIME or TIMESTAMP",
            )),
        }
    }
}

/// A descriptor for a temporal logical type.
pub trait TemporalTypeDescriptor<T>: TypeDescriptor<T> {
    /// The precision this descriptor stores at.
    fn precision(&self) -> TemporalPrecision;

    /// Registry name of the descriptor handling `precision` for this value
    /// type, or `None` when the precision is unsupported. The native
    /// precision maps to this descriptor's own name.
    fn type_name_for_precision(&self, precision: TemporalPrecision) -> Option<&'static str>;

    /// Resolve the descriptor to use for a requested precision.
    ///
    /// `None` and the native precision hand back this descriptor without
    /// consulting `registry`. Shared descriptors resolve through
    /// [`resolve_precision`].
    ///
    /// # Errors
    ///
    /// [`TypeError::UnsupportedPrecision`] when the precision is not
    /// supported by this type; [`TypeError::UnknownType`] when the sibling is
    /// not registered in `registry`.
    fn resolve_type_for_precision(
        &self,
        requested: Option<TemporalPrecision>,
        registry: &TypeRegistry,
    ) -> Result<Arc<dyn TemporalTypeDescriptor<T>>, TypeError>
    where
        Self: Sized + Clone + 'static,
        T: 'static,
    {
        let this: Arc<dyn TemporalTypeDescriptor<T>> = Arc::new(self.clone());
        resolve_precision(&this, requested, registry)
    }
}

/// Resolve a shared temporal descriptor at a requested precision.
///
/// `None` and the descriptor's native precision return `descriptor` itself.
/// Any other supported precision returns the sibling registered in
/// `registry` under [`TemporalTypeDescriptor::type_name_for_precision`].
///
/// # Errors
///
/// [`TypeError::UnsupportedPrecision`] when the precision is not supported;
/// [`TypeError::UnknownType`] when the sibling is not registered.
pub fn resolve_precision<T: 'static>(
    descriptor: &Arc<dyn TemporalTypeDescriptor<T>>,
    requested: Option<TemporalPrecision>,
    registry: &TypeRegistry,
) -> Result<Arc<dyn TemporalTypeDescriptor<T>>, TypeError> {
    let target = match requested {
        Some(p) if p != descriptor.precision() => p,
        _ => return Ok(Arc::clone(descriptor)),
    };
    let name = descriptor
        .type_name_for_precision(target)
        .ok_or_else(|| TypeError::UnsupportedPrecision {
            type_name: descriptor.type_name().to_string(),
            precision: target,
        })?;
    let resolved = registry.temporal::<T>(name)?;
    tracing::debug!(
        from = descriptor.type_name(),
        to = name,
        precision = %target,
        "resolved temporal type"
    );
    Ok(resolved)
}

/// Supported precisions of a temporal descriptor, in canonical order.
pub fn supported_precisions<T>(descriptor: &dyn TemporalTypeDescriptor<T>) -> Vec<TemporalPrecision> {
    TemporalPrecision::all()
        .iter()
        .copied()
        .filter(|p| descriptor.type_name_for_precision(*p).is_some())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_str_roundtrip() {
        for precision in TemporalPrecision::all() {
            let parsed: TemporalPrecision = precision.as_str().parse().unwrap();
            assert_eq!(*precision, parsed);
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Timestamp".parse::<TemporalPrecision>().unwrap(), TemporalPrecision::Timestamp);
        assert!("datetime".parse::<TemporalPrecision>().is_err());
    }

    #[test]
    fn serde_uses_snake_case() {
        let yaml = serde_yaml::to_string(&TemporalPrecision::Timestamp).unwrap();
        assert_eq!(yaml.trim(), "timestamp");
    }
}
