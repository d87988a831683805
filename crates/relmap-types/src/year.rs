//! # Year Type
//!
//! `year`: a proleptic ISO year in `-999_999_999..=999_999_999`, stored as
//! an integer or its decimal text.

use std::str::FromStr;

use relmap_core::{
    default_are_equal, hash_of, unknown_unwrap, unknown_wrap, Comparator, ConversionError,
    ImmutableMutabilityPlan, JdbcValue, MutabilityPlan, SessionContext, TypeDescriptor, TypeError,
    ValueKind, WireTypeCode, WireTypeIndicators,
};

use crate::numeric::parse_integer;

/// A calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Year(i32);

impl Year {
    pub const MIN: i32 = -999_999_999;
    pub const MAX: i32 = 999_999_999;

    /// The year, if within range.
    pub fn new(value: i64) -> Result<Self, ConversionError> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as i32))
        } else {
            Err(ConversionError::out_of_range("year", value))
        }
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for Year {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Year {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(parse_integer::<i64>("year", s)?)
    }
}

/// Descriptor for `year`.
#[derive(Debug, Default)]
pub struct YearDescriptor {
    plan: ImmutableMutabilityPlan<Year>,
}

impl YearDescriptor {
    pub const fn new() -> Self {
        Self {
            plan: ImmutableMutabilityPlan::new(),
        }
    }
}

impl TypeDescriptor<Year> for YearDescriptor {
    fn type_name(&self) -> &'static str {
        "year"
    }

    fn to_string(&self, value: &Year) -> String {
        value.to_string()
    }

    fn from_string(&self, text: &str) -> Result<Year, ConversionError> {
        text.parse()
    }

    fn are_equal(&self, a: Option<&Year>, b: Option<&Year>) -> bool {
        default_are_equal(a, b)
    }

    fn extract_hash_code(&self, value: &Year) -> u64 {
        hash_of(value)
    }

    fn unwrap(
        &self,
        value: Option<&Year>,
        kind: ValueKind,
        _session: &dyn SessionContext,
    ) -> Result<Option<JdbcValue>, TypeError> {
        let Some(v) = value else { return Ok(None) };
        let out = match kind {
            ValueKind::Integer => JdbcValue::Integer(v.0),
            ValueKind::SmallInt => JdbcValue::SmallInt(v.0 as i16),
            ValueKind::BigInt => JdbcValue::BigInt(i64::from(v.0)),
            ValueKind::String => JdbcValue::String(v.to_string()),
            other => return Err(unknown_unwrap(self.type_name(), other)),
        };
        Ok(Some(out))
    }

    fn wrap(
        &self,
        value: Option<JdbcValue>,
        _session: &dyn SessionContext,
    ) -> Result<Option<Year>, TypeError> {
        let Some(value) = value else { return Ok(None) };
        let year = match value {
            JdbcValue::Integer(n) => Year::new(i64::from(n))?,
            JdbcValue::SmallInt(n) => Year::new(i64::from(n))?,
            JdbcValue::BigInt(n) => Year::new(n)?,
            JdbcValue::String(s) => self.from_string(&s)?,
            other => return Err(unknown_wrap(self.type_name(), &other)),
        };
        Ok(Some(year))
    }

    fn supported_kinds(&self) -> &'static [ValueKind] {
        &[
            ValueKind::Integer,
            ValueKind::SmallInt,
            ValueKind::BigInt,
            ValueKind::String,
        ]
    }

    fn comparator(&self) -> Comparator<Year> {
        Comparator::natural()
    }

    fn mutability_plan(&self) -> &dyn MutabilityPlan<Year> {
        &self.plan
    }

    fn recommended_wire_type(&self, _indicators: &dyn WireTypeIndicators) -> WireTypeCode {
        WireTypeCode::Integer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relmap_core::DefaultSessionContext;

    #[test]
    fn range_is_enforced() {
        assert!(Year::new(999_999_999).is_ok());
        assert!(Year::new(1_000_000_000).is_err());
        assert!(Year::new(-1_000_000_000).is_err());
        assert!(matches!(
            "1000000000".parse::<Year>(),
            Err(ConversionError::OutOfRange { .. })
        ));
    }

    #[test]
    fn coercions() {
        let d = YearDescriptor::new();
        let ctx = DefaultSessionContext::new();
        let year = d.from_string("2024").unwrap();
        assert!(matches!(
            d.unwrap(Some(&year), ValueKind::SmallInt, &ctx).unwrap(),
            Some(JdbcValue::SmallInt(2024))
        ));
        assert_eq!(d.wrap(Some(JdbcValue::BigInt(-44)), &ctx).unwrap().map(|y| y.value()), Some(-44));
        assert!(d.wrap(Some(JdbcValue::BigInt(i64::MAX)), &ctx).is_err());
        assert!(d.unwrap(Some(&year), ValueKind::Date, &ctx).is_err());
    }
}
