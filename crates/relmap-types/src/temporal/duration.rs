//! `duration`: a signed span, stored as a count of nanoseconds.

use chrono::TimeDelta;
use relmap_core::{
    default_are_equal, hash_of, unknown_unwrap, unknown_wrap, Comparator, ConversionError,
    ImmutableMutabilityPlan, JdbcValue, MutabilityPlan, SessionContext, TypeDescriptor, TypeError,
    ValueKind, WireTypeCode, WireTypeIndicators,
};

const NANOS_PER_SECOND: i128 = 1_000_000_000;

fn total_nanos(value: &TimeDelta) -> i128 {
    i128::from(value.num_seconds()) * NANOS_PER_SECOND + i128::from(value.subsec_nanos())
}

fn from_total_nanos(type_name: &str, nanos: i128) -> Result<TimeDelta, ConversionError> {
    let seconds = i64::try_from(nanos.div_euclid(NANOS_PER_SECOND))
        .map_err(|_| ConversionError::out_of_range(type_name, nanos))?;
    // rem_euclid keeps the remainder in 0..1e9.
    let subsec = nanos.rem_euclid(NANOS_PER_SECOND) as u32;
    TimeDelta::new(seconds, subsec).ok_or_else(|| ConversionError::out_of_range(type_name, nanos))
}

/// Descriptor for `duration`.
///
/// Text is the decimal nanosecond count, so `1.5s` reads and writes as
/// `1500000000`. The `BigInt` path fails for spans beyond roughly 292 years.
#[derive(Debug, Default)]
pub struct DurationDescriptor {
    plan: ImmutableMutabilityPlan<TimeDelta>,
}

impl DurationDescriptor {
    pub const fn new() -> Self {
        Self {
            plan: ImmutableMutabilityPlan::new(),
        }
    }
}

impl TypeDescriptor<TimeDelta> for DurationDescriptor {
    fn type_name(&self) -> &'static str {
        "duration"
    }

    fn to_string(&self, value: &TimeDelta) -> String {
        total_nanos(value).to_string()
    }

    fn from_string(&self, text: &str) -> Result<TimeDelta, ConversionError> {
        let nanos: i128 = text
            .parse()
            .map_err(|e| ConversionError::invalid_literal(self.type_name(), text, e))?;
        from_total_nanos(self.type_name(), nanos)
    }

    fn are_equal(&self, a: Option<&TimeDelta>, b: Option<&TimeDelta>) -> bool {
        default_are_equal(a, b)
    }

    fn extract_hash_code(&self, value: &TimeDelta) -> u64 {
        hash_of(value)
    }

    fn unwrap(
        &self,
        value: Option<&TimeDelta>,
        kind: ValueKind,
        _session: &dyn SessionContext,
    ) -> Result<Option<JdbcValue>, TypeError> {
        let Some(v) = value else { return Ok(None) };
        let out = match kind {
            ValueKind::BigInt => JdbcValue::BigInt(v.num_nanoseconds().ok_or_else(|| {
                TypeError::from(ConversionError::out_of_range(self.type_name(), total_nanos(v)))
            })?),
            ValueKind::String => JdbcValue::String(self.to_string(v)),
            other => return Err(unknown_unwrap(self.type_name(), other)),
        };
        Ok(Some(out))
    }

    fn wrap(
        &self,
        value: Option<JdbcValue>,
        _session: &dyn SessionContext,
    ) -> Result<Option<TimeDelta>, TypeError> {
        let Some(value) = value else { return Ok(None) };
        let out = match value {
            JdbcValue::BigInt(nanos) => TimeDelta::nanoseconds(nanos),
            JdbcValue::String(s) => self.from_string(&s)?,
            other => return Err(unknown_wrap(self.type_name(), &other)),
        };
        Ok(Some(out))
    }

    fn supported_kinds(&self) -> &'static [ValueKind] {
        &[ValueKind::BigInt, ValueKind::String]
    }

    fn comparator(&self) -> Comparator<TimeDelta> {
        Comparator::natural()
    }

    fn mutability_plan(&self) -> &dyn MutabilityPlan<TimeDelta> {
        &self.plan
    }

    fn recommended_wire_type(&self, indicators: &dyn WireTypeIndicators) -> WireTypeCode {
        indicators.preferred_duration_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relmap_core::DefaultSessionContext;

    #[test]
    fn text_is_nanoseconds() {
        let d = DurationDescriptor::new();
        let v = TimeDelta::milliseconds(1500);
        assert_eq!(d.to_string(&v), "1500000000");
        assert_eq!(d.from_string("1500000000").unwrap(), v);
    }

    #[test]
    fn negative_spans_round_trip() {
        let d = DurationDescriptor::new();
        let v = TimeDelta::nanoseconds(-1_500_000_001);
        assert_eq!(d.to_string(&v), "-1500000001");
        assert_eq!(d.from_string("-1500000001").unwrap(), v);
    }

    #[test]
    fn bigint_path() {
        let d = DurationDescriptor::new();
        let ctx = DefaultSessionContext::new();
        let v = TimeDelta::seconds(90);
        let wire = d.unwrap(Some(&v), ValueKind::BigInt, &ctx).unwrap();
        assert!(matches!(wire, Some(JdbcValue::BigInt(90_000_000_000))));
        assert_eq!(d.wrap(wire, &ctx).unwrap(), Some(v));
        assert!(d.unwrap(Some(&TimeDelta::MAX), ValueKind::BigInt, &ctx).is_err());
    }

    #[test]
    fn rejects_garbage_and_overflow() {
        let d = DurationDescriptor::new();
        assert!(matches!(
            d.from_string("1.5s"),
            Err(ConversionError::InvalidLiteral { .. })
        ));
        for padded in [" 5", "5 ", " 5 ", "5\n"] {
            assert!(
                matches!(d.from_string(padded), Err(ConversionError::InvalidLiteral { .. })),
                "{padded:?}"
            );
        }
        let huge = (i128::from(i64::MAX) * NANOS_PER_SECOND * 2).to_string();
        assert!(matches!(
            d.from_string(&huge),
            Err(ConversionError::OutOfRange { .. })
        ));
    }
}
