//! Local (zone-less) date and time types.
//!
//! Each has exactly one precision: `local_date_time` is TIMESTAMP,
//! `local_date` DATE, `local_time` TIME. Asking any of them for another
//! precision is an error.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use relmap_core::{
    default_are_equal, hash_of, parse_literal, unknown_unwrap, unknown_wrap, Comparator,
    ConversionError, ImmutableMutabilityPlan, JdbcValue, MutabilityPlan, SessionContext,
    TemporalPrecision, TemporalTypeDescriptor, TypeDescriptor, TypeError, ValueKind, WireTypeCode,
    WireTypeIndicators,
};

use super::{
    epoch_date, midnight, naive_to_utc, utc_to_naive, DATE_FORMAT, TIMESTAMP_FORMAT, TIME_FORMAT,
};

// ─── local_date_time ─────────────────────────────────────────────────

/// Descriptor for `local_date_time`.
#[derive(Debug, Clone, Default)]
pub struct LocalDateTimeDescriptor {
    plan: ImmutableMutabilityPlan<NaiveDateTime>,
}

impl LocalDateTimeDescriptor {
    pub const fn new() -> Self {
        Self {
            plan: ImmutableMutabilityPlan::new(),
        }
    }
}

impl TypeDescriptor<NaiveDateTime> for LocalDateTimeDescriptor {
    fn type_name(&self) -> &'static str {
        "local_date_time"
    }

    fn to_string(&self, value: &NaiveDateTime) -> String {
        value.format(TIMESTAMP_FORMAT).to_string()
    }

    fn from_string(&self, text: &str) -> Result<NaiveDateTime, ConversionError> {
        parse_literal(self.type_name(), text)
    }

    fn are_equal(&self, a: Option<&NaiveDateTime>, b: Option<&NaiveDateTime>) -> bool {
        default_are_equal(a, b)
    }

    fn extract_hash_code(&self, value: &NaiveDateTime) -> u64 {
        hash_of(value)
    }

    fn unwrap(
        &self,
        value: Option<&NaiveDateTime>,
        kind: ValueKind,
        session: &dyn SessionContext,
    ) -> Result<Option<JdbcValue>, TypeError> {
        let Some(&v) = value else { return Ok(None) };
        let out = match kind {
            ValueKind::Timestamp => JdbcValue::Timestamp(v),
            ValueKind::TimestampUtc => {
                JdbcValue::TimestampUtc(naive_to_utc(self.type_name(), v, session)?)
            }
            ValueKind::String => JdbcValue::String(self.to_string(&v)),
            other => return Err(unknown_unwrap(self.type_name(), other)),
        };
        Ok(Some(out))
    }

    fn wrap(
        &self,
        value: Option<JdbcValue>,
        session: &dyn SessionContext,
    ) -> Result<Option<NaiveDateTime>, TypeError> {
        let Some(value) = value else { return Ok(None) };
        let out = match value {
            JdbcValue::Timestamp(ts) => ts,
            JdbcValue::TimestampUtc(instant) => utc_to_naive(&instant, session),
            JdbcValue::String(s) => self.from_string(&s)?,
            other => return Err(unknown_wrap(self.type_name(), &other)),
        };
        Ok(Some(out))
    }

    fn supported_kinds(&self) -> &'static [ValueKind] {
        &[ValueKind::Timestamp, ValueKind::TimestampUtc, ValueKind::String]
    }

    fn comparator(&self) -> Comparator<NaiveDateTime> {
        Comparator::natural()
    }

    fn mutability_plan(&self) -> &dyn MutabilityPlan<NaiveDateTime> {
        &self.plan
    }

    fn recommended_wire_type(&self, _indicators: &dyn WireTypeIndicators) -> WireTypeCode {
        WireTypeCode::Timestamp
    }
}

impl TemporalTypeDescriptor<NaiveDateTime> for LocalDateTimeDescriptor {
    fn precision(&self) -> TemporalPrecision {
        TemporalPrecision::Timestamp
    }

    fn type_name_for_precision(&self, precision: TemporalPrecision) -> Option<&'static str> {
        (precision == TemporalPrecision::Timestamp).then_some("local_date_time")
    }
}

// ─── local_date ──────────────────────────────────────────────────────

/// Descriptor for `local_date`.
#[derive(Debug, Clone, Default)]
pub struct LocalDateDescriptor {
    plan: ImmutableMutabilityPlan<NaiveDate>,
}

impl LocalDateDescriptor {
    pub const fn new() -> Self {
        Self {
            plan: ImmutableMutabilityPlan::new(),
        }
    }
}

impl TypeDescriptor<NaiveDate> for LocalDateDescriptor {
    fn type_name(&self) -> &'static str {
        "local_date"
    }

    fn to_string(&self, value: &NaiveDate) -> String {
        value.format(DATE_FORMAT).to_string()
    }

    fn from_string(&self, text: &str) -> Result<NaiveDate, ConversionError> {
        NaiveDate::parse_from_str(text, DATE_FORMAT)
            .map_err(|e| ConversionError::invalid_literal(self.type_name(), text, e))
    }

    fn are_equal(&self, a: Option<&NaiveDate>, b: Option<&NaiveDate>) -> bool {
        default_are_equal(a, b)
    }

    fn extract_hash_code(&self, value: &NaiveDate) -> u64 {
        hash_of(value)
    }

    fn unwrap(
        &self,
        value: Option<&NaiveDate>,
        kind: ValueKind,
        _session: &dyn SessionContext,
    ) -> Result<Option<JdbcValue>, TypeError> {
        let Some(&v) = value else { return Ok(None) };
        let out = match kind {
            ValueKind::Date => JdbcValue::Date(v),
            ValueKind::Timestamp => JdbcValue::Timestamp(midnight(v)),
            ValueKind::String => JdbcValue::String(self.to_string(&v)),
            other => return Err(unknown_unwrap(self.type_name(), other)),
        };
        Ok(Some(out))
    }

    fn wrap(
        &self,
        value: Option<JdbcValue>,
        _session: &dyn SessionContext,
    ) -> Result<Option<NaiveDate>, TypeError> {
        let Some(value) = value else { return Ok(None) };
        let out = match value {
            JdbcValue::Date(d) => d,
            JdbcValue::Timestamp(ts) => ts.date(),
            JdbcValue::String(s) => self.from_string(&s)?,
            other => return Err(unknown_wrap(self.type_name(), &other)),
        };
        Ok(Some(out))
    }

    fn supported_kinds(&self) -> &'static [ValueKind] {
        &[ValueKind::Date, ValueKind::Timestamp, ValueKind::String]
    }

    fn comparator(&self) -> Comparator<NaiveDate> {
        Comparator::natural()
    }

    fn mutability_plan(&self) -> &dyn MutabilityPlan<NaiveDate> {
        &self.plan
    }

    fn recommended_wire_type(&self, _indicators: &dyn WireTypeIndicators) -> WireTypeCode {
        WireTypeCode::Date
    }
}

impl TemporalTypeDescriptor<NaiveDate> for LocalDateDescriptor {
    fn precision(&self) -> TemporalPrecision {
        TemporalPrecision::Date
    }

    fn type_name_for_precision(&self, precision: TemporalPrecision) -> Option<&'static str> {
        (precision == TemporalPrecision::Date).then_some("local_date")
    }
}

// ─── local_time ──────────────────────────────────────────────────────

/// Descriptor for `local_time`.
#[derive(Debug, Clone, Default)]
pub struct LocalTimeDescriptor {
    plan: ImmutableMutabilityPlan<NaiveTime>,
}

impl LocalTimeDescriptor {
    pub const fn new() -> Self {
        Self {
            plan: ImmutableMutabilityPlan::new(),
        }
    }
}

impl TypeDescriptor<NaiveTime> for LocalTimeDescriptor {
    fn type_name(&self) -> &'static str {
        "local_time"
    }

    fn to_string(&self, value: &NaiveTime) -> String {
        value.format(TIME_FORMAT).to_string()
    }

    fn from_string(&self, text: &str) -> Result<NaiveTime, ConversionError> {
        NaiveTime::parse_from_str(text, TIME_FORMAT)
            .map_err(|e| ConversionError::invalid_literal(self.type_name(), text, e))
    }

    fn are_equal(&self, a: Option<&NaiveTime>, b: Option<&NaiveTime>) -> bool {
        default_are_equal(a, b)
    }

    fn extract_hash_code(&self, value: &NaiveTime) -> u64 {
        hash_of(value)
    }

    fn unwrap(
        &self,
        value: Option<&NaiveTime>,
        kind: ValueKind,
        _session: &dyn SessionContext,
    ) -> Result<Option<JdbcValue>, TypeError> {
        let Some(&v) = value else { return Ok(None) };
        let out = match kind {
            ValueKind::Time => JdbcValue::Time(v),
            ValueKind::Timestamp => JdbcValue::Timestamp(epoch_date().and_time(v)),
            ValueKind::String => JdbcValue::String(self.to_string(&v)),
            other => return Err(unknown_unwrap(self.type_name(), other)),
        };
        Ok(Some(out))
    }

    fn wrap(
        &self,
        value: Option<JdbcValue>,
        _session: &dyn SessionContext,
    ) -> Result<Option<NaiveTime>, TypeError> {
        let Some(value) = value else { return Ok(None) };
        let out = match value {
            JdbcValue::Time(t) => t,
            JdbcValue::Timestamp(ts) => ts.time(),
            JdbcValue::String(s) => self.from_string(&s)?,
            other => return Err(unknown_wrap(self.type_name(), &other)),
        };
        Ok(Some(out))
    }

    fn supported_kinds(&self) -> &'static [ValueKind] {
        &[ValueKind::Time, ValueKind::Timestamp, ValueKind::String]
    }

    fn comparator(&self) -> Comparator<NaiveTime> {
        Comparator::natural()
    }

    fn mutability_plan(&self) -> &dyn MutabilityPlan<NaiveTime> {
        &self.plan
    }

    fn recommended_wire_type(&self, _indicators: &dyn WireTypeIndicators) -> WireTypeCode {
        WireTypeCode::Time
    }
}

impl TemporalTypeDescriptor<NaiveTime> for LocalTimeDescriptor {
    fn precision(&self) -> TemporalPrecision {
        TemporalPrecision::Time
    }

    fn type_name_for_precision(&self, precision: TemporalPrecision) -> Option<&'static str> {
        (precision == TemporalPrecision::Time).then_some("local_time")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use relmap_core::DefaultSessionContext;

    fn ts(text: &str) -> NaiveDateTime {
        text.parse().unwrap()
    }

    #[test]
    fn local_date_time_text() {
        let d = LocalDateTimeDescriptor::new();
        let v = ts("2024-02-29T23:59:58.125");
        assert_eq!(d.to_string(&v), "2024-02-29T23:59:58.125");
        assert_eq!(d.from_string("2024-02-29T23:59:58.125").unwrap(), v);
        assert_eq!(d.to_string(&ts("2024-01-01T00:00:00")), "2024-01-01T00:00:00");
        assert!(d.from_string("2024-02-30T00:00:00").is_err());
    }

    #[test]
    fn local_date_time_through_utc() {
        let d = LocalDateTimeDescriptor::new();
        let ctx = DefaultSessionContext::with_time_zone(FixedOffset::west_opt(5 * 3600).unwrap());
        let v = ts("2024-06-01T08:00:00");
        let wire = d.unwrap(Some(&v), ValueKind::TimestampUtc, &ctx).unwrap();
        assert!(matches!(wire, Some(JdbcValue::TimestampUtc(ref u)) if u.to_rfc3339() == "2024-06-01T13:00:00+00:00"));
        assert_eq!(d.wrap(wire, &ctx).unwrap(), Some(v));
    }

    #[test]
    fn local_date_coercions() {
        let d = LocalDateDescriptor::new();
        let ctx = DefaultSessionContext::new();
        let date = d.from_string("1999-12-31").unwrap();
        assert!(matches!(
            d.unwrap(Some(&date), ValueKind::Timestamp, &ctx).unwrap(),
            Some(JdbcValue::Timestamp(t)) if t == ts("1999-12-31T00:00:00")
        ));
        assert_eq!(
            d.wrap(Some(JdbcValue::Timestamp(ts("1999-12-31T18:30:00"))), &ctx).unwrap(),
            Some(date)
        );
        assert!(d.from_string("31/12/1999").is_err());
    }

    #[test]
    fn local_time_coercions() {
        let d = LocalTimeDescriptor::new();
        let ctx = DefaultSessionContext::new();
        let time = d.from_string("07:15:30.5").unwrap();
        assert_eq!(d.to_string(&time), "07:15:30.500");
        assert!(matches!(
            d.unwrap(Some(&time), ValueKind::Timestamp, &ctx).unwrap(),
            Some(JdbcValue::Timestamp(t)) if t.date() == epoch_date()
        ));
        assert!(d.unwrap(Some(&time), ValueKind::Date, &ctx).is_err());
    }

    #[test]
    fn single_precision_each() {
        assert_eq!(
            LocalDateTimeDescriptor::new().type_name_for_precision(TemporalPrecision::Timestamp),
            Some("local_date_time")
        );
        assert_eq!(
            LocalDateTimeDescriptor::new().type_name_for_precision(TemporalPrecision::Date),
            None
        );
        assert_eq!(
            LocalDateDescriptor::new().type_name_for_precision(TemporalPrecision::Time),
            None
        );
        assert_eq!(
            LocalTimeDescriptor::new().type_name_for_precision(TemporalPrecision::Time),
            Some("local_time")
        );
    }
}
