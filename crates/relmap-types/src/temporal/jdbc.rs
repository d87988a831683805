//! The `timestamp` / `date` / `time` family.
//!
//! All three hold a `NaiveDateTime` and resolve into one another, which is
//! how an attribute mapped at TIMESTAMP precision becomes a DATE column:
//!
//! ```text
//!   timestamp ──DATE──▶ date      (date portion, time ignored)
//!   timestamp ──TIME──▶ time      (time portion, date ignored)
//! ```
//!
//! Each member works only on its own portion of the value. For `date` the
//! time of day is never rendered, compared, hashed or coerced; for `time`
//! the date is ignored and values read back are anchored on 1970-01-01.

use std::cmp::Ordering;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use relmap_core::{
    hash_of, unknown_unwrap, unknown_wrap, Comparator, ConversionError, ImmutableMutabilityPlan,
    JdbcValue, MutabilityPlan, SessionContext, TemporalPrecision, TemporalTypeDescriptor,
    TypeDescriptor, TypeError, ValueKind, WireTypeCode, WireTypeIndicators,
};

use super::{
    epoch_date, midnight, naive_to_utc, utc_to_naive, DATE_FORMAT, TIMESTAMP_FORMAT, TIME_FORMAT,
};

const TIMESTAMP_KINDS: &[ValueKind] = &[ValueKind::Timestamp, ValueKind::TimestampUtc, ValueKind::String];
const DATE_KINDS: &[ValueKind] = &[ValueKind::Date, ValueKind::Timestamp, ValueKind::String];
const TIME_KINDS: &[ValueKind] = &[ValueKind::Time, ValueKind::Timestamp, ValueKind::String];

fn by_date(a: &NaiveDateTime, b: &NaiveDateTime) -> Ordering {
    a.date().cmp(&b.date())
}

fn by_time(a: &NaiveDateTime, b: &NaiveDateTime) -> Ordering {
    a.time().cmp(&b.time())
}

/// Descriptor for one member of the `timestamp` / `date` / `time` family.
#[derive(Debug, Clone)]
pub struct JdbcTemporalDescriptor {
    precision: TemporalPrecision,
    plan: ImmutableMutabilityPlan<NaiveDateTime>,
}

impl JdbcTemporalDescriptor {
    const fn new(precision: TemporalPrecision) -> Self {
        Self {
            precision,
            plan: ImmutableMutabilityPlan::new(),
        }
    }

    /// `timestamp`: the whole value.
    pub const fn timestamp() -> Self {
        Self::new(TemporalPrecision::Timestamp)
    }

    /// `date`: the date portion.
    pub const fn date() -> Self {
        Self::new(TemporalPrecision::Date)
    }

    /// `time`: the time portion.
    pub const fn time() -> Self {
        Self::new(TemporalPrecision::Time)
    }

    fn name_of(precision: TemporalPrecision) -> &'static str {
        match precision {
            TemporalPrecision::Timestamp => "timestamp",
            TemporalPrecision::Date => "date",
            TemporalPrecision::Time => "time",
        }
    }
}

impl TypeDescriptor<NaiveDateTime> for JdbcTemporalDescriptor {
    fn type_name(&self) -> &'static str {
        Self::name_of(self.precision)
    }

    fn to_string(&self, value: &NaiveDateTime) -> String {
        match self.precision {
            TemporalPrecision::Timestamp => value.format(TIMESTAMP_FORMAT).to_string(),
            TemporalPrecision::Date => value.format(DATE_FORMAT).to_string(),
            TemporalPrecision::Time => value.format(TIME_FORMAT).to_string(),
        }
    }

    fn from_string(&self, text: &str) -> Result<NaiveDateTime, ConversionError> {
        let invalid = |e: chrono::ParseError| ConversionError::invalid_literal(self.type_name(), text, e);
        match self.precision {
            TemporalPrecision::Timestamp => text.parse::<NaiveDateTime>().map_err(invalid),
            TemporalPrecision::Date => NaiveDate::parse_from_str(text, DATE_FORMAT)
                .map(midnight)
                .map_err(invalid),
            TemporalPrecision::Time => NaiveTime::parse_from_str(text, TIME_FORMAT)
                .map(|t| epoch_date().and_time(t))
                .map_err(invalid),
        }
    }

    fn are_equal(&self, a: Option<&NaiveDateTime>, b: Option<&NaiveDateTime>) -> bool {
        match (a, b) {
            (Some(a), Some(b)) => self.comparator().compare(a, b) == Ordering::Equal,
            (None, None) => true,
            _ => false,
        }
    }

    fn extract_hash_code(&self, value: &NaiveDateTime) -> u64 {
        match self.precision {
            TemporalPrecision::Timestamp => hash_of(value),
            TemporalPrecision::Date => hash_of(&value.date()),
            TemporalPrecision::Time => hash_of(&value.time()),
        }
    }

    fn unwrap(
        &self,
        value: Option<&NaiveDateTime>,
        kind: ValueKind,
        session: &dyn SessionContext,
    ) -> Result<Option<JdbcValue>, TypeError> {
        let Some(&v) = value else { return Ok(None) };
        let out = match (self.precision, kind) {
            (_, ValueKind::String) => JdbcValue::String(self.to_string(&v)),
            (TemporalPrecision::Timestamp, ValueKind::Timestamp) => JdbcValue::Timestamp(v),
            (TemporalPrecision::Timestamp, ValueKind::TimestampUtc) => {
                JdbcValue::TimestampUtc(naive_to_utc(self.type_name(), v, session)?)
            }
            (TemporalPrecision::Date, ValueKind::Date) => JdbcValue::Date(v.date()),
            (TemporalPrecision::Date, ValueKind::Timestamp) => JdbcValue::Timestamp(midnight(v.date())),
            (TemporalPrecision::Time, ValueKind::Time) => JdbcValue::Time(v.time()),
            (TemporalPrecision::Time, ValueKind::Timestamp) => {
                JdbcValue::Timestamp(epoch_date().and_time(v.time()))
            }
            (_, other) => return Err(unknown_unwrap(self.type_name(), other)),
        };
        Ok(Some(out))
    }

    fn wrap(
        &self,
        value: Option<JdbcValue>,
        session: &dyn SessionContext,
    ) -> Result<Option<NaiveDateTime>, TypeError> {
        let Some(value) = value else { return Ok(None) };
        let out = match (self.precision, value) {
            (_, JdbcValue::String(s)) => self.from_string(&s)?,
            (TemporalPrecision::Timestamp, JdbcValue::Timestamp(ts)) => ts,
            (TemporalPrecision::Timestamp, JdbcValue::TimestampUtc(instant)) => {
                utc_to_naive(&instant, session)
            }
            (TemporalPrecision::Date, JdbcValue::Date(d)) => midnight(d),
            (TemporalPrecision::Date, JdbcValue::Timestamp(ts)) => midnight(ts.date()),
            (TemporalPrecision::Time, JdbcValue::Time(t)) => epoch_date().and_time(t),
            (TemporalPrecision::Time, JdbcValue::Timestamp(ts)) => epoch_date().and_time(ts.time()),
            (_, other) => return Err(unknown_wrap(self.type_name(), &other)),
        };
        Ok(Some(out))
    }

    fn supported_kinds(&self) -> &'static [ValueKind] {
        match self.precision {
            TemporalPrecision::Timestamp => TIMESTAMP_KINDS,
            TemporalPrecision::Date => DATE_KINDS,
            TemporalPrecision::Time => TIME_KINDS,
        }
    }

    fn comparator(&self) -> Comparator<NaiveDateTime> {
        match self.precision {
            TemporalPrecision::Timestamp => Comparator::natural(),
            TemporalPrecision::Date => Comparator::by(by_date),
            TemporalPrecision::Time => Comparator::by(by_time),
        }
    }

    fn mutability_plan(&self) -> &dyn MutabilityPlan<NaiveDateTime> {
        &self.plan
    }

    fn recommended_wire_type(&self, _indicators: &dyn WireTypeIndicators) -> WireTypeCode {
        match self.precision {
            TemporalPrecision::Timestamp => WireTypeCode::Timestamp,
            TemporalPrecision::Date => WireTypeCode::Date,
            TemporalPrecision::Time => WireTypeCode::Time,
        }
    }
}

impl TemporalTypeDescriptor<NaiveDateTime> for JdbcTemporalDescriptor {
    fn precision(&self) -> TemporalPrecision {
        self.precision
    }

    fn type_name_for_precision(&self, precision: TemporalPrecision) -> Option<&'static str> {
        Some(Self::name_of(precision))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relmap_core::DefaultSessionContext;

    fn ts(text: &str) -> NaiveDateTime {
        text.parse().unwrap()
    }

    #[test]
    fn date_member_ignores_time() {
        let d = JdbcTemporalDescriptor::date();
        let morning = ts("2024-03-15T08:00:00");
        let evening = ts("2024-03-15T20:45:10");
        assert_eq!(d.to_string(&evening), "2024-03-15");
        assert!(d.are_equal(Some(&morning), Some(&evening)));
        assert_eq!(d.extract_hash_code(&morning), d.extract_hash_code(&evening));
        assert_eq!(d.comparator().compare(&morning, &evening), Ordering::Equal);
        assert_eq!(d.from_string("2024-03-15").unwrap(), ts("2024-03-15T00:00:00"));
    }

    #[test]
    fn date_member_coercions() {
        let d = JdbcTemporalDescriptor::date();
        let ctx = DefaultSessionContext::new();
        let v = ts("2024-03-15T20:45:10");
        assert!(matches!(
            d.unwrap(Some(&v), ValueKind::Date, &ctx).unwrap(),
            Some(JdbcValue::Date(date)) if date.to_string() == "2024-03-15"
        ));
        assert!(matches!(
            d.unwrap(Some(&v), ValueKind::Timestamp, &ctx).unwrap(),
            Some(JdbcValue::Timestamp(t)) if t == ts("2024-03-15T00:00:00")
        ));
        assert!(d.unwrap(Some(&v), ValueKind::Time, &ctx).is_err());
    }

    #[test]
    fn time_member_anchors_on_epoch() {
        let d = JdbcTemporalDescriptor::time();
        let ctx = DefaultSessionContext::new();
        let v = ts("2024-03-15T20:45:10");
        assert_eq!(d.to_string(&v), "20:45:10");
        let back = d.wrap(Some(JdbcValue::Timestamp(v)), &ctx).unwrap().unwrap();
        assert_eq!(back, ts("1970-01-01T20:45:10"));
        assert!(d.are_equal(Some(&v), Some(&back)));
    }

    #[test]
    fn timestamp_member_keeps_everything() {
        let d = JdbcTemporalDescriptor::timestamp();
        let a = ts("2024-03-15T20:45:10");
        let b = ts("2024-03-15T20:45:11");
        assert!(!d.are_equal(Some(&a), Some(&b)));
        assert_eq!(d.to_string(&a), "2024-03-15T20:45:10");
        assert_eq!(d.from_string("2024-03-15T20:45:10").unwrap(), a);
    }

    #[test]
    fn every_precision_has_a_member() {
        let d = JdbcTemporalDescriptor::timestamp();
        for precision in TemporalPrecision::all() {
            assert!(d.type_name_for_precision(*precision).is_some());
        }
        assert_eq!(d.type_name_for_precision(TemporalPrecision::Date), Some("date"));
    }
}
