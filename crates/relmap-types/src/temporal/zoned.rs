//! `zoned_date_time`: an instant in a named IANA zone.
//!
//! Text is the RFC 3339 form in the zone's offset at that instant, followed
//! by the zone name in brackets: `2024-03-31T03:30:00+02:00[Europe/Paris]`.
//! When the wall-clock time is ambiguous (a DST fall-back) the written
//! offset picks the occurrence.
//!
//! Two values are equal when they denote the same instant in the same zone.
//! They order by instant, then local date-time, then zone name. Relational
//! values carry no zone name, so wrapping one yields a value in `UTC`.
//! TIMESTAMP precision only.

use std::cmp::Ordering;

use chrono::{DateTime, LocalResult, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use relmap_core::{
    hash_of, unknown_unwrap, unknown_wrap, Comparator, ConversionError, ImmutableMutabilityPlan,
    JdbcValue, MutabilityPlan, SessionContext, TemporalPrecision, TemporalTypeDescriptor,
    TypeDescriptor, TypeError, ValueKind, WireTypeCode, WireTypeIndicators,
};

use super::{naive_to_utc, utc_to_naive};

const TYPE_NAME: &str = "zoned_date_time";
const STAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%:z";

fn chronological(a: &DateTime<Tz>, b: &DateTime<Tz>) -> Ordering {
    a.naive_utc()
        .cmp(&b.naive_utc())
        .then_with(|| a.naive_local().cmp(&b.naive_local()))
        .then_with(|| a.timezone().name().cmp(b.timezone().name()))
}

fn parse_zoned(text: &str) -> Result<DateTime<Tz>, ConversionError> {
    let invalid = |reason: &dyn std::fmt::Display| {
        ConversionError::invalid_literal(TYPE_NAME, text, reason)
    };
    let (stamp, zone) = text
        .strip_suffix(']')
        .and_then(|t| t.split_once('['))
        .ok_or_else(|| invalid(&"expected `<date-time><offset>[<zone>]`"))?;
    let tz: Tz = zone.parse().map_err(|e| invalid(&e))?;
    let written = DateTime::parse_from_rfc3339(stamp).map_err(|e| invalid(&e))?;

    let zoned = match tz.from_local_datetime(&written.naive_local()) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earlier, later) => {
            if later.offset().fix() == *written.offset() {
                later
            } else {
                earlier
            }
        }
        // The wall-clock time falls in a gap; keep the written instant.
        LocalResult::None => written.with_timezone(&tz),
    };
    Ok(zoned)
}

/// Descriptor for `zoned_date_time`.
#[derive(Debug, Clone, Default)]
pub struct ZonedDateTimeDescriptor {
    plan: ImmutableMutabilityPlan<DateTime<Tz>>,
}

impl ZonedDateTimeDescriptor {
    pub const fn new() -> Self {
        Self {
            plan: ImmutableMutabilityPlan::new(),
        }
    }
}

impl TypeDescriptor<DateTime<Tz>> for ZonedDateTimeDescriptor {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn to_string(&self, value: &DateTime<Tz>) -> String {
        format!("{}[{}]", value.format(STAMP_FORMAT), value.timezone().name())
    }

    fn from_string(&self, text: &str) -> Result<DateTime<Tz>, ConversionError> {
        parse_zoned(text)
    }

    fn are_equal(&self, a: Option<&DateTime<Tz>>, b: Option<&DateTime<Tz>>) -> bool {
        match (a, b) {
            (Some(a), Some(b)) => a == b && a.timezone() == b.timezone(),
            (None, None) => true,
            _ => false,
        }
    }

    fn extract_hash_code(&self, value: &DateTime<Tz>) -> u64 {
        hash_of(&(value.naive_utc(), value.timezone().name()))
    }

    fn unwrap(
        &self,
        value: Option<&DateTime<Tz>>,
        kind: ValueKind,
        session: &dyn SessionContext,
    ) -> Result<Option<JdbcValue>, TypeError> {
        let Some(v) = value else { return Ok(None) };
        let out = match kind {
            ValueKind::TimestampWithOffset => JdbcValue::TimestampWithOffset(v.fixed_offset()),
            ValueKind::TimestampUtc => JdbcValue::TimestampUtc(v.with_timezone(&Utc)),
            ValueKind::Timestamp => {
                JdbcValue::Timestamp(utc_to_naive(&v.with_timezone(&Utc), session))
            }
            ValueKind::String => JdbcValue::String(self.to_string(v)),
            other => return Err(unknown_unwrap(TYPE_NAME, other)),
        };
        Ok(Some(out))
    }

    fn wrap(
        &self,
        value: Option<JdbcValue>,
        session: &dyn SessionContext,
    ) -> Result<Option<DateTime<Tz>>, TypeError> {
        let Some(value) = value else { return Ok(None) };
        let out = match value {
            JdbcValue::TimestampWithOffset(dt) => dt.with_timezone(&Tz::UTC),
            JdbcValue::TimestampUtc(dt) => dt.with_timezone(&Tz::UTC),
            JdbcValue::Timestamp(ts) => naive_to_utc(TYPE_NAME, ts, session)?.with_timezone(&Tz::UTC),
            JdbcValue::String(s) => self.from_string(&s)?,
            other => return Err(unknown_wrap(TYPE_NAME, &other)),
        };
        Ok(Some(out))
    }

    fn supported_kinds(&self) -> &'static [ValueKind] {
        &[
            ValueKind::TimestampWithOffset,
            ValueKind::TimestampUtc,
            ValueKind::Timestamp,
            ValueKind::String,
        ]
    }

    fn comparator(&self) -> Comparator<DateTime<Tz>> {
        Comparator::by(chronological)
    }

    fn mutability_plan(&self) -> &dyn MutabilityPlan<DateTime<Tz>> {
        &self.plan
    }

    fn recommended_wire_type(&self, _indicators: &dyn WireTypeIndicators) -> WireTypeCode {
        WireTypeCode::TimestampWithTimezone
    }
}

impl TemporalTypeDescriptor<DateTime<Tz>> for ZonedDateTimeDescriptor {
    fn precision(&self) -> TemporalPrecision {
        TemporalPrecision::Timestamp
    }

    fn type_name_for_precision(&self, precision: TemporalPrecision) -> Option<&'static str> {
        (precision == TemporalPrecision::Timestamp).then_some(TYPE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use relmap_core::DefaultSessionContext;

    #[test]
    fn text_carries_offset_and_zone() {
        let d = ZonedDateTimeDescriptor::new();
        let v = d.from_string("2024-07-01T12:00:00+02:00[Europe/Paris]").unwrap();
        assert_eq!(v.timezone(), Tz::Europe__Paris);
        assert_eq!(d.to_string(&v), "2024-07-01T12:00:00+02:00[Europe/Paris]");

        let winter = d.from_string("2024-01-15T08:30:00.250+01:00[Europe/Paris]").unwrap();
        assert_eq!(d.to_string(&winter), "2024-01-15T08:30:00.250+01:00[Europe/Paris]");

        for bad in [
            "2024-07-01T12:00:00+02:00",
            "2024-07-01T12:00:00+02:00[Europe/Atlantis]",
            "2024-07-01 12:00:00[Europe/Paris]",
        ] {
            assert!(
                matches!(d.from_string(bad), Err(ConversionError::InvalidLiteral { .. })),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn fall_back_keeps_the_written_offset() {
        let d = ZonedDateTimeDescriptor::new();
        let first = d.from_string("2024-11-03T01:30:00-04:00[America/New_York]").unwrap();
        let second = d.from_string("2024-11-03T01:30:00-05:00[America/New_York]").unwrap();
        assert_eq!(second.timestamp() - first.timestamp(), 3600);
        assert_eq!(d.to_string(&second), "2024-11-03T01:30:00-05:00[America/New_York]");
        assert_eq!(d.comparator().compare(&first, &second), Ordering::Less);
    }

    #[test]
    fn equality_needs_the_same_zone() {
        let d = ZonedDateTimeDescriptor::new();
        let paris = d.from_string("2024-07-01T12:00:00+02:00[Europe/Paris]").unwrap();
        let berlin = d.from_string("2024-07-01T12:00:00+02:00[Europe/Berlin]").unwrap();
        assert!(!d.are_equal(Some(&paris), Some(&berlin)));
        assert_eq!(d.comparator().compare(&berlin, &paris), Ordering::Less);
        assert!(d.are_equal(Some(&paris), Some(&paris.clone())));
    }

    #[test]
    fn relational_values_wrap_into_utc() {
        let d = ZonedDateTimeDescriptor::new();
        let ctx = DefaultSessionContext::with_time_zone(FixedOffset::east_opt(3600).unwrap());
        let v = d.from_string("2024-07-01T12:00:00+02:00[Europe/Paris]").unwrap();

        let wire = d.unwrap(Some(&v), ValueKind::Timestamp, &ctx).unwrap();
        assert!(matches!(
            wire,
            Some(JdbcValue::Timestamp(ts)) if ts.to_string() == "2024-07-01 11:00:00"
        ));
        let back = d.wrap(wire, &ctx).unwrap().unwrap();
        assert_eq!(back.timezone(), Tz::UTC);
        assert_eq!(back, v);
        assert!(!d.are_equal(Some(&back), Some(&v)));

        let offset = d.unwrap(Some(&v), ValueKind::TimestampWithOffset, &ctx).unwrap();
        assert!(matches!(
            offset,
            Some(JdbcValue::TimestampWithOffset(dt)) if dt.to_rfc3339() == "2024-07-01T12:00:00+02:00"
        ));
        assert!(d.unwrap(Some(&v), ValueKind::Date, &ctx).is_err());
    }
}
