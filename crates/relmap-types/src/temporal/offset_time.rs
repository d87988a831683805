//! `offset_time`: a wall-clock time with a fixed UTC offset.
//!
//! Text is the time followed by the offset, `10:15:30+01:00`, with `Z` for a
//! zero offset. Two values are equal only when time and offset both match.
//! They order by the instant they denote on a common day, then by local
//! time. TIME precision only.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveTime, TimeDelta, Timelike, Utc};
use relmap_core::context::{format_offset, parse_offset};
use relmap_core::{
    default_are_equal, hash_of, unknown_unwrap, unknown_wrap, Comparator, ConversionError,
    ImmutableMutabilityPlan, JdbcValue, MutabilityPlan, SessionContext, TemporalPrecision,
    TemporalTypeDescriptor, TypeDescriptor, TypeError, ValueKind, WireTypeCode,
    WireTypeIndicators,
};

use super::{epoch_date, naive_to_utc, utc_to_naive, TIME_FORMAT};

const TYPE_NAME: &str = "offset_time";
const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// A time of day at a fixed offset from UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetTime {
    time: NaiveTime,
    offset: FixedOffset,
}

impl OffsetTime {
    pub const fn new(time: NaiveTime, offset: FixedOffset) -> Self {
        Self { time, offset }
    }

    /// The local wall-clock time.
    pub fn time(&self) -> NaiveTime {
        self.time
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Nanoseconds since UTC midnight. Negative, or past a full day, when
    /// the offset carries the time across midnight.
    fn utc_nanos(&self) -> i64 {
        let local = i64::from(self.time.num_seconds_from_midnight()) * NANOS_PER_SECOND
            + i64::from(self.time.nanosecond());
        local - i64::from(self.offset.local_minus_utc()) * NANOS_PER_SECOND
    }

    /// This time on 1970-01-01.
    pub fn on_epoch_date(&self) -> DateTime<FixedOffset> {
        let local = epoch_date().and_time(self.time);
        let utc = local - TimeDelta::seconds(i64::from(self.offset.local_minus_utc()));
        DateTime::from_naive_utc_and_offset(utc, self.offset)
    }
}

impl Ord for OffsetTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.utc_nanos()
            .cmp(&other.utc_nanos())
            .then_with(|| self.time.cmp(&other.time))
    }
}

impl PartialOrd for OffsetTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for OffsetTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.time.format(TIME_FORMAT), format_offset(&self.offset))
    }
}

impl FromStr for OffsetTime {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid =
            |reason: &dyn fmt::Display| ConversionError::invalid_literal(TYPE_NAME, s, reason);
        let split = s
            .find(|c: char| matches!(c, '+' | '-' | 'Z'))
            .ok_or_else(|| invalid(&"missing UTC offset"))?;
        let (time, offset) = s.split_at(split);
        let time = time.parse::<NaiveTime>().map_err(|e| invalid(&e))?;
        let offset = parse_offset(offset).map_err(|e| invalid(&e))?;
        Ok(Self::new(time, offset))
    }
}

/// Descriptor for `offset_time`.
#[derive(Debug, Clone, Default)]
pub struct OffsetTimeDescriptor {
    plan: ImmutableMutabilityPlan<OffsetTime>,
}

impl OffsetTimeDescriptor {
    pub const fn new() -> Self {
        Self {
            plan: ImmutableMutabilityPlan::new(),
        }
    }
}

impl TypeDescriptor<OffsetTime> for OffsetTimeDescriptor {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn to_string(&self, value: &OffsetTime) -> String {
        value.to_string()
    }

    fn from_string(&self, text: &str) -> Result<OffsetTime, ConversionError> {
        text.parse()
    }

    fn are_equal(&self, a: Option<&OffsetTime>, b: Option<&OffsetTime>) -> bool {
        default_are_equal(a, b)
    }

    fn extract_hash_code(&self, value: &OffsetTime) -> u64 {
        hash_of(&(value.time, value.offset.local_minus_utc()))
    }

    fn unwrap(
        &self,
        value: Option<&OffsetTime>,
        kind: ValueKind,
        session: &dyn SessionContext,
    ) -> Result<Option<JdbcValue>, TypeError> {
        let Some(v) = value else { return Ok(None) };
        let out = match kind {
            ValueKind::Time => {
                JdbcValue::Time(v.on_epoch_date().with_timezone(&session.jdbc_time_zone()).time())
            }
            ValueKind::Timestamp => {
                JdbcValue::Timestamp(utc_to_naive(&v.on_epoch_date().with_timezone(&Utc), session))
            }
            ValueKind::TimestampWithOffset => JdbcValue::TimestampWithOffset(v.on_epoch_date()),
            ValueKind::String => JdbcValue::String(v.to_string()),
            other => return Err(unknown_unwrap(TYPE_NAME, other)),
        };
        Ok(Some(out))
    }

    fn wrap(
        &self,
        value: Option<JdbcValue>,
        session: &dyn SessionContext,
    ) -> Result<Option<OffsetTime>, TypeError> {
        let Some(value) = value else { return Ok(None) };
        let zone = session.jdbc_time_zone();
        let out = match value {
            JdbcValue::Time(time) => OffsetTime::new(time, zone),
            JdbcValue::Timestamp(ts) => {
                let local = naive_to_utc(TYPE_NAME, ts, session)?.with_timezone(&zone);
                OffsetTime::new(local.time(), zone)
            }
            JdbcValue::TimestampWithOffset(dt) => OffsetTime::new(dt.time(), *dt.offset()),
            JdbcValue::String(s) => self.from_string(&s)?,
            other => return Err(unknown_wrap(TYPE_NAME, &other)),
        };
        Ok(Some(out))
    }

    fn supported_kinds(&self) -> &'static [ValueKind] {
        &[
            ValueKind::Time,
            ValueKind::Timestamp,
            ValueKind::TimestampWithOffset,
            ValueKind::String,
        ]
    }

    fn comparator(&self) -> Comparator<OffsetTime> {
        Comparator::natural()
    }

    fn mutability_plan(&self) -> &dyn MutabilityPlan<OffsetTime> {
        &self.plan
    }

    fn recommended_wire_type(&self, _indicators: &dyn WireTypeIndicators) -> WireTypeCode {
        WireTypeCode::TimeWithTimezone
    }
}

impl TemporalTypeDescriptor<OffsetTime> for OffsetTimeDescriptor {
    fn precision(&self) -> TemporalPrecision {
        TemporalPrecision::Time
    }

    fn type_name_for_precision(&self, precision: TemporalPrecision) -> Option<&'static str> {
        (precision == TemporalPrecision::Time).then_some(TYPE_NAME)
    }
}
