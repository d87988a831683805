//! Points on the timeline: `instant` (UTC) and `offset_date_time` (with a
//! fixed offset).
//!
//! Both have TIMESTAMP precision only. Text is RFC 3339 with a `Z` suffix
//! for zero offsets. Two `offset_date_time` values are equal when they
//! denote the same instant, whatever their offsets.

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use relmap_core::{
    default_are_equal, hash_of, unknown_unwrap, unknown_wrap, Comparator, ConversionError,
    ImmutableMutabilityPlan, JdbcValue, MutabilityPlan, SessionContext, TemporalPrecision,
    TemporalTypeDescriptor, TypeDescriptor, TypeError, ValueKind, WireTypeCode,
    WireTypeIndicators,
};

use super::{naive_to_utc, utc_to_naive};

fn parse_rfc3339(type_name: &str, text: &str) -> Result<DateTime<FixedOffset>, ConversionError> {
    DateTime::parse_from_rfc3339(text).map_err(|e| ConversionError::invalid_literal(type_name, text, e))
}

// ─── instant ─────────────────────────────────────────────────────────

/// Descriptor for `instant`.
///
/// `BigInt` carries epoch milliseconds; sub-millisecond precision is dropped
/// on that path.
#[derive(Debug, Clone, Default)]
pub struct InstantDescriptor {
    plan: ImmutableMutabilityPlan<DateTime<Utc>>,
}

impl InstantDescriptor {
    pub const fn new() -> Self {
        Self {
            plan: ImmutableMutabilityPlan::new(),
        }
    }
}

impl TypeDescriptor<DateTime<Utc>> for InstantDescriptor {
    fn type_name(&self) -> &'static str {
        "instant"
    }

    fn to_string(&self, value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }

    fn from_string(&self, text: &str) -> Result<DateTime<Utc>, ConversionError> {
        parse_rfc3339(self.type_name(), text).map(|dt| dt.with_timezone(&Utc))
    }

    fn are_equal(&self, a: Option<&DateTime<Utc>>, b: Option<&DateTime<Utc>>) -> bool {
        default_are_equal(a, b)
    }

    fn extract_hash_code(&self, value: &DateTime<Utc>) -> u64 {
        hash_of(value)
    }

    fn unwrap(
        &self,
        value: Option<&DateTime<Utc>>,
        kind: ValueKind,
        session: &dyn SessionContext,
    ) -> Result<Option<JdbcValue>, TypeError> {
        let Some(v) = value else { return Ok(None) };
        let out = match kind {
            ValueKind::TimestampUtc => JdbcValue::TimestampUtc(*v),
            ValueKind::TimestampWithOffset => {
                JdbcValue::TimestampWithOffset(v.with_timezone(&session.jdbc_time_zone()))
            }
            ValueKind::Timestamp => JdbcValue::Timestamp(utc_to_naive(v, session)),
            ValueKind::BigInt => JdbcValue::BigInt(v.timestamp_millis()),
            ValueKind::String => JdbcValue::String(self.to_string(v)),
            other => return Err(unknown_unwrap(self.type_name(), other)),
        };
        Ok(Some(out))
    }

    fn wrap(
        &self,
        value: Option<JdbcValue>,
        session: &dyn SessionContext,
    ) -> Result<Option<DateTime<Utc>>, TypeError> {
        let Some(value) = value else { return Ok(None) };
        let out = match value {
            JdbcValue::TimestampUtc(dt) => dt,
            JdbcValue::TimestampWithOffset(dt) => dt.with_timezone(&Utc),
            JdbcValue::Timestamp(ts) => naive_to_utc(self.type_name(), ts, session)?,
            JdbcValue::BigInt(millis) => DateTime::from_timestamp_millis(millis)
                .ok_or_else(|| ConversionError::out_of_range(self.type_name(), millis))?,
            JdbcValue::String(s) => self.from_string(&s)?,
            other => return Err(unknown_wrap(self.type_name(), &other)),
        };
        Ok(Some(out))
    }

    fn supported_kinds(&self) -> &'static [ValueKind] {
        &[
            ValueKind::TimestampUtc,
            ValueKind::TimestampWithOffset,
            ValueKind::Timestamp,
            ValueKind::BigInt,
            ValueKind::String,
        ]
    }

    fn comparator(&self) -> Comparator<DateTime<Utc>> {
        Comparator::natural()
    }

    fn mutability_plan(&self) -> &dyn MutabilityPlan<DateTime<Utc>> {
        &self.plan
    }

    fn recommended_wire_type(&self, indicators: &dyn WireTypeIndicators) -> WireTypeCode {
        indicators.preferred_instant_type()
    }
}

impl TemporalTypeDescriptor<DateTime<Utc>> for InstantDescriptor {
    fn precision(&self) -> TemporalPrecision {
        TemporalPrecision::Timestamp
    }

    fn type_name_for_precision(&self, precision: TemporalPrecision) -> Option<&'static str> {
        (precision == TemporalPrecision::Timestamp).then_some("instant")
    }
}

// ─── offset_date_time ────────────────────────────────────────────────

/// Descriptor for `offset_date_time`.
#[derive(Debug, Clone, Default)]
pub struct OffsetDateTimeDescriptor {
    plan: ImmutableMutabilityPlan<DateTime<FixedOffset>>,
}

impl OffsetDateTimeDescriptor {
    pub const fn new() -> Self {
        Self {
            plan: ImmutableMutabilityPlan::new(),
        }
    }
}

impl TypeDescriptor<DateTime<FixedOffset>> for OffsetDateTimeDescriptor {
    fn type_name(&self) -> &'static str {
        "offset_date_time"
    }

    fn to_string(&self, value: &DateTime<FixedOffset>) -> String {
        value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }

    fn from_string(&self, text: &str) -> Result<DateTime<FixedOffset>, ConversionError> {
        parse_rfc3339(self.type_name(), text)
    }

    // `DateTime` equality and hashing already work on the instant alone.
    fn are_equal(
        &self,
        a: Option<&DateTime<FixedOffset>>,
        b: Option<&DateTime<FixedOffset>>,
    ) -> bool {
        default_are_equal(a, b)
    }

    fn extract_hash_code(&self, value: &DateTime<FixedOffset>) -> u64 {
        hash_of(value)
    }

    fn unwrap(
        &self,
        value: Option<&DateTime<FixedOffset>>,
        kind: ValueKind,
        session: &dyn SessionContext,
    ) -> Result<Option<JdbcValue>, TypeError> {
        let Some(v) = value else { return Ok(None) };
        let out = match kind {
            ValueKind::TimestampWithOffset => JdbcValue::TimestampWithOffset(*v),
            ValueKind::TimestampUtc => JdbcValue::TimestampUtc(v.with_timezone(&Utc)),
            ValueKind::Timestamp => {
                JdbcValue::Timestamp(utc_to_naive(&v.with_timezone(&Utc), session))
            }
            ValueKind::String => JdbcValue::String(self.to_string(v)),
            other => return Err(unknown_unwrap(self.type_name(), other)),
        };
        Ok(Some(out))
    }

    fn wrap(
        &self,
        value: Option<JdbcValue>,
        session: &dyn SessionContext,
    ) -> Result<Option<DateTime<FixedOffset>>, TypeError> {
        let Some(value) = value else { return Ok(None) };
        let zone = session.jdbc_time_zone();
        let out = match value {
            JdbcValue::TimestampWithOffset(dt) => dt,
            JdbcValue::TimestampUtc(dt) => dt.with_timezone(&zone),
            JdbcValue::Timestamp(ts) => {
                naive_to_utc(self.type_name(), ts, session)?.with_timezone(&zone)
            }
            JdbcValue::String(s) => self.from_string(&s)?,
            other => return Err(unknown_wrap(self.type_name(), &other)),
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

    fn comparator(&self) -> Comparator<DateTime<FixedOffset>> {
        Comparator::natural()
    }

    fn mutability_plan(&self) -> &dyn MutabilityPlan<DateTime<FixedOffset>> {
        &self.plan
    }

    fn recommended_wire_type(&self, _indicators: &dyn WireTypeIndicators) -> WireTypeCode {
        WireTypeCode::TimestampWithTimezone
    }
}

impl TemporalTypeDescriptor<DateTime<FixedOffset>> for OffsetDateTimeDescriptor {
    fn precision(&self) -> TemporalPrecision {
        TemporalPrecision::Timestamp
    }

    fn type_name_for_precision(&self, precision: TemporalPrecision) -> Option<&'static str> {
        (precision == TemporalPrecision::Timestamp).then_some("offset_date_time")
    }
}
