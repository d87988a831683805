//! # Zone Types
//!
//! `zone_offset`: a [`FixedOffset`], stored as its text form (`Z`,
//! `+02:00`, `-05:30`) or as total seconds east of UTC. Offsets order by
//! total seconds.
//!
//! `time_zone`: a named IANA zone ([`Tz`]), stored as its name
//! (`Europe/Paris`). Names are case-sensitive and order lexically.

use std::cmp::Ordering;

use chrono::FixedOffset;
use chrono_tz::Tz;
use relmap_core::context::{format_offset, parse_offset};
use relmap_core::{
    default_are_equal, hash_of, parse_literal, unknown_unwrap, unknown_wrap, Comparator,
    ConversionError, ImmutableMutabilityPlan, JdbcValue, MutabilityPlan, SessionContext,
    TypeDescriptor, TypeError, ValueKind, WireTypeCode, WireTypeIndicators,
};

const MAX_SECONDS: i32 = 18 * 3600;

fn by_total_seconds(a: &FixedOffset, b: &FixedOffset) -> Ordering {
    a.local_minus_utc().cmp(&b.local_minus_utc())
}

/// Descriptor for `zone_offset`.
#[derive(Debug, Default)]
pub struct ZoneOffsetDescriptor {
    plan: ImmutableMutabilityPlan<FixedOffset>,
}

impl ZoneOffsetDescriptor {
    pub const fn new() -> Self {
        Self {
            plan: ImmutableMutabilityPlan::new(),
        }
    }
}

impl TypeDescriptor<FixedOffset> for ZoneOffsetDescriptor {
    fn type_name(&self) -> &'static str {
        "zone_offset"
    }

    fn to_string(&self, value: &FixedOffset) -> String {
        format_offset(value)
    }

    fn from_string(&self, text: &str) -> Result<FixedOffset, ConversionError> {
        parse_offset(text)
    }

    fn are_equal(&self, a: Option<&FixedOffset>, b: Option<&FixedOffset>) -> bool {
        match (a, b) {
            (Some(a), Some(b)) => a.local_minus_utc() == b.local_minus_utc(),
            (None, None) => true,
            _ => false,
        }
    }

    fn extract_hash_code(&self, value: &FixedOffset) -> u64 {
        hash_of(&value.local_minus_utc())
    }

    fn unwrap(
        &self,
        value: Option<&FixedOffset>,
        kind: ValueKind,
        _session: &dyn SessionContext,
    ) -> Result<Option<JdbcValue>, TypeError> {
        let Some(v) = value else { return Ok(None) };
        match kind {
            ValueKind::String => Ok(Some(JdbcValue::String(format_offset(v)))),
            ValueKind::Integer => Ok(Some(JdbcValue::Integer(v.local_minus_utc()))),
            other => Err(unknown_unwrap(self.type_name(), other)),
        }
    }

    fn wrap(
        &self,
        value: Option<JdbcValue>,
        _session: &dyn SessionContext,
    ) -> Result<Option<FixedOffset>, TypeError> {
        let Some(value) = value else { return Ok(None) };
        match value {
            JdbcValue::String(s) => Ok(Some(parse_offset(&s)?)),
            JdbcValue::Integer(seconds) => Some(seconds)
                .filter(|s| s.abs() <= MAX_SECONDS)
                .and_then(FixedOffset::east_opt)
                .map(Some)
                .ok_or_else(|| {
                    TypeError::from(ConversionError::out_of_range(self.type_name(), seconds))
                }),
            other => Err(unknown_wrap(self.type_name(), &other)),
        }
    }

    fn supported_kinds(&self) -> &'static [ValueKind] {
        &[ValueKind::String, ValueKind::Integer]
    }

    fn comparator(&self) -> Comparator<FixedOffset> {
        Comparator::by(by_total_seconds)
    }

    fn mutability_plan(&self) -> &dyn MutabilityPlan<FixedOffset> {
        &self.plan
    }

    fn recommended_wire_type(&self, _indicators: &dyn WireTypeIndicators) -> WireTypeCode {
        WireTypeCode::VarChar
    }
}

// ─── time_zone ───────────────────────────────────────────────────────

fn by_name(a: &Tz, b: &Tz) -> Ordering {
    a.name().cmp(b.name())
}

/// Descriptor for `time_zone`.
#[derive(Debug, Default)]
pub struct TimeZoneDescriptor {
    plan: ImmutableMutabilityPlan<Tz>,
}

impl TimeZoneDescriptor {
    pub const fn new() -> Self {
        Self {
            plan: ImmutableMutabilityPlan::new(),
        }
    }
}

impl TypeDescriptor<Tz> for TimeZoneDescriptor {
    fn type_name(&self) -> &'static str {
        "time_zone"
    }

    fn to_string(&self, value: &Tz) -> String {
        value.name().to_string()
    }

    fn from_string(&self, text: &str) -> Result<Tz, ConversionError> {
        parse_literal(self.type_name(), text)
    }

    fn are_equal(&self, a: Option<&Tz>, b: Option<&Tz>) -> bool {
        default_are_equal(a, b)
    }

    fn extract_hash_code(&self, value: &Tz) -> u64 {
        hash_of(value.name())
    }

    fn unwrap(
        &self,
        value: Option<&Tz>,
        kind: ValueKind,
        _session: &dyn SessionContext,
    ) -> Result<Option<JdbcValue>, TypeError> {
        let Some(v) = value else { return Ok(None) };
        match kind {
            ValueKind::String => Ok(Some(JdbcValue::String(v.name().to_string()))),
            other => Err(unknown_unwrap(self.type_name(), other)),
        }
    }

    fn wrap(
        &self,
        value: Option<JdbcValue>,
        _session: &dyn SessionContext,
    ) -> Result<Option<Tz>, TypeError> {
        match value {
            None => Ok(None),
            Some(JdbcValue::String(s)) => Ok(Some(self.from_string(&s)?)),
            Some(other) => Err(unknown_wrap(self.type_name(), &other)),
        }
    }

    fn supported_kinds(&self) -> &'static [ValueKind] {
        &[ValueKind::String]
    }

    fn comparator(&self) -> Comparator<Tz> {
        Comparator::by(by_name)
    }

    fn mutability_plan(&self) -> &dyn MutabilityPlan<Tz> {
        &self.plan
    }

    fn recommended_wire_type(&self, _indicators: &dyn WireTypeIndicators) -> WireTypeCode {
        WireTypeCode::VarChar
    }
}
